//! # vending-machine
//!
//! Console entry point. All setup lives in `lib.rs` for testability.

use std::process::ExitCode;

fn main() -> ExitCode {
    vend_cli::run()
}
