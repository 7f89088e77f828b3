//! # Vending Machine Console
//!
//! Wires configuration, logging, the starting catalog and the console loop
//! around a [`VendingMachine`].
//!
//! ## Module Organization
//! ```text
//! vend_cli/
//! ├── lib.rs      ◄─── You are here (flags, startup, run)
//! ├── config.rs   ◄─── MachineConfig from env + flags
//! ├── catalog.rs  ◄─── Products loaded at startup
//! ├── console.rs  ◄─── Prompts, purchase loop, receipts
//! └── error.rs    ◄─── AppError
//! ```
//!
//! ## Startup Sequence
//! 1. Parse flags
//! 2. Initialize tracing (stderr, so prompts on stdout stay clean)
//! 3. Load configuration
//! 4. Stock the machine and announce each product
//! 5. Apply random discounts (unless disabled)
//! 6. Serve customers until input ends or nobody else is waiting
//! 7. Print the sales summary (and JSON ledger with `--json`)

pub mod catalog;
pub mod config;
pub mod console;
pub mod error;

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use chrono::Utc;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use vend_core::VendingMachine;

use crate::config::{ConfigOverrides, MachineConfig};
use crate::console::Console;
use crate::error::AppResult;

#[derive(Debug, Parser)]
#[command(
    name = "vending-machine",
    about = "Interactive vending machine simulator",
    after_help = "Environment:\n  VEND_MACHINE_NAME, VEND_MAX_DISCOUNT, VEND_SEED\n  RUST_LOG overrides the log filter"
)]
pub struct Cli {
    /// Machine name shown to customers
    #[arg(long)]
    name: Option<String>,

    /// Upper bound for random discounts, in whole percent (0-100)
    #[arg(long, value_name = "PCT")]
    max_discount: Option<u32>,

    /// Skip random discounts at startup
    #[arg(long)]
    no_discounts: bool,

    /// Seed the discount RNG for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Print the final sales ledger as JSON
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            machine_name: self.name.clone(),
            max_discount_pct: self.max_discount,
            seed: self.seed,
            no_discounts: self.no_discounts,
            json_report: self.json,
        }
    }
}

/// Entry point used by `main`.
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match MachineConfig::from_env().and_then(|c| c.with_overrides(cli.overrides())) {
        Ok(config) => config,
        Err(err) => {
            error!(error = %err, "Invalid configuration");
            eprintln!("error: {}", err);
            return ExitCode::FAILURE;
        }
    };
    info!(?config, "Configuration loaded");

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut console = Console::new(stdin.lock(), stdout.lock());

    match run_machine(&config, &mut console) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "Vending machine stopped");
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}

/// Runs the whole program against `console`.
pub fn run_machine<R: BufRead, W: Write>(
    config: &MachineConfig,
    console: &mut Console<R, W>,
) -> AppResult<()> {
    let mut machine = VendingMachine::new(config.machine_name.as_str())?;
    let machine_name = machine.name().to_string();

    for product in catalog::default_catalog(Utc::now())? {
        let added = machine.add_product(product);
        console.announce_added(&machine_name, added)?;
    }
    console.say("")?;
    console.display_products(&machine)?;

    if config.apply_discounts {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let applied = machine.apply_random_discounts(&mut rng, config.max_discount_pct)?;
        console.say("")?;
        console.report_discounts(&applied)?;
    }

    console.serve_customers(&mut machine, Utc::now)?;
    console.print_ledger(machine.name(), machine.ledger())?;

    if config.json_report {
        let report = serde_json::to_string_pretty(machine.ledger())?;
        console.say(&report)?;
    }

    Ok(())
}

/// Initializes the tracing subscriber.
///
/// ## Log Levels
/// - Default: WARN (DEBUG with `--verbose`)
/// - `RUST_LOG=vend_core=debug` - purchase-level detail from the core crate
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
