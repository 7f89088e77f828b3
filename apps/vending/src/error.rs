//! # Application Error Type
//!
//! Errors that end the program.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Console App                        │
//! │                                                                         │
//! │  Customer mistakes (CoreError)                                          │
//! │  ├── bad selection, bad quantity, sold out, expired                    │
//! │  └── printed by the console, loop re-prompts ── never an AppError      │
//! │                                                                         │
//! │  Fatal problems (AppError)                                              │
//! │  ├── invalid configuration                                             │
//! │  ├── catalog fails validation                                          │
//! │  └── stdin/stdout broken                                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  "error: ..." on stderr, exit code 1                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;
use vend_core::CoreError;

use crate::config::ConfigError;

/// Fatal application error.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("machine setup failed: {0}")]
    Core(#[from] CoreError),

    #[error("console I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode report: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err: AppError = ConfigError::InvalidValue {
            key: "VEND_SEED".to_string(),
            value: "abc".to_string(),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "configuration error: invalid value for VEND_SEED: abc"
        );

        let err: AppError = CoreError::InvalidQuantity { requested: 0 }.into();
        assert_eq!(
            err.to_string(),
            "machine setup failed: Quantity must be at least 1 (got 0)"
        );
    }
}
