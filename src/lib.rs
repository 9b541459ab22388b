//! finance_log Library
//!
//! Rotating-file logging for finance operations, an HTTP endpoint that records
//! them, and a single-balance withdrawal processor with detailed errors.

mod macros;

pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod processor;

pub use config::{Config, ConfigError};
pub use domain::{Amount, AmountError, Balance, DetailedError, DomainError, ErrorCode};
pub use error::{AppError, AppResult};
pub use logging::{configure, LoggerConfig, LoggerHandle, LoggingError};
pub use processor::{run_withdrawal, TransactionProcessor};
