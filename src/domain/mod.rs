//! Domain module
//!
//! Core domain types: money, operations and the errors raised while
//! processing them.

pub mod amount;
pub mod detailed;
pub mod error;
pub mod operation;

pub use amount::{Amount, AmountError, Balance};
pub use detailed::{DetailedError, ErrorCode, SourceLocation};
pub use error::DomainError;
pub use operation::{log_finance_operation, FinanceOperation};
