//! Domain Error Types
//!
//! Pure domain errors that don't depend on infrastructure. They never leave
//! the processor bare: see [`DetailedError`](super::DetailedError).

use thiserror::Error;

use super::{Amount, Balance};

/// Business rule violations detected while processing a transaction.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    /// Requested withdrawal is larger than the current balance
    #[error("Insufficient funds for the withdrawal")]
    InsufficientFunds { requested: Amount, available: Balance },
}

impl DomainError {
    pub fn insufficient_funds(requested: Amount, available: Balance) -> Self {
        Self::InsufficientFunds {
            requested,
            available,
        }
    }
}
