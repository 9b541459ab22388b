//! Transaction Processor
//!
//! Holds a single balance and applies withdrawals against it. A rejected
//! withdrawal leaves the balance untouched and surfaces a [`DetailedError`]
//! pointing at the check that failed.
//!
//! `withdraw` takes `&mut self`: sharing one processor between tasks needs an
//! outer lock around the whole read-compare-subtract sequence.

use tracing::{error, info};

use crate::detailed_error;
use crate::domain::{Amount, Balance, DetailedError, DomainError};

/// Single-balance withdrawal processor.
#[derive(Debug, Clone)]
pub struct TransactionProcessor {
    balance: Balance,
}

impl TransactionProcessor {
    pub fn new(initial_balance: Balance) -> Self {
        Self {
            balance: initial_balance,
        }
    }

    pub fn balance(&self) -> &Balance {
        &self.balance
    }

    /// Withdraw `amount` and return the new balance.
    ///
    /// # Errors
    /// `DomainError::InsufficientFunds` wrapped with the default error code
    /// when `amount` exceeds the balance.
    #[tracing::instrument(name = "withdraw", skip_all, fields(amount = %amount))]
    pub fn withdraw(&mut self, amount: Amount) -> Result<Balance, DetailedError> {
        let Some(new_balance) = self.balance.checked_debit(&amount) else {
            return Err(detailed_error!(DomainError::insufficient_funds(
                amount,
                self.balance
            )));
        };

        self.balance = new_balance;
        info!("Transaction successful! New balance: {}", self.balance);
        Ok(self.balance)
    }
}

/// Attempt one withdrawal the way the command-line tool does: announce it,
/// log a rejection at ERROR instead of aborting, and always log completion.
#[tracing::instrument(name = "run_withdrawal", skip_all, fields(amount = %amount))]
pub fn run_withdrawal(
    processor: &mut TransactionProcessor,
    amount: Amount,
) -> Result<Balance, DetailedError> {
    info!(
        "Attempting to withdraw {} from an account balance of {}.",
        amount,
        processor.balance()
    );

    let result = processor.withdraw(amount);
    if let Err(ref e) = result {
        error!("{}", e);
    }

    info!("Transaction processing completed.");
    result
}
