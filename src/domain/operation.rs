//! Finance operation records
//!
//! A named operation and the amount it moved, written to the log as a single
//! INFO record.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// An operation reported by a client, logged but not applied to any balance.
///
/// Both fields keep whatever JSON the client sent; only their presence is
/// checked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinanceOperation {
    pub operation: Value,
    pub amount: Value,
}

impl FinanceOperation {
    pub fn new(operation: impl Into<Value>, amount: impl Into<Value>) -> Self {
        Self {
            operation: operation.into(),
            amount: amount.into(),
        }
    }
}

impl fmt::Display for FinanceOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Operation: {}, Amount: {}",
            PlainValue(&self.operation),
            PlainValue(&self.amount)
        )
    }
}

/// Strings without their JSON quotes, everything else as JSON text.
struct PlainValue<'a>(&'a Value);

impl fmt::Display for PlainValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Value::String(s) => f.write_str(s),
            other => write!(f, "{other}"),
        }
    }
}

/// Write `operation` to the active logger at INFO.
pub fn log_finance_operation(operation: &FinanceOperation) {
    tracing::info!("{}", operation);
}
