//! API Routes
//!
//! HTTP endpoint definitions.

use axum::{extract::rejection::JsonRejection, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{log_finance_operation, FinanceOperation};
use crate::error::AppResult;

pub const OPERATION_LOGGED: &str = "Operation logged successfully!";

// =========================================================================
// Request/Response types
// =========================================================================

/// Any JSON value is accepted for either field; it is logged as sent.
#[derive(Debug, Serialize, Deserialize)]
pub struct LogOperationRequest {
    pub operation: Value,
    pub amount: Value,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

// =========================================================================
// API Router
// =========================================================================

/// Create the API router
pub fn create_router() -> Router {
    Router::new().route("/log_operation", post(log_operation))
}

// =========================================================================
// Handlers
// =========================================================================

/// POST /log_operation
#[tracing::instrument(name = "log_operation", skip_all)]
async fn log_operation(
    payload: Result<Json<LogOperationRequest>, JsonRejection>,
) -> AppResult<Json<MessageResponse>> {
    let Json(req) = payload?;

    log_finance_operation(&FinanceOperation::new(req.operation, req.amount));

    Ok(Json(MessageResponse {
        message: OPERATION_LOGGED.to_string(),
    }))
}
