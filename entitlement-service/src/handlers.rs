//! HTTP handlers for entitlement checks.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use service_core::error::AppError;

use crate::startup::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct ValidateResponse {
    pub customer_number: String,
    pub service: String,
    pub allowance: u16,
}

/// `GET /v1/entitlements/:customer_number/:service`
pub async fn validate_entitlement(
    State(state): State<AppState>,
    Path((customer_number, service)): Path<(String, String)>,
) -> Result<Json<ValidateResponse>, AppError> {
    let allowance = state
        .validator
        .validate(&customer_number, &service)
        .await?;

    Ok(Json(ValidateResponse {
        customer_number,
        service,
        allowance,
    }))
}
