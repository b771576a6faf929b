//! # Payments Handlers
//!
//! Handlers behind `/api/payments`. They return plain response values; the
//! dispatcher attaches the CORS headers.

use crate::state::AppState;
use axum::{
    body::{to_bytes, Body},
    http::{header, HeaderName, StatusCode},
    Json,
};
use pay_core::{PaymentError, PaymentSession, PaymentsConfig, SessionRequest};
use serde::Serialize;
use tracing::{error, info, instrument, warn};

/// Body of the 404 response for unknown API routes
pub const ROUTE_NOT_FOUND_MESSAGE: &str = "Маршрут не найден";

/// Request bodies larger than this are rejected as malformed
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Content type of every JSON body the payments API returns
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Headers attached to every payments API response
pub const CORS_HEADERS: [(HeaderName, &str); 3] = [
    (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
    (header::ACCESS_CONTROL_ALLOW_METHODS, "GET,POST,OPTIONS"),
    (header::ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type"),
];

// =============================================================================
// Request/Response Types
// =============================================================================

/// `GET /api/payments/config` response
#[derive(Debug, Serialize)]
pub struct ConfigResponse {
    pub config: PaymentsConfig,
}

/// `POST /api/payments/session` response
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub session: PaymentSession,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

pub type ApiError = (StatusCode, Json<ErrorResponse>);

fn payment_error_to_response(err: PaymentError) -> ApiError {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(ErrorResponse::new(err.to_string())))
}

// =============================================================================
// Handlers
// =============================================================================

/// CORS preflight: 204, no body
pub fn preflight() -> StatusCode {
    StatusCode::NO_CONTENT
}

/// Current payment settings
pub fn get_config(state: &AppState) -> Json<ConfigResponse> {
    Json(ConfigResponse {
        config: state.config.payments.clone(),
    })
}

/// Create a mock payment session
#[instrument(skip(state, body))]
pub async fn create_session(
    state: &AppState,
    body: Body,
) -> Result<Json<SessionResponse>, ApiError> {
    let bytes = to_bytes(body, MAX_BODY_BYTES).await.map_err(|e| {
        warn!("Failed to read session request body: {}", e);
        payment_error_to_response(PaymentError::invalid_json())
    })?;

    let request = SessionRequest::from_json_bytes(&bytes).map_err(reject)?;
    let provider = state.provider().map_err(reject)?;
    let session = provider.create_session(&request).await.map_err(reject)?;

    info!(
        "Created session {} via {}: {} {}",
        session.id,
        provider.provider_name(),
        session.amount,
        session.currency
    );

    Ok(Json(SessionResponse { session }))
}

/// Log a failed session request and convert it. Client errors are routine.
fn reject(err: PaymentError) -> ApiError {
    if err.is_client_error() {
        info!("Rejected session request: {}", err);
    } else {
        error!("Failed to create session: {}", err);
    }
    payment_error_to_response(err)
}

/// Anything under the payments prefix that no handler claims
pub fn route_not_found() -> ApiError {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse::new(ROUTE_NOT_FOUND_MESSAGE)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response() {
        let err = ErrorResponse::new("Test error");
        assert_eq!(err.error, "Test error");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json, serde_json::json!({ "error": "Test error" }));
    }

    #[test]
    fn test_payment_error_conversion() {
        let (status, Json(body)) = payment_error_to_response(PaymentError::invalid_amount());
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.error, pay_core::error::INVALID_AMOUNT_MESSAGE);

        let (status, _) = payment_error_to_response(PaymentError::Configuration("x".into()));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_route_not_found() {
        let (status, Json(body)) = route_not_found();
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.error, ROUTE_NOT_FOUND_MESSAGE);
    }
}
