//! # Routes
//!
//! Request dispatcher. Every request lands in [`dispatch`], which classifies
//! it by method and path prefix:
//!
//! - `OPTIONS /api/payments*` - CORS preflight, 204
//! - `GET  /api/payments/config` - payment settings
//! - `POST /api/payments/session` - create a mock session
//! - any other `/api/payments*` - 404 JSON
//! - everything else - static file

use crate::handlers::{self, CORS_HEADERS, JSON_CONTENT_TYPE};
use crate::state::AppState;
use crate::static_files;
use axum::{
    extract::{Request, State},
    http::{header, Method},
    response::{IntoResponse, Response},
    Router,
};
use tower_http::trace::TraceLayer;

/// Prefix owned by the payments API
pub const PAYMENTS_PREFIX: &str = "/api/payments";

/// Where a request goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Preflight,
    PaymentsConfig,
    CreateSession,
    UnknownApi,
    Static,
}

impl Route {
    /// Classify a request. The path must already be stripped of its query.
    pub fn classify(method: &Method, path: &str) -> Self {
        if !path.starts_with(PAYMENTS_PREFIX) {
            return Route::Static;
        }

        match (method, &path[PAYMENTS_PREFIX.len()..]) {
            (&Method::OPTIONS, _) => Route::Preflight,
            (&Method::GET, "/config") => Route::PaymentsConfig,
            (&Method::POST, "/session") => Route::CreateSession,
            _ => Route::UnknownApi,
        }
    }
}

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .fallback(dispatch)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Single entry point for every request
pub async fn dispatch(State(state): State<AppState>, request: Request) -> Response {
    let (parts, body) = request.into_parts();
    let path = parts.uri.path();

    match Route::classify(&parts.method, path) {
        Route::Preflight => (CORS_HEADERS, handlers::preflight()).into_response(),
        Route::PaymentsConfig => api_json(handlers::get_config(&state)),
        Route::CreateSession => api_json(handlers::create_session(&state, body).await),
        Route::UnknownApi => api_json(handlers::route_not_found()),
        Route::Static => static_files::serve(&state.static_root, path).await,
    }
}

/// CORS headers plus an explicit UTF-8 JSON content type
fn api_json(body: impl IntoResponse) -> Response {
    (
        CORS_HEADERS,
        [(header::CONTENT_TYPE, JSON_CONTENT_TYPE)],
        body,
    )
        .into_response()
}
