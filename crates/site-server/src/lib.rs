//! # site-server
//!
//! Local development server for the landing page.
//!
//! This crate provides:
//! - Axum-based HTTP server with a single request dispatcher
//! - Static file serving from one root directory, guarded against traversal
//! - Mock payments API backed by `pay-mock`
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/`, any static path | File bytes, or 404 |
//! | OPTIONS | `/api/payments*` | CORS preflight (204) |
//! | GET | `/api/payments/config` | Payment settings |
//! | POST | `/api/payments/session` | Create mock payment session |
//! | * | `/api/payments/<unknown>` | 404 JSON |

pub mod config;
pub mod handlers;
pub mod routes;
pub mod state;
pub mod static_files;

pub use config::AppConfig;
pub use routes::create_router;
pub use state::AppState;
