//! # pay-core
//!
//! Core types and traits for the landing-server payments API.
//!
//! This crate provides:
//! - `PaymentsConfig` for the public payment settings
//! - `SessionRequest` and `PaymentSession` for session creation
//! - `PaymentProvider` trait and `ProviderSelector` for swappable providers
//! - `PaymentError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use pay_core::{PaymentProvider, SessionRequest};
//!
//! let request = SessionRequest::from_json_bytes(br#"{"amount": 1490}"#)?;
//! let session = provider.create_session(&request).await?;
//!
//! // Redirect user to session.confirmation_url
//! ```

pub mod config;
pub mod error;
pub mod provider;
pub mod session;

// Re-exports for convenience
pub use config::PaymentsConfig;
pub use error::{PaymentError, PaymentResult};
pub use provider::{BoxedPaymentProvider, PaymentProvider, ProviderSelector};
pub use session::{confirmation_url, PaymentSession, SessionRequest, DEFAULT_DESCRIPTION};
