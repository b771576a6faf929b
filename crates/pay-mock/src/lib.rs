//! # pay-mock
//!
//! Mock payment provider for landing-server.
//!
//! `MockProvider` implements `PaymentProvider` by fabricating sessions:
//! - `sess_<uuid>` ids
//! - a confirmation URL built from the configured return URL
//! - currency and description defaults taken from `PaymentsConfig`
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pay_core::{PaymentProvider, PaymentsConfig, SessionRequest};
//! use pay_mock::MockProvider;
//!
//! let provider = MockProvider::new(PaymentsConfig::from_env());
//! let session = provider.create_session(&SessionRequest::new(1490.0)?).await?;
//! ```

pub mod provider;

// Re-exports
pub use provider::MockProvider;
