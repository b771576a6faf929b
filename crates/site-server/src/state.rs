//! # Application State
//!
//! Shared state for the Axum application.
//! Holds the immutable configuration, the static root and the payment
//! providers. Nothing in here changes after startup.

use crate::config::AppConfig;
use crate::static_files::StaticRoot;
use anyhow::Context;
use pay_core::{BoxedPaymentProvider, PaymentError, PaymentResult, ProviderSelector};
use pay_mock::MockProvider;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Application config
    pub config: Arc<AppConfig>,
    /// Canonical static root
    pub static_root: StaticRoot,
    /// Payment provider registry
    pub providers: ProviderSelector,
}

impl AppState {
    /// Build state from a config; fails if the static root is unusable
    pub fn new(config: AppConfig) -> anyhow::Result<Self> {
        let static_root = StaticRoot::new(&config.static_root).with_context(|| {
            format!(
                "static root {} is not a readable directory",
                config.static_root.display()
            )
        })?;

        // the mock provider serves every configured provider name
        let mut providers = ProviderSelector::new(MockProvider::NAME);
        providers.register(Arc::new(MockProvider::new(config.payments.clone())));

        if providers.get(&config.payments.provider).is_none() {
            tracing::warn!(
                "Payment provider '{}' has no implementation, sessions are mocked",
                config.payments.provider
            );
        }

        Ok(Self {
            config: Arc::new(config),
            static_root,
            providers,
        })
    }

    /// Build state from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        Self::new(AppConfig::from_env())
    }

    /// Provider handling session creation
    pub fn provider(&self) -> PaymentResult<&BoxedPaymentProvider> {
        self.providers
            .get_or_default(Some(&self.config.payments.provider))
            .ok_or_else(|| {
                PaymentError::Configuration(format!(
                    "no payment provider registered for '{}'",
                    self.config.payments.provider
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pay_core::PaymentsConfig;

    #[test]
    fn test_unknown_provider_falls_back_to_mock() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::new(dir.path())
            .with_payments(PaymentsConfig::default().with_provider("yookassa"));

        let state = AppState::new(config).unwrap();
        assert_eq!(state.provider().unwrap().provider_name(), "mock");
        assert_eq!(state.providers.providers(), vec!["mock"]);
    }

    #[test]
    fn test_missing_static_root_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = AppState::new(AppConfig::new(dir.path().join("missing")));
        assert!(result.is_err());
    }
}
