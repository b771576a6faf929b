//! # Payment Provider Trait
//!
//! Capability interface for payment providers.
//! Implementations: mock (today), real gateways later.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  PaymentProvider (trait)                    │
//! │  ├── create_session()                                       │
//! │  └── provider_name()                                        │
//! └─────────────────────────────────────────────────────────────┘
//!                            ▲
//!          ┌─────────────────┴─────────────────┐
//!          │                                   │
//!  ┌───────┴───────┐                   ┌───────┴───────┐
//!  │ MockProvider  │                   │ real gateway  │
//!  │  (pay-mock)   │                   │   (future)    │
//!  └───────────────┘                   └───────────────┘
//! ```

use crate::error::PaymentResult;
use crate::session::{PaymentSession, SessionRequest};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

/// Core trait for payment provider implementations.
///
/// The dispatcher and the HTTP contract only ever see this trait, so a real
/// provider can replace the mock one without touching them.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Create a payment session for a validated request.
    async fn create_session(&self, request: &SessionRequest) -> PaymentResult<PaymentSession>;

    /// Get the provider name (for logging and routing).
    fn provider_name(&self) -> &'static str;
}

/// Type alias for a boxed payment provider (dynamic dispatch)
pub type BoxedPaymentProvider = Arc<dyn PaymentProvider>;

/// Registry of providers with a configured default
#[derive(Clone)]
pub struct ProviderSelector {
    providers: HashMap<String, BoxedPaymentProvider>,
    default_provider: String,
}

impl ProviderSelector {
    /// Create a new selector with a default provider
    pub fn new(default_provider: impl Into<String>) -> Self {
        Self {
            providers: HashMap::new(),
            default_provider: default_provider.into(),
        }
    }

    /// Register a payment provider
    pub fn register(&mut self, provider: BoxedPaymentProvider) {
        let name = provider.provider_name().to_string();
        self.providers.insert(name, provider);
    }

    /// Register with builder pattern
    pub fn with_provider(mut self, provider: BoxedPaymentProvider) -> Self {
        self.register(provider);
        self
    }

    /// Get the default provider
    pub fn default_provider(&self) -> Option<&BoxedPaymentProvider> {
        self.providers.get(&self.default_provider)
    }

    /// Get a provider by name
    pub fn get(&self, name: &str) -> Option<&BoxedPaymentProvider> {
        self.providers.get(name)
    }

    /// Get provider or fall back to default
    pub fn get_or_default(&self, name: Option<&str>) -> Option<&BoxedPaymentProvider> {
        match name {
            Some(n) => self.get(n).or_else(|| self.default_provider()),
            None => self.default_provider(),
        }
    }

    /// List all registered providers
    pub fn providers(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.providers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    struct Fixed(&'static str);

    #[async_trait]
    impl PaymentProvider for Fixed {
        async fn create_session(&self, request: &SessionRequest) -> PaymentResult<PaymentSession> {
            Ok(PaymentSession {
                id: PaymentSession::generate_id(),
                provider: self.0.to_string(),
                amount: request.amount,
                currency: "RUB".to_string(),
                description: request.description_or_default().to_string(),
                confirmation_url: "http://localhost/thanks".to_string(),
                created_at: Utc::now(),
            })
        }

        fn provider_name(&self) -> &'static str {
            self.0
        }
    }

    #[test]
    fn test_empty_selector() {
        let selector = ProviderSelector::new("mock");
        assert!(selector.providers().is_empty());
        assert!(selector.default_provider().is_none());
    }

    #[tokio::test]
    async fn test_fallback_to_default() {
        let selector = ProviderSelector::new("mock")
            .with_provider(Arc::new(Fixed("mock")))
            .with_provider(Arc::new(Fixed("other")));

        assert_eq!(selector.providers(), vec!["mock", "other"]);

        let provider = selector.get_or_default(Some("unknown")).unwrap();
        assert_eq!(provider.provider_name(), "mock");

        let provider = selector.get_or_default(Some("other")).unwrap();
        let session = provider
            .create_session(&SessionRequest::new(5.0).unwrap())
            .await
            .unwrap();
        assert_eq!(session.provider, "other");
    }
}
