//! # Mock Sessions
//!
//! Synthetic payment sessions for UI development.
//! No network calls, no money movement.

use async_trait::async_trait;
use chrono::Utc;
use pay_core::{
    confirmation_url, PaymentProvider, PaymentResult, PaymentSession, PaymentsConfig,
    SessionRequest,
};
use tracing::{debug, instrument};

/// Mock payment provider
///
/// Sessions are stamped with the configured provider name, so the landing
/// page sees the same `provider` in `/config` and in created sessions.
pub struct MockProvider {
    config: PaymentsConfig,
}

impl MockProvider {
    /// Registry name of this provider
    pub const NAME: &'static str = "mock";

    /// Create a new mock provider
    pub fn new(config: PaymentsConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl PaymentProvider for MockProvider {
    #[instrument(skip(self, request), fields(amount = request.amount))]
    async fn create_session(&self, request: &SessionRequest) -> PaymentResult<PaymentSession> {
        // the confirmation id is drawn separately from the session id
        let confirmation_id = PaymentSession::generate_id();

        let session = PaymentSession {
            id: PaymentSession::generate_id(),
            provider: self.config.provider.clone(),
            amount: request.amount,
            currency: request.currency_or(&self.config).to_string(),
            description: request.description_or_default().to_string(),
            confirmation_url: confirmation_url(&self.config.return_url, &confirmation_id),
            created_at: Utc::now(),
        };

        debug!(
            "Created mock session {} ({} {})",
            session.id, session.amount, session.currency
        );

        Ok(session)
    }

    fn provider_name(&self) -> &'static str {
        Self::NAME
    }
}
