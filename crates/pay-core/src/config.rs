//! # Payments Configuration
//!
//! Public payment settings exposed to the landing page.
//! Built once from environment variables, then passed around by value.

use serde::{Deserialize, Serialize};

pub const PROVIDER_VAR: &str = "PAYMENTS_PROVIDER";
pub const PUBLIC_KEY_VAR: &str = "PAYMENTS_PUBLIC_KEY";
pub const RETURN_URL_VAR: &str = "PAYMENTS_RETURN_URL";
pub const CURRENCY_VAR: &str = "PAYMENTS_DEFAULT_CURRENCY";
pub const LOCALE_VAR: &str = "PAYMENTS_LOCALE";

pub const DEFAULT_PROVIDER: &str = "mock";
pub const DEFAULT_PUBLIC_KEY: &str = "pk_test_mocked";
pub const DEFAULT_RETURN_URL: &str = "http://localhost:3000/thanks";
pub const DEFAULT_CURRENCY: &str = "RUB";
pub const DEFAULT_LOCALE: &str = "ru-RU";

/// Payment settings served by `GET /api/payments/config`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentsConfig {
    /// Provider name (e.g., "mock")
    pub provider: String,

    /// Publishable key handed to the browser
    pub public_key: String,

    /// Where the provider sends the customer after confirmation
    pub return_url: String,

    /// Default ISO 4217 currency code
    pub currency: String,

    /// UI locale (e.g., "ru-RU")
    pub locale: String,
}

impl PaymentsConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// Empty values are treated the same as missing ones.
    pub fn from_vars<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Self {
            provider: var(PROVIDER_VAR, DEFAULT_PROVIDER),
            public_key: var(PUBLIC_KEY_VAR, DEFAULT_PUBLIC_KEY),
            return_url: var(RETURN_URL_VAR, DEFAULT_RETURN_URL),
            currency: var(CURRENCY_VAR, DEFAULT_CURRENCY),
            locale: var(LOCALE_VAR, DEFAULT_LOCALE),
        }
    }

    /// Builder: set provider name
    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = provider.into();
        self
    }

    /// Builder: set return URL
    pub fn with_return_url(mut self, url: impl Into<String>) -> Self {
        self.return_url = url.into();
        self
    }

    /// Builder: set default currency
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }
}

impl Default for PaymentsConfig {
    fn default() -> Self {
        Self::from_vars(|_| None)
    }
}
