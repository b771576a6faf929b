//! # Session Types
//!
//! Session requests as posted by the landing page, and the synthetic
//! payment sessions returned to it.

use crate::config::PaymentsConfig;
use crate::error::{PaymentError, PaymentResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Description used when the request does not carry one
pub const DEFAULT_DESCRIPTION: &str = "Покупка тарифа";

/// Prefix shared by every generated session id
pub const SESSION_ID_PREFIX: &str = "sess_";

/// Query parameter carrying the session id in confirmation URLs
pub const SESSION_ID_PARAM: &str = "session_id";

/// A validated request to create a payment session
#[derive(Debug, Clone, PartialEq)]
pub struct SessionRequest {
    /// Amount to charge, always finite and positive
    pub amount: f64,

    /// Requested currency, falls back to the configured default
    pub currency: Option<String>,

    /// Purchase description, falls back to [`DEFAULT_DESCRIPTION`]
    pub description: Option<String>,
}

impl SessionRequest {
    /// Create a request for the given amount
    pub fn new(amount: f64) -> PaymentResult<Self> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(PaymentError::invalid_amount());
        }

        Ok(Self {
            amount,
            currency: None,
            description: None,
        })
    }

    /// Parse a raw request body.
    ///
    /// An empty (or whitespace-only) body is read as `{}` and therefore fails
    /// validation rather than parsing.
    pub fn from_json_bytes(body: &[u8]) -> PaymentResult<Self> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Self::from_value(&Value::Null);
        }

        let value: Value =
            serde_json::from_slice(body).map_err(|_| PaymentError::invalid_json())?;
        Self::from_value(&value)
    }

    /// Extract a request from an already parsed JSON document.
    ///
    /// Anything that is not an object carries no fields.
    pub fn from_value(value: &Value) -> PaymentResult<Self> {
        let field = |name: &str| value.as_object().and_then(|obj| obj.get(name));

        let amount = field("amount")
            .and_then(parse_amount)
            .ok_or_else(PaymentError::invalid_amount)?;

        let mut request = Self::new(amount)?;
        request.currency = field("currency").and_then(non_empty_string);
        request.description = field("description").and_then(non_empty_string);
        Ok(request)
    }

    /// Builder: set currency
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    /// Builder: set description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Currency to charge in, given the configured default
    pub fn currency_or<'a>(&'a self, config: &'a PaymentsConfig) -> &'a str {
        self.currency.as_deref().unwrap_or(&config.currency)
    }

    /// Description to show, falling back to the default one
    pub fn description_or_default(&self) -> &str {
        self.description.as_deref().unwrap_or(DEFAULT_DESCRIPTION)
    }
}

/// Accepts JSON numbers and numeric strings, like a browser form would send
fn parse_amount(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn non_empty_string(value: &Value) -> Option<String> {
    value
        .as_str()
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// A synthetic payment session. Never persisted, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSession {
    /// Session id (`sess_<uuid>`)
    pub id: String,

    /// Provider that created the session
    pub provider: String,

    /// Amount to charge
    pub amount: f64,

    /// Currency code
    pub currency: String,

    /// Purchase description
    pub description: String,

    /// URL the customer follows to confirm the payment
    pub confirmation_url: String,

    /// Creation timestamp
    #[serde(with = "millis_timestamp")]
    pub created_at: DateTime<Utc>,
}

impl PaymentSession {
    /// Generate a fresh session id
    pub fn generate_id() -> String {
        format!("{}{}", SESSION_ID_PREFIX, Uuid::new_v4())
    }

    /// Id embedded in the confirmation URL, if any
    pub fn confirmation_session_id(&self) -> Option<&str> {
        let (_, query) = self.confirmation_url.split_once('?')?;
        query.split('&').find_map(|pair| {
            pair.strip_prefix(SESSION_ID_PARAM)
                .and_then(|rest| rest.strip_prefix('='))
        })
    }
}

/// Append a `session_id` query parameter to a return URL
pub fn confirmation_url(return_url: &str, session_id: &str) -> String {
    let separator = if return_url.contains('?') { '&' } else { '?' };
    format!("{return_url}{separator}{SESSION_ID_PARAM}={session_id}")
}

/// RFC 3339 with millisecond precision and a `Z` suffix
mod millis_timestamp {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|t| t.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
