// In crates/core-types/src/types.rs

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

const REDACTED: &str = "***";

/// The API key sent in the `authorization` header of every request.
///
/// `Debug` and `Display` never print the key itself, so it is safe to pass
/// around in structs that end up in log lines.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Returns the raw key, for building the request header.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ApiKey({})", REDACTED)
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

impl From<&str> for ApiKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl From<String> for ApiKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

/// A portfolio secret. Scopes a request to one managed fund and strategy.
///
/// Serialized as the plain string, but redacted in `Debug`/`Display`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Secret(String);

impl Secret {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Secret({})", REDACTED)
    }
}

impl fmt::Display for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

impl From<&str> for Secret {
    fn from(secret: &str) -> Self {
        Self::new(secret)
    }
}

impl From<String> for Secret {
    fn from(secret: String) -> Self {
        Self(secret)
    }
}

/// A symbolic asset identifier (e.g., "BTC", "USDC").
///
/// Free-form: the value is forwarded exactly as given.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Token(pub String);

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Token {
    fn from(symbol: &str) -> Self {
        Self(symbol.to_string())
    }
}

impl From<String> for Token {
    fn from(symbol: String) -> Self {
        Self(symbol)
    }
}

/// Maximum leverage for a signal, expected between 1 and 5 (1 means no shorting).
///
/// Kept as text so the backend receives exactly what the caller wrote.
/// The range is not checked here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MaxLeverage(String);

impl MaxLeverage {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MaxLeverage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MaxLeverage {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for MaxLeverage {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<Decimal> for MaxLeverage {
    fn from(value: Decimal) -> Self {
        Self(value.to_string())
    }
}

/// The body of a `publicSetSignalOnRequest` call.
///
/// Without `max_leverage` the body is `{"secret", "longToken", "shortToken"}`;
/// with it, `"maxLeverage"` is added as a string.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalRequest {
    pub secret: Secret,
    pub long_token: Token,
    pub short_token: Token,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_leverage: Option<MaxLeverage>,
}

impl SignalRequest {
    pub fn new(
        secret: impl Into<Secret>,
        long_token: impl Into<Token>,
        short_token: impl Into<Token>,
    ) -> Self {
        Self {
            secret: secret.into(),
            long_token: long_token.into(),
            short_token: short_token.into(),
            max_leverage: None,
        }
    }

    pub fn with_max_leverage(mut self, max_leverage: impl Into<MaxLeverage>) -> Self {
        self.max_leverage = Some(max_leverage.into());
        self
    }
}

/// A body that only names a portfolio, e.g. for `publicApproveSpendingOnRequest`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SecretRequest {
    pub secret: Secret,
}

impl SecretRequest {
    pub fn new(secret: impl Into<Secret>) -> Self {
        Self { secret: secret.into() }
    }
}

/// The body of a `publicRebalanceOnRequest` call.
///
/// When no tokens are given the backend rebalances towards the portfolio's
/// last stored signal.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RebalanceRequest {
    pub portfolio_id: Secret,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub long_token: Option<Token>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_token: Option<Token>,
}

impl RebalanceRequest {
    pub fn new(portfolio_id: impl Into<Secret>) -> Self {
        Self {
            portfolio_id: portfolio_id.into(),
            long_token: None,
            short_token: None,
        }
    }

    pub fn with_signal(mut self, long_token: impl Into<Token>, short_token: impl Into<Token>) -> Self {
        self.long_token = Some(long_token.into());
        self.short_token = Some(short_token.into());
        self
    }
}

/// The error body the backend sends alongside a 4xx status.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ErrorEnvelope {
    /// Either epoch millis or an ISO-8601 string, depending on the function.
    #[serde(default)]
    pub timestamp: Option<Value>,
    pub status: u16,
    pub error: String,
}

impl ErrorEnvelope {
    /// Reads an error envelope out of a decoded response, if it has that shape.
    pub fn from_value(value: &Value) -> Option<Self> {
        serde_json::from_value(value.clone()).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn signal_without_leverage_has_exactly_three_fields() {
        let request = SignalRequest::new("secret", "BTC", "USDC");
        let body = serde_json::to_value(&request).unwrap();

        assert_eq!(
            body,
            json!({ "secret": "secret", "longToken": "BTC", "shortToken": "USDC" })
        );
    }

    #[test]
    fn signal_with_leverage_adds_string_field() {
        let request = SignalRequest::new("secret", "USDC", "BTC").with_max_leverage("2.5");
        let body = serde_json::to_value(&request).unwrap();

        assert_eq!(
            body,
            json!({
                "secret": "secret",
                "longToken": "USDC",
                "shortToken": "BTC",
                "maxLeverage": "2.5"
            })
        );
    }

    #[test]
    fn values_are_forwarded_verbatim() {
        let request = SignalRequest::new(" s3cr3t ", "btc", "usd").with_max_leverage("9");
        let body = serde_json::to_value(&request).unwrap();

        assert_eq!(body["secret"], " s3cr3t ");
        assert_eq!(body["longToken"], "btc");
        assert_eq!(body["shortToken"], "usd");
        assert_eq!(body["maxLeverage"], "9");
    }

    #[test]
    fn leverage_from_decimal_keeps_scale() {
        assert_eq!(MaxLeverage::from(dec!(1.5)).as_str(), "1.5");
        assert_eq!(MaxLeverage::from(dec!(1)).as_str(), "1");
        assert_eq!(MaxLeverage::from(dec!(2.50)).as_str(), "2.50");
    }

    #[test]
    fn credentials_are_redacted_in_debug_output() {
        let key = ApiKey::new("top-secret-key");
        let request = SignalRequest::new("portfolio-secret", "BTC", "USDC");

        assert_eq!(format!("{:?}", key), "ApiKey(***)");
        assert_eq!(key.to_string(), "***");
        assert!(!format!("{:?}", request).contains("portfolio-secret"));
        assert_eq!(key.expose(), "top-secret-key");
    }

    #[test]
    fn rebalance_omits_tokens_when_unset() {
        let body = serde_json::to_value(RebalanceRequest::new("p1")).unwrap();
        assert_eq!(body, json!({ "portfolioId": "p1" }));

        let body = serde_json::to_value(RebalanceRequest::new("p1").with_signal("ETH", "USDC")).unwrap();
        assert_eq!(
            body,
            json!({ "portfolioId": "p1", "longToken": "ETH", "shortToken": "USDC" })
        );
    }

    #[test]
    fn secret_request_carries_only_the_secret() {
        let request = SecretRequest::new("portfolio-secret");

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({ "secret": "portfolio-secret" })
        );
        assert!(!format!("{:?}", request).contains("portfolio-secret"));
    }

    #[test]
    fn error_envelope_is_read_from_backend_errors_only() {
        let failure = json!({
            "timestamp": 1_650_000_000_000_u64,
            "status": 403,
            "error": "Unauthorized. The API key provided is invalid."
        });
        let envelope = ErrorEnvelope::from_value(&failure).unwrap();
        assert_eq!(envelope.status, 403);
        assert!(envelope.error.starts_with("Unauthorized"));

        assert!(ErrorEnvelope::from_value(&json!({ "message": "Signal saved!" })).is_none());
    }
}
