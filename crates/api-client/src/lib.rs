// In crates/api-client/src/lib.rs

use std::time::Duration;

use app_config::types::ApiSettings;
use core_types::{MaxLeverage, RebalanceRequest, Secret, SecretRequest, SignalRequest, Token};
use reqwest::header::{ACCEPT, ACCEPT_ENCODING, AUTHORIZATION, CONTENT_TYPE};
use serde::Serialize;
use serde_json::Value;

pub mod error;
pub mod types;

// Re-export public types
pub use error::{Error, Result};
pub use types::*;

impl ApiClient {
    /// Constructs a new ApiClient from ApiSettings.
    pub fn new(settings: &ApiSettings) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = settings.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http_client = builder
            .build()
            .map_err(|e| Error::ClientBuildError(e.to_string()))?;

        Ok(ApiClient {
            http_client,
            api_key: settings.api_key.clone(),
            base_url: settings.base_url.clone(),
        })
    }

    /// Sends a signal without a leverage cap.
    ///
    /// The body is `{"secret", "longToken", "shortToken"}`.
    pub async fn set_signal(
        &self,
        secret: impl Into<Secret>,
        long_token: impl Into<Token>,
        short_token: impl Into<Token>,
    ) -> Result<Value> {
        self.send_signal(&SignalRequest::new(secret, long_token, short_token))
            .await
    }

    /// Sends a signal with `maxLeverage` (expected between 1 and 5, 1 meaning no shorting).
    pub async fn set_leveraged_signal(
        &self,
        secret: impl Into<Secret>,
        long_token: impl Into<Token>,
        short_token: impl Into<Token>,
        max_leverage: impl Into<MaxLeverage>,
    ) -> Result<Value> {
        let request =
            SignalRequest::new(secret, long_token, short_token).with_max_leverage(max_leverage);
        self.send_signal(&request).await
    }

    /// Posts a signal to `publicSetSignalOnRequest` and returns the decoded body.
    ///
    /// Nothing is validated locally: identical long and short tokens, or a
    /// leverage outside 1..=5, are forwarded unchanged. The HTTP status is not
    /// inspected either, so a 4xx error body comes back as `Ok`.
    pub async fn send_signal(&self, request: &SignalRequest) -> Result<Value> {
        tracing::info!(
            long = %request.long_token,
            short = %request.short_token,
            max_leverage = ?request.max_leverage.as_ref().map(MaxLeverage::as_str),
            "Sending signal"
        );
        self.post_json(SET_SIGNAL_ENDPOINT, request).await
    }

    /// Asks the backend to rebalance a portfolio.
    ///
    /// This corresponds to `POST publicRebalanceOnRequest`.
    pub async fn rebalance(&self, request: &RebalanceRequest) -> Result<Value> {
        tracing::info!(
            long = ?request.long_token,
            short = ?request.short_token,
            "Requesting rebalance"
        );
        self.post_json(REBALANCE_ENDPOINT, request).await
    }

    /// Approves the portfolio's pool to spend its tokens on the exchanges.
    ///
    /// The body is `{"secret"}`; the backend answers `{"message": "Success"}`
    /// or an error envelope.
    pub async fn approve_spending(&self, secret: impl Into<Secret>) -> Result<Value> {
        tracing::info!("Requesting spending approval");
        self.post_json(APPROVE_SPENDING_ENDPOINT, &SecretRequest::new(secret))
            .await
    }

    /// Checks that the configured API key is accepted.
    pub async fn hello_auth(&self) -> Result<Value> {
        self.post_json(HELLO_AUTH_ENDPOINT, &serde_json::json!({})).await
    }

    pub async fn hello(&self) -> Result<Value> {
        self.post_json(HELLO_ENDPOINT, &serde_json::json!({})).await
    }

    /// Issues a single POST with the standard headers and parses the body as JSON.
    async fn post_json<B>(&self, endpoint: &str, body: &B) -> Result<Value>
    where
        B: Serialize + ?Sized,
    {
        let url = endpoint_url(&self.base_url, endpoint);

        let response = self
            .http_client
            .post(&url)
            .header(AUTHORIZATION, self.api_key.expose())
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .header(ACCEPT_ENCODING, "deflate, gzip")
            .json(body)
            .send()
            .await
            .map_err(Error::RequestFailed)?;

        let status = response.status();
        tracing::debug!(url = %url, status = status.as_u16(), "Response received");

        let text = response.text().await.map_err(Error::RequestFailed)?;
        let value: Value = serde_json::from_str(&text).map_err(Error::DeserializationFailed)?;

        Ok(value)
    }
}

/// Joins the deployment base URL and a function name.
///
/// A trailing slash on the base is tolerated, so both
/// `https://host` and `http://localhost:5001/project/us-central1/` work.
pub fn endpoint_url(base_url: &str, endpoint: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), endpoint)
}

// Free function to allow api_client::new usage
pub fn new(settings: &ApiSettings) -> Result<ApiClient> {
    ApiClient::new(settings)
}

/// One-shot signal call: builds a client from `settings` and sends a single
/// signal, with or without a leverage cap.
pub async fn set_signal(
    settings: &ApiSettings,
    secret: impl Into<Secret>,
    long_token: impl Into<Token>,
    short_token: impl Into<Token>,
    max_leverage: Option<MaxLeverage>,
) -> Result<Value> {
    let client = ApiClient::new(settings)?;
    let mut request = SignalRequest::new(secret, long_token, short_token);
    request.max_leverage = max_leverage;
    client.send_signal(&request).await
}
