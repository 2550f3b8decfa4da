// In crates/api-client/src/types.rs

use core_types::ApiKey;
use reqwest::Client;

/// Function that stores a new long/short signal for a portfolio.
pub const SET_SIGNAL_ENDPOINT: &str = "publicSetSignalOnRequest";
/// Function that rebalances a portfolio's pool and debt.
pub const REBALANCE_ENDPOINT: &str = "publicRebalanceOnRequest";
/// Function that approves the portfolio's pool to spend on the exchanges.
/// Run once per portfolio before any signal is sent.
pub const APPROVE_SPENDING_ENDPOINT: &str = "publicApproveSpendingOnRequest";
/// Authenticated ping; answers `{"message": "Authorized!"}` for a valid key.
pub const HELLO_AUTH_ENDPOINT: &str = "publicHelloAuthOnRequest";
/// Unauthenticated ping.
pub const HELLO_ENDPOINT: &str = "publicHelloOnRequest";

/// The client for the fund manager's HTTP functions.
#[derive(Debug, Clone)]
pub struct ApiClient {
    /// The persistent HTTP client.
    pub http_client: Client,
    /// Sent as the `authorization` header.
    pub api_key: ApiKey,
    /// The deployment path the functions are served under.
    pub base_url: String,
}
