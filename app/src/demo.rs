// In app/src/demo.rs

use core_types::{Secret, SignalRequest};

/// The three walkthrough signals, in the order they are sent.
pub fn demo_signals(secret: &Secret) -> Vec<(&'static str, SignalRequest)> {
    vec![
        (
            "Buy BTC using USDC (leveraged long on BTC)",
            SignalRequest::new(secret.clone(), "BTC", "USDC").with_max_leverage("1.5"),
        ),
        (
            "Sell BTC and buy USDC (leveraged short on BTC)",
            SignalRequest::new(secret.clone(), "USDC", "BTC").with_max_leverage("2.5"),
        ),
        (
            "Sell whatever is held and go to USD (unlevered, neutral)",
            SignalRequest::new(secret.clone(), "USDC", "USDC").with_max_leverage("1"),
        ),
    ]
}
