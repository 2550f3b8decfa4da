// In app/src/main.rs

use anyhow::Result;
use api_client::ApiClient;
use clap::{Parser, Subcommand};
use core_types::{ErrorEnvelope, MaxLeverage, RebalanceRequest, Secret, SignalRequest};
use serde_json::Value;
use tracing_subscriber::prelude::*;

mod demo;

// --- Command-Line Interface Definition ---

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = "Sends trading signals to a managed DeFi fund.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Tells the fund which token to long and which to fund it from.
    Signal {
        /// The portfolio secret.
        #[arg(long, env = "FUND_SECRET", hide_env_values = true)]
        secret: String,

        /// The token to long (e.g., "BTC", "ETH", "USDC").
        #[arg(short, long)]
        long: String,

        /// The token to short or sell (e.g., "USDC").
        #[arg(short, long)]
        short: String,

        /// Maximum leverage, between 1 and 5. 1 means no shorting.
        #[arg(short = 'x', long)]
        max_leverage: Option<String>,
    },

    /// Asks the fund to rebalance, optionally towards a new signal.
    Rebalance {
        /// The portfolio to rebalance.
        #[arg(long, env = "FUND_SECRET", hide_env_values = true)]
        portfolio_id: String,

        #[arg(short, long, requires = "short")]
        long: Option<String>,

        #[arg(short, long, requires = "long")]
        short: Option<String>,
    },

    /// Approves the portfolio's pool to trade on the exchanges. Run once per portfolio.
    ApproveSpending {
        #[arg(long, env = "FUND_SECRET", hide_env_values = true)]
        secret: String,
    },

    /// Checks that the configured API key is accepted.
    CheckAuth,

    /// Pings the unauthenticated hello function.
    Hello,

    /// Sends the walkthrough signals: long BTC, short BTC, then neutral.
    Demo {
        #[arg(long, env = "FUND_SECRET", hide_env_values = true)]
        secret: String,
    },
}

// --- Main Application Entry Point ---

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from a .env file, if it exists.
    dotenvy::dotenv().ok();

    // Parse command-line arguments.
    let cli = Cli::parse();

    let settings = app_config::load_settings()?;
    init_tracing(&settings.app.log_level);
    tracing::info!(
        environment = %settings.app.environment,
        base_url = %settings.api.base_url,
        "Settings loaded"
    );

    let client = api_client::new(&settings.api)?;

    let outcome = match cli.command {
        Commands::Signal {
            secret,
            long,
            short,
            max_leverage,
        } => handle_signal(&client, secret, long, short, max_leverage).await,
        Commands::Rebalance {
            portfolio_id,
            long,
            short,
        } => handle_rebalance(&client, portfolio_id, long, short).await,
        Commands::ApproveSpending { secret } => client
            .approve_spending(secret)
            .await
            .map_err(anyhow::Error::from)
            .map(print_response),
        Commands::CheckAuth => client.hello_auth().await.map_err(anyhow::Error::from).map(print_response),
        Commands::Hello => client.hello().await.map_err(anyhow::Error::from).map(print_response),
        Commands::Demo { secret } => handle_demo(&client, Secret::new(secret)).await,
    };

    if let Err(e) = &outcome {
        tracing::error!(error = %e, "Request failed");
    }
    outcome
}

fn init_tracing(log_level: &str) {
    let level = log_level.parse::<tracing::Level>().unwrap_or(tracing::Level::INFO);
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(tracing_subscriber::filter::Targets::new()
            .with_target("hyper_util", tracing::Level::WARN)
            .with_default(level));
    tracing_subscriber::registry().with(fmt_layer).init();
}

// --- Subcommand Logic ---

async fn handle_signal(
    client: &ApiClient,
    secret: String,
    long: String,
    short: String,
    max_leverage: Option<String>,
) -> Result<()> {
    let mut request = SignalRequest::new(secret, long, short);
    request.max_leverage = max_leverage.map(MaxLeverage::from);

    let response = client.send_signal(&request).await?;
    print_response(response);
    Ok(())
}

async fn handle_rebalance(
    client: &ApiClient,
    portfolio_id: String,
    long: Option<String>,
    short: Option<String>,
) -> Result<()> {
    let mut request = RebalanceRequest::new(portfolio_id);
    if let (Some(long), Some(short)) = (long, short) {
        request = request.with_signal(long, short);
    }

    let response = client.rebalance(&request).await?;
    print_response(response);
    Ok(())
}

/// Sends each walkthrough signal in turn, stopping at the first transport failure.
async fn handle_demo(client: &ApiClient, secret: Secret) -> Result<()> {
    for (label, request) in demo::demo_signals(&secret) {
        tracing::info!("{}", label);
        let response = client.send_signal(&request).await?;
        print_response(response);
    }
    Ok(())
}

/// Prints the decoded body to stdout. Error envelopes are also logged, but
/// never turned into a failure.
fn print_response(response: Value) {
    if let Some(envelope) = ErrorEnvelope::from_value(&response) {
        tracing::warn!(status = envelope.status, error = %envelope.error, "Backend reported an error");
    }
    match serde_json::to_string_pretty(&response) {
        Ok(pretty) => println!("{}", pretty),
        Err(_) => println!("{}", response),
    }
}
