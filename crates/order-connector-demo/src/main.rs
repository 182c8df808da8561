//! order-connector-demo: exercises the provider connector from the command line.

use std::time::Duration;

use alloy::primitives::U256;
use clap::{Parser, Subcommand};
use eyre::{eyre, Result, WrapErr};

use order_connector_adapters::{ConnectorConfig, RuntimeProfile};
use order_connector_core::{parse_chain_id, parse_signature, CallRequest};

mod bridge;
mod order;

use bridge::DemoBridge;
use order::LimitOrderForm;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// JSON-RPC bridge in front of the connected wallet. Overrides ORDER_CONNECTOR_EIP1193_PROXY_URL.
    #[arg(long)]
    proxy_url: Option<String>,

    /// Refuse the deterministic development signer.
    #[arg(long)]
    production: bool,

    /// How long to wait for the wallet before giving up on a request.
    #[arg(long, env = "ORDER_CONNECTOR_PROMPT_TIMEOUT_MS", default_value_t = 120_000)]
    prompt_timeout_ms: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the accounts the wallet has authorized.
    Accounts,
    /// Show the connected chain id.
    ChainId,
    /// Build a limit order from the given fields and sign it with the first account.
    SignOrder {
        #[arg(long)]
        maker_asset: String,
        #[arg(long)]
        taker_asset: String,
        #[arg(long)]
        making_amount: String,
        #[arg(long)]
        taking_amount: String,
        /// Defaults to the current time in milliseconds.
        #[arg(long)]
        salt: Option<String>,
    },
    /// Read-only contract call at the latest block.
    Call {
        #[arg(long)]
        to: String,
        #[arg(long)]
        data: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    let mut config = ConnectorConfig::from_env()?;
    if let Some(url) = cli.proxy_url.clone() {
        config.eip1193_proxy_url = Some(url);
    }
    if cli.production {
        config.runtime_profile = RuntimeProfile::Production;
    }
    tracing::info!(profile = ?config.runtime_profile, "Starting order-connector-demo");

    let bridge =
        DemoBridge::connect(&config, Duration::from_millis(cli.prompt_timeout_ms)).await?;
    let outcome = run(&bridge, cli.command).await;
    bridge.disconnect().await?;
    outcome
}

async fn run(bridge: &DemoBridge, command: Command) -> Result<()> {
    match command {
        Command::Accounts => {
            let accounts = bridge.accounts().await?;
            if accounts.is_empty() {
                println!("no authorized accounts");
            }
            for account in accounts {
                println!("{account}");
            }
        }
        Command::ChainId => {
            let hex = bridge.chain_id().await?;
            let decimal = parse_chain_id(&hex)?;
            println!("{hex} ({decimal})");
        }
        Command::SignOrder {
            maker_asset,
            taker_asset,
            making_amount,
            taking_amount,
            salt,
        } => {
            let maker = bridge
                .accounts()
                .await?
                .into_iter()
                .next()
                .ok_or_else(|| eyre!("wallet has no authorized account to sign with"))?;
            let chain_id = parse_chain_id(&bridge.chain_id().await?)?;
            let salt = match salt {
                Some(raw) => raw
                    .parse::<U256>()
                    .wrap_err_with(|| format!("salt is not a valid integer: {raw}"))?,
                None => default_salt(),
            };
            let form = LimitOrderForm::parse(
                &maker,
                &maker_asset,
                &taker_asset,
                &making_amount,
                &taking_amount,
                salt,
            )?;
            let typed_data = form.to_typed_data(chain_id);
            println!(
                "{}",
                serde_json::to_string_pretty(typed_data.as_value())?
            );

            let signature = bridge.sign_typed_data(maker, typed_data).await?;
            let bytes = parse_signature(&signature)?;
            println!("signature: {signature}");
            println!("  r: 0x{}", alloy::hex::encode(&bytes[..32]));
            println!("  s: 0x{}", alloy::hex::encode(&bytes[32..64]));
            println!("  v: {}", bytes[64]);
        }
        Command::Call { to, data } => {
            let result = bridge.eth_call(CallRequest::new(to, data)).await?;
            println!("{result}");
        }
    }
    Ok(())
}

fn default_salt() -> U256 {
    let millis = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    U256::from(millis)
}
