use anyhow::Context;
use clap::Parser;

use starknet_wrapped_api::aggregate;
use starknet_wrapped_api::api::{self, AppState};
use starknet_wrapped_api::cli::{Cli, Commands};
use starknet_wrapped_api::config::Config;
use starknet_wrapped_api::demo;
use starknet_wrapped_api::kv::{self, FileKv};
use starknet_wrapped_api::response::build_response;
use starknet_wrapped_api::validate::is_valid_address;
use starknet_wrapped_api::voyager::VoyagerClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let config = Config::from_env().context("failed to load configuration")?;

    match cli.command {
        Commands::Serve { addr } => {
            let bind = addr.unwrap_or_else(|| config.http_bind_addr.clone());
            let state = AppState::from_config(&config)?;
            api::run_http_server(&bind, state).await?;
        }
        Commands::Wrapped { address } => {
            let address = address.trim().to_string();
            anyhow::ensure!(is_valid_address(&address), "invalid address: {}", address);

            let api_key = config
                .voyager_api_key
                .as_deref()
                .context("VOYAGER_API_KEY is not set; add VOYAGER_API_KEY=... to your .env")?;
            let client =
                VoyagerClient::new(&config.voyager_base_url, api_key, config.fetch_timeout)?;

            let (contract, summary) = aggregate::aggregate_year(&client, &address).await?;
            let now = chrono::Utc::now().timestamp();
            let payload = build_response(&address, &contract, &summary, now);
            println!("{}", serde_json::to_string_pretty(&payload)?);

            let mut store = FileKv::open(&config.state_path)?;
            kv::record_recent(&mut store, &address)?;
        }
        Commands::Demo { address } => {
            let payload = demo::make_demo(&address, chrono::Utc::now().timestamp());
            println!("{}", serde_json::to_string_pretty(&payload)?);
        }
        Commands::Recent => {
            let store = FileKv::open(&config.state_path)?;
            for address in kv::recent(&store) {
                println!("{}", address);
            }
        }
    }

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();
}
