/*
[INPUT]:  CLI arguments, optional YAML configuration file
[OUTPUT]: Decoded API payload printed as JSON on stdout
[POS]:    Binary entry point
[UPDATE]: When changing CLI flags or startup flow
*/

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use coinpaprika_api::Transport;
use coinpaprika_cli::{CliConfig, FetchArgs, run_fetch};

#[derive(Parser, Debug)]
#[command(name = "coinpaprika", version, about = "Coinpaprika market data API client")]
struct Cli {
    #[arg(long = "config", value_name = "PATH")]
    config_path: Option<PathBuf>,
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "warn")]
    log_level: String,
    /// Bearer token; overrides the config file
    #[arg(long = "token", env = "COINPAPRIKA_TOKEN", hide_env_values = true)]
    token: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Perform one request and print the decoded payload
    Fetch(FetchArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(&args.log_level)?;

    let mut config = match &args.config_path {
        Some(path) => load_config(path)?,
        None => CliConfig::default(),
    };
    if let Some(token) = args.token {
        config.token = Some(token);
    }
    info!(base_url = %config.base_url, "configuration loaded");

    let transport = Transport::with_config(config.transport_config()).context("create transport")?;

    match args.command {
        Command::Fetch(fetch) => {
            let payload = run_fetch(&config, &transport, &fetch).await?;
            let rendered = serde_json::to_string_pretty(&payload).context("format payload")?;
            println!("{rendered}");
        }
    }

    Ok(())
}

fn init_tracing(log_level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(log_level).context("invalid log level")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("initialize tracing subscriber")?;
    Ok(())
}

fn load_config(path: &PathBuf) -> Result<CliConfig> {
    let path_str = path
        .to_str()
        .context("config path must be valid utf-8")?;
    CliConfig::from_file(path_str).context("load config")
}
