//! sang-server binary.
//!
//! Reads `sang.toml` (or the path given with `--config`) layered under
//! `SANG_*` environment variables, seeds the demo data, and serves the JSON
//! API under `/api`.

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use sang_api::{AppState, ServerConfig, seed::Seed};
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Sang event discovery API server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, env = "SANG_CONFIG", default_value = "sang.toml")]
  config: PathBuf,

  /// Override the configured port.
  #[arg(short, long)]
  port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  // Load configuration.
  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(
      config::Environment::with_prefix("SANG")
        .prefix_separator("_")
        .separator("__"),
    )
    .build()
    .context("failed to read config file")?;

  let mut server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;
  if let Some(port) = cli.port {
    server_cfg.port = port;
  }

  let seed = Seed::demo().context("failed to parse demo data")?;
  let address = format!("{}:{}", server_cfg.host, server_cfg.port);
  let app = sang_api::app(AppState::new(seed, server_cfg));

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
