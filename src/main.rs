//! HTTP server: načíta model a scaler raz pri štarte a obsluhuje
//! `POST /predict`, `/health` a zostavený front-end.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use credit_default::config::{load_server_config, ServerConfig};
use credit_default::server::{build_router, AppState};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "credit-default-server",
    version,
    about = "Serve credit-card default predictions over HTTP"
)]
struct Cli {
    /// YAML config file (falls back to CREDIT_DEFAULT_CONFIG, then defaults)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Address to listen on, e.g. 0.0.0.0:8000
    #[arg(long)]
    listen_addr: Option<String>,

    /// Directory containing models/best_model.json and models/scaler_standard.json
    #[arg(long)]
    artifact_dir: Option<PathBuf>,

    /// Built front-end directory served at / and /static
    #[arg(long)]
    static_dir: Option<PathBuf>,
}

/// Konfigurácia: súbor z CLI alebo z `CREDIT_DEFAULT_CONFIG`, inak defaulty;
/// prepínače z CLI majú prednosť
fn load_config(cli: Cli) -> anyhow::Result<ServerConfig> {
    let path = cli
        .config
        .or_else(|| std::env::var("CREDIT_DEFAULT_CONFIG").ok().map(PathBuf::from));

    let mut config = match path {
        Some(path) => {
            info!(path = %path.display(), "loading configuration from file");
            load_server_config(&path)?
        }
        None => {
            info!("no config file specified, using defaults");
            ServerConfig::default()
        }
    };

    if let Some(addr) = cli.listen_addr {
        config.listen_addr = addr;
    }
    if let Some(dir) = cli.artifact_dir {
        config.artifact_dir = dir;
    }
    if let Some(dir) = cli.static_dir {
        config.static_dir = dir;
    }
    Ok(config)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for ctrl-c");
    }
    info!("shutting down");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = load_config(Cli::parse())?;
    info!(
        listen_addr = %config.listen_addr,
        artifact_dir = %config.artifact_dir.display(),
        static_dir = %config.static_dir.display(),
        "starting credit-default server"
    );

    let listen_addr = config.listen_addr.clone();
    let state = Arc::new(AppState::load(config));
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&listen_addr).await?;
    info!(%listen_addr, "server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
