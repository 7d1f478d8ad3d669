//! HTTP server for the attendance engine.

use std::path::PathBuf;

use anyhow::Context;
use attendance_engine::api::{AppState, create_router};
use attendance_engine::config::{ConfigLoader, Settings};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "attendance-engine",
    version,
    about = "Attendance work-hour normalization service"
)]
struct Cli {
    /// YAML settings file. Defaults apply when omitted.
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,
    /// Overrides `server.host`.
    #[arg(long)]
    host: Option<String>,
    /// Overrides `server.port`.
    #[arg(short = 'p', long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let mut settings = match &cli.config {
        Some(path) => ConfigLoader::load(path)
            .with_context(|| format!("loading settings from {}", path.display()))?
            .into_settings(),
        None => Settings::default(),
    };
    if let Some(host) = cli.host {
        settings.server.host = host;
    }
    if let Some(port) = cli.port {
        settings.server.port = port;
    }

    let address = settings.server.bind_address();
    info!(
        address = %address,
        data_file = %settings.storage.data_file.display(),
        report_file = %settings.storage.report_file.display(),
        "Starting attendance engine"
    );

    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("binding {address}"))?;
    axum::serve(listener, create_router(AppState::new(settings)))
        .await
        .context("serving HTTP")?;
    Ok(())
}
