mod api;
mod cli;
mod domain;
mod infra;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::api::{build_router, AppState};
use crate::cli::Cli;
use crate::infra::darkstat::DarkstatClient;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let darkstat = DarkstatClient::new(&args.darkstat_url)
        .with_context(|| format!("invalid Darkstat base URL: {}", args.darkstat_url))?;
    let app = build_router(Arc::new(AppState { darkstat }), &args.static_dir);

    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, static_dir = %args.static_dir, "serving trade route scanner");
    axum::serve(listener, app).await?;

    Ok(())
}
