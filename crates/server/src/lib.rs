//! # Inkwell Server
//!
//! The HTTP face of the journal relay. `start` is what the binary calls; `run`
//! takes an already bound listener so tests can serve on a random port.

pub mod config;
pub mod errors;
pub mod handlers;
pub mod router;
pub mod state;
pub mod types;

use crate::{
    config::{get_config, AppConfig},
    router::create_router,
    state::build_app_state,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::{debug, info};
use tracing_subscriber::FmtSubscriber;

/// Serves the relay on `listener` until the process stops.
///
/// Provider clients are built from `config` once, before the first request.
pub async fn run(listener: TcpListener, config: AppConfig) -> anyhow::Result<()> {
    debug!(?config, "Server configuration loaded");

    let app = create_router(build_app_state(&config).await?);

    info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}

/// Boots the relay from the environment: `.env`, log filter, config, then bind.
pub async fn start() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .compact()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = get_config(None)?;
    let listener = TcpListener::bind(SocketAddr::from(([0, 0, 0, 0], config.port))).await?;
    info!("Inkwell listening on http://localhost:{}", config.port);
    info!("Test UI: http://localhost:{}/test", config.port);

    run(listener, config).await
}
