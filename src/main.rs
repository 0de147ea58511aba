mod domain;
mod error;
mod store;
mod pipeline;

mod clients;
mod http;

mod app_system;

#[cfg(test)]
mod mock_framework;

mod actor_framework;
mod dish_actor;
mod order_actor;

use clap::Parser;
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::app_system::{setup_tracing, Config, GrubdashSystem, StartupError};

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    // Setup tracing once for the entire application
    setup_tracing();

    let config = Config::parse();
    info!(bind = %config.bind, buffer_size = config.buffer_size, "Starting grubdash");

    let seed = config.load_seed()?;
    let system = GrubdashSystem::new(config.buffer_size, seed);

    let listener = TcpListener::bind(config.bind)
        .await
        .map_err(|source| StartupError::Bind {
            addr: config.bind,
            source,
        })?;
    info!(addr = %config.bind, "Listening");

    axum::serve(listener, system.router())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(StartupError::Serve)?;

    // Shutdown system gracefully
    system.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            error!(error = %e, "Failed to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}
