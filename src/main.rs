use std::sync::Arc;

use clap::Parser;
use dotenvy::dotenv;
use stockroom::logging::init_tracing;
use stockroom::metrics::init_metrics;
use stockroom::repository::MemoryStore;
use stockroom::router::init_router;
use stockroom::state::{AppState, init_app_state};
use stockroom_config::{CorsConfig, ServerConfig, ValidationPolicy};
use stockroom_core::BcryptHasher;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "stockroom", about = "Stockroom inventory API server")]
struct Args {
    /// Keep all data in process memory instead of PostgreSQL
    #[arg(long)]
    in_memory: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    let args = Args::parse();

    let server = ServerConfig::from_env();
    init_tracing(&server.logging);

    let mut state = if args.in_memory {
        warn!("Running with the in-memory store; data is lost on exit");
        AppState::new(
            MemoryStore::new(),
            Arc::new(BcryptHasher::new(server.bcrypt_cost)),
            ValidationPolicy::from_env(),
            CorsConfig::from_env(),
        )
    } else {
        init_app_state(&server).await?
    };

    if server.metrics_enabled {
        state = state.with_metrics(init_metrics()?);
    }

    let app = init_router(state);

    let address = server.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!(address = %address, "Server listening");
    info!("API docs available at http://{}/scalar", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
