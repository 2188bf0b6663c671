// Relay entry point: configuration, logging, actors, HTTP server.

use relay_core::actors::RelayHandle;
use relay_core::api::{self, AppState};
use relay_core::config::RelayConfig;
use relay_core::telemetry;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine
    dotenv::dotenv().ok();

    let config = RelayConfig::from_env()?;
    telemetry::init(config.log_format)?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = %config.environment,
        upstream = %config.upstream_base_url,
        "Starting {}",
        api::handlers::SERVICE_TITLE
    );

    let relay = RelayHandle::new(&config)?;
    let app = api::router(AppState {
        relay: relay.clone(),
    });

    let bind_address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    info!("Listening on http://{}", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    relay.shutdown().await;
    info!("Relay shut down");
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("Shutdown signal received");
}
