//! # Propcache Server
//!
//! Serves the listing API over HTTP.

use propcache_config::ConfigLoader;
use propcache_core::{PropcacheError, PropcacheResult};
use propcache_rest::create_router;
use propcache_server::{di, startup};
use tower_http::timeout::TimeoutLayer;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Application error: {}", e);
        eprintln!("Application error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> PropcacheResult<()> {
    let config_loader = ConfigLoader::from_default_location()?;
    let config = config_loader.get().await;

    startup::init_logging(&config.observability);
    info!("Starting Propcache server...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));
    info!("Environment: {}", config.app.environment);

    let metrics_handle = startup::install_metrics_recorder(&config.observability)?;

    let module = di::build_module(&config).await?;

    let mut router = create_router(module.app_state(), &config.server);
    if let Some(handle) = metrics_handle.clone() {
        router = router.merge(startup::metrics_router(handle, &config.observability.metrics_path));
    }
    let router = router.layer(TimeoutLayer::new(config.server.request_timeout()));

    let rest_addr = config.server.rest_addr();
    let listener = tokio::net::TcpListener::bind(&rest_addr)
        .await
        .map_err(|e| PropcacheError::Internal(format!("Failed to bind {}: {}", rest_addr, e)))?;

    startup::print_startup_info(
        &rest_addr,
        metrics_handle
            .as_ref()
            .map(|_| config.observability.metrics_path.as_str()),
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(startup::shutdown_signal())
        .await
        .map_err(|e| PropcacheError::Internal(format!("REST server error: {}", e)))?;

    module.shutdown().await;
    info!("Server shutdown complete");
    Ok(())
}
