//! Server startup utilities.

use axum::{routing::get, Router};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use propcache_config::ObservabilityConfig;
use propcache_core::{PropcacheError, PropcacheResult};
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` overrides the configured level. `log_format = "json"` selects
/// structured output; anything else is human-readable.
pub fn init_logging(config: &ObservabilityConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "{level},propcache={level},tower_http=debug",
            level = config.log_level
        ))
    });

    let registry = tracing_subscriber::registry().with(filter);
    let result = if config.log_format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .try_init()
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .try_init()
    };

    if let Err(e) = result {
        eprintln!("Logging already initialized: {}", e);
    }
}

/// Installs the Prometheus recorder when metrics are enabled.
pub fn install_metrics_recorder(config: &ObservabilityConfig) -> PropcacheResult<Option<PrometheusHandle>> {
    if !config.metrics_enabled {
        return Ok(None);
    }

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| PropcacheError::Configuration(format!("Failed to install metrics recorder: {}", e)))?;
    propcache_service::register_metrics();

    Ok(Some(handle))
}

/// Router serving the Prometheus text exposition at `path`.
pub fn metrics_router(handle: PrometheusHandle, path: &str) -> Router {
    Router::new().route(path, get(move || std::future::ready(handle.render())))
}

/// Prints server startup information.
pub fn print_startup_info(rest_addr: &str, metrics_path: Option<&str>) {
    let separator = "=".repeat(60);
    info!("{}", separator);
    info!("Properties: http://{}/properties", rest_addr);
    info!("Health:     http://{}/health", rest_addr);
    info!("API Docs:   http://{}/api-docs/openapi.json", rest_addr);
    if let Some(path) = metrics_path {
        info!("Metrics:    http://{}{}", rest_addr, path);
    }
    info!("{}", separator);
}

/// Resolves when the process receives Ctrl+C or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            info!("Received terminate signal, initiating graceful shutdown...");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_print_startup_info_does_not_panic() {
        let _ = tracing_subscriber::fmt::try_init();
        print_startup_info("0.0.0.0:8080", Some("/metrics"));
        print_startup_info("127.0.0.1:3000", None);
    }

    #[test]
    fn test_metrics_disabled_installs_nothing() {
        let config = ObservabilityConfig {
            metrics_enabled: false,
            ..ObservabilityConfig::default()
        };

        assert!(install_metrics_recorder(&config).unwrap().is_none());
    }
}
