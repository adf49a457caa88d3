// src/bin/api_server.rs

use enrich_info::infra::logging::init_logging;
use enrich_info::transport;
use enrich_info::{http_enricher, AppConfig, PersonService, PgPersonStore};
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;
    init_logging();
    info!("config and logger initialized");

    // --- Store Initialization ---
    info!(pool_max = config.pg_pool_max, "initializing postgres store");
    let store = PgPersonStore::connect(&config.database_url, config.pg_pool_max).await?;

    // --- Enrichment Initialization ---
    info!(
        age = %config.upstream.age_url,
        gender = %config.upstream.gender_url,
        nationality = %config.upstream.nationality_url,
        "initializing enrichment clients"
    );
    let enricher = http_enricher(&config.upstream)?;

    let app_state = transport::http::AppState {
        people: Arc::new(PersonService::new(Arc::new(store), enricher)),
    };

    // --- API Server Initialization ---
    let app = transport::http::create_app(app_state, config.request_timeout);
    let listener = tokio::net::TcpListener::bind(&config.http_addr).await?;
    info!(addr = %config.http_addr, "API server listening (Swagger UI at /swagger-ui)");

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!(error = %e, "server error");
        return Err(e.into());
    }
    info!("graceful shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "failed to listen for ctrl-c");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("shutdown signal received (ctrl-c)"),
        _ = terminate => info!("shutdown signal received (SIGTERM)"),
    }
}
