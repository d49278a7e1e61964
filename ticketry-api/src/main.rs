//! Ticketry API Server Entry Point
//!
//! Bootstraps configuration and telemetry, optionally creates the schema,
//! and serves the Axum router until Ctrl-C.

use ticketry_api::telemetry::{init_tracing, TelemetryConfig};
use ticketry_api::{
    create_api_router, ensure_schema, ApiConfig, ApiError, ApiResult, DbClient, DbConfig,
};

#[tokio::main]
async fn main() -> ApiResult<()> {
    let telemetry_config = TelemetryConfig::from_env();
    init_tracing(&telemetry_config)?;

    let db_config = DbConfig::from_env();
    let db = DbClient::from_config(&db_config)?;

    if db_config.bootstrap_schema {
        ensure_schema(&db).await?;
    }

    let api_config = ApiConfig::from_env();
    let app = create_api_router(db.clone(), &api_config);

    let addr = api_config.socket_addr();
    tracing::info!(%addr, environment = %api_config.environment, "Starting Ticketry API server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| ApiError::internal_error(format!("Failed to bind {}: {}", addr, e)))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::internal_error(format!("Server error: {}", e)))?;

    db.close();
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    tracing::info!("Shutdown signal received");
}
