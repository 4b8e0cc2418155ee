//! Customer API - JWT-guarded in-memory customer CRUD
//!
//! Serves five customer routes behind bearer authentication, plus an
//! OpenAPI document and Swagger UI. Customers are held in RAM only.

use customer_api::{app_state, build_router, Config};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    // Initialize structured logging
    init_tracing();

    // Load and validate configuration
    let config = Config::from_env().map_err(|e| {
        error!(error = %e, "Invalid configuration");
        e
    })?;
    log_startup_info(&config);

    let state = app_state(&config);
    let app = build_router(state, &config);

    serve(app, &config).await
}

/// Initialize tracing with environment-based log levels.
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("customer_api=debug,tower_http=info")),
        )
        .init();
}

/// Log startup configuration (no secrets).
fn log_startup_info(config: &Config) {
    info!(
        bind_addr = %config.bind_addr,
        port = config.port,
        storage = "memory",
        issuer = %config.jwt_issuer,
        audience = %config.jwt_audience,
        leeway_secs = config.jwt_leeway.as_secs(),
        docs_enabled = config.docs_enabled,
        legacy_routes = config.legacy_routes,
        "Starting customer API"
    );
}

/// Bind to address and serve the application.
async fn serve(app: axum::Router, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let bind_addr = format!("{}:{}", config.bind_addr, config.port);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    info!(addr = %bind_addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}
