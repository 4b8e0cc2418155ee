//! # Customer API
//!
//! Minimal CRUD service for a single customer resource.
//!
//! ## Design Principles
//!
//! - **Authenticated by default**: every customer route requires a valid JWT
//! - **No persistence**: customers live in process memory only
//! - **Caller-owned ids**: the client generates the UUID used as the key
//! - **Explicit misses**: lookups return not-found, never panic
//!
//! ## API Overview
//!
//! | Endpoint | Method | Description |
//! |----------|--------|-------------|
//! | `/customers` | GET | List customers |
//! | `/customers` | POST | Create customer |
//! | `/customers/{id}` | GET | Fetch customer |
//! | `/customers/{id}` | PUT | Replace customer |
//! | `/customers/{id}` | DELETE | Remove customer |
//! | `/swagger-ui` | GET | Interactive API explorer (no auth) |
//! | `/api-docs/openapi.json` | GET | OpenAPI document (no auth) |

pub mod auth;
pub mod config;
pub mod handlers;
pub mod models;
pub mod openapi;
pub mod store;

pub use config::Config;
pub use handlers::AppState;
pub use store::CustomerStore;

use axum::{
    http::{header, Method},
    middleware,
    routing::{get, put},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};

/// Maximum request body size (16 KiB).
pub const MAX_BODY_SIZE: usize = 16 * 1024;

/// Build application state from configuration: an empty store and a JWT
/// verifier for the configured issuer, audience and secret.
pub fn app_state(config: &Config) -> AppState {
    AppState::new(
        CustomerStore::new(),
        Arc::new(auth::JwtVerifier::from_config(config)),
    )
}

/// Build the Axum router with all endpoints and middleware.
pub fn build_router(state: AppState, config: &Config) -> Router {
    let mut customers = Router::new()
        .route(
            "/customers",
            get(handlers::list_customers).post(handlers::create_customer),
        )
        .route(
            "/customers/:id",
            get(handlers::get_customer)
                .put(handlers::update_customer)
                .delete(handlers::delete_customer),
        );

    if config.legacy_routes {
        customers = customers.route("/customer/:id", put(handlers::update_customer));
    }

    // Applied to matched routes only; unknown paths answer 404 without a token.
    let customers = customers.route_layer(middleware::from_fn_with_state(
        state.verifier.clone(),
        auth::require_bearer,
    ));

    let mut app = Router::new().merge(customers);
    if config.docs_enabled {
        app = app.merge(openapi::docs_routes());
    }

    // Middleware stack (order matters: first added = innermost)
    app.layer(RequestBodyLimitLayer::new(MAX_BODY_SIZE))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
                .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
