//! HTTP request handlers for the customer API.
//!
//! Handlers run only after [`crate::auth::require_bearer`] has accepted the
//! request. Each one is a direct translation of one store operation.

use crate::auth::{Claims, SharedVerifier};
use crate::models::{Customer, CustomerId, ErrorResponse};
use crate::store::{CustomerStore, StoreError};
use axum::{
    extract::{Path, State},
    http::{header::LOCATION, StatusCode},
    response::IntoResponse,
    Extension, Json,
};
use tracing::{debug, info};
use uuid::Uuid;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: CustomerStore,
    /// Bearer token verifier used by the auth middleware
    pub verifier: SharedVerifier,
}

impl AppState {
    pub fn new(store: CustomerStore, verifier: SharedVerifier) -> Self {
        Self { store, verifier }
    }
}

// === List ===

/// GET /customers - List all customers
#[utoipa::path(
    get,
    path = "/customers",
    responses(
        (status = 200, description = "All customers, unordered", body = [Customer]),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorResponse)
    ),
    tag = "customers"
)]
pub async fn list_customers(State(state): State<AppState>) -> Json<Vec<Customer>> {
    let customers = state.store.get_all();
    debug!(count = customers.len(), "Listing customers");
    Json(customers)
}

// === Get One ===

/// GET /customers/{id} - Fetch a single customer
#[utoipa::path(
    get,
    path = "/customers/{id}",
    params(("id" = Uuid, Path, description = "Customer id")),
    responses(
        (status = 200, description = "Customer found", body = Customer),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorResponse),
        (status = 404, description = "Customer not found", body = ErrorResponse)
    ),
    tag = "customers"
)]
pub async fn get_customer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Customer>, ApiError> {
    state
        .store
        .get_by_id(&id)
        .map(Json)
        .ok_or(ApiError::NotFound(id))
}

// === Create ===

/// POST /customers - Create (or overwrite) a customer
///
/// The caller supplies the id. A `null` body is rejected rather than ignored.
#[utoipa::path(
    post,
    path = "/customers",
    request_body = Customer,
    responses(
        (status = 201, description = "Customer stored", body = Customer,
            headers(("Location" = String, description = "Path of the stored customer"))),
        (status = 400, description = "Missing customer body", body = ErrorResponse),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorResponse)
    ),
    tag = "customers"
)]
pub async fn create_customer(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(body): Json<Option<Customer>>,
) -> Result<impl IntoResponse, ApiError> {
    let customer = body.ok_or(ApiError::InvalidInput("customer body required"))?;
    let customer = state.store.create(customer);

    info!(
        customer_id = %customer.id,
        subject = claims.sub.as_deref().unwrap_or("-"),
        "Customer created"
    );

    Ok((
        StatusCode::CREATED,
        [(LOCATION, customer.location())],
        Json(customer),
    ))
}

// === Update ===

/// PUT /customers/{id} - Replace an existing customer
///
/// The path id is authoritative. An absent path id is 404 whatever the body
/// says; a body carrying a different id is rejected and neither record is
/// touched.
#[utoipa::path(
    put,
    path = "/customers/{id}",
    params(("id" = Uuid, Path, description = "Customer id")),
    request_body = Customer,
    responses(
        (status = 200, description = "Customer replaced", body = Customer),
        (status = 400, description = "Missing body or id mismatch", body = ErrorResponse),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorResponse),
        (status = 404, description = "Customer not found", body = ErrorResponse)
    ),
    tag = "customers"
)]
pub async fn update_customer(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
    Json(body): Json<Option<Customer>>,
) -> Result<Json<Customer>, ApiError> {
    let customer = body.ok_or(ApiError::InvalidInput("customer body required"))?;
    if state.store.get_by_id(&id).is_none() {
        return Err(ApiError::NotFound(id));
    }
    if customer.id != id {
        return Err(ApiError::InvalidInput("body id does not match path id"));
    }

    // Still checked again under the shard lock; a concurrent delete yields 404.
    let customer = state.store.update(customer)?;

    info!(
        customer_id = %customer.id,
        subject = claims.sub.as_deref().unwrap_or("-"),
        "Customer updated"
    );

    Ok(Json(customer))
}

// === Delete ===

/// DELETE /customers/{id} - Remove a customer (no-op if absent)
#[utoipa::path(
    delete,
    path = "/customers/{id}",
    params(("id" = Uuid, Path, description = "Customer id")),
    responses(
        (status = 200, description = "Customer removed, or was already absent"),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorResponse)
    ),
    tag = "customers"
)]
pub async fn delete_customer(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> StatusCode {
    if state.store.delete(&id).is_some() {
        info!(
            customer_id = %id,
            subject = claims.sub.as_deref().unwrap_or("-"),
            "Customer deleted"
        );
    }

    StatusCode::OK
}

// === Error Handling ===

/// API error types
///
/// Authentication failures never reach a handler; they are answered by the
/// middleware with [`crate::auth::AuthError`].
#[derive(Debug)]
pub enum ApiError {
    InvalidInput(&'static str),
    NotFound(CustomerId),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => ApiError::NotFound(id),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, code, message) = match self {
            ApiError::InvalidInput(msg) => {
                (StatusCode::BAD_REQUEST, "INVALID_INPUT", msg.to_string())
            }
            ApiError::NotFound(id) => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                format!("customer {id} not found"),
            ),
        };

        let body = Json(ErrorResponse {
            error: message,
            code,
        });

        (status, body).into_response()
    }
}
