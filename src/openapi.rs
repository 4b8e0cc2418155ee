//! OpenAPI document and Swagger UI for the customer API.
//!
//! The document is generated from the handler annotations. It declares a
//! global `bearer_auth` requirement, matching the router where every
//! customer route needs a token.

use axum::Router;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::openapi::OpenApi as OpenApiDoc;
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers;
use crate::models::{Customer, ErrorResponse};

/// Path of the generated OpenAPI JSON document
pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";

/// Path of the interactive explorer
pub const SWAGGER_UI_PATH: &str = "/swagger-ui";

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::list_customers,
        handlers::get_customer,
        handlers::create_customer,
        handlers::update_customer,
        handlers::delete_customer,
    ),
    components(schemas(Customer, ErrorResponse)),
    modifiers(&SecurityAddon),
    security(("bearer_auth" = [])),
    tags(
        (name = "customers", description = "Customer management operations"),
    ),
    info(
        title = "Customer API",
        version = "1.0.0",
        description = "In-memory customer CRUD guarded by JWT bearer authentication"
    )
)]
pub struct ApiDoc;

/// Registers the JWT bearer security scheme.
#[derive(Debug)]
pub struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut OpenApiDoc) {
        let components = openapi.components.get_or_insert_with(Default::default);

        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("JWT Authorization header using the bearer scheme"))
                    .build(),
            ),
        );
    }
}

/// Swagger UI plus the raw OpenAPI document. Not behind the auth gate.
pub fn docs_routes<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    SwaggerUi::new(SWAGGER_UI_PATH)
        .url(OPENAPI_PATH, ApiDoc::openapi())
        .into()
}
