//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{auth_handler, customer_handler};
use crate::domain::{CustomerDto, CustomerRegistrationRequest, CustomerUpdateRequest};
use crate::services::{AuthenticationRequest, AuthenticationResponse};

/// OpenAPI documentation for the customer API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Customer API",
        version = "0.1.0",
        description = "Customer registration, login and management"
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    paths(
        auth_handler::login,
        customer_handler::register_customer,
        customer_handler::get_customers,
        customer_handler::get_customer,
        customer_handler::update_customer,
        customer_handler::delete_customer,
    ),
    components(
        schemas(
            CustomerDto,
            CustomerRegistrationRequest,
            CustomerUpdateRequest,
            AuthenticationRequest,
            AuthenticationResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Customer login"),
        (name = "Customers", description = "Customer registration and management")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT token obtained from /api/v1/auth/login"))
                        .build(),
                ),
            );
        }
    }
}
