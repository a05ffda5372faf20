//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint, the error envelope schemas and
//! the bearer token security scheme. Swagger UI serves it in debug builds.

use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Adds the bearer token scheme used by `/api/client/{id}`.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        let scheme = HttpBuilder::new()
            .scheme(HttpAuthScheme::Bearer)
            .bearer_format("JWT")
            .build();
        components.add_security_scheme("BearerToken", SecurityScheme::Http(scheme));
    }
}

/// OpenAPI document for the registry API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Health registry API",
        description = "Register clients, manage health programs and enrollments, and read client profiles with a bearer token."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::programs::list_programs,
        crate::inbound::http::programs::create_program,
        crate::inbound::http::clients::register_client,
        crate::inbound::http::clients::search_client,
        crate::inbound::http::clients::client_profile,
        crate::inbound::http::clients::api_client_profile,
        crate::inbound::http::enrollments::enroll_client,
        crate::inbound::http::auth::login,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(ErrorSchema, ErrorCodeSchema)),
    tags(
        (name = "programs", description = "Health programs"),
        (name = "clients", description = "Client registration and lookup"),
        (name = "enrollments", description = "Program enrollment"),
        (name = "auth", description = "Token issuance"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
