//! HTTP inbound adapter exposing the registry endpoints.
//!
//! Form endpoints answer `302 Found` to `/` on success, mirroring the HTML
//! pages that post to them. JSON endpoints answer with the resource.

pub mod access_gate;
pub mod auth;
pub mod cache_control;
pub mod clients;
pub mod enrollments;
pub mod error;
pub mod health;
pub mod programs;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;

use actix_web::http::header;
use actix_web::middleware::from_fn;
use actix_web::{HttpResponse, web};
use tracing::debug;

pub use crate::domain::ApiResult;
use crate::domain::Error;

/// Redirect issued after a successful form submission.
pub(crate) fn redirect_to_index() -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, "/"))
        .finish()
}

fn form_config() -> web::FormConfig {
    web::FormConfig::default().error_handler(|err, _req| {
        debug!(error = %err, "rejected form payload");
        Error::invalid_request("Malformed form body").into()
    })
}

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        debug!(error = %err, "rejected JSON payload");
        Error::invalid_request("Malformed JSON body").into()
    })
}

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        debug!(error = %err, "rejected query string");
        Error::invalid_request("Malformed query string").into()
    })
}

/// Register the registry endpoints and extractor configuration.
///
/// Handlers expect `web::Data<HttpState>` in application data. Health probes
/// are registered separately because they need their own state.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use health_registry::inbound::http::configure;
///
/// let app = App::new().configure(configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(form_config())
        .app_data(json_config())
        .app_data(query_config())
        .service(programs::list_programs)
        .service(programs::create_program)
        .service(clients::register_client)
        .service(clients::search_client)
        .service(clients::client_profile)
        .service(enrollments::enroll_client)
        .service(auth::login)
        .service(
            web::scope("/api/client")
                .wrap(from_fn(access_gate::require_bearer_token))
                .service(clients::api_client_profile),
        );
}
