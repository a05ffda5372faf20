//! Client handlers.
//!
//! ```text
//! POST /register_client   name=Jane+Roe&date_of_birth=1985-05-05&gender=Female&contact_info=jane@x.com
//! GET  /search_client?query=jane
//! GET  /client/{id}
//! GET  /api/client/{id}   Authorization: Bearer <token>
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::{IntoParams, ToSchema};

use crate::domain::client::DATE_OF_BIRTH_FORMAT;
use crate::domain::{
    ApiResult, Client, ClientId, ClientProfile, ClientValidationError, Error, NewClient,
};
use crate::inbound::http::cache_control::private_no_store_header;
use crate::inbound::http::redirect_to_index;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

const CLIENT_NOT_FOUND: &str = "Client not found";

/// Form body for `POST /register_client`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct RegisterClientForm {
    pub name: Option<String>,
    #[schema(example = "1985-05-05")]
    pub date_of_birth: Option<String>,
    pub gender: Option<String>,
    pub contact_info: Option<String>,
}

/// Query string for `GET /search_client`.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct SearchQuery {
    /// Case-insensitive name fragment. Blank queries match nothing.
    pub query: Option<String>,
}

/// Client record without enrollments.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ClientResponse {
    pub id: i64,
    pub name: String,
    #[schema(example = "1985-05-05")]
    pub date_of_birth: String,
    pub gender: String,
    pub contact_info: String,
}

impl From<&Client> for ClientResponse {
    fn from(client: &Client) -> Self {
        Self {
            id: client.id().as_i64(),
            name: client.name().to_owned(),
            date_of_birth: client.date_of_birth().format(DATE_OF_BIRTH_FORMAT).to_string(),
            gender: client.gender().to_owned(),
            contact_info: client.contact_info().to_owned(),
        }
    }
}

/// Program membership entry in a profile.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EnrollmentEntry {
    pub program: String,
}

/// Client together with the names of the programs they are enrolled in.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ClientProfileResponse {
    #[serde(flatten)]
    pub client: ClientResponse,
    pub enrollments: Vec<EnrollmentEntry>,
}

impl From<ClientProfile> for ClientProfileResponse {
    fn from(profile: ClientProfile) -> Self {
        Self {
            client: ClientResponse::from(profile.client()),
            enrollments: profile
                .programs()
                .iter()
                .map(|program| EnrollmentEntry {
                    program: program.clone(),
                })
                .collect(),
        }
    }
}

fn map_client_validation_error(err: ClientValidationError) -> Error {
    let message = err.to_string();
    match err {
        ClientValidationError::MissingField => Error::invalid_request(message),
        ClientValidationError::InvalidDateOfBirth => Error::invalid_request(message)
            .with_details(json!({ "field": "date_of_birth", "format": "YYYY-MM-DD" })),
        ClientValidationError::FieldTooLong { field, max } => {
            Error::invalid_request(message).with_details(json!({ "field": field, "max": max }))
        }
    }
}

/// Parse a path identifier. Anything but an integer is an unknown client.
fn parse_client_id(raw: &str) -> Result<ClientId, Error> {
    raw.parse::<i64>()
        .map(ClientId::new)
        .map_err(|_| Error::not_found(CLIENT_NOT_FOUND))
}

async fn profile_response(state: &HttpState, raw_id: &str) -> ApiResult<HttpResponse> {
    let id = parse_client_id(raw_id)?;
    let profile = state.registry_query.get_client_profile(id).await?;
    Ok(HttpResponse::Ok()
        .insert_header(private_no_store_header())
        .json(ClientProfileResponse::from(profile)))
}

/// Register a client and redirect to the index.
#[utoipa::path(
    post,
    path = "/register_client",
    request_body(content = RegisterClientForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 302, description = "Client registered", headers(("Location" = String))),
        (status = 400, description = "Missing field or invalid date", body = ErrorSchema),
        (status = 503, description = "Storage unavailable", body = ErrorSchema)
    ),
    tags = ["clients"],
    operation_id = "registerClient",
    security([])
)]
#[post("/register_client")]
pub async fn register_client(
    state: web::Data<HttpState>,
    form: web::Form<RegisterClientForm>,
) -> ApiResult<HttpResponse> {
    let form = form.into_inner();
    let draft = NewClient::try_from_parts(
        form.name.as_deref(),
        form.date_of_birth.as_deref(),
        form.gender.as_deref(),
        form.contact_info.as_deref(),
    )
    .map_err(map_client_validation_error)?;
    state.registry.register_client(draft).await?;
    Ok(redirect_to_index())
}

/// Search clients by name.
#[utoipa::path(
    get,
    path = "/search_client",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching clients", body = [ClientResponse]),
        (status = 503, description = "Storage unavailable", body = ErrorSchema)
    ),
    tags = ["clients"],
    operation_id = "searchClients",
    security([])
)]
#[get("/search_client")]
pub async fn search_client(
    state: web::Data<HttpState>,
    query: web::Query<SearchQuery>,
) -> ApiResult<web::Json<Vec<ClientResponse>>> {
    let text = query.into_inner().query.unwrap_or_default();
    let clients = state.registry_query.search_clients(&text).await?;
    Ok(web::Json(clients.iter().map(ClientResponse::from).collect()))
}

/// Client profile with enrollments.
#[utoipa::path(
    get,
    path = "/client/{id}",
    params(("id" = i64, Path, description = "Client identifier")),
    responses(
        (status = 200, description = "Client profile", body = ClientProfileResponse),
        (status = 404, description = "Client not found", body = ErrorSchema)
    ),
    tags = ["clients"],
    operation_id = "getClientProfile",
    security([])
)]
#[get("/client/{id}")]
pub async fn client_profile(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    profile_response(&state, &path.into_inner()).await
}

/// Client profile for API consumers. Requires a bearer token.
///
/// Mounted inside the `/api/client` scope guarded by
/// [`crate::inbound::http::access_gate::require_bearer_token`].
#[utoipa::path(
    get,
    path = "/api/client/{id}",
    params(("id" = i64, Path, description = "Client identifier")),
    responses(
        (status = 200, description = "Client profile", body = ClientProfileResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema),
        (status = 404, description = "Client not found", body = ErrorSchema)
    ),
    tags = ["clients"],
    operation_id = "getClientProfileApi",
    security(("BearerToken" = []))
)]
#[get("/{id}")]
pub async fn api_client_profile(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    profile_response(&state, &path.into_inner()).await
}

#[cfg(test)]
#[path = "clients_tests.rs"]
mod tests;
