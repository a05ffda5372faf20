//! Program handlers.
//!
//! ```text
//! GET  /                 -> [{"id":1,"name":"TB","description":null}]
//! POST /create_program   name=TB&description=Tuberculosis
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{ApiResult, Error, NewProgram, Program, ProgramValidationError};
use crate::inbound::http::redirect_to_index;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Form body for `POST /create_program`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct CreateProgramForm {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Program as returned by the listing endpoint.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProgramResponse {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

impl From<Program> for ProgramResponse {
    fn from(program: Program) -> Self {
        Self {
            id: program.id().as_i64(),
            name: program.name().to_owned(),
            description: program.description().map(str::to_owned),
        }
    }
}

pub(crate) fn map_program_validation_error(err: ProgramValidationError) -> Error {
    let message = err.to_string();
    match err {
        ProgramValidationError::MissingName => Error::invalid_request(message),
        ProgramValidationError::NameTooLong { max } => Error::invalid_request(message)
            .with_details(json!({ "field": "name", "max": max })),
    }
}

/// List every program in creation order.
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Programs", body = [ProgramResponse]),
        (status = 503, description = "Storage unavailable", body = ErrorSchema)
    ),
    tags = ["programs"],
    operation_id = "listPrograms",
    security([])
)]
#[get("/")]
pub async fn list_programs(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<ProgramResponse>>> {
    let programs = state.registry_query.list_programs().await?;
    Ok(web::Json(
        programs.into_iter().map(ProgramResponse::from).collect(),
    ))
}

/// Create a program and redirect to the index.
#[utoipa::path(
    post,
    path = "/create_program",
    request_body(content = CreateProgramForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 302, description = "Program created", headers(("Location" = String))),
        (status = 400, description = "Missing name or duplicate program", body = ErrorSchema),
        (status = 503, description = "Storage unavailable", body = ErrorSchema)
    ),
    tags = ["programs"],
    operation_id = "createProgram",
    security([])
)]
#[post("/create_program")]
pub async fn create_program(
    state: web::Data<HttpState>,
    form: web::Form<CreateProgramForm>,
) -> ApiResult<HttpResponse> {
    let form = form.into_inner();
    let draft = NewProgram::try_from_parts(form.name.as_deref(), form.description.as_deref())
        .map_err(map_program_validation_error)?;
    state.registry.create_program(draft).await?;
    Ok(redirect_to_index())
}

#[cfg(test)]
#[path = "programs_tests.rs"]
mod tests;
