//! Enrollment handler.
//!
//! ```text
//! POST /enroll_client   client_id=1&program_id=2
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{ApiResult, EnrollmentRequest, EnrollmentValidationError, Error};
use crate::inbound::http::redirect_to_index;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Form body for `POST /enroll_client`. Identifiers arrive as text.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct EnrollClientForm {
    pub client_id: Option<String>,
    pub program_id: Option<String>,
}

fn map_enrollment_validation_error(err: EnrollmentValidationError) -> Error {
    let message = err.to_string();
    match err {
        EnrollmentValidationError::MissingIds => Error::invalid_request(message),
        EnrollmentValidationError::InvalidId => Error::invalid_request(message)
            .with_details(json!({ "fields": ["client_id", "program_id"] })),
    }
}

/// Enroll a client in a program and redirect to the index.
#[utoipa::path(
    post,
    path = "/enroll_client",
    request_body(content = EnrollClientForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 302, description = "Client enrolled", headers(("Location" = String))),
        (status = 400, description = "Missing identifiers or already enrolled", body = ErrorSchema),
        (status = 404, description = "Client or program not found", body = ErrorSchema),
        (status = 503, description = "Storage unavailable", body = ErrorSchema)
    ),
    tags = ["enrollments"],
    operation_id = "enrollClient",
    security([])
)]
#[post("/enroll_client")]
pub async fn enroll_client(
    state: web::Data<HttpState>,
    form: web::Form<EnrollClientForm>,
) -> ApiResult<HttpResponse> {
    let form = form.into_inner();
    let request =
        EnrollmentRequest::try_from_parts(form.client_id.as_deref(), form.program_id.as_deref())
            .map_err(map_enrollment_validation_error)?;
    state.registry.enroll_client(request).await?;
    Ok(redirect_to_index())
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test, web};
    use rstest::rstest;
    use serde_json::Value;

    use crate::inbound::http::configure;
    use crate::inbound::http::test_utils::{form_post, memory_state};

    macro_rules! seeded_app {
        () => {{
            let app = actix_test::init_service(
                App::new()
                    .app_data(web::Data::new(memory_state().state))
                    .configure(configure),
            )
            .await;
            let client = "name=Jane+Roe&date_of_birth=1985-05-05&gender=Female&contact_info=x";
            for (uri, body) in [("/register_client", client), ("/create_program", "name=TB")] {
                let res = actix_test::call_service(&app, form_post(uri, body).to_request()).await;
                assert_eq!(res.status(), StatusCode::FOUND);
            }
            app
        }};
    }

    // The in-memory store numbers rows from one shared sequence.
    const CLIENT_ID: i64 = 1;
    const PROGRAM_ID: i64 = 2;

    #[actix_web::test]
    async fn second_enrollment_of_the_same_pair_is_rejected() {
        let app = seeded_app!();
        let body = format!("client_id={CLIENT_ID}&program_id={PROGRAM_ID}");

        let first = actix_test::call_service(&app, form_post("/enroll_client", &body).to_request()).await;
        assert_eq!(first.status(), StatusCode::FOUND);

        let second = actix_test::call_service(&app, form_post("/enroll_client", &body).to_request()).await;
        assert_eq!(second.status(), StatusCode::BAD_REQUEST);
        let value: Value = actix_test::read_body_json(second).await;
        assert_eq!(value["error"], "Client already enrolled");
    }

    #[rstest]
    #[case("client_id=1", "Client ID and Program ID are required")]
    #[case("client_id=&program_id=2", "Client ID and Program ID are required")]
    #[case("client_id=one&program_id=2", "Client ID and Program ID must be integers")]
    #[actix_web::test]
    async fn malformed_identifiers_are_rejected(#[case] body: &str, #[case] message: &str) {
        let app = seeded_app!();

        let res = actix_test::call_service(&app, form_post("/enroll_client", body).to_request()).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let value: Value = actix_test::read_body_json(res).await;
        assert_eq!(value["error"], message);
    }

    #[rstest]
    #[case("client_id=99&program_id=2", "Client not found")]
    #[case("client_id=1&program_id=99", "Program not found")]
    #[actix_web::test]
    async fn unknown_references_are_not_found(#[case] body: &str, #[case] message: &str) {
        let app = seeded_app!();

        let res = actix_test::call_service(&app, form_post("/enroll_client", body).to_request()).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let value: Value = actix_test::read_body_json(res).await;
        assert_eq!(value["error"], message);
    }
}
