//! Login handler issuing bearer tokens.
//!
//! ```text
//! POST /api/login {"username":"nurse","password":"secret"}
//! -> 200 {"token":"eyJhbGciOiJIUzI1NiJ9..."}
//! ```

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{ApiResult, Error, LoginCredentials, LoginValidationError};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Login request body for `POST /api/login`.
///
/// Missing members deserialize as empty strings and fail validation.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Successful login payload.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.username, &value.password)
    }
}

fn map_login_validation_error(err: LoginValidationError) -> Error {
    let message = err.to_string();
    match err {
        LoginValidationError::EmptyUsername => Error::invalid_request(message)
            .with_details(json!({ "field": "username", "code": "empty_username" })),
        LoginValidationError::UsernameTooLong { max } => Error::invalid_request(message)
            .with_details(json!({ "field": "username", "code": "username_too_long", "max": max })),
        LoginValidationError::EmptyPassword => Error::invalid_request(message)
            .with_details(json!({ "field": "password", "code": "empty_password" })),
    }
}

/// Exchange credentials for a bearer token.
#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = LoginResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema),
        (status = 503, description = "Storage unavailable", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/api/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<LoginResponse>> {
    let credentials =
        LoginCredentials::try_from(payload.into_inner()).map_err(map_login_validation_error)?;
    let token = state.login.login(&credentials).await?;
    Ok(web::Json(LoginResponse {
        token: token.into(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use rstest::rstest;
    use serde_json::Value;

    use crate::inbound::http::configure;
    use crate::inbound::http::test_utils::{NURSE_PASSWORD, NURSE_USERNAME, memory_state_with_nurse};

    #[derive(Debug)]
    struct ValidationExpectation<'a> {
        message: &'a str,
        field: &'a str,
        code: &'a str,
    }

    macro_rules! app {
        () => {{
            let harness = memory_state_with_nurse().await;
            actix_test::init_service(
                App::new()
                    .app_data(web::Data::new(harness.state))
                    .configure(configure),
            )
            .await
        }};
    }

    fn login_request(username: &str, password: &str) -> actix_test::TestRequest {
        actix_test::TestRequest::post()
            .uri("/api/login")
            .set_json(&LoginRequest {
                username: username.into(),
                password: password.into(),
            })
    }

    #[rstest]
    #[case(
        "   ",
        "password",
        ValidationExpectation {
            message: "username must not be empty",
            field: "username",
            code: "empty_username",
        }
    )]
    #[case(
        "nurse",
        "",
        ValidationExpectation {
            message: "password must not be empty",
            field: "password",
            code: "empty_password",
        }
    )]
    #[actix_web::test]
    async fn login_rejects_blank_fields(
        #[case] username: &str,
        #[case] password: &str,
        #[case] expected: ValidationExpectation<'_>,
    ) {
        let app = app!();

        let response = actix_test::call_service(&app, login_request(username, password).to_request()).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let value: Value = actix_test::read_body_json(response).await;
        assert_eq!(value["error"], expected.message);
        assert_eq!(value["code"], "invalid_request");
        assert_eq!(value["details"]["field"], expected.field);
        assert_eq!(value["details"]["code"], expected.code);
    }

    #[rstest]
    #[case(NURSE_USERNAME, "wrong-password")]
    #[case("nobody", NURSE_PASSWORD)]
    #[actix_web::test]
    async fn wrong_credentials_are_unauthorised_without_token(
        #[case] username: &str,
        #[case] password: &str,
    ) {
        let app = app!();

        let response = actix_test::call_service(&app, login_request(username, password).to_request()).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let value: Value = actix_test::read_body_json(response).await;
        assert_eq!(value["error"], "Invalid credentials");
        assert!(value.get("token").is_none());
    }

    #[actix_web::test]
    async fn correct_credentials_return_a_token() {
        let app = app!();

        let response: LoginResponse = actix_test::call_and_read_body_json(
            &app,
            login_request(NURSE_USERNAME, NURSE_PASSWORD).to_request(),
        )
        .await;
        assert_eq!(response.token.split('.').count(), 3);
    }

    #[actix_web::test]
    async fn empty_json_object_is_a_validation_error() {
        let app = app!();
        let request = actix_test::TestRequest::post()
            .uri("/api/login")
            .set_json(serde_json::json!({}))
            .to_request();

        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
