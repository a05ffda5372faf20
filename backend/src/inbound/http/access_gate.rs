//! Bearer-token middleware guarding the `/api/client` scope.
//!
//! Wrap a scope with `from_fn(require_bearer_token)`. Rejected requests never
//! reach the handler and receive the standard `401` error envelope. Accepted
//! requests carry the verified [`Username`] in their extensions.

use actix_web::body::{EitherBody, MessageBody};
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::http::header;
use actix_web::middleware::Next;
use actix_web::{HttpMessage, ResponseError, web};
use tracing::error;

use crate::domain::{Error, Username};
use crate::inbound::http::state::HttpState;

/// Run the access gate before delegating to `next`.
///
/// # Examples
/// ```
/// use actix_web::{App, middleware::from_fn, web};
/// use health_registry::inbound::http::access_gate::require_bearer_token;
/// use health_registry::inbound::http::clients::api_client_profile;
///
/// let app = App::new().service(
///     web::scope("/api/client")
///         .wrap(from_fn(require_bearer_token))
///         .service(api_client_profile),
/// );
/// ```
pub async fn require_bearer_token<B>(
    req: ServiceRequest,
    next: Next<B>,
) -> Result<ServiceResponse<EitherBody<B>>, actix_web::Error>
where
    B: MessageBody + 'static,
{
    let Some(gate) = req
        .app_data::<web::Data<HttpState>>()
        .map(|state| state.gate.clone())
    else {
        error!("access gate invoked without HTTP state");
        return Ok(reject(req, &Error::internal("HTTP state is not configured")));
    };

    let header_value = req
        .headers()
        .get(header::AUTHORIZATION)
        .map(|value| value.to_str().unwrap_or_default());

    match gate.authorize(header_value) {
        Ok(username) => {
            req.extensions_mut().insert::<Username>(username);
            next.call(req).await.map(ServiceResponse::map_into_left_body)
        }
        Err(err) => Ok(reject(req, &err)),
    }
}

fn reject<B>(req: ServiceRequest, err: &Error) -> ServiceResponse<EitherBody<B>> {
    req.into_response(err.error_response()).map_into_right_body()
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, middleware::from_fn, test as actix_test, web};
    use rstest::rstest;
    use serde_json::Value;

    use super::*;
    use crate::domain::ports::TokenService;
    use crate::inbound::http::configure;
    use crate::inbound::http::test_utils::{form_post, memory_state};

    const CLIENT: &str = "name=Jane+Roe&date_of_birth=1985-05-05&gender=Female&contact_info=x";

    fn nurse() -> Username {
        Username::new("nurse").expect("valid username")
    }

    #[rstest]
    #[case(None, "Token is missing")]
    #[case(Some("Basic bnVyc2U6c2VjcmV0"), "Invalid token")]
    #[case(Some("Bearer"), "Invalid token")]
    #[case(Some("Bearer    "), "Invalid token")]
    #[case(Some("bearer abc.def.ghi"), "Invalid token")]
    #[case(Some("Bearer not-a-token"), "Invalid token")]
    #[actix_web::test]
    async fn rejected_requests_never_reach_the_handler(
        #[case] authorization: Option<&str>,
        #[case] message: &str,
    ) {
        let harness = memory_state();
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(harness.state))
                .configure(configure),
        )
        .await;
        let res = actix_test::call_service(&app, form_post("/register_client", CLIENT).to_request()).await;
        assert_eq!(res.status(), StatusCode::FOUND);

        let mut request = actix_test::TestRequest::get().uri("/api/client/1");
        if let Some(value) = authorization {
            request = request.insert_header((header::AUTHORIZATION, value));
        }
        let res = actix_test::call_service(&app, request.to_request()).await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let value: Value = actix_test::read_body_json(res).await;
        assert_eq!(value["error"], message);
        assert_eq!(value["code"], "unauthorized");
    }

    #[actix_web::test]
    async fn valid_token_unlocks_the_profile() {
        let harness = memory_state();
        let token = harness.tokens.issue(&nurse()).expect("issue token");
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(harness.state))
                .configure(configure),
        )
        .await;
        actix_test::call_service(&app, form_post("/register_client", CLIENT).to_request()).await;

        let authorised = |uri: &str| {
            actix_test::TestRequest::get()
                .uri(uri)
                .insert_header((header::AUTHORIZATION, format!("Bearer {}", token.as_str())))
                .to_request()
        };

        let profile: Value =
            actix_test::call_and_read_body_json(&app, authorised("/api/client/1")).await;
        assert_eq!(profile["name"], "Jane Roe");
        assert_eq!(profile["date_of_birth"], "1985-05-05");
        assert_eq!(profile["enrollments"], serde_json::json!([]));

        let missing = actix_test::call_service(&app, authorised("/api/client/42")).await;
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    }

    #[rstest]
    #[case("Bearer  {token}")]
    #[case("Bearer {token}  ")]
    #[actix_web::test]
    async fn padded_valid_token_is_rejected(#[case] template: &str) {
        let harness = memory_state();
        let token = harness.tokens.issue(&nurse()).expect("issue token");
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(harness.state))
                .configure(configure),
        )
        .await;
        actix_test::call_service(&app, form_post("/register_client", CLIENT).to_request()).await;

        let value = template.replace("{token}", token.as_str());
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/client/1")
                .insert_header((header::AUTHORIZATION, value))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn verified_identity_is_stored_in_extensions() {
        let harness = memory_state();
        let token = harness.tokens.issue(&nurse()).expect("issue token");
        let app = actix_test::init_service(
            App::new().app_data(web::Data::new(harness.state)).service(
                web::scope("/guarded")
                    .wrap(from_fn(require_bearer_token))
                    .route(
                        "",
                        web::get().to(|req: actix_web::HttpRequest| async move {
                            let name = req
                                .extensions()
                                .get::<Username>()
                                .map(ToString::to_string)
                                .unwrap_or_default();
                            HttpResponse::Ok().body(name)
                        }),
                    ),
            ),
        )
        .await;

        let request = actix_test::TestRequest::get()
            .uri("/guarded")
            .insert_header((header::AUTHORIZATION, format!("Bearer {}", token.as_str())))
            .to_request();
        let body = actix_test::call_and_read_body(&app, request).await;
        assert_eq!(body.as_ref(), b"nurse");
    }
}
