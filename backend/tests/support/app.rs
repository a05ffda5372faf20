//! In-memory application wiring for HTTP-level integration tests.

use std::sync::Arc;

use actix_web::http::header;
use actix_web::test::TestRequest;

use health_registry::domain::{
    AccessGate, CredentialStore, Password, RegistryService, TokenLoginService, Username,
};
use health_registry::inbound::http::state::HttpState;
use health_registry::outbound::memory::{InMemoryRegistry, InMemoryUserRepository};
use health_registry::outbound::security::{Argon2PasswordHasher, JwtTokenService};

pub const SECRET: &[u8] = b"integration-secret-0123456789abcdef";

/// Build handler state over fresh in-memory stores with one provisioned user.
pub async fn state_with_user(username: &str, password: &str) -> HttpState {
    let store = Arc::new(InMemoryRegistry::new());
    let registry = Arc::new(RegistryService::new(store.clone(), store.clone(), store));
    let tokens = Arc::new(JwtTokenService::new(SECRET));
    let credentials = CredentialStore::new(
        Arc::new(InMemoryUserRepository::new()),
        Arc::new(Argon2PasswordHasher::new()),
    );
    credentials
        .provision_user(
            &Username::new(username).expect("valid username"),
            &Password::new(password).expect("valid password"),
        )
        .await
        .expect("provision user");
    let login = Arc::new(TokenLoginService::new(credentials, tokens.clone()));
    HttpState::from_registry(registry, login, AccessGate::new(tokens))
}

/// URL-encoded form submission.
pub fn form_post(uri: &str, body: &str) -> TestRequest {
    TestRequest::post()
        .uri(uri)
        .insert_header((header::CONTENT_TYPE, "application/x-www-form-urlencoded"))
        .set_payload(body.to_owned())
}
