//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::http::header;
use actix_web::test::TestRequest;

use crate::domain::{
    AccessGate, CredentialStore, Password, RegistryService, TokenLoginService, Username,
};
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::{InMemoryRegistry, InMemoryUserRepository};
use crate::outbound::security::{Argon2PasswordHasher, JwtTokenService};

pub const TEST_SECRET: &[u8] = b"http-test-secret-0123456789abcdef";
pub const NURSE_USERNAME: &str = "nurse";
pub const NURSE_PASSWORD: &str = "correct horse battery staple";

/// Handler state over fresh in-memory adapters plus handles for seeding.
pub struct TestHarness {
    pub state: HttpState,
    pub credentials: CredentialStore<InMemoryUserRepository, Argon2PasswordHasher>,
    pub tokens: Arc<JwtTokenService>,
}

/// Build handler state backed by empty in-memory stores.
pub fn memory_state() -> TestHarness {
    let store = Arc::new(InMemoryRegistry::new());
    let registry = Arc::new(RegistryService::new(store.clone(), store.clone(), store));
    let tokens = Arc::new(JwtTokenService::new(TEST_SECRET));
    let credentials = CredentialStore::new(
        Arc::new(InMemoryUserRepository::new()),
        Arc::new(Argon2PasswordHasher::new()),
    );
    let login = Arc::new(TokenLoginService::new(credentials.clone(), tokens.clone()));
    let state = HttpState::from_registry(registry, login, AccessGate::new(tokens.clone()));
    TestHarness {
        state,
        credentials,
        tokens,
    }
}

/// Like [`memory_state`] with the `nurse` account provisioned.
pub async fn memory_state_with_nurse() -> TestHarness {
    let harness = memory_state();
    let username = Username::new(NURSE_USERNAME).expect("valid username");
    let password = Password::new(NURSE_PASSWORD).expect("valid password");
    harness
        .credentials
        .provision_user(&username, &password)
        .await
        .expect("provision nurse");
    harness
}

/// URL-encoded form submission.
pub fn form_post(uri: &str, body: &str) -> TestRequest {
    TestRequest::post()
        .uri(uri)
        .insert_header((header::CONTENT_TYPE, "application/x-www-form-urlencoded"))
        .set_payload(body.to_owned())
}
