//! Domain primitives, services and ports.
//!
//! Purpose: define strongly typed registry entities, the credential and
//! token use-cases, and the port traits adapters implement. Nothing here
//! depends on HTTP or SQL.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - Client, Program, Enrollment and their validated inputs.
//! - RegistryService: registry driving ports over repositories.
//! - CredentialStore, TokenLoginService, AccessGate: authentication.

pub mod access_gate;
pub mod auth;
pub mod client;
pub mod credentials;
pub mod enrollment;
pub mod error;
pub mod login;
pub mod ports;
pub mod program;
pub mod registry_service;
pub mod trace_id;

pub use self::access_gate::{AccessGate, BEARER_PREFIX};
pub use self::auth::{
    BearerToken, LoginCredentials, LoginValidationError, Password, PasswordHash, User, UserId,
    Username,
};
pub use self::client::{Client, ClientId, ClientValidationError, NewClient};
pub use self::credentials::CredentialStore;
pub use self::enrollment::{
    ClientProfile, Enrollment, EnrollmentId, EnrollmentRequest, EnrollmentValidationError,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::login::TokenLoginService;
pub use self::program::{NewProgram, Program, ProgramId, ProgramName, ProgramValidationError};
pub use self::registry_service::RegistryService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use health_registry::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("Client not found"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
