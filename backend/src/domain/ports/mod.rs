//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports (`RegistryCommand`, `RegistryQuery`, `LoginService`) are
//! called by inbound adapters. Driven ports (repositories, hashing, token
//! signing) are implemented by outbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod client_repository;
mod enrollment_repository;
mod login_service;
mod password_hasher;
mod program_repository;
mod registry_command;
mod registry_query;
mod token_service;
mod user_repository;

#[cfg(test)]
pub use client_repository::MockClientRepository;
pub use client_repository::{ClientRepository, ClientRepositoryError};
#[cfg(test)]
pub use enrollment_repository::MockEnrollmentRepository;
pub use enrollment_repository::{EnrollmentRepository, EnrollmentRepositoryError};
pub use login_service::LoginService;
#[cfg(test)]
pub use login_service::MockLoginService;
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHasher, PasswordHasherError};
#[cfg(test)]
pub use program_repository::MockProgramRepository;
pub use program_repository::{ProgramRepository, ProgramRepositoryError};
#[cfg(test)]
pub use registry_command::MockRegistryCommand;
pub use registry_command::RegistryCommand;
#[cfg(test)]
pub use registry_query::MockRegistryQuery;
pub use registry_query::RegistryQuery;
#[cfg(test)]
pub use token_service::MockTokenService;
pub use token_service::{TokenService, TokenServiceError};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
