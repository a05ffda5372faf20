//! Driving port for registry mutations.
//!
//! Inbound adapters call this port to create programs, register clients and
//! enroll them without importing persistence concerns.

use async_trait::async_trait;

use crate::domain::{
    Client, Enrollment, EnrollmentRequest, Error, NewClient, NewProgram, Program,
};

/// Domain use-case port for registry writes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistryCommand: Send + Sync {
    /// Create a program. Fails with a conflict when the name is taken.
    async fn create_program(&self, program: NewProgram) -> Result<Program, Error>;

    /// Register a client. Client names need not be unique.
    async fn register_client(&self, client: NewClient) -> Result<Client, Error>;

    /// Enroll a client in a program.
    ///
    /// Fails with not-found when either side is missing and with a conflict
    /// when the pair is already enrolled.
    async fn enroll_client(&self, request: EnrollmentRequest) -> Result<Enrollment, Error>;
}
