//! Port abstraction for enrollment persistence.

use async_trait::async_trait;

use crate::domain::{Enrollment, EnrollmentRequest};

use super::define_port_error;

define_port_error! {
    /// Errors raised by enrollment repository adapters.
    pub enum EnrollmentRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "enrollment repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "enrollment repository query failed: {message}",
        /// The (client, program) pair is already enrolled.
        Duplicate { client_id: i64, program_id: i64 } =>
            "client {client_id} already enrolled in program {program_id}",
        /// The referenced client does not exist.
        MissingClient { client_id: i64 } => "client {client_id} does not exist",
        /// The referenced program does not exist.
        MissingProgram { program_id: i64 } => "program {program_id} does not exist",
    }
}

/// Storage for enrollment links.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EnrollmentRepository: Send + Sync {
    /// Atomically check both references exist and insert the link.
    ///
    /// The referential checks and the insert form a single unit; the
    /// uniqueness of the pair is enforced by storage.
    async fn insert(
        &self,
        request: &EnrollmentRequest,
    ) -> Result<Enrollment, EnrollmentRepositoryError>;
}
