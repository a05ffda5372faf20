//! Port abstraction for program persistence.

use async_trait::async_trait;

use crate::domain::{NewProgram, Program};

use super::define_port_error;

define_port_error! {
    /// Errors raised by program repository adapters.
    pub enum ProgramRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "program repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "program repository query failed: {message}",
        /// A program with the same name already exists.
        DuplicateName { name: String } => "program name already exists: {name}",
    }
}

/// Storage for programs.
///
/// Implementations must enforce name uniqueness themselves (a unique index or
/// an equivalent atomic check) rather than relying on callers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProgramRepository: Send + Sync {
    /// Store a new program, failing with
    /// [`ProgramRepositoryError::DuplicateName`] when the name is taken.
    async fn insert(&self, program: &NewProgram) -> Result<Program, ProgramRepositoryError>;

    /// All programs ordered by identifier.
    async fn list_all(&self) -> Result<Vec<Program>, ProgramRepositoryError>;
}
