//! Enrollment links between clients and programs.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Client, ClientId, ProgramId};

/// Validation errors for enrollment input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnrollmentValidationError {
    /// One or both identifiers were missing or blank.
    MissingIds,
    /// An identifier was present but not an integer.
    InvalidId,
}

impl fmt::Display for EnrollmentValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingIds => write!(f, "Client ID and Program ID are required"),
            Self::InvalidId => write!(f, "Client ID and Program ID must be integers"),
        }
    }
}

impl std::error::Error for EnrollmentValidationError {}

/// Storage-assigned enrollment identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnrollmentId(i64);

impl EnrollmentId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Raw identifier value.
    #[must_use]
    pub const fn as_i64(self) -> i64 {
        self.0
    }
}

/// Validated request to enroll a client in a program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnrollmentRequest {
    client_id: ClientId,
    program_id: ProgramId,
}

impl EnrollmentRequest {
    /// Build a request from already typed identifiers.
    pub const fn new(client_id: ClientId, program_id: ProgramId) -> Self {
        Self {
            client_id,
            program_id,
        }
    }

    /// Parse raw form values.
    ///
    /// # Examples
    /// ```
    /// use health_registry::domain::EnrollmentRequest;
    ///
    /// let request = EnrollmentRequest::try_from_parts(Some("1"), Some(" 2 ")).expect("valid");
    /// assert_eq!(request.program_id().as_i64(), 2);
    /// assert!(EnrollmentRequest::try_from_parts(Some("1"), None).is_err());
    /// ```
    pub fn try_from_parts(
        client_id: Option<&str>,
        program_id: Option<&str>,
    ) -> Result<Self, EnrollmentValidationError> {
        let (Some(client_raw), Some(program_raw)) = (
            client_id.map(str::trim).filter(|v| !v.is_empty()),
            program_id.map(str::trim).filter(|v| !v.is_empty()),
        ) else {
            return Err(EnrollmentValidationError::MissingIds);
        };
        let client_id = client_raw
            .parse::<i64>()
            .map_err(|_| EnrollmentValidationError::InvalidId)?;
        let program_id = program_raw
            .parse::<i64>()
            .map_err(|_| EnrollmentValidationError::InvalidId)?;
        Ok(Self::new(ClientId::new(client_id), ProgramId::new(program_id)))
    }

    /// Client to enroll.
    pub fn client_id(&self) -> ClientId {
        self.client_id
    }

    /// Program to enroll into.
    pub fn program_id(&self) -> ProgramId {
        self.program_id
    }
}

/// A stored enrollment. At most one exists per (client, program) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Enrollment {
    id: EnrollmentId,
    client_id: ClientId,
    program_id: ProgramId,
}

impl Enrollment {
    /// Construct from stored identifiers.
    pub const fn new(id: EnrollmentId, client_id: ClientId, program_id: ProgramId) -> Self {
        Self {
            id,
            client_id,
            program_id,
        }
    }

    /// Storage identifier.
    pub fn id(&self) -> EnrollmentId {
        self.id
    }

    /// Enrolled client.
    pub fn client_id(&self) -> ClientId {
        self.client_id
    }

    /// Program enrolled in.
    pub fn program_id(&self) -> ProgramId {
        self.program_id
    }
}

/// A client together with the names of the programs they are enrolled in.
///
/// Program order is unspecified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientProfile {
    client: Client,
    programs: Vec<String>,
}

impl ClientProfile {
    /// Pair a client with its program names.
    pub fn new(client: Client, programs: Vec<String>) -> Self {
        Self { client, programs }
    }

    /// The client record.
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Names of enrolled programs.
    pub fn programs(&self) -> &[String] {
        &self.programs
    }
}
