//! Health programs that clients can be enrolled in.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Maximum length of a program name.
pub const PROGRAM_NAME_MAX: usize = 50;

/// Validation errors for program input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgramValidationError {
    /// Name was missing or blank after trimming.
    MissingName,
    /// Name exceeded [`PROGRAM_NAME_MAX`].
    NameTooLong { max: usize },
}

impl fmt::Display for ProgramValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingName => write!(f, "Program name is required"),
            Self::NameTooLong { max } => {
                write!(f, "Program name must be at most {max} characters")
            }
        }
    }
}

impl std::error::Error for ProgramValidationError {}

/// Storage-assigned program identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProgramId(i64);

impl ProgramId {
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

impl fmt::Display for ProgramId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Trimmed, non-empty program name. Unique across all programs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProgramName(String);

impl ProgramName {
    /// Validate and construct a program name.
    pub fn new(name: impl AsRef<str>) -> Result<Self, ProgramValidationError> {
        let trimmed = name.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ProgramValidationError::MissingName);
        }
        if trimmed.chars().count() > PROGRAM_NAME_MAX {
            return Err(ProgramValidationError::NameTooLong {
                max: PROGRAM_NAME_MAX,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for ProgramName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ProgramName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<ProgramName> for String {
    fn from(value: ProgramName) -> Self {
        value.0
    }
}

impl TryFrom<String> for ProgramName {
    type Error = ProgramValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Validated input for a program not yet stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProgram {
    name: ProgramName,
    description: Option<String>,
}

impl NewProgram {
    /// Validate raw form input. A blank description is treated as absent.
    ///
    /// # Examples
    /// ```
    /// use health_registry::domain::NewProgram;
    ///
    /// let program = NewProgram::try_from_parts(Some(" TB "), Some("  ")).expect("valid");
    /// assert_eq!(program.name().as_ref(), "TB");
    /// assert!(program.description().is_none());
    /// ```
    pub fn try_from_parts(
        name: Option<&str>,
        description: Option<&str>,
    ) -> Result<Self, ProgramValidationError> {
        let name = ProgramName::new(name.unwrap_or_default())?;
        let description = description
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(str::to_owned);
        Ok(Self { name, description })
    }

    /// Program name.
    pub fn name(&self) -> &ProgramName {
        &self.name
    }

    /// Optional description.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

/// A stored program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    id: ProgramId,
    name: String,
    description: Option<String>,
}

impl Program {
    /// Attach a storage identifier to validated input.
    pub fn new(id: ProgramId, draft: NewProgram) -> Self {
        Self {
            id,
            name: draft.name.into(),
            description: draft.description,
        }
    }

    /// Rebuild a program from a stored record.
    pub fn from_stored(id: ProgramId, name: String, description: Option<String>) -> Self {
        Self {
            id,
            name,
            description,
        }
    }

    /// Storage identifier.
    pub fn id(&self) -> ProgramId {
        self.id
    }

    /// Program name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Optional description.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}
