//! Client records and registration input validation.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Date format accepted for `date_of_birth`.
pub const DATE_OF_BIRTH_FORMAT: &str = "%Y-%m-%d";
/// Maximum length of a client name.
pub const CLIENT_NAME_MAX: usize = 100;
/// Maximum length of the gender field.
pub const GENDER_MAX: usize = 10;
/// Maximum length of the contact information field.
pub const CONTACT_INFO_MAX: usize = 100;

/// Validation errors returned by [`NewClient::try_from_parts`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientValidationError {
    /// At least one field was missing or blank.
    MissingField,
    /// `date_of_birth` did not parse as `YYYY-MM-DD`.
    InvalidDateOfBirth,
    /// A field exceeded its storage limit.
    FieldTooLong { field: &'static str, max: usize },
}

impl fmt::Display for ClientValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField => write!(f, "All fields are required"),
            Self::InvalidDateOfBirth => write!(f, "Invalid date format"),
            Self::FieldTooLong { field, max } => {
                write!(f, "{field} must be at most {max} characters")
            }
        }
    }
}

impl std::error::Error for ClientValidationError {}

/// Storage-assigned client identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientId(i64);

impl ClientId {
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

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validated registration input for a client not yet stored.
///
/// # Examples
/// ```
/// use health_registry::domain::NewClient;
///
/// let client = NewClient::try_from_parts(
///     Some(" Jane Roe "),
///     Some("1985-05-05"),
///     Some("Female"),
///     Some("jane@x.com"),
/// )
/// .expect("valid client");
/// assert_eq!(client.name(), "Jane Roe");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewClient {
    name: String,
    date_of_birth: NaiveDate,
    gender: String,
    contact_info: String,
}

impl NewClient {
    /// Validate raw form input.
    ///
    /// Text fields are trimmed; every field must be present and non-blank.
    /// Presence is checked before the date is parsed.
    pub fn try_from_parts(
        name: Option<&str>,
        date_of_birth: Option<&str>,
        gender: Option<&str>,
        contact_info: Option<&str>,
    ) -> Result<Self, ClientValidationError> {
        let name = required(name)?;
        let date_of_birth = required(date_of_birth)?;
        let gender = required(gender)?;
        let contact_info = required(contact_info)?;

        let date_of_birth = NaiveDate::parse_from_str(date_of_birth, DATE_OF_BIRTH_FORMAT)
            .map_err(|_| ClientValidationError::InvalidDateOfBirth)?;

        Ok(Self {
            name: bounded(name, "name", CLIENT_NAME_MAX)?,
            date_of_birth,
            gender: bounded(gender, "gender", GENDER_MAX)?,
            contact_info: bounded(contact_info, "contact_info", CONTACT_INFO_MAX)?,
        })
    }

    /// Client's full name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Calendar date of birth.
    pub fn date_of_birth(&self) -> NaiveDate {
        self.date_of_birth
    }

    /// Gender as supplied at registration.
    pub fn gender(&self) -> &str {
        &self.gender
    }

    /// Free-form contact details.
    pub fn contact_info(&self) -> &str {
        &self.contact_info
    }
}

fn required(value: Option<&str>) -> Result<&str, ClientValidationError> {
    match value.map(str::trim) {
        Some(trimmed) if !trimmed.is_empty() => Ok(trimmed),
        _ => Err(ClientValidationError::MissingField),
    }
}

fn bounded(value: &str, field: &'static str, max: usize) -> Result<String, ClientValidationError> {
    if value.chars().count() > max {
        return Err(ClientValidationError::FieldTooLong { field, max });
    }
    Ok(value.to_owned())
}

/// A registered client. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Client {
    id: ClientId,
    name: String,
    date_of_birth: NaiveDate,
    gender: String,
    contact_info: String,
}

impl Client {
    /// Attach a storage identifier to validated input.
    pub fn new(id: ClientId, draft: NewClient) -> Self {
        let NewClient {
            name,
            date_of_birth,
            gender,
            contact_info,
        } = draft;
        Self {
            id,
            name,
            date_of_birth,
            gender,
            contact_info,
        }
    }

    /// Rebuild a client from a stored record.
    pub fn from_stored(
        id: ClientId,
        name: String,
        date_of_birth: NaiveDate,
        gender: String,
        contact_info: String,
    ) -> Self {
        Self {
            id,
            name,
            date_of_birth,
            gender,
            contact_info,
        }
    }

    /// Storage identifier.
    pub fn id(&self) -> ClientId {
        self.id
    }

    /// Client's full name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Calendar date of birth.
    pub fn date_of_birth(&self) -> NaiveDate {
        self.date_of_birth
    }

    /// Gender as supplied at registration.
    pub fn gender(&self) -> &str {
        &self.gender
    }

    /// Free-form contact details.
    pub fn contact_info(&self) -> &str {
        &self.contact_info
    }
}
