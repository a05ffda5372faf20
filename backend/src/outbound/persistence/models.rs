//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use chrono::NaiveDate;
use diesel::prelude::*;

use crate::domain::{
    Client, ClientId, Enrollment, EnrollmentId, PasswordHash, Program, ProgramId, User, UserId,
    Username,
};

use super::schema::{clients, enrollments, programs, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
}

impl UserRow {
    /// Convert into a domain user, rejecting usernames that no longer
    /// validate.
    pub fn into_domain(self) -> Result<User, String> {
        let username = Username::new(&self.username)
            .map_err(|err| format!("stored username {:?} is invalid: {err}", self.username))?;
        Ok(User::new(
            UserId::new(self.id),
            username,
            PasswordHash::new(self.password_hash),
        ))
    }
}

/// Insertable struct for creating user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub username: &'a str,
    pub password_hash: &'a str,
}

/// Row struct for reading from the clients table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = clients)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ClientRow {
    pub id: i64,
    pub name: String,
    pub date_of_birth: NaiveDate,
    pub gender: String,
    pub contact_info: String,
}

impl From<ClientRow> for Client {
    fn from(row: ClientRow) -> Self {
        Client::from_stored(
            ClientId::new(row.id),
            row.name,
            row.date_of_birth,
            row.gender,
            row.contact_info,
        )
    }
}

/// Insertable struct for client registration.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = clients)]
pub(crate) struct NewClientRow<'a> {
    pub name: &'a str,
    pub date_of_birth: NaiveDate,
    pub gender: &'a str,
    pub contact_info: &'a str,
}

/// Row struct for reading from the programs table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = programs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ProgramRow {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

impl From<ProgramRow> for Program {
    fn from(row: ProgramRow) -> Self {
        Program::from_stored(ProgramId::new(row.id), row.name, row.description)
    }
}

/// Insertable struct for program creation.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = programs)]
pub(crate) struct NewProgramRow<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
}

/// Row struct for reading from the enrollments table.
#[derive(Debug, Clone, Copy, Queryable, Selectable)]
#[diesel(table_name = enrollments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct EnrollmentRow {
    pub id: i64,
    pub client_id: i64,
    pub program_id: i64,
}

impl From<EnrollmentRow> for Enrollment {
    fn from(row: EnrollmentRow) -> Self {
        Enrollment::new(
            EnrollmentId::new(row.id),
            ClientId::new(row.client_id),
            ProgramId::new(row.program_id),
        )
    }
}

/// Insertable struct for enrollment links.
#[derive(Debug, Clone, Copy, Insertable)]
#[diesel(table_name = enrollments)]
pub(crate) struct NewEnrollmentRow {
    pub client_id: i64,
    pub program_id: i64,
}
