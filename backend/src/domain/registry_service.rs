//! Registry domain service.
//!
//! Implements the registry driving ports on top of the client, program and
//! enrollment repositories, translating port failures into domain errors.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

use crate::domain::ports::{
    ClientRepository, ClientRepositoryError, EnrollmentRepository, EnrollmentRepositoryError,
    ProgramRepository, ProgramRepositoryError, RegistryCommand, RegistryQuery,
};
use crate::domain::{
    Client, ClientId, ClientProfile, Enrollment, EnrollmentRequest, Error, NewClient, NewProgram,
    Program,
};

const CLIENT_NOT_FOUND: &str = "Client not found";

/// Registry service implementing [`RegistryCommand`] and [`RegistryQuery`].
#[derive(Clone)]
pub struct RegistryService<C, P, E> {
    clients: Arc<C>,
    programs: Arc<P>,
    enrollments: Arc<E>,
}

impl<C, P, E> RegistryService<C, P, E> {
    /// Create a new service with the given repositories.
    pub fn new(clients: Arc<C>, programs: Arc<P>, enrollments: Arc<E>) -> Self {
        Self {
            clients,
            programs,
            enrollments,
        }
    }
}

fn map_client_error(error: ClientRepositoryError) -> Error {
    match error {
        ClientRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("client repository unavailable: {message}"))
        }
        ClientRepositoryError::Query { message } => {
            Error::internal(format!("client repository error: {message}"))
        }
    }
}

fn map_program_error(error: ProgramRepositoryError) -> Error {
    match error {
        ProgramRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("program repository unavailable: {message}"))
        }
        ProgramRepositoryError::Query { message } => {
            Error::internal(format!("program repository error: {message}"))
        }
        ProgramRepositoryError::DuplicateName { name } => {
            Error::conflict("Program already exists").with_details(json!({ "name": name }))
        }
    }
}

fn map_enrollment_error(error: EnrollmentRepositoryError) -> Error {
    match error {
        EnrollmentRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("enrollment repository unavailable: {message}"))
        }
        EnrollmentRepositoryError::Query { message } => {
            Error::internal(format!("enrollment repository error: {message}"))
        }
        EnrollmentRepositoryError::Duplicate {
            client_id,
            program_id,
        } => Error::conflict("Client already enrolled").with_details(json!({
            "clientId": client_id,
            "programId": program_id,
        })),
        EnrollmentRepositoryError::MissingClient { client_id } => {
            Error::not_found(CLIENT_NOT_FOUND).with_details(json!({ "clientId": client_id }))
        }
        EnrollmentRepositoryError::MissingProgram { program_id } => {
            Error::not_found("Program not found").with_details(json!({ "programId": program_id }))
        }
    }
}

#[async_trait]
impl<C, P, E> RegistryCommand for RegistryService<C, P, E>
where
    C: ClientRepository,
    P: ProgramRepository,
    E: EnrollmentRepository,
{
    async fn create_program(&self, program: NewProgram) -> Result<Program, Error> {
        let created = self
            .programs
            .insert(&program)
            .await
            .map_err(map_program_error)?;
        debug!(program_id = %created.id(), "program created");
        Ok(created)
    }

    async fn register_client(&self, client: NewClient) -> Result<Client, Error> {
        let created = self
            .clients
            .insert(&client)
            .await
            .map_err(map_client_error)?;
        debug!(client_id = %created.id(), "client registered");
        Ok(created)
    }

    async fn enroll_client(&self, request: EnrollmentRequest) -> Result<Enrollment, Error> {
        let enrollment = self
            .enrollments
            .insert(&request)
            .await
            .map_err(map_enrollment_error)?;
        debug!(
            client_id = %request.client_id(),
            program_id = %request.program_id(),
            "client enrolled"
        );
        Ok(enrollment)
    }
}

#[async_trait]
impl<C, P, E> RegistryQuery for RegistryService<C, P, E>
where
    C: ClientRepository,
    P: ProgramRepository,
    E: EnrollmentRepository,
{
    async fn list_programs(&self) -> Result<Vec<Program>, Error> {
        self.programs.list_all().await.map_err(map_program_error)
    }

    async fn search_clients(&self, query: &str) -> Result<Vec<Client>, Error> {
        let fragment = query.trim();
        if fragment.is_empty() {
            return Ok(Vec::new());
        }
        self.clients
            .search_by_name(fragment)
            .await
            .map_err(map_client_error)
    }

    async fn get_client(&self, id: ClientId) -> Result<Client, Error> {
        self.clients
            .find_by_id(id)
            .await
            .map_err(map_client_error)?
            .ok_or_else(|| Error::not_found(CLIENT_NOT_FOUND))
    }

    async fn get_client_profile(&self, id: ClientId) -> Result<ClientProfile, Error> {
        self.clients
            .find_profile(id)
            .await
            .map_err(map_client_error)?
            .ok_or_else(|| Error::not_found(CLIENT_NOT_FOUND))
    }
}

#[cfg(test)]
#[path = "registry_service_tests.rs"]
mod tests;
