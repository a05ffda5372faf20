//! In-process registry storage.
//!
//! All three tables sit behind one mutex so reference checks, uniqueness
//! checks and inserts happen atomically, matching the database constraints.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{
    ClientRepository, ClientRepositoryError, EnrollmentRepository, EnrollmentRepositoryError,
    ProgramRepository, ProgramRepositoryError,
};
use crate::domain::{
    Client, ClientId, ClientProfile, Enrollment, EnrollmentId, EnrollmentRequest, NewClient,
    NewProgram, Program, ProgramId,
};

#[derive(Default)]
struct Tables {
    next_id: i64,
    clients: BTreeMap<ClientId, Client>,
    programs: BTreeMap<ProgramId, Program>,
    enrollments: Vec<Enrollment>,
}

impl Tables {
    fn allocate(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// Registry storage held in memory for tests and database-less runs.
///
/// Identifiers are allocated from one counter shared by every table.
#[derive(Default)]
pub struct InMemoryRegistry {
    tables: Mutex<Tables>,
}

impl InMemoryRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(|err| err.into_inner())
    }

    #[cfg(test)]
    pub(crate) fn enrollment_count(&self, client_id: ClientId, program_id: ProgramId) -> usize {
        self.lock()
            .enrollments
            .iter()
            .filter(|e| e.client_id() == client_id && e.program_id() == program_id)
            .count()
    }
}

#[async_trait]
impl ClientRepository for InMemoryRegistry {
    async fn insert(&self, client: &NewClient) -> Result<Client, ClientRepositoryError> {
        let mut tables = self.lock();
        let id = ClientId::new(tables.allocate());
        let stored = Client::new(id, client.clone());
        tables.clients.insert(id, stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: ClientId) -> Result<Option<Client>, ClientRepositoryError> {
        Ok(self.lock().clients.get(&id).cloned())
    }

    async fn find_profile(
        &self,
        id: ClientId,
    ) -> Result<Option<ClientProfile>, ClientRepositoryError> {
        let tables = self.lock();
        let Some(client) = tables.clients.get(&id).cloned() else {
            return Ok(None);
        };
        let programs = tables
            .enrollments
            .iter()
            .filter(|enrollment| enrollment.client_id() == id)
            .filter_map(|enrollment| tables.programs.get(&enrollment.program_id()))
            .map(|program| program.name().to_owned())
            .collect();
        Ok(Some(ClientProfile::new(client, programs)))
    }

    async fn search_by_name(&self, fragment: &str) -> Result<Vec<Client>, ClientRepositoryError> {
        let needle = fragment.to_lowercase();
        Ok(self
            .lock()
            .clients
            .values()
            .filter(|client| client.name().to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ProgramRepository for InMemoryRegistry {
    async fn insert(&self, program: &NewProgram) -> Result<Program, ProgramRepositoryError> {
        let mut tables = self.lock();
        let name = program.name().as_ref();
        if tables.programs.values().any(|existing| existing.name() == name) {
            return Err(ProgramRepositoryError::duplicate_name(name));
        }
        let id = ProgramId::new(tables.allocate());
        let stored = Program::new(id, program.clone());
        tables.programs.insert(id, stored.clone());
        Ok(stored)
    }

    async fn list_all(&self) -> Result<Vec<Program>, ProgramRepositoryError> {
        Ok(self.lock().programs.values().cloned().collect())
    }
}

#[async_trait]
impl EnrollmentRepository for InMemoryRegistry {
    async fn insert(
        &self,
        request: &EnrollmentRequest,
    ) -> Result<Enrollment, EnrollmentRepositoryError> {
        let mut tables = self.lock();
        let (client_id, program_id) = (request.client_id(), request.program_id());
        if !tables.clients.contains_key(&client_id) {
            return Err(EnrollmentRepositoryError::missing_client(client_id.as_i64()));
        }
        if !tables.programs.contains_key(&program_id) {
            return Err(EnrollmentRepositoryError::missing_program(
                program_id.as_i64(),
            ));
        }
        if tables
            .enrollments
            .iter()
            .any(|e| e.client_id() == client_id && e.program_id() == program_id)
        {
            return Err(EnrollmentRepositoryError::duplicate(
                client_id.as_i64(),
                program_id.as_i64(),
            ));
        }
        let id = EnrollmentId::new(tables.allocate());
        let stored = Enrollment::new(id, client_id, program_id);
        tables.enrollments.push(stored);
        Ok(stored)
    }
}
