//! PostgreSQL-backed `ProgramRepository` implementation using Diesel ORM.
//!
//! Name uniqueness is enforced by the `programs_name_key` unique index, so
//! concurrent creators race on the index rather than on a pre-check.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ProgramRepository, ProgramRepositoryError};
use crate::domain::{NewProgram, Program};

use super::diesel_helpers::{DieselFailure, classify_diesel_error};
use super::models::{NewProgramRow, ProgramRow};
use super::pool::{DbPool, PoolError};
use super::schema::programs;

/// Diesel-backed program storage.
#[derive(Clone)]
pub struct DieselProgramRepository {
    pool: DbPool,
}

impl DieselProgramRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ProgramRepositoryError {
    ProgramRepositoryError::connection(error.into_message())
}

fn map_diesel_error(error: diesel::result::Error, name: &str) -> ProgramRepositoryError {
    match classify_diesel_error(error) {
        DieselFailure::UniqueViolation { .. } => ProgramRepositoryError::duplicate_name(name),
        DieselFailure::Connection { message } => ProgramRepositoryError::connection(message),
        DieselFailure::Query { message } => ProgramRepositoryError::query(message),
        DieselFailure::ForeignKeyViolation { constraint } => ProgramRepositoryError::query(
            format!("unexpected foreign key violation: {constraint:?}"),
        ),
    }
}

#[async_trait]
impl ProgramRepository for DieselProgramRepository {
    async fn insert(&self, program: &NewProgram) -> Result<Program, ProgramRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let name = program.name().as_ref();
        let row = NewProgramRow {
            name,
            description: program.description(),
        };

        let stored: ProgramRow = diesel::insert_into(programs::table)
            .values(&row)
            .returning(ProgramRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, name))?;
        Ok(stored.into())
    }

    async fn list_all(&self) -> Result<Vec<Program>, ProgramRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<ProgramRow> = programs::table
            .order_by(programs::id)
            .select(ProgramRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, ""))?;
        Ok(rows.into_iter().map(Program::from).collect())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for program repository error mapping.
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn pool_errors_are_connection_failures() {
        let error = map_pool_error(PoolError::build("bad url"));
        assert_eq!(error, ProgramRepositoryError::connection("bad url"));
    }
}
