//! PostgreSQL-backed `EnrollmentRepository` implementation using Diesel ORM.
//!
//! Reference checks and the insert share one transaction. The unique index
//! `enrollments_client_id_program_id_key` rejects duplicate pairs and the
//! foreign keys catch references removed between the check and the insert.

use async_trait::async_trait;
use diesel::dsl::exists;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use crate::domain::ports::{EnrollmentRepository, EnrollmentRepositoryError};
use crate::domain::{Enrollment, EnrollmentRequest};

use super::diesel_helpers::{DieselFailure, classify_diesel_error};
use super::models::{EnrollmentRow, NewEnrollmentRow};
use super::pool::{DbPool, PoolError};
use super::schema::{clients, enrollments, programs};

const CLIENT_FK: &str = "enrollments_client_id_fkey";

/// Diesel-backed enrollment storage.
#[derive(Clone)]
pub struct DieselEnrollmentRepository {
    pool: DbPool,
}

impl DieselEnrollmentRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

enum InsertOutcome {
    Inserted(EnrollmentRow),
    MissingClient,
    MissingProgram,
}

fn map_pool_error(error: PoolError) -> EnrollmentRepositoryError {
    EnrollmentRepositoryError::connection(error.into_message())
}

fn map_diesel_error(error: diesel::result::Error, row: NewEnrollmentRow) -> EnrollmentRepositoryError {
    match classify_diesel_error(error) {
        DieselFailure::UniqueViolation { .. } => {
            EnrollmentRepositoryError::duplicate(row.client_id, row.program_id)
        }
        DieselFailure::ForeignKeyViolation { constraint } => {
            if constraint.as_deref() == Some(CLIENT_FK) {
                EnrollmentRepositoryError::missing_client(row.client_id)
            } else {
                EnrollmentRepositoryError::missing_program(row.program_id)
            }
        }
        DieselFailure::Connection { message } => EnrollmentRepositoryError::connection(message),
        DieselFailure::Query { message } => EnrollmentRepositoryError::query(message),
    }
}

#[async_trait]
impl EnrollmentRepository for DieselEnrollmentRepository {
    async fn insert(
        &self,
        request: &EnrollmentRequest,
    ) -> Result<Enrollment, EnrollmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewEnrollmentRow {
            client_id: request.client_id().as_i64(),
            program_id: request.program_id().as_i64(),
        };

        let outcome = conn
            .transaction::<_, diesel::result::Error, _>(|conn| {
                async move {
                    let client_exists: bool =
                        diesel::select(exists(clients::table.find(row.client_id)))
                            .get_result(conn)
                            .await?;
                    if !client_exists {
                        return Ok(InsertOutcome::MissingClient);
                    }

                    let program_exists: bool =
                        diesel::select(exists(programs::table.find(row.program_id)))
                            .get_result(conn)
                            .await?;
                    if !program_exists {
                        return Ok(InsertOutcome::MissingProgram);
                    }

                    let stored = diesel::insert_into(enrollments::table)
                        .values(&row)
                        .returning(EnrollmentRow::as_returning())
                        .get_result(conn)
                        .await?;
                    Ok(InsertOutcome::Inserted(stored))
                }
                .scope_boxed()
            })
            .await
            .map_err(|err| map_diesel_error(err, row))?;

        match outcome {
            InsertOutcome::Inserted(stored) => Ok(stored.into()),
            InsertOutcome::MissingClient => Err(EnrollmentRepositoryError::missing_client(
                row.client_id,
            )),
            InsertOutcome::MissingProgram => Err(EnrollmentRepositoryError::missing_program(
                row.program_id,
            )),
        }
    }
}
