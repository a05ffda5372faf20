//! PostgreSQL-backed `ClientRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use crate::domain::ports::{ClientRepository, ClientRepositoryError};
use crate::domain::{Client, ClientId, ClientProfile, NewClient};

use super::diesel_helpers::{DieselFailure, classify_diesel_error, escape_like};
use super::models::{ClientRow, NewClientRow};
use super::pool::{DbPool, PoolError};
use super::schema::{clients, enrollments, programs};

/// Diesel-backed client storage.
#[derive(Clone)]
pub struct DieselClientRepository {
    pool: DbPool,
}

impl DieselClientRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ClientRepositoryError {
    ClientRepositoryError::connection(error.into_message())
}

fn map_diesel_error(error: diesel::result::Error) -> ClientRepositoryError {
    match classify_diesel_error(error) {
        DieselFailure::Connection { message } => ClientRepositoryError::connection(message),
        DieselFailure::Query { message } => ClientRepositoryError::query(message),
        DieselFailure::UniqueViolation { constraint }
        | DieselFailure::ForeignKeyViolation { constraint } => ClientRepositoryError::query(
            format!("unexpected constraint violation: {constraint:?}"),
        ),
    }
}

#[async_trait]
impl ClientRepository for DieselClientRepository {
    async fn insert(&self, client: &NewClient) -> Result<Client, ClientRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewClientRow {
            name: client.name(),
            date_of_birth: client.date_of_birth(),
            gender: client.gender(),
            contact_info: client.contact_info(),
        };

        let stored: ClientRow = diesel::insert_into(clients::table)
            .values(&row)
            .returning(ClientRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(stored.into())
    }

    async fn find_by_id(&self, id: ClientId) -> Result<Option<Client>, ClientRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<ClientRow> = clients::table
            .find(id.as_i64())
            .select(ClientRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(Client::from))
    }

    async fn find_profile(
        &self,
        id: ClientId,
    ) -> Result<Option<ClientProfile>, ClientRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let client_id = id.as_i64();

        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            async move {
                let Some(row) = clients::table
                    .find(client_id)
                    .select(ClientRow::as_select())
                    .first(conn)
                    .await
                    .optional()?
                else {
                    return Ok(None);
                };

                let names: Vec<String> = enrollments::table
                    .inner_join(programs::table)
                    .filter(enrollments::client_id.eq(client_id))
                    .select(programs::name)
                    .load(conn)
                    .await?;

                Ok(Some(ClientProfile::new(Client::from(row), names)))
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }

    async fn search_by_name(&self, fragment: &str) -> Result<Vec<Client>, ClientRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let pattern = escape_like(fragment);
        let rows: Vec<ClientRow> = clients::table
            .filter(clients::name.ilike(pattern))
            .order_by(clients::id)
            .select(ClientRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(Client::from).collect())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for client repository error mapping.
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn pool_errors_are_connection_failures() {
        let error = map_pool_error(PoolError::checkout("timed out"));
        assert_eq!(error, ClientRepositoryError::connection("timed out"));
    }

    #[rstest]
    fn not_found_maps_to_query() {
        let error = map_diesel_error(diesel::result::Error::NotFound);
        assert!(matches!(error, ClientRepositoryError::Query { .. }));
    }
}
