//! In-process user storage.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{PasswordHash, User, UserId, Username};

#[derive(Default)]
struct UserTable {
    next_id: i64,
    by_name: HashMap<Username, User>,
}

/// User storage held in memory for tests and database-less runs.
#[derive(Default)]
pub struct InMemoryUserRepository {
    table: Mutex<UserTable>,
}

impl InMemoryUserRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, UserTable> {
        self.table.lock().unwrap_or_else(|err| err.into_inner())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(
        &self,
        username: &Username,
        password_hash: &PasswordHash,
    ) -> Result<User, UserPersistenceError> {
        let mut table = self.lock();
        if table.by_name.contains_key(username) {
            return Err(UserPersistenceError::duplicate_username(username.as_ref()));
        }
        table.next_id += 1;
        let user = User::new(
            UserId::new(table.next_id),
            username.clone(),
            password_hash.clone(),
        );
        table.by_name.insert(username.clone(), user.clone());
        Ok(user)
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserPersistenceError> {
        Ok(self.lock().by_name.get(username).cloned())
    }

    async fn update_password_hash(
        &self,
        username: &Username,
        password_hash: &PasswordHash,
    ) -> Result<bool, UserPersistenceError> {
        let mut table = self.lock();
        let Some(existing) = table.by_name.get(username) else {
            return Ok(false);
        };
        let replaced = User::new(existing.id(), username.clone(), password_hash.clone());
        table.by_name.insert(username.clone(), replaced);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn name() -> Username {
        Username::new("nurse").expect("valid")
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_username_rejected() {
        let repo = InMemoryUserRepository::new();
        repo.insert(&name(), &PasswordHash::new("a"))
            .await
            .expect("first insert");
        let error = repo
            .insert(&name(), &PasswordHash::new("b"))
            .await
            .expect_err("duplicate");
        assert_eq!(error, UserPersistenceError::duplicate_username("nurse"));
    }

    #[rstest]
    #[tokio::test]
    async fn update_replaces_hash_and_reports_missing_users() {
        let repo = InMemoryUserRepository::new();
        assert!(
            !repo
                .update_password_hash(&name(), &PasswordHash::new("x"))
                .await
                .expect("update runs")
        );

        repo.insert(&name(), &PasswordHash::new("old"))
            .await
            .expect("insert");
        assert!(
            repo.update_password_hash(&name(), &PasswordHash::new("new"))
                .await
                .expect("update runs")
        );
        let user = repo
            .find_by_username(&name())
            .await
            .expect("lookup")
            .expect("present");
        assert_eq!(user.password_hash().as_str(), "new");
    }
}
