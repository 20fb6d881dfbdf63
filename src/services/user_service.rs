//! User service - Handles user-related business logic.

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::SEQ_USER_ID;
use crate::domain::{CreateUser, Password, UpdateUser, User};
use crate::errors::{AppError, AppResult};
use crate::infra::{SequenceRepository, UserRepository};

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Create a user from a validated draft, assigning the next sequence ID
    async fn create_user(&self, draft: CreateUser) -> AppResult<User>;

    /// List all users in storage order
    async fn list_users(&self) -> AppResult<Vec<User>>;

    /// Get user by numeric ID; the boundary decides the not-found shape
    async fn get_user(&self, id: i64) -> AppResult<Option<User>>;

    /// Apply a partial update; fails with NotFound when no record matches
    async fn update_user(&self, id: i64, patch: UpdateUser) -> AppResult<User>;

    /// Delete user by numeric ID, returning the removed-record count (0 or 1)
    async fn delete_user(&self, id: i64) -> AppResult<u64>;
}

/// Concrete implementation of UserService.
pub struct UserManager {
    users: Arc<dyn UserRepository>,
    sequences: Arc<dyn SequenceRepository>,
}

impl UserManager {
    /// Create new user service instance
    pub fn new(users: Arc<dyn UserRepository>, sequences: Arc<dyn SequenceRepository>) -> Self {
        Self { users, sequences }
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn create_user(&self, draft: CreateUser) -> AppResult<User> {
        // Email shape is validated by the handler's ValidatedJson extractor.
        // The unique index on email backs this lookup against a lost race.
        if self.users.find_by_email(&draft.email).await?.is_some() {
            return Err(AppError::conflict("User"));
        }

        let password_hash = Password::new(&draft.password)?.into_string();
        let id = self.sequences.next_value(SEQ_USER_ID).await?;

        self.users
            .create(
                id,
                draft.email,
                password_hash,
                draft.first_name,
                draft.last_name,
            )
            .await
    }

    async fn list_users(&self) -> AppResult<Vec<User>> {
        self.users.list().await
    }

    async fn get_user(&self, id: i64) -> AppResult<Option<User>> {
        self.users.find_by_id(id).await
    }

    async fn update_user(&self, id: i64, patch: UpdateUser) -> AppResult<User> {
        self.users.update(id, patch).await
    }

    async fn delete_user(&self, id: i64) -> AppResult<u64> {
        self.users.delete(id).await
    }
}
