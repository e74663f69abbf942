//! User repository trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::{NewUser, User, UserId};
use crate::domain::DomainError;

/// Repository trait for user storage
///
/// The repository is the source of truth for username uniqueness: `insert`
/// and `update` must reject a colliding username even when the caller
/// checked first.
#[async_trait]
pub trait UserRepository: Send + Sync + Debug {
    /// List all users, ordered by id
    async fn find_all(&self) -> Result<Vec<User>, DomainError>;

    /// Get a user by id
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError>;

    /// Get a user by username (for login)
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError>;

    /// Get the user holding the given session token (for logout)
    async fn find_by_token(&self, token: &str) -> Result<Option<User>, DomainError>;

    /// Insert a new user, assigning its id
    async fn insert(&self, user: NewUser) -> Result<User, DomainError>;

    /// Persist mutations to an existing user
    async fn update(&self, user: &User) -> Result<User, DomainError>;

    /// Check if a username is taken
    async fn username_exists(&self, username: &str) -> Result<bool, DomainError> {
        Ok(self.find_by_username(username).await?.is_some())
    }
}
