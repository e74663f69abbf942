//! Application state for shared services

use std::sync::Arc;

use crate::domain::user::{User, UserId, UserRepository};
use crate::domain::DomainError;
use crate::infrastructure::user::{Credentials, EditUserRequest, RegisterRequest, UserDirectory};

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub user_directory: Arc<dyn UserDirectoryService>,
}

impl AppState {
    pub fn new(user_directory: Arc<dyn UserDirectoryService>) -> Self {
        Self { user_directory }
    }
}

/// Trait for user directory operations
#[async_trait::async_trait]
pub trait UserDirectoryService: Send + Sync {
    async fn list(&self) -> Result<Vec<User>, DomainError>;
    async fn register(&self, request: RegisterRequest) -> Result<User, DomainError>;
    async fn login(&self, credentials: Credentials) -> Result<User, DomainError>;
    async fn logout(&self, token: &str) -> Result<User, DomainError>;
    async fn get(&self, id: UserId) -> Result<User, DomainError>;
    async fn edit(&self, request: EditUserRequest) -> Result<User, DomainError>;
}

#[async_trait::async_trait]
impl<R: UserRepository + 'static> UserDirectoryService for UserDirectory<R> {
    async fn list(&self) -> Result<Vec<User>, DomainError> {
        UserDirectory::list(self).await
    }

    async fn register(&self, request: RegisterRequest) -> Result<User, DomainError> {
        UserDirectory::register(self, request).await
    }

    async fn login(&self, credentials: Credentials) -> Result<User, DomainError> {
        UserDirectory::login(self, credentials).await
    }

    async fn logout(&self, token: &str) -> Result<User, DomainError> {
        UserDirectory::logout(self, token).await
    }

    async fn get(&self, id: UserId) -> Result<User, DomainError> {
        UserDirectory::get(self, id).await
    }

    async fn edit(&self, request: EditUserRequest) -> Result<User, DomainError> {
        UserDirectory::edit(self, request).await
    }
}
