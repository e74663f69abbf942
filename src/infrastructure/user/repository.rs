//! In-memory user repository implementation

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::DomainError;
use crate::domain::user::{NewUser, User, UserId, UserRepository, UserStatus};

/// Users plus lookup indexes, guarded as one unit
///
/// A single lock covers the map and both indexes so readers and writers
/// can never interleave lock acquisition; it also keeps the indexes in
/// step with the map by construction.
#[derive(Debug, Default)]
struct Inner {
    users: HashMap<i64, User>,
    /// Index for username -> user id lookup
    username_index: HashMap<String, i64>,
    /// Index for session token -> user id lookup
    token_index: HashMap<String, i64>,
    /// Next id to assign
    next_id: i64,
}

/// In-memory implementation of UserRepository
///
/// The default storage backend, and the test double for everything above
/// the repository. Uniqueness is enforced inside a single write-lock
/// critical section, so concurrent inserts cannot both pass the check.
#[derive(Debug)]
pub struct InMemoryUserRepository {
    inner: Arc<RwLock<Inner>>,
}

impl InMemoryUserRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner {
                next_id: 1,
                ..Inner::default()
            })),
        }
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_all(&self) -> Result<Vec<User>, DomainError> {
        let inner = self.inner.read().await;

        let mut result: Vec<User> = inner.users.values().cloned().collect();
        result.sort_by_key(|u| u.id().value());

        Ok(result)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError> {
        let inner = self.inner.read().await;
        Ok(inner.users.get(&id.value()).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let inner = self.inner.read().await;

        Ok(inner
            .username_index
            .get(username)
            .and_then(|id| inner.users.get(id))
            .cloned())
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<User>, DomainError> {
        let inner = self.inner.read().await;

        Ok(inner
            .token_index
            .get(token)
            .and_then(|id| inner.users.get(id))
            .cloned())
    }

    async fn insert(&self, new_user: NewUser) -> Result<User, DomainError> {
        let mut inner = self.inner.write().await;

        if inner.username_index.contains_key(&new_user.username) {
            return Err(DomainError::duplicate_username(&new_user.username));
        }

        let id = inner.next_id;
        inner.next_id += 1;

        let user = User::from_storage(
            UserId::new(id),
            new_user.username,
            new_user.password,
            UserStatus::Offline,
            None,
            None,
            new_user.creation_date,
        );

        inner.username_index.insert(user.username().to_string(), id);
        inner.users.insert(id, user.clone());

        Ok(user)
    }

    async fn update(&self, user: &User) -> Result<User, DomainError> {
        let mut inner = self.inner.write().await;

        let id = user.id().value();

        let old_user = inner
            .users
            .get(&id)
            .ok_or_else(|| DomainError::user_not_found(id))?;

        let old_username = old_user.username().to_string();
        let old_token = old_user.token().map(String::from);

        // If the username changed, check uniqueness and move the index entry
        if old_username != user.username() {
            if inner.username_index.contains_key(user.username()) {
                return Err(DomainError::duplicate_username(user.username()));
            }

            inner.username_index.remove(&old_username);
            inner.username_index.insert(user.username().to_string(), id);
        }

        // Re-index the session token
        if let Some(old_token) = old_token {
            inner.token_index.remove(&old_token);
        }
        if let Some(token) = user.token() {
            inner.token_index.insert(token.to_string(), id);
        }

        inner.users.insert(id, user.clone());

        Ok(user.clone())
    }
}
