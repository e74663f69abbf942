//! User directory service
//!
//! Owns the business rules around user records: username uniqueness at
//! registration, credential checks and session transitions at login/logout,
//! and partial profile edits. Everything else is delegated to the
//! repository.

use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use crate::domain::DomainError;
use crate::domain::user::{NewUser, User, UserId, UserRepository, reformat_birthday, today_display};

/// Request for registering a new user
#[derive(Debug, Clone)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

/// Credentials supplied at login
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Partial update of a user's profile
///
/// `birthday` is expected in ISO `YYYY-MM-DD` form and stored as
/// `DD.MM.YYYY`. Absent fields are left untouched; password, status,
/// token and creation date are never editable.
#[derive(Debug, Clone)]
pub struct EditUserRequest {
    pub id: UserId,
    pub username: Option<String>,
    pub birthday: Option<String>,
}

/// Core service for the user lifecycle
#[derive(Debug)]
pub struct UserDirectory<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserDirectory<R> {
    /// Create a new user directory over the given repository
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// List all users, ordered by id
    pub async fn list(&self) -> Result<Vec<User>, DomainError> {
        self.repository.find_all().await
    }

    /// Register a new user
    ///
    /// The user starts offline with no token; `creation_date` is stamped to
    /// today. The username pre-check here is a fast path - the repository
    /// enforces uniqueness on insert either way.
    pub async fn register(&self, request: RegisterRequest) -> Result<User, DomainError> {
        if self.repository.username_exists(&request.username).await? {
            return Err(DomainError::duplicate_username(&request.username));
        }

        let user = self
            .repository
            .insert(NewUser {
                username: request.username,
                password: request.password,
                creation_date: today_display(),
            })
            .await?;

        debug!(id = %user.id(), username = %user.username(), "Registered user");

        Ok(user)
    }

    /// Authenticate a user and start a session
    ///
    /// An unknown username and a wrong password are indistinguishable to the
    /// caller: both signal `InvalidCredentials` and change no state. Logging
    /// in while already online signals `AlreadyLoggedIn`, also without state
    /// change - the caller treats it as "nothing to do".
    pub async fn login(&self, credentials: Credentials) -> Result<User, DomainError> {
        let user = self
            .repository
            .find_by_username(&credentials.username)
            .await?;

        let mut user = match user {
            Some(u) if u.password_matches(&credentials.password) => u,
            _ => return Err(DomainError::InvalidCredentials),
        };

        if user.is_online() {
            return Err(DomainError::already_logged_in(user.username()));
        }

        user.log_in(Uuid::new_v4().to_string());
        let user = self.repository.update(&user).await?;

        debug!(id = %user.id(), username = %user.username(), "User logged in");

        Ok(user)
    }

    /// End the session identified by the given token
    pub async fn logout(&self, token: &str) -> Result<User, DomainError> {
        let mut user = self
            .repository
            .find_by_token(token)
            .await?
            .ok_or(DomainError::SessionNotFound)?;

        user.log_out();
        let user = self.repository.update(&user).await?;

        debug!(id = %user.id(), username = %user.username(), "User logged out");

        Ok(user)
    }

    /// Get a user by id
    pub async fn get(&self, id: UserId) -> Result<User, DomainError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::user_not_found(id.value()))
    }

    /// Apply a partial profile update
    pub async fn edit(&self, request: EditUserRequest) -> Result<User, DomainError> {
        let mut user = self
            .repository
            .find_by_id(request.id)
            .await?
            .ok_or_else(|| DomainError::user_not_found(request.id.value()))?;

        if let Some(username) = request.username {
            if !username.is_empty() {
                user.set_username(username);
            }
        }

        if let Some(birthday) = request.birthday {
            user.set_birthday(reformat_birthday(&birthday)?);
        }

        let user = self.repository.update(&user).await?;

        debug!(id = %user.id(), "Edited user profile");

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::user::repository::InMemoryUserRepository;

    fn create_directory() -> UserDirectory<InMemoryUserRepository> {
        UserDirectory::new(Arc::new(InMemoryUserRepository::new()))
    }

    fn register_request(username: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    fn credentials(username: &str, password: &str) -> Credentials {
        Credentials {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_starts_offline_with_creation_date() {
        let directory = create_directory();

        let user = directory
            .register(register_request("alice", "pw1"))
            .await
            .unwrap();

        assert_eq!(user.username(), "alice");
        assert!(!user.is_online());
        assert!(user.token().is_none());
        assert_eq!(user.creation_date(), today_display());
    }

    #[tokio::test]
    async fn test_register_accepts_empty_password() {
        let directory = create_directory();

        // No password validation at this layer, by contract
        let user = directory
            .register(register_request("alice", ""))
            .await
            .unwrap();

        assert_eq!(user.password(), "");
    }

    #[tokio::test]
    async fn test_register_duplicate_username_leaves_store_unchanged() {
        let directory = create_directory();

        directory
            .register(register_request("alice", "pw1"))
            .await
            .unwrap();

        let result = directory.register(register_request("alice", "pw2")).await;
        assert!(matches!(
            result,
            Err(DomainError::DuplicateUsername { .. })
        ));

        let all = directory.list().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].password(), "pw1");
    }

    #[tokio::test]
    async fn test_usernames_are_case_sensitive() {
        let directory = create_directory();

        directory
            .register(register_request("alice", "pw1"))
            .await
            .unwrap();

        // Different case is a different username
        directory
            .register(register_request("Alice", "pw2"))
            .await
            .unwrap();

        assert_eq!(directory.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_login_assigns_token_and_goes_online() {
        let directory = create_directory();
        directory
            .register(register_request("alice", "pw1"))
            .await
            .unwrap();

        let user = directory.login(credentials("alice", "pw1")).await.unwrap();

        assert!(user.is_online());
        assert!(user.token().is_some_and(|t| !t.is_empty()));
    }

    #[tokio::test]
    async fn test_login_unknown_username() {
        let directory = create_directory();

        let result = directory.login(credentials("nobody", "pw1")).await;
        assert!(matches!(result, Err(DomainError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_wrong_password_never_mutates_state() {
        let directory = create_directory();
        let registered = directory
            .register(register_request("alice", "pw1"))
            .await
            .unwrap();

        // Rejection is idempotent: repeat attempts behave identically
        for _ in 0..3 {
            let result = directory.login(credentials("alice", "wrong")).await;
            assert!(matches!(result, Err(DomainError::InvalidCredentials)));

            let stored = directory.get(registered.id()).await.unwrap();
            assert!(!stored.is_online());
            assert!(stored.token().is_none());
        }
    }

    #[tokio::test]
    async fn test_login_while_online_is_a_no_op() {
        let directory = create_directory();
        directory
            .register(register_request("alice", "pw1"))
            .await
            .unwrap();

        let logged_in = directory.login(credentials("alice", "pw1")).await.unwrap();
        let token = logged_in.token().unwrap().to_string();

        let result = directory.login(credentials("alice", "pw1")).await;
        assert!(matches!(result, Err(DomainError::AlreadyLoggedIn { .. })));

        // Token unchanged, still online
        let stored = directory.get(logged_in.id()).await.unwrap();
        assert!(stored.is_online());
        assert_eq!(stored.token(), Some(token.as_str()));
    }

    #[tokio::test]
    async fn test_logins_yield_distinct_tokens() {
        let directory = create_directory();
        directory
            .register(register_request("alice", "pw1"))
            .await
            .unwrap();
        directory
            .register(register_request("bob", "pw2"))
            .await
            .unwrap();

        let alice = directory.login(credentials("alice", "pw1")).await.unwrap();
        let bob = directory.login(credentials("bob", "pw2")).await.unwrap();

        assert_ne!(alice.token(), bob.token());
    }

    #[tokio::test]
    async fn test_session_round_trip() {
        let directory = create_directory();
        directory
            .register(register_request("alice", "pw1"))
            .await
            .unwrap();

        let logged_in = directory.login(credentials("alice", "pw1")).await.unwrap();
        let token = logged_in.token().unwrap().to_string();

        let logged_out = directory.logout(&token).await.unwrap();
        assert!(!logged_out.is_online());
        assert!(logged_out.token().is_none());

        // The token is stale now
        let result = directory.logout(&token).await;
        assert!(matches!(result, Err(DomainError::SessionNotFound)));
    }

    #[tokio::test]
    async fn test_logout_unknown_token() {
        let directory = create_directory();

        let result = directory.logout("no-such-token").await;
        assert!(matches!(result, Err(DomainError::SessionNotFound)));
    }

    #[tokio::test]
    async fn test_get_unknown_id() {
        let directory = create_directory();

        let result = directory.get(UserId::new(42)).await;
        assert!(matches!(result, Err(DomainError::UserNotFound { id: 42 })));
    }

    #[tokio::test]
    async fn test_edit_birthday_only_leaves_rest_unchanged() {
        let directory = create_directory();
        let user = directory
            .register(register_request("alice", "pw1"))
            .await
            .unwrap();

        let edited = directory
            .edit(EditUserRequest {
                id: user.id(),
                username: None,
                birthday: Some("2020-03-06".to_string()),
            })
            .await
            .unwrap();

        assert_eq!(edited.birthday(), Some("06.03.2020"));
        assert_eq!(edited.username(), "alice");
        assert_eq!(edited.password(), "pw1");
        assert!(!edited.is_online());
        assert_eq!(edited.creation_date(), user.creation_date());
    }

    #[tokio::test]
    async fn test_edit_username_only_leaves_birthday_unchanged() {
        let directory = create_directory();
        let user = directory
            .register(register_request("alice", "pw1"))
            .await
            .unwrap();

        directory
            .edit(EditUserRequest {
                id: user.id(),
                username: None,
                birthday: Some("2020-03-06".to_string()),
            })
            .await
            .unwrap();

        let edited = directory
            .edit(EditUserRequest {
                id: user.id(),
                username: Some("alice2".to_string()),
                birthday: None,
            })
            .await
            .unwrap();

        assert_eq!(edited.username(), "alice2");
        assert_eq!(edited.birthday(), Some("06.03.2020"));
    }

    #[tokio::test]
    async fn test_edit_empty_username_is_ignored() {
        let directory = create_directory();
        let user = directory
            .register(register_request("alice", "pw1"))
            .await
            .unwrap();

        let edited = directory
            .edit(EditUserRequest {
                id: user.id(),
                username: Some(String::new()),
                birthday: None,
            })
            .await
            .unwrap();

        assert_eq!(edited.username(), "alice");
    }

    #[tokio::test]
    async fn test_edit_malformed_birthday_is_rejected() {
        let directory = create_directory();
        let user = directory
            .register(register_request("alice", "pw1"))
            .await
            .unwrap();

        let result = directory
            .edit(EditUserRequest {
                id: user.id(),
                username: None,
                birthday: Some("03/06/2020".to_string()),
            })
            .await;

        assert!(matches!(
            result,
            Err(DomainError::InvalidDateFormat { .. })
        ));

        // Nothing persisted
        let stored = directory.get(user.id()).await.unwrap();
        assert!(stored.birthday().is_none());
    }

    #[tokio::test]
    async fn test_edit_unknown_id() {
        let directory = create_directory();

        let result = directory
            .edit(EditUserRequest {
                id: UserId::new(7),
                username: Some("ghost".to_string()),
                birthday: None,
            })
            .await;

        assert!(matches!(result, Err(DomainError::UserNotFound { id: 7 })));
    }

    #[tokio::test]
    async fn test_full_lifecycle_scenario() {
        let directory = create_directory();

        let registered = directory
            .register(register_request("alice", "pw1"))
            .await
            .unwrap();
        assert!(!registered.is_online());
        assert!(registered.token().is_none());
        assert_eq!(registered.creation_date(), today_display());

        let logged_in = directory.login(credentials("alice", "pw1")).await.unwrap();
        assert!(logged_in.is_online());
        let token = logged_in.token().unwrap().to_string();
        assert!(!token.is_empty());

        let again = directory.login(credentials("alice", "pw1")).await;
        assert!(matches!(again, Err(DomainError::AlreadyLoggedIn { .. })));

        let logged_out = directory.logout(&token).await.unwrap();
        assert!(!logged_out.is_online());
        assert!(logged_out.token().is_none());
    }
}
