use thiserror::Error;

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Username '{username}' is already taken")]
    DuplicateUsername { username: String },

    #[error("Login failed because credentials are incorrect")]
    InvalidCredentials,

    #[error("User '{username}' is already logged in")]
    AlreadyLoggedIn { username: String },

    #[error("User with id {id} not found")]
    UserNotFound { id: i64 },

    #[error("No active session matches the provided token")]
    SessionNotFound,

    #[error("Invalid date format: '{input}' (expected YYYY-MM-DD)")]
    InvalidDateFormat { input: String },

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn duplicate_username(username: impl Into<String>) -> Self {
        Self::DuplicateUsername {
            username: username.into(),
        }
    }

    pub fn already_logged_in(username: impl Into<String>) -> Self {
        Self::AlreadyLoggedIn {
            username: username.into(),
        }
    }

    pub fn user_not_found(id: i64) -> Self {
        Self::UserNotFound { id }
    }

    pub fn invalid_date_format(input: impl Into<String>) -> Self {
        Self::InvalidDateFormat {
            input: input.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Whether this error represents a benign outcome rather than a failure.
    ///
    /// `AlreadyLoggedIn` is the only such case: the caller asked for a state
    /// the user is already in, so there is nothing further to do.
    pub fn is_benign(&self) -> bool {
        matches!(self, Self::AlreadyLoggedIn { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_username_error() {
        let error = DomainError::duplicate_username("alice");
        assert_eq!(error.to_string(), "Username 'alice' is already taken");
    }

    #[test]
    fn test_user_not_found_error() {
        let error = DomainError::user_not_found(42);
        assert_eq!(error.to_string(), "User with id 42 not found");
    }

    #[test]
    fn test_invalid_date_format_error() {
        let error = DomainError::invalid_date_format("06.03.2020");
        assert_eq!(
            error.to_string(),
            "Invalid date format: '06.03.2020' (expected YYYY-MM-DD)"
        );
    }

    #[test]
    fn test_already_logged_in_is_benign() {
        assert!(DomainError::already_logged_in("alice").is_benign());
        assert!(!DomainError::InvalidCredentials.is_benign());
        assert!(!DomainError::SessionNotFound.is_benign());
    }
}
