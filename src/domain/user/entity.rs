//! User entity and related types

use serde::{Deserialize, Serialize};

/// User identifier - surrogate integer assigned by the store on insert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(i64);

impl UserId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the inner integer value
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Session status of a user account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum UserStatus {
    /// User has an active session
    Online,
    /// User has no active session
    #[default]
    Offline,
}

impl UserStatus {
    pub fn is_online(&self) -> bool {
        matches!(self, Self::Online)
    }
}

/// Insert-shaped user value; the repository assigns the id on insert.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub creation_date: String,
}

/// User entity
///
/// `token` and `status` move together: `log_in` is the only way to go
/// online and `log_out` the only way back, so a user is online if and
/// only if it holds a session token.
///
/// The password is stored and compared verbatim. That mirrors the system
/// this replaces and is a known defect, not a recommendation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier, immutable once assigned
    id: UserId,
    /// Username for login, unique across all users
    username: String,
    /// Plaintext password (documented defect)
    password: String,
    /// Current session status
    status: UserStatus,
    /// Session token, present only while online
    token: Option<String>,
    /// Optional birthday in DD.MM.YYYY display form
    birthday: Option<String>,
    /// Creation date in DD.MM.YYYY, stamped once, immutable
    creation_date: String,
}

impl User {
    /// Restore a user from its persisted parts.
    ///
    /// Used by repositories when materializing stored rows; business code
    /// goes through `NewUser` and the repository instead.
    pub fn from_storage(
        id: UserId,
        username: impl Into<String>,
        password: impl Into<String>,
        status: UserStatus,
        token: Option<String>,
        birthday: Option<String>,
        creation_date: impl Into<String>,
    ) -> Self {
        Self {
            id,
            username: username.into(),
            password: password.into(),
            status,
            token,
            birthday,
            creation_date: creation_date.into(),
        }
    }

    // Getters

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn status(&self) -> UserStatus {
        self.status
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn birthday(&self) -> Option<&str> {
        self.birthday.as_deref()
    }

    pub fn creation_date(&self) -> &str {
        &self.creation_date
    }

    /// Check whether the stored password matches the supplied one verbatim
    pub fn password_matches(&self, candidate: &str) -> bool {
        self.password == candidate
    }

    pub fn is_online(&self) -> bool {
        self.status.is_online()
    }

    // Mutators

    /// Start a session: go online with the given token
    pub fn log_in(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
        self.status = UserStatus::Online;
    }

    /// End the session: go offline and clear the token
    pub fn log_out(&mut self) {
        self.token = None;
        self.status = UserStatus::Offline;
    }

    /// Update the username
    pub fn set_username(&mut self, username: impl Into<String>) {
        self.username = username.into();
    }

    /// Update the birthday (already in DD.MM.YYYY display form)
    pub fn set_birthday(&mut self, birthday: impl Into<String>) {
        self.birthday = Some(birthday.into());
    }
}
