//! PostgreSQL user repository implementation

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::DomainError;
use crate::domain::user::{NewUser, User, UserId, UserRepository, UserStatus};

const USER_COLUMNS: &str = "id, username, password, status, token, birthday, creation_date";

/// PostgreSQL implementation of UserRepository
///
/// The `username` column carries a unique index; it, not the service-level
/// pre-check, closes the race between concurrent registrations.
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the users table and its unique username index if missing
    pub async fn ensure_schema(&self) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id BIGSERIAL PRIMARY KEY,
                username TEXT NOT NULL UNIQUE,
                password TEXT NOT NULL,
                status TEXT NOT NULL,
                token TEXT,
                birthday TEXT,
                creation_date TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to create users table: {}", e)))?;

        Ok(())
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_all(&self) -> Result<Vec<User>, DomainError> {
        let rows = sqlx::query(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to list users: {}", e)))?;

        rows.iter().map(row_to_user).collect()
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to get user: {}", e)))?;

        row.as_ref().map(row_to_user).transpose()
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = $1"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to get user by username: {}", e)))?;

        row.as_ref().map(row_to_user).transpose()
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<User>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE token = $1"
        ))
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to get user by token: {}", e)))?;

        row.as_ref().map(row_to_user).transpose()
    }

    async fn insert(&self, new_user: NewUser) -> Result<User, DomainError> {
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO users (username, password, status, token, birthday, creation_date)
            VALUES ($1, $2, $3, NULL, NULL, $4)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(&new_user.username)
        .bind(&new_user.password)
        .bind(status_to_str(UserStatus::Offline))
        .bind(&new_user.creation_date)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, &new_user.username))?;

        row_to_user(&row)
    }

    async fn update(&self, user: &User) -> Result<User, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET username = $2, status = $3, token = $4, birthday = $5
            WHERE id = $1
            "#,
        )
        .bind(user.id().value())
        .bind(user.username())
        .bind(status_to_str(user.status()))
        .bind(user.token())
        .bind(user.birthday())
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, user.username()))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::user_not_found(user.id().value()));
        }

        Ok(user.clone())
    }
}

fn map_unique_violation(e: sqlx::Error, username: &str) -> DomainError {
    let msg = e.to_string();

    if msg.contains("duplicate key") || msg.contains("unique constraint") {
        DomainError::duplicate_username(username)
    } else {
        DomainError::storage(format!("Failed to persist user: {}", e))
    }
}

fn row_to_user(row: &sqlx::postgres::PgRow) -> Result<User, DomainError> {
    let id: i64 = row.get("id");
    let username: String = row.get("username");
    let password: String = row.get("password");
    let status: String = row.get("status");
    let token: Option<String> = row.get("token");
    let birthday: Option<String> = row.get("birthday");
    let creation_date: String = row.get("creation_date");

    Ok(User::from_storage(
        UserId::new(id),
        username,
        password,
        str_to_status(&status)?,
        token,
        birthday,
        creation_date,
    ))
}

fn status_to_str(status: UserStatus) -> &'static str {
    match status {
        UserStatus::Online => "ONLINE",
        UserStatus::Offline => "OFFLINE",
    }
}

fn str_to_status(s: &str) -> Result<UserStatus, DomainError> {
    match s {
        "ONLINE" => Ok(UserStatus::Online),
        "OFFLINE" => Ok(UserStatus::Offline),
        other => Err(DomainError::storage(format!(
            "Invalid user status in database: '{}'",
            other
        ))),
    }
}
