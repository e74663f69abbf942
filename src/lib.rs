//! User Directory API
//!
//! A minimal user-account backend: register a user, authenticate
//! (login/logout), fetch a user by id, list all users, and edit profile
//! fields. Backed by an in-memory store by default, PostgreSQL optionally.

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use tracing::info;

use api::state::{AppState, UserDirectoryService};
use config::StorageBackend;
use infrastructure::user::{InMemoryUserRepository, PostgresUserRepository, UserDirectory};

/// Create the application state with the configured storage backend
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    info!("Storage backend: {:?}", config.storage.backend);

    let user_directory: Arc<dyn UserDirectoryService> = match config.storage.backend {
        StorageBackend::Memory => {
            Arc::new(UserDirectory::new(Arc::new(InMemoryUserRepository::new())))
        }
        StorageBackend::Postgres => {
            let database_url = std::env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL environment variable is required"))?;

            info!("Connecting to PostgreSQL...");
            let pool = sqlx::PgPool::connect(&database_url)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to connect to PostgreSQL: {}", e))?;
            info!("PostgreSQL connection established");

            let repository = PostgresUserRepository::new(pool);
            repository.ensure_schema().await?;

            Arc::new(UserDirectory::new(Arc::new(repository)))
        }
    };

    Ok(AppState::new(user_directory))
}
