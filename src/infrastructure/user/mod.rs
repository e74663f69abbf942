//! User infrastructure module
//!
//! Implementations behind the user domain: the directory service with the
//! session state machine, plus in-memory and PostgreSQL repositories.

mod postgres_repository;
mod repository;
mod service;

pub use postgres_repository::PostgresUserRepository;
pub use repository::InMemoryUserRepository;
pub use service::{Credentials, EditUserRequest, RegisterRequest, UserDirectory};
