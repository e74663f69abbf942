//! HTTP API layer
//!
//! axum router, handlers, and wire types for the user directory surface.

pub mod auth;
pub mod health;
pub mod router;
pub mod state;
pub mod types;
pub mod users;

pub use router::create_router;
pub use state::{AppState, UserDirectoryService};
