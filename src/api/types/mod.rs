//! Shared API types: the JSON error format and the JSON extractor

pub mod error;
pub mod json;

pub use error::{ApiError, ApiErrorResponse};
pub use json::Json;
