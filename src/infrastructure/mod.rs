//! Infrastructure layer - concrete implementations behind the domain traits

pub mod logging;
pub mod user;
