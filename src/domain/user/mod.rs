//! User domain
//!
//! Domain types for the user lifecycle: the user entity and its session
//! state machine, the repository trait, and date formatting helpers.

mod dates;
mod entity;
mod repository;

pub use dates::{reformat_birthday, today_display};
pub use entity::{NewUser, User, UserId, UserStatus};
pub use repository::UserRepository;
