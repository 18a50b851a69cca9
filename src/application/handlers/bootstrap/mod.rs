//! Bootstrap lifecycle handlers.

mod reset_user;

pub use reset_user::{ResetUserCommand, ResetUserHandler};
