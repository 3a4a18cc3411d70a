//! HTTP handlers for the user routes.

pub mod users;
pub use users::*;
