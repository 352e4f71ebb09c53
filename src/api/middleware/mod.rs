//! API middleware.

mod auth;
mod error_path;

pub use auth::{auth_middleware, require_role, CurrentCustomer};
pub use error_path::error_path_middleware;
