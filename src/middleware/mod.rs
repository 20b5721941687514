mod auth;
mod error_handler;

pub use auth::{auth_middleware, authorize, require_admin, require_super_admin};
pub use error_handler::log_errors;
