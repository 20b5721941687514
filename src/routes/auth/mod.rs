mod handler;
pub mod model;

pub use handler::{admin_access, get_profile, login, register, verify_otp};
