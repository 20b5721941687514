mod handler;
pub mod model;

pub use handler::{create_event, delete_event, get_events, update_event};
