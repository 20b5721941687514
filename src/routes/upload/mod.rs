mod handler;

pub use handler::{upload, upload_image};
