pub mod date;
pub mod error;
pub mod path;

pub use error::{AppError, AppResult};

/// Nytt unikt ID för en post
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
