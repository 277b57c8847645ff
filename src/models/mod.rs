pub mod appointment;
pub mod comfort;
pub mod config;
pub mod daily_log;
pub mod identity;
pub mod journal;
pub mod note;
pub mod notification;
pub mod photo;
pub mod profile;
pub mod task;

pub use appointment::*;
pub use comfort::*;
pub use config::*;
pub use daily_log::*;
pub use identity::*;
pub use journal::*;
pub use note::*;
pub use notification::*;
pub use photo::*;
pub use profile::*;
pub use task::*;
