//! Bloom - graviditetsdagbok
//!
//! Beräknar graviditetsvecka och visar veckans innehåll. Data sparas
//! lokalt på enheten eller, för inloggade användare, i molnlagringen.

pub mod cli;
pub mod commands;
pub mod db;
pub mod models;
pub mod pregnancy;
pub mod services;
pub mod store;
pub mod utils;

// Re-exports
pub use db::Database;
pub use services::{CloudStore, PersistenceMode, PersistenceSelector};
pub use store::LocalStore;
pub use utils::{AppError, AppResult};
