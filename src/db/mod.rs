//! Molnlagringen: SQLite-tabeller där varje rad tillhör en användare

pub mod schema;
pub mod migrations;
pub mod profile_repo;
pub mod daily_log_repo;
pub mod journal_repo;
pub mod appointment_repo;
pub mod note_repo;
pub mod task_repo;

use anyhow::{anyhow, Result};
use rusqlite::Connection;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

pub use profile_repo::ProfileRepository;
pub use daily_log_repo::DailyLogRepository;
pub use journal_repo::JournalRepository;
pub use appointment_repo::AppointmentRepository;
pub use note_repo::NoteRepository;
pub use task_repo::TaskRepository;

/// Lås anslutningen, förgiftat lås blir ett vanligt fel
pub(crate) fn lock(conn: &Mutex<Connection>) -> Result<MutexGuard<'_, Connection>> {
    conn.lock().map_err(|_| anyhow!("Databasanslutningen är låst"))
}

/// Läs en JSON-kolumn
pub(crate) fn from_json<T: serde::de::DeserializeOwned>(raw: &str) -> rusqlite::Result<T> {
    serde_json::from_str(raw).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })
}

/// Huvuddatabas-wrapper med thread-safe access
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Öppna eller skapa databas
    pub fn open(path: &Path) -> Result<Self> {
        // Skapa katalog om den inte finns
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;

        // Konfigurera SQLite
        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA foreign_keys = ON;
            PRAGMA busy_timeout = 5000;
            "
        )?;

        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.migrate()?;
        Ok(db)
    }

    /// Öppna in-memory databas (för tester)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;

        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.migrate()?;
        Ok(db)
    }

    /// Kör databasmigrationer
    pub fn migrate(&self) -> Result<()> {
        let conn = lock(&self.conn)?;
        migrations::run_migrations(&conn)
    }

    /// Hämta profil-repository
    pub fn profiles(&self) -> ProfileRepository {
        ProfileRepository::new(Arc::clone(&self.conn))
    }

    /// Hämta repository för dagliga incheckningar
    pub fn daily_logs(&self) -> DailyLogRepository {
        DailyLogRepository::new(Arc::clone(&self.conn))
    }

    /// Hämta dagboks-repository
    pub fn journal(&self) -> JournalRepository {
        JournalRepository::new(Arc::clone(&self.conn))
    }

    /// Hämta repository för tider
    pub fn appointments(&self) -> AppointmentRepository {
        AppointmentRepository::new(Arc::clone(&self.conn))
    }

    /// Hämta repository för snabbanteckningar
    pub fn notes(&self) -> NoteRepository {
        NoteRepository::new(Arc::clone(&self.conn))
    }

    /// Hämta repository för dagsplanen
    pub fn tasks(&self) -> TaskRepository {
        TaskRepository::new(Arc::clone(&self.conn))
    }
}

impl Clone for Database {
    fn clone(&self) -> Self {
        Self {
            conn: Arc::clone(&self.conn),
        }
    }
}
