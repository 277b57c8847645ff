//! Nyckel-värde-lagring under den lokala lagringen

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::utils::path::sanitize_filename;
use crate::utils::{AppError, AppResult};

/// Enkel nyckel-värde-lagring av strängar
pub trait StorageBackend: Send + Sync {
    /// Hämta ett värde, `None` om nyckeln saknas
    fn get_item(&self, key: &str) -> AppResult<Option<String>>;

    /// Skriv ett värde (ersätter hela värdet)
    fn set_item(&self, key: &str, value: &str) -> AppResult<()>;

    /// Ta bort en nyckel. Saknad nyckel är inget fel.
    fn remove_item(&self, key: &str) -> AppResult<()>;
}

/// En JSON-fil per nyckel i en katalog
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    /// Öppna lagring i katalogen, skapas om den inte finns
    pub fn open(dir: &Path) -> AppResult<Self> {
        fs::create_dir_all(dir)?;
        tracing::debug!("Lokal lagring i {}", dir.display());
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", sanitize_filename(key)))
    }
}

impl StorageBackend for FileBackend {
    fn get_item(&self, key: &str) -> AppResult<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> AppResult<()> {
        let path = self.path_for(key);

        // Skriv till temporär fil först så att en avbruten skrivning
        // aldrig lämnar en halv fil efter sig
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)
            .map_err(|e| AppError::storage(format!("Kunde inte skriva {}: {}", key, e)))?;
        fs::rename(&tmp, &path)
            .map_err(|e| AppError::storage(format!("Kunde inte spara {}: {}", key, e)))?;

        Ok(())
    }

    fn remove_item(&self, key: &str) -> AppResult<()> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Lagring i minnet, med valfri kvot i bytes
#[derive(Default)]
pub struct MemoryBackend {
    items: Mutex<HashMap<String, String>>,
    quota: Option<usize>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lagring som vägrar skriva mer än `bytes` totalt
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            items: Mutex::new(HashMap::new()),
            quota: Some(bytes),
        }
    }

    fn lock(&self) -> AppResult<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.items
            .lock()
            .map_err(|_| AppError::storage("Lokal lagring är låst"))
    }
}

impl StorageBackend for MemoryBackend {
    fn get_item(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> AppResult<()> {
        let mut items = self.lock()?;

        if let Some(quota) = self.quota {
            let used: usize = items
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            if used + key.len() + value.len() > quota {
                return Err(AppError::storage(format!(
                    "Lagringskvoten är full ({} bytes)",
                    quota
                )));
            }
        }

        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> AppResult<()> {
        self.lock()?.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_backend_round_trip() {
        let dir = TempDir::new().unwrap();
        let backend = FileBackend::open(dir.path()).unwrap();

        assert_eq!(backend.get_item("bloom_notes").unwrap(), None);
        backend.set_item("bloom_notes", "[]").unwrap();
        assert_eq!(backend.get_item("bloom_notes").unwrap().as_deref(), Some("[]"));
        assert!(dir.path().join("bloom_notes.json").exists());

        backend.remove_item("bloom_notes").unwrap();
        backend.remove_item("bloom_notes").unwrap();
        assert_eq!(backend.get_item("bloom_notes").unwrap(), None);
    }

    #[test]
    fn test_file_backend_survives_reopen() {
        let dir = TempDir::new().unwrap();
        FileBackend::open(dir.path())
            .unwrap()
            .set_item("bloom_memories", "[1]")
            .unwrap();

        let reopened = FileBackend::open(dir.path()).unwrap();
        assert_eq!(reopened.get_item("bloom_memories").unwrap().as_deref(), Some("[1]"));
    }

    #[test]
    fn test_memory_quota() {
        let backend = MemoryBackend::with_quota(20);
        backend.set_item("a", "0123456789").unwrap();

        let err = backend.set_item("b", "0123456789").unwrap_err();
        assert!(matches!(err, AppError::Storage(_)));
        assert_eq!(backend.get_item("b").unwrap(), None);

        // Att skriva över samma nyckel räknar inte det gamla värdet
        backend.set_item("a", "987654321").unwrap();
    }
}
