use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::utils::path::{get_cloud_database_path, get_local_store_path, get_settings_path};

use super::Identity;

/// Namn som används när inget namn anges vid uppstart
pub const DEFAULT_PROFILE_NAME: &str = "Mama";

/// Programinställningar, sparas som TOML i användarens config-katalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Katalog för den lokala lagringen
    pub local_store_path: PathBuf,
    /// SQLite-fil som står för molnlagringen
    pub cloud_database_path: PathBuf,
    pub default_profile_name: String,
    /// Användare vars lokala profil redan har kopierats till molnet
    pub migrated_users: Vec<String>,
    /// Inloggad användare, om någon
    pub session: Option<Identity>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            local_store_path: get_local_store_path(),
            cloud_database_path: get_cloud_database_path(),
            default_profile_name: DEFAULT_PROFILE_NAME.to_string(),
            migrated_users: Vec::new(),
            session: None,
        }
    }
}

impl AppSettings {
    pub fn load() -> Self {
        Self::load_from(&get_settings_path())
    }

    /// Läs inställningar, eller standardvärden om filen saknas eller är trasig
    pub fn load_from(path: &Path) -> Self {
        if let Ok(content) = std::fs::read_to_string(path) {
            match toml::from_str(&content) {
                Ok(settings) => return settings,
                Err(e) => tracing::warn!("Kunde inte läsa {}: {}", path.display(), e),
            }
        }

        Self::default()
    }

    pub fn save(&self) -> anyhow::Result<()> {
        self.save_to(&get_settings_path())
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.toml");

        let mut settings = AppSettings::default();
        settings.default_profile_name = "Sara".into();
        settings.session = Some(Identity::new("user-1", Some("sara@example.com".into())));
        settings.migrated_users.push("user-1".into());
        settings.save_to(&path).unwrap();

        let loaded = AppSettings::load_from(&path);
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_missing_or_broken_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.toml");
        assert_eq!(AppSettings::load_from(&path), AppSettings::default());

        std::fs::write(&path, "default_profile_name = [").unwrap();
        assert_eq!(AppSettings::load_from(&path), AppSettings::default());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "default_profile_name = \"Lina\"\n").unwrap();

        let loaded = AppSettings::load_from(&path);
        assert_eq!(loaded.default_profile_name, "Lina");
        assert_eq!(loaded.cloud_database_path, get_cloud_database_path());
    }
}
