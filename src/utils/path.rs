use std::path::{Path, PathBuf};

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("app", "bloom", "Bloom")
}

/// Katalog för den lokala lagringen (en JSON-fil per nyckel)
pub fn get_local_store_path() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.data_dir().join("local"))
        .unwrap_or_else(|| PathBuf::from("bloom-data"))
}

/// Hämta sökväg till molndatabasen
pub fn get_cloud_database_path() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.data_dir().join("cloud.db"))
        .unwrap_or_else(|| PathBuf::from("cloud.db"))
}

/// Hämta sökväg till inställningsfilen
pub fn get_settings_path() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.config_dir().join("settings.toml"))
        .unwrap_or_else(|| PathBuf::from("settings.toml"))
}

/// Normalisera sökväg för visning
pub fn display_path(path: &Path) -> String {
    // Förkorta hemkatalogen till ~
    if let Some(home) = dirs::home_dir() {
        if let Ok(stripped) = path.strip_prefix(&home) {
            return format!("~/{}", stripped.display());
        }
    }
    path.display().to_string()
}

/// Skapa en säker filnamn från en sträng
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect::<String>()
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("bloom:profile"), "bloom_profile");
        assert_eq!(sanitize_filename(" notes "), "notes");
    }

    #[test]
    fn test_default_paths_have_expected_names() {
        assert!(get_cloud_database_path().ends_with("cloud.db"));
        assert!(get_settings_path().ends_with("settings.toml"));
    }
}
