//! Export av användarens data till JSON. Ingen import finns.

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use std::path::Path;

use crate::models::{
    Appointment, BumpPhoto, DailyLog, JournalEntry, Memory, PregnancyProfile, QuickNote,
};

use super::persistence::PersistenceSelector;

/// Vad som exporteras
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    /// Profil och alla samlingar
    AllData,
    /// Bara incheckningar, i läsbar form
    Tracker,
}

impl ExportKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            ExportKind::AllData => "All data",
            ExportKind::Tracker => "Tracker",
        }
    }

    pub fn filename_prefix(&self) -> &'static str {
        match self {
            ExportKind::AllData => "data",
            ExportKind::Tracker => "tracker",
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AllDataExport {
    pub profile: Option<PregnancyProfile>,
    pub daily_logs: Vec<DailyLog>,
    pub journal_entries: Vec<JournalEntry>,
    pub appointments: Vec<Appointment>,
    pub notes: Vec<QuickNote>,
    pub bump_photos: Vec<BumpPhoto>,
    pub memories: Vec<Memory>,
    pub exported_at: DateTime<Utc>,
}

impl AllDataExport {
    pub fn record_count(&self) -> usize {
        usize::from(self.profile.is_some())
            + self.daily_logs.len()
            + self.journal_entries.len()
            + self.appointments.len()
            + self.notes.len()
            + self.bump_photos.len()
            + self.memories.len()
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackerExport {
    pub name: String,
    pub due_date: Option<DateTime<Utc>>,
    pub total_entries: usize,
    pub logs: Vec<TrackerLogExport>,
    pub exported_at: DateTime<Utc>,
}

/// En incheckning med etiketter i stället för värden
#[derive(Debug, Serialize)]
pub struct TrackerLogExport {
    pub date: NaiveDate,
    pub mood: Option<String>,
    pub energy: Option<String>,
    pub symptoms: Vec<String>,
    pub notes: Option<String>,
}

impl From<&DailyLog> for TrackerLogExport {
    fn from(log: &DailyLog) -> Self {
        Self {
            date: log.date,
            mood: log.mood.as_ref().map(|m| m.label.clone()),
            energy: log.energy.as_ref().map(|e| e.label.clone()),
            symptoms: log.symptoms.iter().map(|s| s.symptom_id.clone()).collect(),
            notes: log.notes.clone(),
        }
    }
}

/// Export-tjänst. Läser från det lagringsläge som gäller just nu;
/// bilder och minnen finns bara lokalt.
pub struct ExportService<'a> {
    selector: &'a PersistenceSelector,
}

impl<'a> ExportService<'a> {
    pub fn new(selector: &'a PersistenceSelector) -> Self {
        Self { selector }
    }

    /// Generera filnamn för export
    pub fn generate_filename(kind: ExportKind) -> String {
        let timestamp = Utc::now().format("%Y%m%d_%H%M%S");
        format!("bloom_{}_{}.json", kind.filename_prefix(), timestamp)
    }

    pub fn collect_all_data(&self) -> Result<AllDataExport> {
        Ok(AllDataExport {
            profile: self.selector.get_profile()?,
            daily_logs: self.selector.get_daily_logs()?,
            journal_entries: self.selector.get_journal_entries()?,
            appointments: self.selector.get_appointments()?,
            notes: self.selector.get_notes()?,
            bump_photos: self.selector.get_bump_photos()?,
            memories: self.selector.local().get_memories()?,
            exported_at: Utc::now(),
        })
    }

    pub fn collect_tracker_data(&self) -> Result<TrackerExport> {
        let profile = self.selector.get_profile()?;
        let logs = self.selector.get_daily_logs()?;

        Ok(TrackerExport {
            name: profile
                .as_ref()
                .map(|p| p.name.clone())
                .unwrap_or_else(|| "Unknown".to_string()),
            due_date: profile.map(|p| p.due_date),
            total_entries: logs.len(),
            logs: logs.iter().map(TrackerLogExport::from).collect(),
            exported_at: Utc::now(),
        })
    }

    pub fn export_all_data(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.collect_all_data()?)
            .context("JSON serialisering misslyckades")
    }

    pub fn export_tracker_data(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.collect_tracker_data()?)
            .context("JSON serialisering misslyckades")
    }

    /// Exportera till fil
    pub fn export_to_file(&self, kind: ExportKind, path: &Path) -> Result<ExportResult> {
        let (content, record_count) = match kind {
            ExportKind::AllData => {
                let data = self.collect_all_data()?;
                let count = data.record_count();
                (
                    serde_json::to_string_pretty(&data).context("JSON serialisering misslyckades")?,
                    count,
                )
            }
            ExportKind::Tracker => {
                let data = self.collect_tracker_data()?;
                let count = data.total_entries;
                (
                    serde_json::to_string_pretty(&data).context("JSON serialisering misslyckades")?,
                    count,
                )
            }
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Kunde inte skapa katalog {}", parent.display()))?;
        }
        std::fs::write(path, &content).context("Kunde inte skriva fil")?;

        Ok(ExportResult {
            kind,
            record_count,
            file_size: content.len(),
        })
    }
}

/// Resultat av export
#[derive(Debug)]
pub struct ExportResult {
    pub kind: ExportKind,
    pub record_count: usize,
    pub file_size: usize,
}

impl ExportResult {
    pub fn summary(&self) -> String {
        format!(
            "{} exporterad: {} poster, {} bytes",
            self.kind.display_name(),
            self.record_count,
            self.file_size
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use crate::models::{Rating, SymptomEntry};
    use crate::services::CloudStore;
    use crate::store::LocalStore;
    use tempfile::TempDir;

    fn selector() -> PersistenceSelector {
        PersistenceSelector::new(
            LocalStore::in_memory(),
            CloudStore::new(Database::open_in_memory().unwrap()),
        )
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_generate_filename() {
        let filename = ExportService::generate_filename(ExportKind::Tracker);
        assert!(filename.starts_with("bloom_tracker_"));
        assert!(filename.ends_with(".json"));
    }

    #[test]
    fn test_all_data_keys() {
        let mut sel = selector();
        sel.setup_profile(date(2024, 1, 1), Some("Amina")).unwrap();
        sel.save_note(QuickNote::new("kom ihåg")).unwrap();

        let json = ExportService::new(&sel).export_all_data().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        for key in [
            "profile",
            "dailyLogs",
            "journalEntries",
            "appointments",
            "notes",
            "bumpPhotos",
            "memories",
            "exportedAt",
        ] {
            assert!(value.get(key).is_some(), "saknar {}", key);
        }
        assert_eq!(value["profile"]["name"], "Amina");
        assert_eq!(value["notes"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_tracker_export_uses_labels() {
        let sel = selector();
        let mut log = DailyLog::new(date(2024, 2, 1));
        log.mood = Rating::mood(4);
        log.symptoms.push(SymptomEntry::new("nausea", 2));
        sel.save_daily_log(log).unwrap();

        let data = ExportService::new(&sel).collect_tracker_data().unwrap();
        assert_eq!(data.name, "Unknown");
        assert_eq!(data.total_entries, 1);
        assert_eq!(data.logs[0].mood.as_deref(), Some("Good"));
        assert_eq!(data.logs[0].symptoms, vec!["nausea"]);
    }

    #[test]
    fn test_export_to_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ut").join("bloom.json");

        let mut sel = selector();
        sel.setup_profile(date(2024, 1, 1), None).unwrap();

        let result = ExportService::new(&sel)
            .export_to_file(ExportKind::AllData, &path)
            .unwrap();

        assert_eq!(result.record_count, 1);
        assert!(path.exists());
        assert_eq!(std::fs::metadata(&path).unwrap().len() as usize, result.file_size);
    }
}
