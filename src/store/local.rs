//! Lokal lagring: varje samling är ett JSON-värde under en fast nyckel.
//! Hela samlingen läses och skrivs om vid varje ändring.

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, error};

use crate::models::{
    Appointment, BumpPhoto, DailyLog, JournalEntry, Memory, NotificationPreferences,
    PregnancyProfile, QuickNote, DEFAULT_COMFORT_PREFERENCES, upcoming_appointments,
};
use crate::utils::{AppError, AppResult};

use super::backend::{FileBackend, MemoryBackend, StorageBackend};
use super::keys::StorageKey;
use super::upsert::{upsert_by, Touch, Upsert};

/// Lokal lagring för en enhet
#[derive(Clone)]
pub struct LocalStore {
    backend: Arc<dyn StorageBackend>,
}

impl LocalStore {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    /// Öppna fillagring i katalogen
    pub fn open(dir: &Path) -> AppResult<Self> {
        Ok(Self::new(Arc::new(FileBackend::open(dir)?)))
    }

    /// Lagring i minnet (för tester)
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryBackend::new()))
    }

    // ------------------------------------------------------------
    // Generiska läs/skriv
    // ------------------------------------------------------------

    fn read<T: DeserializeOwned>(&self, key: StorageKey) -> AppResult<Option<T>> {
        match self.backend.get_item(key.as_str())? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    fn read_list<T: DeserializeOwned>(&self, key: StorageKey) -> AppResult<Vec<T>> {
        Ok(self.read(key)?.unwrap_or_default())
    }

    fn write<T: Serialize + ?Sized>(&self, key: StorageKey, value: &T) -> AppResult<()> {
        let result = serde_json::to_string(value)
            .map_err(AppError::from)
            .and_then(|raw| self.backend.set_item(key.as_str(), &raw));

        if let Err(e) = &result {
            error!("Kunde inte spara {}: {}", key, e);
        }
        result
    }

    fn upsert<T, K, F>(&self, key: StorageKey, record: T, key_fn: F) -> AppResult<Upsert>
    where
        T: Serialize + DeserializeOwned + Touch,
        K: PartialEq,
        F: Fn(&T) -> K,
    {
        let mut items: Vec<T> = self.read_list(key)?;
        let outcome = upsert_by(&mut items, record, key_fn, Utc::now());
        self.write(key, &items)?;
        debug!("{}: {:?}", key, outcome);
        Ok(outcome)
    }

    fn delete_where<T, F>(&self, key: StorageKey, remove: F) -> AppResult<()>
    where
        T: Serialize + DeserializeOwned,
        F: Fn(&T) -> bool,
    {
        let mut items: Vec<T> = self.read_list(key)?;
        items.retain(|item| !remove(item));
        self.write(key, &items)
    }

    // ------------------------------------------------------------
    // Profil
    // ------------------------------------------------------------

    pub fn get_profile(&self) -> AppResult<Option<PregnancyProfile>> {
        self.read(StorageKey::Profile)
    }

    pub fn save_profile(&self, profile: &PregnancyProfile) -> AppResult<()> {
        profile
            .validate()
            .map_err(|e| AppError::validation(e.to_string()))?;
        self.write(StorageKey::Profile, profile)
    }

    pub fn clear_profile(&self) -> AppResult<()> {
        self.backend.remove_item(StorageKey::Profile.as_str())
    }

    // ------------------------------------------------------------
    // Dagliga incheckningar
    // ------------------------------------------------------------

    pub fn get_daily_logs(&self) -> AppResult<Vec<DailyLog>> {
        self.read_list(StorageKey::DailyLogs)
    }

    pub fn get_daily_log_by_date(&self, date: NaiveDate) -> AppResult<Option<DailyLog>> {
        Ok(self.get_daily_logs()?.into_iter().find(|l| l.date == date))
    }

    /// Spara incheckning. Samma datum skriver över den befintliga.
    pub fn save_daily_log(&self, log: DailyLog) -> AppResult<Upsert> {
        log.validate()
            .map_err(|e| AppError::validation(e.to_string()))?;
        self.upsert(StorageKey::DailyLogs, log, |l: &DailyLog| l.date)
    }

    // ------------------------------------------------------------
    // Dagbok
    // ------------------------------------------------------------

    pub fn get_journal_entries(&self) -> AppResult<Vec<JournalEntry>> {
        self.read_list(StorageKey::JournalEntries)
    }

    pub fn save_journal_entry(&self, entry: JournalEntry) -> AppResult<Upsert> {
        entry
            .validate()
            .map_err(|e| AppError::validation(e.to_string()))?;
        self.upsert(StorageKey::JournalEntries, entry, |e: &JournalEntry| e.id.clone())
    }

    pub fn delete_journal_entry(&self, id: &str) -> AppResult<()> {
        self.delete_where(StorageKey::JournalEntries, |e: &JournalEntry| e.id == id)
    }

    // ------------------------------------------------------------
    // Tider
    // ------------------------------------------------------------

    pub fn get_appointments(&self) -> AppResult<Vec<Appointment>> {
        self.read_list(StorageKey::Appointments)
    }

    pub fn save_appointment(&self, appointment: Appointment) -> AppResult<Upsert> {
        appointment
            .validate()
            .map_err(|e| AppError::validation(e.to_string()))?;
        self.upsert(StorageKey::Appointments, appointment, |a: &Appointment| a.id.clone())
    }

    pub fn delete_appointment(&self, id: &str) -> AppResult<()> {
        self.delete_where(StorageKey::Appointments, |a: &Appointment| a.id == id)
    }

    pub fn get_upcoming_appointments(&self, now: DateTime<Utc>) -> AppResult<Vec<Appointment>> {
        Ok(upcoming_appointments(&self.get_appointments()?, now))
    }

    // ------------------------------------------------------------
    // Snabbanteckningar
    // ------------------------------------------------------------

    pub fn get_quick_notes(&self) -> AppResult<Vec<QuickNote>> {
        self.read_list(StorageKey::Notes)
    }

    pub fn save_quick_note(&self, note: QuickNote) -> AppResult<Upsert> {
        note.validate()
            .map_err(|e| AppError::validation(e.to_string()))?;
        self.upsert(StorageKey::Notes, note, |n: &QuickNote| n.id.clone())
    }

    pub fn delete_quick_note(&self, id: &str) -> AppResult<()> {
        self.delete_where(StorageKey::Notes, |n: &QuickNote| n.id == id)
    }

    // ------------------------------------------------------------
    // Magbilder
    // ------------------------------------------------------------

    pub fn get_bump_photos(&self) -> AppResult<Vec<BumpPhoto>> {
        self.read_list(StorageKey::BumpPhotos)
    }

    pub fn save_bump_photo(&self, photo: BumpPhoto) -> AppResult<Upsert> {
        self.upsert(StorageKey::BumpPhotos, photo, |p: &BumpPhoto| p.id.clone())
    }

    pub fn delete_bump_photo(&self, id: &str) -> AppResult<()> {
        self.delete_where(StorageKey::BumpPhotos, |p: &BumpPhoto| p.id == id)
    }

    /// Byt bildtext på en befintlig bild
    pub fn update_bump_photo_caption(&self, id: &str, caption: &str) -> AppResult<()> {
        let mut photos = self.get_bump_photos()?;
        let photo = photos
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| AppError::not_found(format!("Bild {}", id)))?;

        photo.caption = caption.to_string();
        photo.touch(Utc::now());
        self.write(StorageKey::BumpPhotos, &photos)
    }

    // ------------------------------------------------------------
    // Minnen
    // ------------------------------------------------------------

    pub fn get_memories(&self) -> AppResult<Vec<Memory>> {
        self.read_list(StorageKey::Memories)
    }

    pub fn save_memory(&self, memory: Memory) -> AppResult<Upsert> {
        memory
            .validate()
            .map_err(|e| AppError::validation(e.to_string()))?;
        self.upsert(StorageKey::Memories, memory, |m: &Memory| m.id.clone())
    }

    pub fn delete_memory(&self, id: &str) -> AppResult<()> {
        self.delete_where(StorageKey::Memories, |m: &Memory| m.id == id)
    }

    pub fn get_memory_by_date(&self, date: NaiveDate) -> AppResult<Option<Memory>> {
        Ok(self.get_memories()?.into_iter().find(|m| m.date == date))
    }

    pub fn get_memories_for_week(&self, week: i64) -> AppResult<Vec<Memory>> {
        Ok(self
            .get_memories()?
            .into_iter()
            .filter(|m| m.week == week)
            .collect())
    }

    /// Datum som har minst ett minne (för kalendervyn)
    pub fn get_memory_dates(&self) -> AppResult<BTreeSet<NaiveDate>> {
        Ok(self.get_memories()?.into_iter().map(|m| m.date).collect())
    }

    // ------------------------------------------------------------
    // Inställningar
    // ------------------------------------------------------------

    pub fn get_notification_preferences(&self) -> AppResult<NotificationPreferences> {
        Ok(self
            .read(StorageKey::NotificationPreferences)?
            .unwrap_or_default())
    }

    pub fn save_notification_preferences(&self, prefs: &NotificationPreferences) -> AppResult<()> {
        self.write(StorageKey::NotificationPreferences, prefs)
    }

    pub fn get_comfort_preferences(&self) -> AppResult<Vec<String>> {
        Ok(self.read(StorageKey::ComfortPreferences)?.unwrap_or_else(|| {
            DEFAULT_COMFORT_PREFERENCES
                .iter()
                .map(|id| id.to_string())
                .collect()
        }))
    }

    pub fn save_comfort_preferences(&self, ids: &[String]) -> AppResult<()> {
        self.write(StorageKey::ComfortPreferences, ids)
    }

    pub fn get_last_completed_week(&self) -> AppResult<Option<i64>> {
        self.read(StorageKey::LastCompletedWeek)
    }

    pub fn set_last_completed_week(&self, week: i64) -> AppResult<()> {
        self.write(StorageKey::LastCompletedWeek, &week)
    }

    /// Radera allt som ligger i den lokala lagringen
    pub fn clear_all_data(&self) -> AppResult<()> {
        for key in StorageKey::all() {
            self.backend.remove_item(key.as_str())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use tempfile::TempDir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_missing_keys_read_as_empty() {
        let store = LocalStore::in_memory();
        assert!(store.get_profile().unwrap().is_none());
        assert!(store.get_daily_logs().unwrap().is_empty());
        assert!(store.get_quick_notes().unwrap().is_empty());
        assert_eq!(store.get_last_completed_week().unwrap(), None);
        assert_eq!(
            store.get_notification_preferences().unwrap(),
            NotificationPreferences::default()
        );
        assert_eq!(store.get_comfort_preferences().unwrap().len(), 4);
    }

    #[test]
    fn test_profile_round_trip_and_clear() {
        let store = LocalStore::in_memory();
        let profile = PregnancyProfile::from_lmp("Amina", date(2024, 1, 1));
        store.save_profile(&profile).unwrap();
        assert_eq!(store.get_profile().unwrap(), Some(profile));

        store.clear_profile().unwrap();
        assert!(store.get_profile().unwrap().is_none());
    }

    #[test]
    fn test_daily_log_upserts_by_date() {
        let store = LocalStore::in_memory();
        let day = date(2024, 3, 1);

        let mut first = DailyLog::new(day);
        first.notes = Some("första".into());
        assert_eq!(store.save_daily_log(first).unwrap(), Upsert::Inserted);

        let mut second = DailyLog::new(day);
        second.notes = Some("andra".into());
        assert_eq!(store.save_daily_log(second).unwrap(), Upsert::Replaced);

        let logs = store.get_daily_logs().unwrap();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].notes.as_deref(), Some("andra"));
        assert_eq!(
            store.get_daily_log_by_date(day).unwrap().unwrap().notes.as_deref(),
            Some("andra")
        );
    }

    #[test]
    fn test_invalid_daily_log_is_not_saved() {
        let store = LocalStore::in_memory();
        let mut log = DailyLog::new(date(2024, 3, 1));
        log.symptoms.push(crate::models::SymptomEntry::new("nausea", 7));

        assert!(matches!(store.save_daily_log(log), Err(AppError::Validation(_))));
        assert!(store.get_daily_logs().unwrap().is_empty());
    }

    #[test]
    fn test_note_overwrite_and_append() {
        let store = LocalStore::in_memory();
        let note = QuickNote::new("köp vitaminer");
        store.save_quick_note(note.clone()).unwrap();

        let mut edited = note.clone();
        edited.content = "köp järntabletter".into();
        store.save_quick_note(edited).unwrap();
        store.save_quick_note(QuickNote::new("ring barnmorskan")).unwrap();

        let notes = store.get_quick_notes().unwrap();
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].content, "köp järntabletter");
        assert!(notes[0].updated_at >= note.updated_at);

        store.delete_quick_note(&note.id).unwrap();
        assert_eq!(store.get_quick_notes().unwrap().len(), 1);
    }

    #[test]
    fn test_appointment_requires_title() {
        let store = LocalStore::in_memory();
        let err = store.save_appointment(Appointment::new("", Utc::now())).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(store.get_appointments().unwrap().is_empty());
    }

    #[test]
    fn test_upcoming_appointments() {
        let store = LocalStore::in_memory();
        let now = Utc::now();
        store.save_appointment(Appointment::new("Sen", now + Duration::days(9))).unwrap();
        store.save_appointment(Appointment::new("Passerad", now - Duration::hours(1))).unwrap();
        store.save_appointment(Appointment::new("Snart", now + Duration::hours(2))).unwrap();

        let titles: Vec<String> = store
            .get_upcoming_appointments(now)
            .unwrap()
            .into_iter()
            .map(|a| a.title)
            .collect();
        assert_eq!(titles, vec!["Snart", "Sen"]);
    }

    #[test]
    fn test_journal_edit_keeps_created_at() {
        let store = LocalStore::in_memory();
        let entry = JournalEntry::new(date(2024, 3, 3), "Första sparken", "Kände en spark!");
        store.save_journal_entry(entry.clone()).unwrap();

        let mut edited = entry.clone();
        edited.content = "Kände två sparkar!".into();
        store.save_journal_entry(edited).unwrap();

        let entries = store.get_journal_entries().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].created_at, entry.created_at);
        assert_eq!(entries[0].content, "Kände två sparkar!");

        store.delete_journal_entry(&entry.id).unwrap();
        assert!(store.get_journal_entries().unwrap().is_empty());
    }

    #[test]
    fn test_photo_caption_update() {
        let store = LocalStore::in_memory();
        let photo = BumpPhoto::new("data:image/png;base64,AAAA", "", 20);
        store.save_bump_photo(photo.clone()).unwrap();

        store.update_bump_photo_caption(&photo.id, "Halvvägs!").unwrap();
        assert_eq!(store.get_bump_photos().unwrap()[0].caption, "Halvvägs!");

        let err = store.update_bump_photo_caption("saknas", "x").unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn test_memory_queries() {
        let store = LocalStore::in_memory();
        store
            .save_memory(Memory::new(date(2024, 3, 1), "Today I felt…", "Lugn", 8))
            .unwrap();
        store
            .save_memory(Memory::new(date(2024, 3, 3), "I'm grateful for…", "Familjen", 9))
            .unwrap();
        store
            .save_memory(Memory::new(date(2024, 3, 3), "Today I felt…", "Trött", 9))
            .unwrap();

        assert_eq!(store.get_memories_for_week(9).unwrap().len(), 2);
        assert_eq!(
            store.get_memory_by_date(date(2024, 3, 1)).unwrap().unwrap().content,
            "Lugn"
        );
        assert!(store.get_memory_by_date(date(2024, 3, 2)).unwrap().is_none());

        let dates: Vec<NaiveDate> = store.get_memory_dates().unwrap().into_iter().collect();
        assert_eq!(dates, vec![date(2024, 3, 1), date(2024, 3, 3)]);
    }

    #[test]
    fn test_write_failure_is_surfaced() {
        let store = LocalStore::new(Arc::new(MemoryBackend::with_quota(64)));
        let err = store
            .save_quick_note(QuickNote::new("x".repeat(200)))
            .unwrap_err();

        assert!(matches!(err, AppError::Storage(_)));
        assert!(store.get_quick_notes().unwrap().is_empty());
    }

    #[test]
    fn test_clear_all_data() {
        let dir = TempDir::new().unwrap();
        let store = LocalStore::open(dir.path()).unwrap();
        store
            .save_profile(&PregnancyProfile::from_lmp("Amina", date(2024, 1, 1)))
            .unwrap();
        store.save_quick_note(QuickNote::new("hej")).unwrap();
        store.set_last_completed_week(12).unwrap();

        store.clear_all_data().unwrap();

        assert!(store.get_profile().unwrap().is_none());
        assert!(store.get_quick_notes().unwrap().is_empty());
        assert_eq!(store.get_last_completed_week().unwrap(), None);
    }
}
