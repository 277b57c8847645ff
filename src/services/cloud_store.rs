//! Molnlagring per inloggad användare.
//!
//! Utan inloggning körs inga läsningar (de ger tomt resultat) och
//! skrivningar avvisas med `AppError::NotAuthenticated`.

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, error, info};

use crate::db::Database;
use crate::models::{
    Appointment, CustomTask, DailyLog, Identity, JournalEntry, PregnancyProfile, QuickNote,
    TaskStatus,
};
use crate::utils::date::format_date;
use crate::utils::{AppError, AppResult};

use super::query_cache::{Collection, QueryCache};

pub struct CloudStore {
    db: Database,
    identity: Option<Identity>,
    cache: QueryCache,
}

impl CloudStore {
    pub fn new(db: Database) -> Self {
        Self {
            db,
            identity: None,
            cache: QueryCache::new(),
        }
    }

    /// Byt användare. Cachen töms vid varje byte.
    pub fn set_identity(&mut self, identity: Option<Identity>) {
        if self.identity != identity {
            match &identity {
                Some(id) => info!("Molnlagring för användare {}", id.user_id),
                None => info!("Molnlagring utloggad"),
            }
            self.cache.clear();
        }
        self.identity = identity;
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }

    fn user_id(&self) -> Option<&str> {
        self.identity.as_ref().map(|i| i.user_id.as_str())
    }

    fn require_user(&self) -> AppResult<&str> {
        self.user_id().ok_or(AppError::NotAuthenticated)
    }

    /// Cachad läsning. Utan användare körs frågan inte alls.
    fn read<T, F>(&self, collection: Collection, detail: Option<&str>, fetch: F) -> AppResult<T>
    where
        T: Serialize + DeserializeOwned + Default,
        F: FnOnce(&Database, &str) -> anyhow::Result<T>,
    {
        let Some(user_id) = self.user_id() else {
            debug!("Ingen användare, hoppar över läsning av {:?}", collection);
            return Ok(T::default());
        };

        if let Some(hit) = self.cache.get(collection, user_id, detail) {
            return Ok(hit);
        }

        let value = fetch(&self.db, user_id).map_err(|e| {
            error!("Kunde inte läsa {:?}: {:#}", collection, e);
            AppError::from(e)
        })?;
        self.cache.put(collection, user_id, detail, &value);
        Ok(value)
    }

    /// Skrivning eller borttagning. Cachen för samlingen töms även vid fel.
    fn mutate<T, F>(&self, collection: Collection, op: F) -> AppResult<T>
    where
        F: FnOnce(&Database, &str) -> anyhow::Result<T>,
    {
        let user_id = self.require_user()?;
        let result = op(&self.db, user_id);
        self.cache.invalidate(collection, user_id);

        result.map_err(|e| {
            error!("Molnskrivning till {:?} misslyckades: {:#}", collection, e);
            AppError::from(e)
        })
    }

    // ==================== Profil ====================

    pub fn fetch_profile(&self) -> AppResult<Option<PregnancyProfile>> {
        self.read(Collection::Profile, None, |db, user| {
            db.profiles().find_by_user(user)
        })
    }

    pub fn save_profile(&self, profile: &PregnancyProfile) -> AppResult<PregnancyProfile> {
        profile
            .validate()
            .map_err(|e| AppError::validation(e.to_string()))?;
        self.mutate(Collection::Profile, |db, user| {
            db.profiles().upsert(user, profile)
        })
    }

    pub fn delete_profile(&self) -> AppResult<()> {
        self.mutate(Collection::Profile, |db, user| {
            db.profiles().delete_by_user(user).map(|_| ())
        })
    }

    // ==================== Dagliga incheckningar ====================

    pub fn fetch_daily_logs(&self) -> AppResult<Vec<DailyLog>> {
        self.read(Collection::DailyLogs, None, |db, user| {
            db.daily_logs().list_by_user(user)
        })
    }

    pub fn fetch_daily_log_by_date(&self, date: NaiveDate) -> AppResult<Option<DailyLog>> {
        Ok(self.fetch_daily_logs()?.into_iter().find(|l| l.date == date))
    }

    pub fn save_daily_log(&self, log: &DailyLog) -> AppResult<DailyLog> {
        log.validate()
            .map_err(|e| AppError::validation(e.to_string()))?;
        self.mutate(Collection::DailyLogs, |db, user| {
            db.daily_logs().upsert(user, log)
        })
    }

    pub fn delete_daily_log(&self, id: &str) -> AppResult<()> {
        self.mutate(Collection::DailyLogs, |db, user| {
            db.daily_logs().delete(user, id).map(|_| ())
        })
    }

    // ==================== Dagbok ====================

    pub fn fetch_journal_entries(&self) -> AppResult<Vec<JournalEntry>> {
        self.read(Collection::JournalEntries, None, |db, user| {
            db.journal().list_by_user(user)
        })
    }

    pub fn save_journal_entry(&self, entry: &JournalEntry) -> AppResult<JournalEntry> {
        entry
            .validate()
            .map_err(|e| AppError::validation(e.to_string()))?;
        self.mutate(Collection::JournalEntries, |db, user| {
            db.journal().upsert(user, entry)
        })
    }

    pub fn delete_journal_entry(&self, id: &str) -> AppResult<()> {
        self.mutate(Collection::JournalEntries, |db, user| {
            db.journal().delete(user, id).map(|_| ())
        })
    }

    // ==================== Tider ====================

    pub fn fetch_appointments(&self) -> AppResult<Vec<Appointment>> {
        self.read(Collection::Appointments, None, |db, user| {
            db.appointments().list_by_user(user)
        })
    }

    pub fn save_appointment(&self, appointment: &Appointment) -> AppResult<Appointment> {
        appointment
            .validate()
            .map_err(|e| AppError::validation(e.to_string()))?;
        self.mutate(Collection::Appointments, |db, user| {
            db.appointments().upsert(user, appointment)
        })
    }

    pub fn delete_appointment(&self, id: &str) -> AppResult<()> {
        self.mutate(Collection::Appointments, |db, user| {
            db.appointments().delete(user, id).map(|_| ())
        })
    }

    // ==================== Anteckningar ====================

    pub fn fetch_notes(&self) -> AppResult<Vec<QuickNote>> {
        self.read(Collection::Notes, None, |db, user| db.notes().list_by_user(user))
    }

    pub fn save_note(&self, note: &QuickNote) -> AppResult<QuickNote> {
        note.validate()
            .map_err(|e| AppError::validation(e.to_string()))?;
        self.mutate(Collection::Notes, |db, user| db.notes().upsert(user, note))
    }

    pub fn delete_note(&self, id: &str) -> AppResult<()> {
        self.mutate(Collection::Notes, |db, user| {
            db.notes().delete(user, id).map(|_| ())
        })
    }

    // ==================== Dagsplan ====================

    pub fn fetch_task_statuses(&self, date: NaiveDate) -> AppResult<Vec<TaskStatus>> {
        let detail = format_date(date);
        self.read(Collection::TaskStatuses, Some(&detail), |db, user| {
            db.tasks().statuses_for_date(user, date)
        })
    }

    pub fn save_task_status(&self, date: NaiveDate, status: &TaskStatus) -> AppResult<()> {
        self.mutate(Collection::TaskStatuses, |db, user| {
            db.tasks().upsert_status(user, date, status)
        })
    }

    pub fn fetch_custom_tasks(&self) -> AppResult<Vec<CustomTask>> {
        self.read(Collection::CustomTasks, None, |db, user| {
            db.tasks().list_custom(user)
        })
    }

    pub fn save_custom_task(&self, task: &CustomTask) -> AppResult<CustomTask> {
        task.validate()
            .map_err(|e| AppError::validation(e.to_string()))?;
        self.mutate(Collection::CustomTasks, |db, user| {
            db.tasks().upsert_custom(user, task)
        })
    }

    /// Tar även bort uppgiftens avbockningar
    pub fn delete_custom_task(&self, id: &str) -> AppResult<()> {
        let user_id = self.require_user()?;
        self.cache.invalidate(Collection::TaskStatuses, user_id);
        self.mutate(Collection::CustomTasks, |db, user| {
            db.tasks().delete_custom(user, id).map(|_| ())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn signed_in(user: &str) -> CloudStore {
        let mut store = CloudStore::new(Database::open_in_memory().unwrap());
        store.set_identity(Some(Identity::new(user, None)));
        store
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_reads_without_identity_are_empty() {
        let store = CloudStore::new(Database::open_in_memory().unwrap());

        assert!(store.fetch_profile().unwrap().is_none());
        assert!(store.fetch_notes().unwrap().is_empty());
        assert!(store.fetch_task_statuses(date(2024, 1, 1)).unwrap().is_empty());
    }

    #[test]
    fn test_writes_without_identity_fail() {
        let store = CloudStore::new(Database::open_in_memory().unwrap());

        let err = store.save_note(&QuickNote::new("hej")).unwrap_err();
        assert!(matches!(err, AppError::NotAuthenticated));
        assert!(matches!(
            store.delete_appointment("x").unwrap_err(),
            AppError::NotAuthenticated
        ));
        assert!(matches!(
            store
                .save_task_status(date(2024, 1, 1), &TaskStatus::new("morning-water", true))
                .unwrap_err(),
            AppError::NotAuthenticated
        ));
    }

    #[test]
    fn test_mutation_invalidates_cached_read() {
        let store = signed_in("u1");

        assert!(store.fetch_notes().unwrap().is_empty());
        store.save_note(&QuickNote::new("första")).unwrap();

        let notes = store.fetch_notes().unwrap();
        assert_eq!(notes.len(), 1);

        store.delete_note(&notes[0].id).unwrap();
        assert!(store.fetch_notes().unwrap().is_empty());
    }

    #[test]
    fn test_validation_before_persistence() {
        let store = signed_in("u1");
        let err = store
            .save_appointment(&Appointment::new("  ", Utc::now()))
            .unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
        assert!(store.fetch_appointments().unwrap().is_empty());
    }

    #[test]
    fn test_identity_switch_scopes_data() {
        let mut store = signed_in("u1");
        store
            .save_appointment(&Appointment::new("Ultraljud", Utc::now() + Duration::days(3)))
            .unwrap();
        assert_eq!(store.fetch_appointments().unwrap().len(), 1);

        store.set_identity(Some(Identity::new("u2", None)));
        assert!(store.fetch_appointments().unwrap().is_empty());

        store.set_identity(None);
        assert!(store.fetch_appointments().unwrap().is_empty());
    }

    #[test]
    fn test_saving_other_users_record_is_not_found() {
        let mut store = signed_in("u1");
        let note = store.save_note(&QuickNote::new("min")).unwrap();

        store.set_identity(Some(Identity::new("u2", None)));
        let err = store.save_note(&note).unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn test_profile_round_trip() {
        let store = signed_in("u1");
        let profile = PregnancyProfile::from_lmp("Amina", date(2024, 1, 1));

        assert!(store.fetch_profile().unwrap().is_none());
        store.save_profile(&profile).unwrap();

        let fetched = store.fetch_profile().unwrap().unwrap();
        assert_eq!(fetched.due(), date(2024, 10, 7));

        store.delete_profile().unwrap();
        assert!(store.fetch_profile().unwrap().is_none());
    }

    #[test]
    fn test_daily_log_by_date() {
        let store = signed_in("u1");
        store.save_daily_log(&DailyLog::new(date(2024, 2, 1))).unwrap();

        assert!(store.fetch_daily_log_by_date(date(2024, 2, 1)).unwrap().is_some());
        assert!(store.fetch_daily_log_by_date(date(2024, 2, 2)).unwrap().is_none());
    }
}
