//! Väljer lagring utifrån inloggning.
//!
//! Utan användare går allt till den lokala lagringen, med användare till
//! molnet. Första gången en användare loggar in utan molnprofil kopieras
//! den lokala profilen upp (bara profilen, övriga samlingar stannar lokalt).

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, Utc};
use tracing::{error, info, warn};

use crate::models::{
    sort_notes_for_display, sort_photos_for_gallery, upcoming_appointments, Appointment,
    BumpPhoto, DailyLog, Identity, JournalEntry, PregnancyProfile, QuickNote,
    DEFAULT_PROFILE_NAME,
};
use crate::pregnancy::GestationalAge;
use crate::store::LocalStore;
use crate::utils::AppResult;

use super::cloud_store::CloudStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistenceMode {
    Local,
    Cloud,
}

/// Status för hämtningen av molnprofilen
#[derive(Debug, Clone, PartialEq)]
pub enum ProfileQuery {
    Idle,
    Loading,
    Loaded(Option<PregnancyProfile>),
    Failed(String),
}

impl ProfileQuery {
    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }
}

/// Resultat av migreringskontrollen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationOutcome {
    /// Inget att göra (molnprofil finns, ingen lokal profil eller redan gjort)
    Skipped,
    Migrated,
    Failed,
}

pub struct PersistenceSelector {
    local: LocalStore,
    cloud: CloudStore,
    profile_query: ProfileQuery,
    migrated_users: HashSet<String>,
    default_name: String,
}

impl PersistenceSelector {
    pub fn new(local: LocalStore, cloud: CloudStore) -> Self {
        Self {
            local,
            cloud,
            profile_query: ProfileQuery::Idle,
            migrated_users: HashSet::new(),
            default_name: DEFAULT_PROFILE_NAME.to_string(),
        }
    }

    pub fn with_default_name(mut self, name: impl Into<String>) -> Self {
        self.default_name = name.into();
        self
    }

    /// Användare som redan har migrerats i en tidigare session
    pub fn with_migrated_users<I, S>(mut self, users: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.migrated_users.extend(users.into_iter().map(Into::into));
        self
    }

    /// Migrerade användare, sorterade
    pub fn migrated_users(&self) -> Vec<String> {
        let mut users: Vec<String> = self.migrated_users.iter().cloned().collect();
        users.sort();
        users
    }

    pub fn mode(&self) -> PersistenceMode {
        if self.cloud.is_authenticated() {
            PersistenceMode::Cloud
        } else {
            PersistenceMode::Local
        }
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.cloud.identity()
    }

    pub fn profile_query(&self) -> &ProfileQuery {
        &self.profile_query
    }

    pub fn local(&self) -> &LocalStore {
        &self.local
    }

    pub fn cloud(&self) -> &CloudStore {
        &self.cloud
    }

    /// Logga in eller ut. Vid inloggning hämtas molnprofilen först och
    /// migreringen prövas när hämtningen är klar.
    pub fn set_identity(&mut self, identity: Option<Identity>) -> AppResult<MigrationOutcome> {
        let before = self.mode();
        self.cloud.set_identity(identity);

        if self.mode() != before {
            info!("Lagringsläge: {:?} -> {:?}", before, self.mode());
        }

        if !self.cloud.is_authenticated() {
            self.profile_query = ProfileQuery::Idle;
            return Ok(MigrationOutcome::Skipped);
        }

        self.refresh_cloud_profile()?;
        Ok(self.evaluate_migration())
    }

    /// Hämta molnprofilen på nytt
    pub fn refresh_cloud_profile(&mut self) -> AppResult<()> {
        self.profile_query = ProfileQuery::Loading;

        match self.cloud.fetch_profile() {
            Ok(profile) => {
                self.profile_query = ProfileQuery::Loaded(profile);
                Ok(())
            }
            Err(e) => {
                warn!("Kunde inte hämta molnprofil: {}", e);
                self.profile_query = ProfileQuery::Failed(e.to_string());
                Err(e)
            }
        }
    }

    /// Kopiera lokal profil till molnet om användaren saknar en.
    /// Görs högst en gång per användare och session.
    pub fn evaluate_migration(&mut self) -> MigrationOutcome {
        let Some(user_id) = self.cloud.identity().map(|i| i.user_id.clone()) else {
            return MigrationOutcome::Skipped;
        };

        if !matches!(self.profile_query, ProfileQuery::Loaded(None)) {
            return MigrationOutcome::Skipped;
        }

        if self.migrated_users.contains(&user_id) {
            return MigrationOutcome::Skipped;
        }

        let local_profile = match self.local.get_profile() {
            Ok(Some(profile)) => profile,
            Ok(None) => return MigrationOutcome::Skipped,
            Err(e) => {
                warn!("Kunde inte läsa lokal profil för migrering: {}", e);
                return MigrationOutcome::Skipped;
            }
        };

        self.migrated_users.insert(user_id.clone());

        match self.cloud.save_profile(&local_profile) {
            Ok(saved) => {
                info!("Lokal profil migrerad till molnet för {}", user_id);
                self.profile_query = ProfileQuery::Loaded(Some(saved));
                MigrationOutcome::Migrated
            }
            Err(e) => {
                error!("Migrering av profil misslyckades: {}", e);
                MigrationOutcome::Failed
            }
        }
    }

    // ==================== Profil ====================

    pub fn get_profile(&self) -> AppResult<Option<PregnancyProfile>> {
        match self.mode() {
            PersistenceMode::Local => self.local.get_profile(),
            PersistenceMode::Cloud => self.cloud.fetch_profile(),
        }
    }

    fn resolve_name(&self, name: Option<&str>) -> String {
        match name.map(str::trim) {
            Some(n) if !n.is_empty() => n.to_string(),
            _ => self.default_name.clone(),
        }
    }

    fn store_profile(&mut self, profile: PregnancyProfile) -> AppResult<PregnancyProfile> {
        match self.mode() {
            PersistenceMode::Local => {
                self.local.save_profile(&profile)?;
                Ok(profile)
            }
            PersistenceMode::Cloud => {
                let saved = self.cloud.save_profile(&profile)?;
                self.profile_query = ProfileQuery::Loaded(Some(saved.clone()));
                Ok(saved)
            }
        }
    }

    /// Skapa profil från LMP
    pub fn setup_profile(
        &mut self,
        lmp: NaiveDate,
        name: Option<&str>,
    ) -> AppResult<PregnancyProfile> {
        let profile = PregnancyProfile::from_lmp(self.resolve_name(name), lmp);
        info!("Ny profil, BF {}", profile.due());
        self.store_profile(profile)
    }

    /// Skapa profil från känt BF
    pub fn setup_profile_with_due_date(
        &mut self,
        due: NaiveDate,
        name: Option<&str>,
    ) -> AppResult<PregnancyProfile> {
        let profile = PregnancyProfile::from_due_date(self.resolve_name(name), due);
        info!("Ny profil, LMP {}", profile.lmp());
        self.store_profile(profile)
    }

    pub fn reset_profile(&mut self) -> AppResult<()> {
        match self.mode() {
            PersistenceMode::Local => self.local.clear_profile(),
            PersistenceMode::Cloud => {
                self.cloud.delete_profile()?;
                self.profile_query = ProfileQuery::Loaded(None);
                Ok(())
            }
        }
    }

    pub fn gestational_age(&self, today: NaiveDate) -> AppResult<Option<GestationalAge>> {
        Ok(self.get_profile()?.map(|p| p.gestational_age(today)))
    }

    pub fn days_remaining(&self, today: NaiveDate) -> AppResult<Option<i64>> {
        Ok(self.get_profile()?.map(|p| p.days_remaining(today)))
    }

    // ==================== Dagliga incheckningar ====================

    pub fn get_daily_logs(&self) -> AppResult<Vec<DailyLog>> {
        match self.mode() {
            PersistenceMode::Local => self.local.get_daily_logs(),
            PersistenceMode::Cloud => self.cloud.fetch_daily_logs(),
        }
    }

    pub fn get_daily_log_by_date(&self, date: NaiveDate) -> AppResult<Option<DailyLog>> {
        match self.mode() {
            PersistenceMode::Local => self.local.get_daily_log_by_date(date),
            PersistenceMode::Cloud => self.cloud.fetch_daily_log_by_date(date),
        }
    }

    pub fn save_daily_log(&self, log: DailyLog) -> AppResult<()> {
        match self.mode() {
            PersistenceMode::Local => self.local.save_daily_log(log).map(|_| ()),
            PersistenceMode::Cloud => self.cloud.save_daily_log(&log).map(|_| ()),
        }
    }

    // ==================== Dagbok ====================

    pub fn get_journal_entries(&self) -> AppResult<Vec<JournalEntry>> {
        match self.mode() {
            PersistenceMode::Local => self.local.get_journal_entries(),
            PersistenceMode::Cloud => self.cloud.fetch_journal_entries(),
        }
    }

    pub fn save_journal_entry(&self, entry: JournalEntry) -> AppResult<()> {
        match self.mode() {
            PersistenceMode::Local => self.local.save_journal_entry(entry).map(|_| ()),
            PersistenceMode::Cloud => self.cloud.save_journal_entry(&entry).map(|_| ()),
        }
    }

    pub fn delete_journal_entry(&self, id: &str) -> AppResult<()> {
        match self.mode() {
            PersistenceMode::Local => self.local.delete_journal_entry(id),
            PersistenceMode::Cloud => self.cloud.delete_journal_entry(id),
        }
    }

    // ==================== Tider ====================

    pub fn get_appointments(&self) -> AppResult<Vec<Appointment>> {
        match self.mode() {
            PersistenceMode::Local => self.local.get_appointments(),
            PersistenceMode::Cloud => self.cloud.fetch_appointments(),
        }
    }

    pub fn get_upcoming_appointments(&self, now: DateTime<Utc>) -> AppResult<Vec<Appointment>> {
        Ok(upcoming_appointments(&self.get_appointments()?, now))
    }

    pub fn save_appointment(&self, appointment: Appointment) -> AppResult<()> {
        match self.mode() {
            PersistenceMode::Local => self.local.save_appointment(appointment).map(|_| ()),
            PersistenceMode::Cloud => self.cloud.save_appointment(&appointment).map(|_| ()),
        }
    }

    pub fn delete_appointment(&self, id: &str) -> AppResult<()> {
        match self.mode() {
            PersistenceMode::Local => self.local.delete_appointment(id),
            PersistenceMode::Cloud => self.cloud.delete_appointment(id),
        }
    }

    // ==================== Anteckningar ====================

    /// Fästa först, sedan nyast
    pub fn get_notes(&self) -> AppResult<Vec<QuickNote>> {
        let mut notes = match self.mode() {
            PersistenceMode::Local => self.local.get_quick_notes()?,
            PersistenceMode::Cloud => self.cloud.fetch_notes()?,
        };
        sort_notes_for_display(&mut notes);
        Ok(notes)
    }

    pub fn save_note(&self, note: QuickNote) -> AppResult<()> {
        match self.mode() {
            PersistenceMode::Local => self.local.save_quick_note(note).map(|_| ()),
            PersistenceMode::Cloud => self.cloud.save_note(&note).map(|_| ()),
        }
    }

    pub fn delete_note(&self, id: &str) -> AppResult<()> {
        match self.mode() {
            PersistenceMode::Local => self.local.delete_quick_note(id),
            PersistenceMode::Cloud => self.cloud.delete_note(id),
        }
    }

    // ==================== Bilder (alltid lokalt) ====================

    /// Galleriordning, vecka stigande
    pub fn get_bump_photos(&self) -> AppResult<Vec<BumpPhoto>> {
        let mut photos = self.local.get_bump_photos()?;
        sort_photos_for_gallery(&mut photos);
        Ok(photos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use crate::utils::AppError;
    use chrono::Duration;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn selector() -> PersistenceSelector {
        PersistenceSelector::new(
            LocalStore::in_memory(),
            CloudStore::new(Database::open_in_memory().unwrap()),
        )
    }

    fn user(id: &str) -> Option<Identity> {
        Some(Identity::new(id, Some(format!("{}@example.com", id))))
    }

    #[test]
    fn test_local_mode_without_identity() {
        let mut sel = selector();
        assert_eq!(sel.mode(), PersistenceMode::Local);

        let profile = sel.setup_profile(date(2024, 1, 1), None).unwrap();
        assert_eq!(profile.name, "Mama");
        assert_eq!(profile.due(), date(2024, 10, 7));
        assert!(sel.local().get_profile().unwrap().is_some());

        let ga = sel.gestational_age(date(2024, 1, 15)).unwrap().unwrap();
        assert_eq!(ga.weeks, 2);
        assert_eq!(ga.days, 0);
    }

    #[test]
    fn test_migration_copies_profile_only() {
        let mut sel = selector();
        sel.setup_profile(date(2024, 1, 1), Some("Amina")).unwrap();
        sel.save_note(QuickNote::new("bara lokalt")).unwrap();

        let outcome = sel.set_identity(user("u1")).unwrap();
        assert_eq!(outcome, MigrationOutcome::Migrated);
        assert_eq!(sel.mode(), PersistenceMode::Cloud);

        let cloud_profile = sel.get_profile().unwrap().unwrap();
        assert_eq!(cloud_profile.name, "Amina");
        assert_eq!(cloud_profile.lmp(), date(2024, 1, 1));

        // Anteckningen följer inte med
        assert!(sel.get_notes().unwrap().is_empty());
        assert_eq!(sel.local().get_quick_notes().unwrap().len(), 1);
    }

    #[test]
    fn test_no_migration_when_cloud_profile_exists() {
        let mut sel = selector();
        sel.set_identity(user("u1")).unwrap();
        sel.setup_profile_with_due_date(date(2024, 12, 25), Some("Moln")).unwrap();
        sel.set_identity(None).unwrap();

        sel.setup_profile(date(2024, 1, 1), Some("Lokal")).unwrap();
        let outcome = sel.set_identity(user("u1")).unwrap();

        assert_eq!(outcome, MigrationOutcome::Skipped);
        assert_eq!(sel.get_profile().unwrap().unwrap().name, "Moln");
    }

    #[test]
    fn test_migration_runs_once_per_user() {
        let mut sel = selector();
        sel.setup_profile(date(2024, 1, 1), Some("Amina")).unwrap();

        assert_eq!(sel.set_identity(user("u1")).unwrap(), MigrationOutcome::Migrated);
        sel.reset_profile().unwrap();

        sel.set_identity(None).unwrap();
        assert_eq!(sel.set_identity(user("u1")).unwrap(), MigrationOutcome::Skipped);
        assert!(sel.get_profile().unwrap().is_none());
    }

    #[test]
    fn test_migrated_users_carry_over_sessions() {
        let mut sel = selector().with_migrated_users(["u1"]);
        sel.setup_profile(date(2024, 1, 1), None).unwrap();

        assert_eq!(sel.set_identity(user("u1")).unwrap(), MigrationOutcome::Skipped);
        assert!(sel.get_profile().unwrap().is_none());

        sel.set_identity(None).unwrap();
        assert_eq!(sel.set_identity(user("u2")).unwrap(), MigrationOutcome::Migrated);
        assert_eq!(sel.migrated_users(), vec!["u1", "u2"]);
    }

    #[test]
    fn test_second_user_on_same_device_gets_profile() {
        let mut sel = selector();
        let local = sel.setup_profile(date(2024, 1, 1), Some("Amina")).unwrap();

        assert_eq!(sel.set_identity(user("u1")).unwrap(), MigrationOutcome::Migrated);
        sel.set_identity(None).unwrap();
        assert_eq!(sel.set_identity(user("u2")).unwrap(), MigrationOutcome::Migrated);

        let second = sel.get_profile().unwrap().unwrap();
        assert_eq!(second.lmp(), date(2024, 1, 1));
        assert_ne!(second.id, local.id);

        sel.set_identity(None).unwrap();
        sel.set_identity(user("u1")).unwrap();
        assert_eq!(sel.get_profile().unwrap().unwrap().id, local.id);
    }

    #[test]
    fn test_sign_out_returns_to_local_data() {
        let mut sel = selector();
        sel.save_note(QuickNote::new("lokal")).unwrap();

        sel.set_identity(user("u1")).unwrap();
        sel.save_note(QuickNote::new("moln")).unwrap();
        assert_eq!(sel.get_notes().unwrap()[0].content, "moln");

        sel.set_identity(None).unwrap();
        assert_eq!(sel.mode(), PersistenceMode::Local);
        assert_eq!(*sel.profile_query(), ProfileQuery::Idle);

        let notes = sel.get_notes().unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].content, "lokal");
    }

    #[test]
    fn test_notes_sorted_pinned_first() {
        let sel = selector();
        let mut old = QuickNote::new("gammal men fäst").pinned(true);
        old.created_at = Utc::now() - Duration::days(3);
        sel.save_note(old).unwrap();
        sel.save_note(QuickNote::new("ny")).unwrap();

        let contents: Vec<String> = sel
            .get_notes()
            .unwrap()
            .into_iter()
            .map(|n| n.content)
            .collect();
        assert_eq!(contents, vec!["gammal men fäst", "ny"]);
    }

    #[test]
    fn test_upcoming_appointments_in_cloud_mode() {
        let mut sel = selector();
        sel.set_identity(user("u1")).unwrap();
        let now = Utc::now();

        sel.save_appointment(Appointment::new("Passerad", now - Duration::days(1)))
            .unwrap();
        sel.save_appointment(Appointment::new("Senare", now + Duration::days(10)))
            .unwrap();
        sel.save_appointment(Appointment::new("Snart", now + Duration::days(1)))
            .unwrap();

        let titles: Vec<String> = sel
            .get_upcoming_appointments(now)
            .unwrap()
            .into_iter()
            .map(|a| a.title)
            .collect();
        assert_eq!(titles, vec!["Snart", "Senare"]);
    }

    #[test]
    fn test_validation_rejected_in_both_modes() {
        let mut sel = selector();
        let bad = Appointment::new("", Utc::now());
        assert!(matches!(sel.save_appointment(bad.clone()), Err(AppError::Validation(_))));

        sel.set_identity(user("u1")).unwrap();
        assert!(matches!(sel.save_appointment(bad), Err(AppError::Validation(_))));
        assert!(sel.get_appointments().unwrap().is_empty());
    }

    #[test]
    fn test_days_remaining_without_profile() {
        let sel = selector();
        assert!(sel.days_remaining(date(2024, 1, 1)).unwrap().is_none());
    }
}
