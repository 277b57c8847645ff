use std::sync::{Arc, Mutex};

use anyhow::Result;
use chrono::{NaiveDate, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::models::{DailyLog, Rating};
use crate::utils::new_id;

use super::{from_json, lock};

const COLUMNS: &str = "id, date, mood, energy, symptoms, notes, created_at, updated_at";

/// Repository för dagliga incheckningar, unik per (användare, datum)
pub struct DailyLogRepository {
    conn: Arc<Mutex<Connection>>,
}

impl DailyLogRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// Alla incheckningar, senaste datum först
    pub fn list_by_user(&self, user_id: &str) -> Result<Vec<DailyLog>> {
        let conn = lock(&self.conn)?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM daily_logs WHERE user_id = ? ORDER BY date DESC",
            COLUMNS
        ))?;

        let logs = stmt
            .query_map([user_id], Self::row_to_log)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(logs)
    }

    pub fn find_by_date(&self, user_id: &str, date: NaiveDate) -> Result<Option<DailyLog>> {
        let conn = lock(&self.conn)?;
        let log = conn
            .query_row(
                &format!(
                    "SELECT {} FROM daily_logs WHERE user_id = ?1 AND date = ?2",
                    COLUMNS
                ),
                params![user_id, date],
                Self::row_to_log,
            )
            .optional()?;

        Ok(log)
    }

    /// Skapa eller skriv över dagens incheckning
    pub fn upsert(&self, user_id: &str, log: &DailyLog) -> Result<DailyLog> {
        let id = if log.id.is_empty() { new_id() } else { log.id.clone() };
        let mood = log.mood.as_ref().map(serde_json::to_string).transpose()?;
        let energy = log.energy.as_ref().map(serde_json::to_string).transpose()?;
        let symptoms = serde_json::to_string(&log.symptoms)?;

        {
            let conn = lock(&self.conn)?;
            conn.execute(
                "INSERT INTO daily_logs
                 (id, user_id, date, mood, energy, symptoms, notes, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
                 ON CONFLICT(user_id, date) DO UPDATE SET
                    mood = excluded.mood,
                    energy = excluded.energy,
                    symptoms = excluded.symptoms,
                    notes = excluded.notes,
                    updated_at = excluded.updated_at",
                params![
                    id,
                    user_id,
                    log.date,
                    mood,
                    energy,
                    symptoms,
                    log.notes,
                    log.created_at,
                    Utc::now(),
                ],
            )?;
        }

        self.find_by_date(user_id, log.date)?
            .ok_or_else(|| anyhow::anyhow!("Incheckningen för {} sparades inte", log.date))
    }

    pub fn delete(&self, user_id: &str, id: &str) -> Result<bool> {
        let conn = lock(&self.conn)?;
        let rows = conn.execute(
            "DELETE FROM daily_logs WHERE id = ?1 AND user_id = ?2",
            params![id, user_id],
        )?;
        Ok(rows > 0)
    }

    fn row_to_log(row: &Row) -> rusqlite::Result<DailyLog> {
        let mood: Option<String> = row.get(2)?;
        let energy: Option<String> = row.get(3)?;
        let symptoms: String = row.get(4)?;

        Ok(DailyLog {
            id: row.get(0)?,
            date: row.get(1)?,
            mood: mood.as_deref().map(from_json::<Rating>).transpose()?,
            energy: energy.as_deref().map(from_json::<Rating>).transpose()?,
            symptoms: from_json(&symptoms)?,
            notes: row.get(5)?,
            created_at: row.get(6)?,
            updated_at: row.get(7)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use crate::models::SymptomEntry;

    fn setup_db() -> Database {
        Database::open_in_memory().unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_upsert_on_user_and_date() {
        let db = setup_db();
        let repo = db.daily_logs();

        let mut first = DailyLog::new(date(2024, 3, 1));
        first.mood = Rating::mood(2);
        let saved = repo.upsert("u1", &first).unwrap();

        let mut second = DailyLog::new(date(2024, 3, 1));
        second.mood = Rating::mood(5);
        second.symptoms.push(SymptomEntry::new("heartburn", 2));
        let updated = repo.upsert("u1", &second).unwrap();

        assert_eq!(updated.id, saved.id);
        assert_eq!(updated.mood.unwrap().label, "Great");
        assert_eq!(updated.symptoms[0].symptom_id, "heartburn");
        assert_eq!(repo.list_by_user("u1").unwrap().len(), 1);
    }

    #[test]
    fn test_list_is_date_descending_and_scoped() {
        let db = setup_db();
        let repo = db.daily_logs();

        repo.upsert("u1", &DailyLog::new(date(2024, 3, 1))).unwrap();
        repo.upsert("u1", &DailyLog::new(date(2024, 3, 5))).unwrap();
        repo.upsert("u1", &DailyLog::new(date(2024, 3, 3))).unwrap();
        repo.upsert("u2", &DailyLog::new(date(2024, 3, 4))).unwrap();

        let dates: Vec<NaiveDate> = repo
            .list_by_user("u1")
            .unwrap()
            .into_iter()
            .map(|l| l.date)
            .collect();
        assert_eq!(dates, vec![date(2024, 3, 5), date(2024, 3, 3), date(2024, 3, 1)]);
    }

    #[test]
    fn test_missing_id_is_generated() {
        let db = setup_db();
        let repo = db.daily_logs();

        let mut log = DailyLog::new(date(2024, 3, 1));
        log.id = String::new();
        let saved = repo.upsert("u1", &log).unwrap();
        assert!(!saved.id.is_empty());

        assert!(!repo.delete("u2", &saved.id).unwrap());
        assert!(repo.delete("u1", &saved.id).unwrap());
    }
}
