use std::sync::{Arc, Mutex};

use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::models::PregnancyProfile;
use crate::pregnancy::calculator::calculate_lmp_from_due_date;
use crate::utils::date::anchor_instant;
use crate::utils::new_id;

use super::lock;

/// Repository för graviditetsprofiler. Bara namn och BF sparas,
/// LMP räknas fram vid läsning.
pub struct ProfileRepository {
    conn: Arc<Mutex<Connection>>,
}

impl ProfileRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// Hämta användarens profil
    pub fn find_by_user(&self, user_id: &str) -> Result<Option<PregnancyProfile>> {
        let conn = lock(&self.conn)?;
        let profile = conn
            .query_row(
                "SELECT id, name, due_date, created_at FROM profiles WHERE user_id = ?",
                [user_id],
                Self::row_to_profile,
            )
            .optional()?;

        Ok(profile)
    }

    /// Skapa eller ersätt användarens profil (en per användare).
    /// Ägs ID:t redan av en annan användare får raden ett nytt ID.
    pub fn upsert(&self, user_id: &str, profile: &PregnancyProfile) -> Result<PregnancyProfile> {
        {
            let conn = lock(&self.conn)?;

            let owner: Option<String> = conn
                .query_row(
                    "SELECT user_id FROM profiles WHERE id = ?",
                    [&profile.id],
                    |row| row.get(0),
                )
                .optional()?;
            let id = match owner {
                Some(owner) if owner != user_id => new_id(),
                _ => profile.id.clone(),
            };

            conn.execute(
                "INSERT INTO profiles (id, user_id, name, due_date, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                 ON CONFLICT(user_id) DO UPDATE SET
                    name = excluded.name,
                    due_date = excluded.due_date,
                    updated_at = excluded.updated_at",
                params![
                    id,
                    user_id,
                    profile.name,
                    profile.due(),
                    profile.created_at,
                    Utc::now(),
                ],
            )?;
        }

        self.find_by_user(user_id)?
            .ok_or_else(|| anyhow::anyhow!("Profilen för {} sparades inte", user_id))
    }

    /// Ta bort användarens profil
    pub fn delete_by_user(&self, user_id: &str) -> Result<bool> {
        let conn = lock(&self.conn)?;
        let rows = conn.execute("DELETE FROM profiles WHERE user_id = ?", [user_id])?;
        Ok(rows > 0)
    }

    fn row_to_profile(row: &Row) -> rusqlite::Result<PregnancyProfile> {
        let due: NaiveDate = row.get(2)?;
        let created_at: DateTime<Utc> = row.get(3)?;

        Ok(PregnancyProfile {
            id: row.get(0)?,
            name: row.get(1)?,
            lmp_date: anchor_instant(calculate_lmp_from_due_date(due)),
            due_date: anchor_instant(due),
            created_at,
        })
    }
}
