use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::models::Appointment;
use crate::utils::{new_id, AppError};

use super::lock;

/// Repository för tider
pub struct AppointmentRepository {
    conn: Arc<Mutex<Connection>>,
}

impl AppointmentRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// Alla tider, tidigast först
    pub fn list_by_user(&self, user_id: &str) -> Result<Vec<Appointment>> {
        let conn = lock(&self.conn)?;
        let mut stmt = conn.prepare(
            "SELECT id, title, datetime, location, provider, notes, created_at
             FROM appointments
             WHERE user_id = ?
             ORDER BY datetime ASC",
        )?;

        let appointments = stmt
            .query_map([user_id], Self::row_to_appointment)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(appointments)
    }

    pub fn find_by_id(&self, user_id: &str, id: &str) -> Result<Option<Appointment>> {
        let conn = lock(&self.conn)?;
        let appointment = conn
            .query_row(
                "SELECT id, title, datetime, location, provider, notes, created_at
                 FROM appointments
                 WHERE id = ?1 AND user_id = ?2",
                params![id, user_id],
                Self::row_to_appointment,
            )
            .optional()?;

        Ok(appointment)
    }

    /// Skapa eller uppdatera tid. Tomt ID ger ett nytt.
    pub fn upsert(&self, user_id: &str, appointment: &Appointment) -> Result<Appointment> {
        let id = if appointment.id.is_empty() {
            new_id()
        } else {
            appointment.id.clone()
        };

        {
            let conn = lock(&self.conn)?;
            let rows = conn.execute(
                "INSERT INTO appointments
                 (id, user_id, title, datetime, location, provider, notes, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                 ON CONFLICT(id) DO UPDATE SET
                    title = excluded.title,
                    datetime = excluded.datetime,
                    location = excluded.location,
                    provider = excluded.provider,
                    notes = excluded.notes
                 WHERE appointments.user_id = excluded.user_id",
                params![
                    id,
                    user_id,
                    appointment.title,
                    appointment.datetime,
                    appointment.location,
                    appointment.provider,
                    appointment.notes,
                    appointment.created_at,
                ],
            )?;

            // Raden finns men tillhör en annan användare
            if rows == 0 {
                return Err(AppError::not_found(format!("Tid {}", id)).into());
            }
        }

        self.find_by_id(user_id, &id)?
            .ok_or_else(|| anyhow!("Tid {} hittades inte", id))
    }

    pub fn delete(&self, user_id: &str, id: &str) -> Result<bool> {
        let conn = lock(&self.conn)?;
        let rows = conn.execute(
            "DELETE FROM appointments WHERE id = ?1 AND user_id = ?2",
            params![id, user_id],
        )?;
        Ok(rows > 0)
    }

    fn row_to_appointment(row: &Row) -> rusqlite::Result<Appointment> {
        Ok(Appointment {
            id: row.get(0)?,
            title: row.get(1)?,
            datetime: row.get(2)?,
            location: row.get(3)?,
            provider: row.get(4)?,
            notes: row.get(5)?,
            created_at: row.get(6)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use chrono::{Duration, Utc};

    fn setup_db() -> Database {
        Database::open_in_memory().unwrap()
    }

    #[test]
    fn test_list_ordered_by_datetime() {
        let db = setup_db();
        let repo = db.appointments();
        let now = Utc::now();

        repo.upsert("u1", &Appointment::new("Tillväxt", now + Duration::days(30)))
            .unwrap();
        repo.upsert("u1", &Appointment::new("Blodprov", now + Duration::days(2)))
            .unwrap();
        repo.upsert("u2", &Appointment::new("Annan", now)).unwrap();

        let titles: Vec<String> = repo
            .list_by_user("u1")
            .unwrap()
            .into_iter()
            .map(|a| a.title)
            .collect();
        assert_eq!(titles, vec!["Blodprov", "Tillväxt"]);
    }

    #[test]
    fn test_update_keeps_id() {
        let db = setup_db();
        let repo = db.appointments();

        let mut appointment = Appointment::new("Barnmorska", Utc::now());
        appointment.location = Some("MVC".into());
        let saved = repo.upsert("u1", &appointment).unwrap();

        let mut moved = saved.clone();
        moved.datetime = saved.datetime + Duration::hours(1);
        repo.upsert("u1", &moved).unwrap();

        let all = repo.list_by_user("u1").unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].location.as_deref(), Some("MVC"));
        assert!(repo.delete("u1", &saved.id).unwrap());
    }
}
