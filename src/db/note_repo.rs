use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::models::QuickNote;
use crate::utils::{new_id, AppError};

use super::lock;

/// Repository för snabbanteckningar
pub struct NoteRepository {
    conn: Arc<Mutex<Connection>>,
}

impl NoteRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// Alla anteckningar, nyast skapade först
    pub fn list_by_user(&self, user_id: &str) -> Result<Vec<QuickNote>> {
        let conn = lock(&self.conn)?;
        let mut stmt = conn.prepare(
            "SELECT id, content, pinned, created_at, updated_at
             FROM quick_notes
             WHERE user_id = ?
             ORDER BY created_at DESC",
        )?;

        let notes = stmt
            .query_map([user_id], Self::row_to_note)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(notes)
    }

    pub fn find_by_id(&self, user_id: &str, id: &str) -> Result<Option<QuickNote>> {
        let conn = lock(&self.conn)?;
        let note = conn
            .query_row(
                "SELECT id, content, pinned, created_at, updated_at
                 FROM quick_notes
                 WHERE id = ?1 AND user_id = ?2",
                params![id, user_id],
                Self::row_to_note,
            )
            .optional()?;

        Ok(note)
    }

    /// Skapa eller uppdatera anteckning. Tomt ID ger ett nytt.
    pub fn upsert(&self, user_id: &str, note: &QuickNote) -> Result<QuickNote> {
        let id = if note.id.is_empty() { new_id() } else { note.id.clone() };

        {
            let conn = lock(&self.conn)?;
            let rows = conn.execute(
                "INSERT INTO quick_notes (id, user_id, content, pinned, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                 ON CONFLICT(id) DO UPDATE SET
                    content = excluded.content,
                    pinned = excluded.pinned,
                    updated_at = excluded.updated_at
                 WHERE quick_notes.user_id = excluded.user_id",
                params![id, user_id, note.content, note.pinned, note.created_at, Utc::now()],
            )?;

            // Raden finns men tillhör en annan användare
            if rows == 0 {
                return Err(AppError::not_found(format!("Anteckning {}", id)).into());
            }
        }

        self.find_by_id(user_id, &id)?
            .ok_or_else(|| anyhow!("Anteckning {} hittades inte", id))
    }

    pub fn delete(&self, user_id: &str, id: &str) -> Result<bool> {
        let conn = lock(&self.conn)?;
        let rows = conn.execute(
            "DELETE FROM quick_notes WHERE id = ?1 AND user_id = ?2",
            params![id, user_id],
        )?;
        Ok(rows > 0)
    }

    fn row_to_note(row: &Row) -> rusqlite::Result<QuickNote> {
        Ok(QuickNote {
            id: row.get(0)?,
            content: row.get(1)?,
            pinned: row.get(2)?,
            created_at: row.get(3)?,
            updated_at: row.get(4)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;

    #[test]
    fn test_create_pin_and_delete() {
        let db = Database::open_in_memory().unwrap();
        let repo = db.notes();

        let saved = repo.upsert("u1", &QuickNote::new("fråga om järn")).unwrap();
        assert!(!saved.pinned);

        let pinned = repo.upsert("u1", &saved.clone().pinned(true)).unwrap();
        assert!(pinned.pinned);
        assert_eq!(pinned.id, saved.id);

        assert!(repo.list_by_user("u2").unwrap().is_empty());
        assert!(repo.delete("u1", &saved.id).unwrap());
        assert!(repo.list_by_user("u1").unwrap().is_empty());
    }

    #[test]
    fn test_note_owned_by_other_user_is_not_found() {
        let db = Database::open_in_memory().unwrap();
        let repo = db.notes();

        let saved = repo.upsert("u1", &QuickNote::new("min")).unwrap();
        let err = repo.upsert("u2", &saved.clone().pinned(true)).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<AppError>(),
            Some(AppError::NotFound(_))
        ));
        assert!(!repo.find_by_id("u1", &saved.id).unwrap().unwrap().pinned);
    }
}
