use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::models::JournalEntry;
use crate::utils::{new_id, AppError};

use super::{from_json, lock};

/// Repository för dagboksinlägg
pub struct JournalRepository {
    conn: Arc<Mutex<Connection>>,
}

impl JournalRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// Alla inlägg, nyast skapade först
    pub fn list_by_user(&self, user_id: &str) -> Result<Vec<JournalEntry>> {
        let conn = lock(&self.conn)?;
        let mut stmt = conn.prepare(
            "SELECT id, date, title, content, tags, created_at, updated_at
             FROM journal_entries
             WHERE user_id = ?
             ORDER BY created_at DESC",
        )?;

        let entries = stmt
            .query_map([user_id], Self::row_to_entry)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(entries)
    }

    pub fn find_by_id(&self, user_id: &str, id: &str) -> Result<Option<JournalEntry>> {
        let conn = lock(&self.conn)?;
        let entry = conn
            .query_row(
                "SELECT id, date, title, content, tags, created_at, updated_at
                 FROM journal_entries
                 WHERE id = ?1 AND user_id = ?2",
                params![id, user_id],
                Self::row_to_entry,
            )
            .optional()?;

        Ok(entry)
    }

    /// Skapa eller uppdatera inlägg. Tomt ID ger ett nytt.
    pub fn upsert(&self, user_id: &str, entry: &JournalEntry) -> Result<JournalEntry> {
        let id = if entry.id.is_empty() { new_id() } else { entry.id.clone() };
        let tags = serde_json::to_string(&entry.tags)?;

        {
            let conn = lock(&self.conn)?;
            let rows = conn.execute(
                "INSERT INTO journal_entries
                 (id, user_id, date, title, content, tags, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                 ON CONFLICT(id) DO UPDATE SET
                    date = excluded.date,
                    title = excluded.title,
                    content = excluded.content,
                    tags = excluded.tags,
                    updated_at = excluded.updated_at
                 WHERE journal_entries.user_id = excluded.user_id",
                params![
                    id,
                    user_id,
                    entry.date,
                    entry.title,
                    entry.content,
                    tags,
                    entry.created_at,
                    Utc::now(),
                ],
            )?;

            // Raden finns men tillhör en annan användare
            if rows == 0 {
                return Err(AppError::not_found(format!("Dagboksinlägg {}", id)).into());
            }
        }

        self.find_by_id(user_id, &id)?
            .ok_or_else(|| anyhow!("Dagboksinlägg {} hittades inte", id))
    }

    pub fn delete(&self, user_id: &str, id: &str) -> Result<bool> {
        let conn = lock(&self.conn)?;
        let rows = conn.execute(
            "DELETE FROM journal_entries WHERE id = ?1 AND user_id = ?2",
            params![id, user_id],
        )?;
        Ok(rows > 0)
    }

    fn row_to_entry(row: &Row) -> rusqlite::Result<JournalEntry> {
        let tags: String = row.get(4)?;

        Ok(JournalEntry {
            id: row.get(0)?,
            date: row.get(1)?,
            title: row.get(2)?,
            content: row.get(3)?,
            tags: from_json(&tags)?,
            created_at: row.get(5)?,
            updated_at: row.get(6)?,
        })
    }
}
