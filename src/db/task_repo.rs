use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use chrono::{NaiveDate, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::models::{CustomTask, TaskCategory, TaskStatus};
use crate::utils::{new_id, AppError};

use super::lock;

/// Repository för dagsplanen: avbockningar per dag och egna uppgifter
pub struct TaskRepository {
    conn: Arc<Mutex<Connection>>,
}

impl TaskRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    // ==================== Avbockningar ====================

    /// Alla avbockningar för ett datum
    pub fn statuses_for_date(&self, user_id: &str, date: NaiveDate) -> Result<Vec<TaskStatus>> {
        let conn = lock(&self.conn)?;
        let mut stmt = conn.prepare(
            "SELECT task_id, completed, completed_at
             FROM daily_tasks
             WHERE user_id = ?1 AND date = ?2
             ORDER BY task_id",
        )?;

        let statuses = stmt
            .query_map(params![user_id, date], Self::row_to_status)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(statuses)
    }

    /// Sätt status för en uppgift, en rad per (användare, datum, uppgift)
    pub fn upsert_status(&self, user_id: &str, date: NaiveDate, status: &TaskStatus) -> Result<()> {
        let completed_at = if status.completed {
            Some(status.completed_at.unwrap_or_else(Utc::now))
        } else {
            None
        };

        let conn = lock(&self.conn)?;
        conn.execute(
            "INSERT INTO daily_tasks (id, user_id, date, task_id, completed, completed_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             ON CONFLICT(user_id, date, task_id) DO UPDATE SET
                completed = excluded.completed,
                completed_at = excluded.completed_at",
            params![new_id(), user_id, date, status.task_id, status.completed, completed_at],
        )?;

        Ok(())
    }

    fn row_to_status(row: &Row) -> rusqlite::Result<TaskStatus> {
        Ok(TaskStatus {
            task_id: row.get(0)?,
            completed: row.get(1)?,
            completed_at: row.get(2)?,
        })
    }

    // ==================== Egna uppgifter ====================

    pub fn list_custom(&self, user_id: &str) -> Result<Vec<CustomTask>> {
        let conn = lock(&self.conn)?;
        let mut stmt = conn.prepare(
            "SELECT id, text, category, note, icon, created_at, updated_at
             FROM custom_tasks
             WHERE user_id = ?
             ORDER BY created_at ASC",
        )?;

        let tasks = stmt
            .query_map([user_id], Self::row_to_custom)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(tasks)
    }

    pub fn find_custom(&self, user_id: &str, id: &str) -> Result<Option<CustomTask>> {
        let conn = lock(&self.conn)?;
        let task = conn
            .query_row(
                "SELECT id, text, category, note, icon, created_at, updated_at
                 FROM custom_tasks
                 WHERE id = ?1 AND user_id = ?2",
                params![id, user_id],
                Self::row_to_custom,
            )
            .optional()?;

        Ok(task)
    }

    /// Skapa eller uppdatera egen uppgift. Tomt ID ger ett nytt.
    pub fn upsert_custom(&self, user_id: &str, task: &CustomTask) -> Result<CustomTask> {
        let id = if task.id.is_empty() { new_id() } else { task.id.clone() };

        {
            let conn = lock(&self.conn)?;
            let rows = conn.execute(
                "INSERT INTO custom_tasks
                 (id, user_id, text, category, note, icon, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                 ON CONFLICT(id) DO UPDATE SET
                    text = excluded.text,
                    category = excluded.category,
                    note = excluded.note,
                    icon = excluded.icon,
                    updated_at = excluded.updated_at
                 WHERE custom_tasks.user_id = excluded.user_id",
                params![
                    id,
                    user_id,
                    task.text,
                    task.category.as_str(),
                    task.note,
                    task.icon,
                    task.created_at,
                    Utc::now(),
                ],
            )?;

            // Raden finns men tillhör en annan användare
            if rows == 0 {
                return Err(AppError::not_found(format!("Uppgift {}", id)).into());
            }
        }

        self.find_custom(user_id, &id)?
            .ok_or_else(|| anyhow!("Uppgift {} hittades inte", id))
    }

    /// Ta bort egen uppgift och dess avbockningar
    pub fn delete_custom(&self, user_id: &str, id: &str) -> Result<bool> {
        let conn = lock(&self.conn)?;
        let rows = conn.execute(
            "DELETE FROM custom_tasks WHERE id = ?1 AND user_id = ?2",
            params![id, user_id],
        )?;

        if rows > 0 {
            conn.execute(
                "DELETE FROM daily_tasks WHERE user_id = ?1 AND task_id = ?2",
                params![user_id, format!("custom-{}", id)],
            )?;
        }

        Ok(rows > 0)
    }

    fn row_to_custom(row: &Row) -> rusqlite::Result<CustomTask> {
        let category: String = row.get(2)?;

        Ok(CustomTask {
            id: row.get(0)?,
            text: row.get(1)?,
            category: TaskCategory::from_db_str(&category).unwrap_or_default(),
            note: row.get(3)?,
            icon: row.get(4)?,
            created_at: row.get(5)?,
            updated_at: row.get(6)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;

    fn setup_db() -> Database {
        Database::open_in_memory().unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_status_upsert_per_day() {
        let db = setup_db();
        let repo = db.tasks();
        let day = date(2024, 6, 1);

        repo.upsert_status("u1", day, &TaskStatus::new("morning-water", true))
            .unwrap();
        repo.upsert_status("u1", day, &TaskStatus::new("lunch-walk", true))
            .unwrap();
        repo.upsert_status("u1", day, &TaskStatus::new("morning-water", false))
            .unwrap();

        let statuses = repo.statuses_for_date("u1", day).unwrap();
        assert_eq!(statuses.len(), 2);

        let water = statuses.iter().find(|s| s.task_id == "morning-water").unwrap();
        assert!(!water.completed);
        assert!(water.completed_at.is_none());

        let walk = statuses.iter().find(|s| s.task_id == "lunch-walk").unwrap();
        assert!(walk.completed);
        assert!(walk.completed_at.is_some());

        assert!(repo.statuses_for_date("u1", date(2024, 6, 2)).unwrap().is_empty());
        assert!(repo.statuses_for_date("u2", day).unwrap().is_empty());
    }

    #[test]
    fn test_custom_task_crud() {
        let db = setup_db();
        let repo = db.tasks();

        let mut task = CustomTask::new("Ta järntablett", TaskCategory::Evening);
        task.note = Some("med apelsinjuice".into());
        let saved = repo.upsert_custom("u1", &task).unwrap();
        assert_eq!(saved.category, TaskCategory::Evening);

        let mut moved = saved.clone();
        moved.category = TaskCategory::MidMorning;
        let updated = repo.upsert_custom("u1", &moved).unwrap();
        assert_eq!(updated.id, saved.id);
        assert_eq!(updated.category, TaskCategory::MidMorning);

        assert_eq!(repo.list_custom("u1").unwrap().len(), 1);
        assert!(repo.list_custom("u2").unwrap().is_empty());
    }

    #[test]
    fn test_delete_custom_removes_statuses() {
        let db = setup_db();
        let repo = db.tasks();
        let day = date(2024, 6, 1);

        let saved = repo
            .upsert_custom("u1", &CustomTask::new("Promenad", TaskCategory::Lunch))
            .unwrap();
        repo.upsert_status("u1", day, &TaskStatus::new(saved.task_id(), true))
            .unwrap();

        assert!(repo.delete_custom("u1", &saved.id).unwrap());
        assert!(repo.statuses_for_date("u1", day).unwrap().is_empty());
        assert!(!repo.delete_custom("u1", &saved.id).unwrap());
    }
}
