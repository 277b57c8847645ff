//! Dagens checklista: fördefinierad dagsplan plus egna uppgifter.
//!
//! Avbockning uppdateras direkt i minnet och rullas tillbaka om
//! molnskrivningen misslyckas.

use std::collections::HashMap;

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::models::{
    ChecklistItem, CustomTask, TaskCategory, TaskStats, TaskStatus, DAILY_CARE_PLAN,
};
use crate::utils::{AppError, AppResult};

use super::cloud_store::CloudStore;

/// Meddelande när någon försöker bocka av utan att vara inloggad
pub const SIGN_IN_TO_TRACK_TASKS: &str = "Please sign in to track tasks";

/// Det dagsplanen behöver av molnet
pub trait TaskRemote {
    fn is_authenticated(&self) -> bool;
    fn fetch_task_statuses(&self, date: NaiveDate) -> AppResult<Vec<TaskStatus>>;
    fn save_task_status(&self, date: NaiveDate, status: &TaskStatus) -> AppResult<()>;
    fn fetch_custom_tasks(&self) -> AppResult<Vec<CustomTask>>;
    fn save_custom_task(&self, task: &CustomTask) -> AppResult<CustomTask>;
    fn delete_custom_task(&self, id: &str) -> AppResult<()>;
}

impl TaskRemote for CloudStore {
    fn is_authenticated(&self) -> bool {
        CloudStore::is_authenticated(self)
    }

    fn fetch_task_statuses(&self, date: NaiveDate) -> AppResult<Vec<TaskStatus>> {
        CloudStore::fetch_task_statuses(self, date)
    }

    fn save_task_status(&self, date: NaiveDate, status: &TaskStatus) -> AppResult<()> {
        CloudStore::save_task_status(self, date, status)
    }

    fn fetch_custom_tasks(&self) -> AppResult<Vec<CustomTask>> {
        CloudStore::fetch_custom_tasks(self)
    }

    fn save_custom_task(&self, task: &CustomTask) -> AppResult<CustomTask> {
        CloudStore::save_custom_task(self, task)
    }

    fn delete_custom_task(&self, id: &str) -> AppResult<()> {
        CloudStore::delete_custom_task(self, id)
    }
}

/// Checklista för ett datum
pub struct TaskService<'a, R: TaskRemote + ?Sized> {
    remote: &'a R,
    date: NaiveDate,
    statuses: HashMap<String, TaskStatus>,
    custom: Vec<CustomTask>,
}

impl<'a, R: TaskRemote + ?Sized> TaskService<'a, R> {
    /// Läs dagens avbockningar och egna uppgifter. Utan inloggning blir
    /// listan bara dagsplanen, utan avbockningar.
    pub fn load(remote: &'a R, date: NaiveDate) -> AppResult<Self> {
        let statuses = remote
            .fetch_task_statuses(date)?
            .into_iter()
            .map(|s| (s.task_id.clone(), s))
            .collect();
        let custom = remote.fetch_custom_tasks()?;

        Ok(Self {
            remote,
            date,
            statuses,
            custom,
        })
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn custom_tasks(&self) -> &[CustomTask] {
        &self.custom
    }

    pub fn is_completed(&self, task_id: &str) -> bool {
        self.statuses.get(task_id).is_some_and(|s| s.completed)
    }

    fn is_known_task(&self, task_id: &str) -> bool {
        DAILY_CARE_PLAN.iter().any(|t| t.id == task_id)
            || self.custom.iter().any(|t| t.task_id() == task_id)
    }

    /// Alla rader: dagsplanen först, sedan egna uppgifter
    pub fn items(&self) -> Vec<ChecklistItem> {
        let predefined = DAILY_CARE_PLAN.iter().map(|t| ChecklistItem {
            task_id: t.id.to_string(),
            text: t.text.to_string(),
            category: t.category,
            note: t.note.map(str::to_string),
            completed: self.is_completed(t.id),
            is_custom: false,
        });

        let custom = self.custom.iter().map(|t| {
            let task_id = t.task_id();
            ChecklistItem {
                completed: self.is_completed(&task_id),
                task_id,
                text: t.text.clone(),
                category: t.category,
                note: t.note.clone(),
                is_custom: true,
            }
        });

        predefined.chain(custom).collect()
    }

    /// Rader grupperade per tid på dagen, tomma grupper utelämnas
    pub fn items_by_category(&self) -> Vec<(TaskCategory, Vec<ChecklistItem>)> {
        let items = self.items();
        TaskCategory::all()
            .iter()
            .map(|category| {
                let group: Vec<ChecklistItem> = items
                    .iter()
                    .filter(|i| i.category == *category)
                    .cloned()
                    .collect();
                (*category, group)
            })
            .filter(|(_, group)| !group.is_empty())
            .collect()
    }

    pub fn stats(&self) -> TaskStats {
        TaskStats::from_items(&self.items())
    }

    /// Växla avbockning. Returnerar nytt läge.
    pub fn toggle(&mut self, task_id: &str) -> AppResult<bool> {
        if !self.remote.is_authenticated() {
            return Err(AppError::NotAuthenticated);
        }
        if !self.is_known_task(task_id) {
            return Err(AppError::not_found(format!("Uppgift {}", task_id)));
        }

        let previous = self.statuses.get(task_id).cloned();
        let status = TaskStatus::new(task_id, !self.is_completed(task_id));
        let completed = status.completed;
        self.statuses.insert(task_id.to_string(), status.clone());

        if let Err(e) = self.remote.save_task_status(self.date, &status) {
            warn!("Avbockning av {} misslyckades, återställer: {}", task_id, e);
            match previous {
                Some(prev) => self.statuses.insert(task_id.to_string(), prev),
                None => self.statuses.remove(task_id),
            };
            return Err(e);
        }

        debug!("{} -> {}", task_id, completed);
        Ok(completed)
    }

    pub fn add_custom_task(
        &mut self,
        text: &str,
        category: TaskCategory,
        note: Option<String>,
    ) -> AppResult<CustomTask> {
        if !self.remote.is_authenticated() {
            return Err(AppError::NotAuthenticated);
        }

        let mut task = CustomTask::new(text.trim(), category);
        task.note = note.filter(|n| !n.trim().is_empty());

        let saved = self.remote.save_custom_task(&task)?;
        self.custom.push(saved.clone());
        Ok(saved)
    }

    pub fn update_custom_task(&mut self, task: &CustomTask) -> AppResult<CustomTask> {
        if !self.custom.iter().any(|t| t.id == task.id) {
            return Err(AppError::not_found(format!("Uppgift {}", task.id)));
        }

        let saved = self.remote.save_custom_task(task)?;
        if let Some(existing) = self.custom.iter_mut().find(|t| t.id == saved.id) {
            *existing = saved.clone();
        }
        Ok(saved)
    }

    pub fn delete_custom_task(&mut self, id: &str) -> AppResult<()> {
        self.remote.delete_custom_task(id)?;
        self.custom.retain(|t| t.id != id);
        self.statuses.remove(&format!("custom-{}", id));
        Ok(())
    }
}
