use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::new_id;

/// Dagboksinlägg
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    pub id: String,
    pub date: NaiveDate,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl JournalEntry {
    pub fn new(date: NaiveDate, title: impl Into<String>, content: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: new_id(),
            date,
            title: title.into(),
            content: content.into(),
            tags: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_tags(mut self, tags: impl IntoIterator<Item = String>) -> Self {
        self.tags = tags
            .into_iter()
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();
        self
    }

    pub fn validate(&self) -> Result<(), JournalValidationError> {
        if self.title.trim().is_empty() && self.content.trim().is_empty() {
            return Err(JournalValidationError::Empty);
        }
        Ok(())
    }
}

/// Minne i minnesboken, kopplat till graviditetsvecka
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Memory {
    pub id: String,
    pub date: NaiveDate,
    pub prompt: String,
    pub content: String,
    pub week: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Memory {
    pub fn new(
        date: NaiveDate,
        prompt: impl Into<String>,
        content: impl Into<String>,
        week: i64,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: new_id(),
            date,
            prompt: prompt.into(),
            content: content.into(),
            week,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn validate(&self) -> Result<(), JournalValidationError> {
        if self.content.trim().is_empty() {
            return Err(JournalValidationError::Empty);
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum JournalValidationError {
    #[error("Inlägget är tomt")]
    Empty,
}
