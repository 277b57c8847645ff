use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::new_id;

/// Snabbanteckning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickNote {
    pub id: String,
    pub content: String,
    #[serde(default)]
    pub pinned: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl QuickNote {
    pub fn new(content: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: new_id(),
            content: content.into(),
            pinned: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn pinned(mut self, pinned: bool) -> Self {
        self.pinned = pinned;
        self
    }

    pub fn validate(&self) -> Result<(), NoteValidationError> {
        if self.content.trim().is_empty() {
            return Err(NoteValidationError::Empty);
        }
        Ok(())
    }
}

/// Visningsordning: fästa först, sedan nyast först
pub fn sort_notes_for_display(notes: &mut [QuickNote]) {
    notes.sort_by(|a, b| {
        b.pinned
            .cmp(&a.pinned)
            .then_with(|| b.created_at.cmp(&a.created_at))
    });
}

#[derive(Debug, thiserror::Error)]
pub enum NoteValidationError {
    #[error("Anteckningen är tom")]
    Empty,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_display_order() {
        let base = Utc::now();
        let mut old = QuickNote::new("gammal");
        old.created_at = base - Duration::hours(3);
        let mut new = QuickNote::new("ny");
        new.created_at = base;
        let mut pinned_old = QuickNote::new("fäst").pinned(true);
        pinned_old.created_at = base - Duration::days(5);

        let mut notes = vec![old, new, pinned_old];
        sort_notes_for_display(&mut notes);

        let order: Vec<&str> = notes.iter().map(|n| n.content.as_str()).collect();
        assert_eq!(order, vec!["fäst", "ny", "gammal"]);
    }
}
