use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::utils::new_id;

/// Tid på dagen som en uppgift hör till
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum TaskCategory {
    #[default]
    Morning,
    MidMorning,
    Lunch,
    Afternoon,
    Evening,
    Night,
}

impl TaskCategory {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Morning => "Morning",
            Self::MidMorning => "Mid-Morning",
            Self::Lunch => "Lunch",
            Self::Afternoon => "Afternoon",
            Self::Evening => "Evening",
            Self::Night => "Night",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Morning => "morning",
            Self::MidMorning => "mid-morning",
            Self::Lunch => "lunch",
            Self::Afternoon => "afternoon",
            Self::Evening => "evening",
            Self::Night => "night",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "morning" => Some(Self::Morning),
            "mid-morning" => Some(Self::MidMorning),
            "lunch" => Some(Self::Lunch),
            "afternoon" => Some(Self::Afternoon),
            "evening" => Some(Self::Evening),
            "night" => Some(Self::Night),
            _ => None,
        }
    }

    pub fn all() -> &'static [Self] {
        &[
            Self::Morning,
            Self::MidMorning,
            Self::Lunch,
            Self::Afternoon,
            Self::Evening,
            Self::Night,
        ]
    }
}

impl fmt::Display for TaskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Fördefinierad uppgift i dagsplanen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DailyTask {
    pub id: &'static str,
    pub text: &'static str,
    pub category: TaskCategory,
    pub icon: &'static str,
    /// Mediciner o.d. som användaren fyller i själv
    pub is_placeholder: bool,
    pub note: Option<&'static str>,
}

const fn task(
    id: &'static str,
    text: &'static str,
    category: TaskCategory,
    icon: &'static str,
) -> DailyTask {
    DailyTask {
        id,
        text,
        category,
        icon,
        is_placeholder: false,
        note: None,
    }
}

const fn with_note(mut t: DailyTask, note: &'static str) -> DailyTask {
    t.note = Some(note);
    t
}

const fn placeholder(mut t: DailyTask) -> DailyTask {
    t.is_placeholder = true;
    t
}

use TaskCategory::*;

pub const DAILY_CARE_PLAN: &[DailyTask] = &[
    task("morning-water", "Water (250–400 ml) right after waking", Morning, "droplet"),
    task(
        "morning-stretch",
        "Light stretch (3–5 min): neck/shoulders/ankles + deep breathing",
        Morning,
        "stretch-horizontal",
    ),
    with_note(
        task("morning-breakfast", "Breakfast (protein + fiber)", Morning, "utensils-crossed"),
        "Examples: eggs, yogurt + oats, dal + roti",
    ),
    placeholder(with_note(
        task("morning-medication", "Medication/Supplements (as prescribed)", Morning, "pill"),
        "Prenatal / Iron / Folic acid / Vitamin D (doctor instructions)",
    )),
    task("morning-fruit", "Fruit #1: banana / apple / orange / guava", Morning, "apple"),
    task(
        "morning-note",
        "Tiny note: \"Good morning. Today: gentle and calm.\"",
        Morning,
        "heart",
    ),
    task("midmorning-water", "Water (400 ml)", MidMorning, "droplet"),
    task(
        "midmorning-snack",
        "Snack: nuts, dates (if ok), yogurt, or biscuits + milk",
        MidMorning,
        "cookie",
    ),
    task("midmorning-checkin", "2-minute check-in: mood + energy", MidMorning, "activity"),
    task("lunch-meal", "Balanced lunch (½ veggies + ¼ protein + ¼ carbs)", Lunch, "salad"),
    task("lunch-water", "Water (250–400 ml)", Lunch, "droplet"),
    task("lunch-fruit", "Fruit #2: seasonal fruit", Lunch, "apple"),
    task("lunch-walk", "10–15 min walk (if comfortable)", Lunch, "footprints"),
    task("afternoon-water", "Water (250 ml)", Afternoon, "droplet"),
    with_note(
        task("afternoon-rest", "Rest/nap (20–40 min)", Afternoon, "bed-double"),
        "Even lying down counts",
    ),
    task(
        "afternoon-comfort",
        "Comfort care: warm shower / feet up / light music / breathing",
        Afternoon,
        "sparkles",
    ),
    task("evening-water", "Water (250–400 ml)", Evening, "droplet"),
    task("evening-dinner", "Dinner (lighter than lunch if preferred)", Evening, "utensils-crossed"),
    placeholder(task(
        "evening-medication",
        "Medication/Supplements (as prescribed)",
        Evening,
        "pill",
    )),
    task(
        "evening-appointment",
        "Appointment prep (if any): add questions for doctor",
        Evening,
        "clock",
    ),
    task("night-water", "Water (small amount if it disturbs sleep)", Night, "droplet"),
    task(
        "night-journal",
        "Journal (1 minute): \"One sweet moment from today…\"",
        Night,
        "book-heart",
    ),
    task(
        "night-winddown",
        "Sleep wind-down: dim lights + no heavy screen time 20 mins",
        Night,
        "smartphone",
    ),
];

/// Dagliga mål som visas ovanför listan
pub const DAILY_TARGETS: &[(&str, &str)] = &[
    ("water", "8–10 cups total"),
    ("fruits", "2 servings/day"),
    ("movement", "10–20 minutes gentle walk"),
    ("checkin", "1 daily log (mood + energy + symptoms)"),
];

pub fn find_daily_task(id: &str) -> Option<&'static DailyTask> {
    DAILY_CARE_PLAN.iter().find(|t| t.id == id)
}

/// Avbockning av en uppgift en viss dag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskStatus {
    pub task_id: String,
    pub completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
}

impl TaskStatus {
    pub fn new(task_id: impl Into<String>, completed: bool) -> Self {
        Self {
            task_id: task_id.into(),
            completed,
            completed_at: completed.then(Utc::now),
        }
    }
}

/// Egen uppgift skapad av användaren
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomTask {
    pub id: String,
    pub text: String,
    pub category: TaskCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CustomTask {
    pub fn new(text: impl Into<String>, category: TaskCategory) -> Self {
        let now = Utc::now();
        Self {
            id: new_id(),
            text: text.into(),
            category,
            note: None,
            icon: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// ID som används för avbockning, skilt från de fördefinierade
    pub fn task_id(&self) -> String {
        format!("custom-{}", self.id)
    }

    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.text.trim().is_empty() {
            return Err(TaskValidationError::MissingText);
        }
        Ok(())
    }
}

/// En rad i dagens checklista
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChecklistItem {
    pub task_id: String,
    pub text: String,
    pub category: TaskCategory,
    pub note: Option<String>,
    pub completed: bool,
    pub is_custom: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
pub struct TaskStats {
    pub completed: usize,
    pub total: usize,
    pub percentage: u32,
}

impl TaskStats {
    pub fn from_items(items: &[ChecklistItem]) -> Self {
        let total = items.len();
        let completed = items.iter().filter(|i| i.completed).count();
        let percentage = if total == 0 {
            0
        } else {
            (completed as f64 / total as f64 * 100.0).round() as u32
        };

        Self { completed, total, percentage }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TaskValidationError {
    #[error("Uppgiften måste ha en text")]
    MissingText,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_care_plan_ids_are_unique() {
        let mut ids: Vec<&str> = DAILY_CARE_PLAN.iter().map(|t| t.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), DAILY_CARE_PLAN.len());
        assert_eq!(DAILY_CARE_PLAN.len(), 23);
    }

    #[test]
    fn test_placeholders() {
        assert!(find_daily_task("morning-medication").unwrap().is_placeholder);
        assert!(find_daily_task("evening-medication").unwrap().is_placeholder);
        assert!(!find_daily_task("lunch-walk").unwrap().is_placeholder);
        assert_eq!(
            find_daily_task("afternoon-rest").unwrap().note,
            Some("Even lying down counts")
        );
    }

    #[test]
    fn test_category_round_trip() {
        for category in TaskCategory::all() {
            assert_eq!(TaskCategory::from_db_str(category.as_str()), Some(*category));
        }
        let json = serde_json::to_string(&TaskCategory::MidMorning).unwrap();
        assert_eq!(json, "\"mid-morning\"");
    }

    #[test]
    fn test_stats_rounding() {
        let item = |completed| ChecklistItem {
            task_id: "x".into(),
            text: "x".into(),
            category: TaskCategory::Morning,
            note: None,
            completed,
            is_custom: false,
        };
        let stats = TaskStats::from_items(&[item(true), item(false), item(false)]);
        assert_eq!(stats.completed, 1);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.percentage, 33);

        assert_eq!(TaskStats::from_items(&[]).percentage, 0);
    }
}
