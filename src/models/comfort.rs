use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComfortCategory {
    Physical,
    Spiritual,
    Emotional,
    Activity,
}

/// Något som hjälper när dagen är tung
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ComfortItem {
    pub id: &'static str,
    pub label: &'static str,
    pub emoji: &'static str,
    pub category: ComfortCategory,
}

const fn item(
    id: &'static str,
    label: &'static str,
    emoji: &'static str,
    category: ComfortCategory,
) -> ComfortItem {
    ComfortItem { id, label, emoji, category }
}

pub const COMFORT_ITEMS: &[ComfortItem] = &[
    item("tea", "Warm tea", "🍵", ComfortCategory::Physical),
    item("shower", "Warm shower", "🚿", ComfortCategory::Physical),
    item("rest", "Lie down", "🛋️", ComfortCategory::Physical),
    item("snack", "Light snack", "🥛", ComfortCategory::Physical),
    item("fresh-air", "Fresh air", "🌿", ComfortCategory::Physical),
    item("walk", "Short walk", "🚶‍♀️", ComfortCategory::Activity),
    item("stretch", "Gentle stretch", "🧘‍♀️", ComfortCategory::Activity),
    item("breathing", "Deep breathing", "💨", ComfortCategory::Activity),
    item("music", "Soft music", "🎵", ComfortCategory::Activity),
    item("reading", "Read a book", "📖", ComfortCategory::Activity),
    item("dua", "Dua/Prayer", "🤲", ComfortCategory::Spiritual),
    item("quran", "Listen to Quran", "📿", ComfortCategory::Spiritual),
    item("dhikr", "Dhikr", "✨", ComfortCategory::Spiritual),
    item("talk", "Talk to someone", "💬", ComfortCategory::Emotional),
    item("journal", "Write it out", "📝", ComfortCategory::Emotional),
    item("cry", "Let it out", "💧", ComfortCategory::Emotional),
    item("alone-time", "Quiet time", "🌙", ComfortCategory::Emotional),
];

/// Favoriter innan användaren valt egna
pub const DEFAULT_COMFORT_PREFERENCES: &[&str] = &["tea", "dua", "breathing", "rest"];

/// Valda favoriter i katalogordning; okända ID:n ignoreras
pub fn preferred_comfort_items(ids: &[String]) -> Vec<&'static ComfortItem> {
    COMFORT_ITEMS
        .iter()
        .filter(|item| ids.iter().any(|id| id == item.id))
        .collect()
}

pub fn is_known_comfort_item(id: &str) -> bool {
    COMFORT_ITEMS.iter().any(|item| item.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preferred_items_follow_catalogue_order() {
        let ids = vec!["dua".to_string(), "tea".to_string(), "unknown".to_string()];
        let items = preferred_comfort_items(&ids);
        let labels: Vec<&str> = items.iter().map(|i| i.label).collect();
        assert_eq!(labels, vec!["Warm tea", "Dua/Prayer"]);
    }

    #[test]
    fn test_defaults_are_known() {
        assert!(DEFAULT_COMFORT_PREFERENCES.iter().all(|id| is_known_comfort_item(id)));
    }
}
