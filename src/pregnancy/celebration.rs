//! Milstolpar som ska firas när en ny vecka eller trimester börjar

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CelebrationLevel {
    Small,
    Medium,
    Large,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Celebration {
    pub level: CelebrationLevel,
    pub message: Option<String>,
}

impl Celebration {
    fn new(level: CelebrationLevel, message: Option<String>) -> Self {
        Self { level, message }
    }
}

/// Avgör om dagen ska firas.
///
/// `previous_week` är senast firade vecka (`None` om ingen vecka har
/// registrerats än).
pub fn should_celebrate(
    current_week: i64,
    current_day: i64,
    previous_week: Option<i64>,
) -> Option<Celebration> {
    // Trimesterbyten
    if current_week == 13 && current_day == 0 && previous_week == Some(12) {
        return Some(Celebration::new(
            CelebrationLevel::Large,
            Some("Welcome to the Second Trimester!".into()),
        ));
    }
    if current_week == 27 && current_day == 0 && previous_week == Some(26) {
        return Some(Celebration::new(
            CelebrationLevel::Large,
            Some("Welcome to the Third Trimester!".into()),
        ));
    }

    if let Some(previous) = previous_week {
        if current_day == 0 && current_week > previous {
            if current_week % 4 == 0 {
                return Some(Celebration::new(
                    CelebrationLevel::Medium,
                    Some(format!("Week {} milestone!", current_week)),
                ));
            }
            return Some(Celebration::new(CelebrationLevel::Small, None));
        }
    }

    if current_week * 7 + current_day == 100 {
        return Some(Celebration::new(
            CelebrationLevel::Medium,
            Some("🎊 100 days of your journey!".into()),
        ));
    }

    None
}
