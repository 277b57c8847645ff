//! Graviditetsberäkningar utifrån sista mensens första dag (LMP)
//!
//! Alla beräkningar görs på kalenderdagar, så två anrop samma dag ger
//! alltid samma resultat oavsett klockslag.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::utils::date::start_of_day;

/// Graviditetens längd enligt Naegeles regel
pub const PREGNANCY_DAYS: i64 = 280;
/// Sista dagen i första trimestern (vecka 13)
pub const TRIMESTER_1_END: i64 = 91;
/// Sista dagen i andra trimestern (vecka 27)
pub const TRIMESTER_2_END: i64 = 189;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Trimester {
    First,
    Second,
    Third,
}

impl Trimester {
    pub fn from_total_days(total_days: i64) -> Self {
        if total_days <= TRIMESTER_1_END {
            Self::First
        } else if total_days <= TRIMESTER_2_END {
            Self::Second
        } else {
            Self::Third
        }
    }

    pub fn number(&self) -> u8 {
        match self {
            Self::First => 1,
            Self::Second => 2,
            Self::Third => 3,
        }
    }

    pub fn from_number(value: u8) -> Option<Self> {
        match value {
            1 => Some(Self::First),
            2 => Some(Self::Second),
            3 => Some(Self::Third),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::First => "First Trimester",
            Self::Second => "Second Trimester",
            Self::Third => "Third Trimester",
        }
    }

    pub fn all() -> &'static [Self] {
        &[Self::First, Self::Second, Self::Third]
    }
}

impl fmt::Display for Trimester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Härledd graviditetsålder. Sparas aldrig.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GestationalAge {
    pub weeks: i64,
    pub days: i64,
    pub total_days: i64,
    pub trimester: Trimester,
    /// Procent av 280 dagar, 0..=100
    pub progress: f64,
}

impl GestationalAge {
    pub fn trimester_name(&self) -> &'static str {
        self.trimester.display_name()
    }
}

impl fmt::Display for GestationalAge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_gestational_age(self))
    }
}

/// Beräknat förlossningsdatum: LMP + 280 dagar
pub fn calculate_due_date_from_lmp(lmp: NaiveDate) -> NaiveDate {
    lmp + Duration::days(PREGNANCY_DAYS)
}

/// LMP härlett från förlossningsdatum: BF − 280 dagar
pub fn calculate_lmp_from_due_date(due: NaiveDate) -> NaiveDate {
    due - Duration::days(PREGNANCY_DAYS)
}

/// Graviditetsålder på en given kalenderdag.
///
/// Misslyckas aldrig. Ligger `lmp` i framtiden blir `total_days`, `weeks` och
/// `days` negativa, endast `progress` klampas. `days` har samma tecken som `total_days`.
pub fn calculate_gestational_age(lmp: NaiveDate, now: NaiveDate) -> GestationalAge {
    let total_days = (now - lmp).num_days();
    let progress = (total_days as f64 / PREGNANCY_DAYS as f64 * 100.0).clamp(0.0, 100.0);

    GestationalAge {
        weeks: total_days.div_euclid(7),
        days: total_days % 7,
        total_days,
        trimester: Trimester::from_total_days(total_days),
        progress,
    }
}

/// Graviditetsålder för två tidpunkter, normaliserade till dygnets början
pub fn gestational_age_at(lmp: DateTime<Utc>, now: DateTime<Utc>) -> GestationalAge {
    calculate_gestational_age(start_of_day(lmp), start_of_day(now))
}

/// Dagar kvar till BF, aldrig negativt
pub fn get_days_remaining(due: NaiveDate, now: NaiveDate) -> i64 {
    (due - now).num_days().max(0)
}

/// "12 weeks, 3 days"
pub fn format_gestational_age(ga: &GestationalAge) -> String {
    format!(
        "{} weeks, {} day{}",
        ga.weeks,
        ga.days,
        if ga.days == 1 { "" } else { "s" }
    )
}
