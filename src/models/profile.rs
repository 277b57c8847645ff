use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::pregnancy::calculator::{
    calculate_due_date_from_lmp, calculate_gestational_age, calculate_lmp_from_due_date,
    get_days_remaining, GestationalAge,
};
use crate::utils::date::{anchor_instant, start_of_day};
use crate::utils::new_id;

/// Graviditetsprofil. Högst en per användare/enhet, ersätts alltid i sin helhet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PregnancyProfile {
    pub id: String,
    pub name: String,
    pub lmp_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl PregnancyProfile {
    /// Skapa profil från sista mensens första dag. BF = LMP + 280 dagar.
    pub fn from_lmp(name: impl Into<String>, lmp: NaiveDate) -> Self {
        Self {
            id: new_id(),
            name: name.into(),
            lmp_date: anchor_instant(lmp),
            due_date: anchor_instant(calculate_due_date_from_lmp(lmp)),
            created_at: Utc::now(),
        }
    }

    /// Skapa profil från känt BF. LMP = BF − 280 dagar.
    pub fn from_due_date(name: impl Into<String>, due: NaiveDate) -> Self {
        Self::from_lmp(name, calculate_lmp_from_due_date(due))
    }

    pub fn lmp(&self) -> NaiveDate {
        start_of_day(self.lmp_date)
    }

    pub fn due(&self) -> NaiveDate {
        start_of_day(self.due_date)
    }

    pub fn gestational_age(&self, today: NaiveDate) -> GestationalAge {
        calculate_gestational_age(self.lmp(), today)
    }

    pub fn days_remaining(&self, today: NaiveDate) -> i64 {
        get_days_remaining(self.due(), today)
    }

    pub fn validate(&self) -> Result<(), ProfileValidationError> {
        if self.name.trim().is_empty() {
            return Err(ProfileValidationError::MissingName);
        }

        if (self.due() - self.lmp()).num_days() != crate::pregnancy::calculator::PREGNANCY_DAYS {
            return Err(ProfileValidationError::InconsistentDueDate);
        }

        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ProfileValidationError {
    #[error("Namn krävs")]
    MissingName,
    #[error("BF måste ligga 280 dagar efter LMP")]
    InconsistentDueDate,
}
