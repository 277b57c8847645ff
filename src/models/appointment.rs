use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::new_id;

/// Läkarbesök eller annan tid. Saknar `updatedAt`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: String,
    pub title: String,
    pub datetime: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Appointment {
    pub fn new(title: impl Into<String>, datetime: DateTime<Utc>) -> Self {
        Self {
            id: new_id(),
            title: title.into(),
            datetime,
            location: None,
            provider: None,
            notes: None,
            created_at: Utc::now(),
        }
    }

    pub fn is_upcoming(&self, now: DateTime<Utc>) -> bool {
        self.datetime >= now
    }

    pub fn validate(&self) -> Result<(), AppointmentValidationError> {
        if self.title.trim().is_empty() {
            return Err(AppointmentValidationError::MissingTitle);
        }
        Ok(())
    }
}

/// Kommande tider (`datetime >= now`), tidigast först
pub fn upcoming_appointments(appointments: &[Appointment], now: DateTime<Utc>) -> Vec<Appointment> {
    let mut upcoming: Vec<Appointment> = appointments
        .iter()
        .filter(|a| a.is_upcoming(now))
        .cloned()
        .collect();
    upcoming.sort_by_key(|a| a.datetime);
    upcoming
}

#[derive(Debug, thiserror::Error)]
pub enum AppointmentValidationError {
    #[error("Titel krävs")]
    MissingTitle,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_validate_requires_title() {
        let appointment = Appointment::new("   ", Utc::now());
        assert!(matches!(
            appointment.validate(),
            Err(AppointmentValidationError::MissingTitle)
        ));
    }

    #[test]
    fn test_upcoming_filters_and_sorts() {
        let now = Utc::now();
        let past = Appointment::new("Blodprov", now - Duration::days(2));
        let later = Appointment::new("Ultraljud", now + Duration::days(10));
        let soon = Appointment::new("Barnmorska", now + Duration::days(1));
        let exactly_now = Appointment::new("Nu", now);

        let upcoming = upcoming_appointments(&[past, later, soon, exactly_now], now);
        let titles: Vec<&str> = upcoming.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["Nu", "Barnmorska", "Ultraljud"]);
    }
}
