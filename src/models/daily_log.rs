use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::pregnancy::guidance::{energy_option, find_symptom, mood_option};
use crate::utils::new_id;

/// Värde på en 1–5-skala med sin etikett
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rating {
    pub value: u8,
    pub label: String,
}

impl Rating {
    pub fn mood(value: u8) -> Option<Self> {
        mood_option(value).map(|m| Self {
            value,
            label: m.label.to_string(),
        })
    }

    pub fn energy(value: u8) -> Option<Self> {
        energy_option(value).map(|e| Self {
            value,
            label: e.label.to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymptomEntry {
    pub symptom_id: String,
    /// 1 = mild, 2 = måttlig, 3 = svår
    pub severity: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl SymptomEntry {
    pub fn new(symptom_id: impl Into<String>, severity: u8) -> Self {
        Self {
            symptom_id: symptom_id.into(),
            severity,
            notes: None,
        }
    }
}

/// Daglig incheckning. Högst en per kalenderdag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyLog {
    pub id: String,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood: Option<Rating>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub energy: Option<Rating>,
    #[serde(default)]
    pub symptoms: Vec<SymptomEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DailyLog {
    pub fn new(date: NaiveDate) -> Self {
        let now = Utc::now();
        Self {
            id: new_id(),
            date,
            mood: None,
            energy: None,
            symptoms: Vec::new(),
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn date_key(&self) -> String {
        crate::utils::date::format_date(self.date)
    }

    pub fn validate(&self) -> Result<(), DailyLogValidationError> {
        if let Some(mood) = &self.mood {
            if mood_option(mood.value).is_none() {
                return Err(DailyLogValidationError::MoodOutOfRange(mood.value));
            }
        }

        if let Some(energy) = &self.energy {
            if energy_option(energy.value).is_none() {
                return Err(DailyLogValidationError::EnergyOutOfRange(energy.value));
            }
        }

        for symptom in &self.symptoms {
            if find_symptom(&symptom.symptom_id).is_none() {
                return Err(DailyLogValidationError::UnknownSymptom(symptom.symptom_id.clone()));
            }
            if !(1..=3).contains(&symptom.severity) {
                return Err(DailyLogValidationError::SeverityOutOfRange(symptom.severity));
            }
        }

        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DailyLogValidationError {
    #[error("Humör måste vara 1–5 (var {0})")]
    MoodOutOfRange(u8),
    #[error("Energi måste vara 1–5 (var {0})")]
    EnergyOutOfRange(u8),
    #[error("Okänt symtom: {0}")]
    UnknownSymptom(String),
    #[error("Svårighetsgrad måste vara 1–3 (var {0})")]
    SeverityOutOfRange(u8),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log() -> DailyLog {
        DailyLog::new(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())
    }

    #[test]
    fn test_rating_labels() {
        assert_eq!(Rating::mood(5).unwrap().label, "Great");
        assert_eq!(Rating::energy(1).unwrap().label, "Exhausted");
        assert!(Rating::mood(0).is_none());
    }

    #[test]
    fn test_validate() {
        let mut entry = log();
        entry.mood = Rating::mood(4);
        entry.symptoms.push(SymptomEntry::new("nausea", 2));
        assert!(entry.validate().is_ok());

        entry.symptoms.push(SymptomEntry::new("nausea", 4));
        assert!(matches!(
            entry.validate(),
            Err(DailyLogValidationError::SeverityOutOfRange(4))
        ));

        let mut entry = log();
        entry.symptoms.push(SymptomEntry::new("hiccups", 1));
        assert!(matches!(entry.validate(), Err(DailyLogValidationError::UnknownSymptom(_))));

        let mut entry = log();
        entry.energy = Some(Rating { value: 9, label: "?".into() });
        assert!(matches!(entry.validate(), Err(DailyLogValidationError::EnergyOutOfRange(9))));
    }

    #[test]
    fn test_json_shape() {
        let mut entry = log();
        entry.symptoms.push(SymptomEntry::new("fatigue", 1));
        let json = serde_json::to_value(&entry).unwrap();

        assert_eq!(json["date"], "2024-03-01");
        assert_eq!(json["symptoms"][0]["symptomId"], "fatigue");
        assert!(json.get("mood").is_none());
        assert_eq!(entry.date_key(), "2024-03-01");
    }
}
