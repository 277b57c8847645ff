use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::utils::date::hhmm;

/// Schemalagd påminnelse, avfyras när klockan visar `time`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationSchedule {
    pub id: String,
    #[serde(with = "hhmm")]
    pub time: NaiveTime,
    pub title: String,
    pub body: String,
    pub enabled: bool,
}

impl NotificationSchedule {
    fn new(id: &str, hour: u32, minute: u32, title: &str, body: &str) -> Self {
        Self {
            id: id.to_string(),
            time: NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN),
            title: title.to_string(),
            body: body.to_string(),
            enabled: true,
        }
    }

    /// Samma timme och minut som `now`
    pub fn matches(&self, now: NaiveTime) -> bool {
        self.time.hour() == now.hour() && self.time.minute() == now.minute()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPreferences {
    pub enabled: bool,
    pub schedules: Vec<NotificationSchedule>,
    pub quiet_hours_enabled: bool,
    #[serde(with = "hhmm")]
    pub quiet_hours_start: NaiveTime,
    #[serde(with = "hhmm")]
    pub quiet_hours_end: NaiveTime,
}

impl Default for NotificationPreferences {
    fn default() -> Self {
        Self {
            enabled: false,
            schedules: default_notification_schedules(),
            quiet_hours_enabled: false,
            quiet_hours_start: NaiveTime::from_hms_opt(22, 0, 0).unwrap_or(NaiveTime::MIN),
            quiet_hours_end: NaiveTime::from_hms_opt(8, 0, 0).unwrap_or(NaiveTime::MIN),
        }
    }
}

impl NotificationPreferences {
    /// Tyst period, även över midnatt (t.ex. 22:00–08:00). Slutet ingår inte.
    pub fn is_in_quiet_hours(&self, now: NaiveTime) -> bool {
        if !self.quiet_hours_enabled {
            return false;
        }

        let minutes = |t: NaiveTime| t.hour() * 60 + t.minute();
        let current = minutes(now);
        let start = minutes(self.quiet_hours_start);
        let end = minutes(self.quiet_hours_end);

        if start > end {
            current >= start || current < end
        } else {
            current >= start && current < end
        }
    }

    /// Påminnelser som ska avfyras vid `now`
    pub fn due_schedules(&self, now: NaiveTime) -> Vec<&NotificationSchedule> {
        if !self.enabled || self.is_in_quiet_hours(now) {
            return Vec::new();
        }

        self.schedules
            .iter()
            .filter(|s| s.enabled && s.matches(now))
            .collect()
    }
}

pub fn default_notification_schedules() -> Vec<NotificationSchedule> {
    vec![
        NotificationSchedule::new(
            "morning-water",
            9,
            0,
            "Water + fruit time 💧🍎",
            "Good morning! Time for your water and a piece of fruit.",
        ),
        NotificationSchedule::new(
            "afternoon-rest",
            14,
            0,
            "Quick rest + small sip 🌸",
            "Take a gentle break. Rest your feet and have some water.",
        ),
        NotificationSchedule::new(
            "evening-checkin",
            20,
            30,
            "Daily check-in 📝",
            "How are you feeling today? Take a moment to log your mood and energy.",
        ),
        NotificationSchedule::new(
            "night-journal",
            21,
            30,
            "1-minute memory 💕",
            "What was one sweet moment from today? Jot it down in your journal.",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_defaults() {
        let prefs = NotificationPreferences::default();
        assert!(!prefs.enabled);
        assert_eq!(prefs.schedules.len(), 4);
        assert_eq!(prefs.schedules[2].time, at(20, 30));
    }

    #[test]
    fn test_overnight_quiet_hours() {
        let mut prefs = NotificationPreferences::default();
        assert!(!prefs.is_in_quiet_hours(at(23, 0)));

        prefs.quiet_hours_enabled = true;
        assert!(prefs.is_in_quiet_hours(at(22, 0)));
        assert!(prefs.is_in_quiet_hours(at(2, 15)));
        assert!(!prefs.is_in_quiet_hours(at(8, 0)));
        assert!(!prefs.is_in_quiet_hours(at(12, 0)));
    }

    #[test]
    fn test_daytime_quiet_hours() {
        let mut prefs = NotificationPreferences::default();
        prefs.quiet_hours_enabled = true;
        prefs.quiet_hours_start = at(13, 0);
        prefs.quiet_hours_end = at(15, 0);

        assert!(prefs.is_in_quiet_hours(at(14, 0)));
        assert!(!prefs.is_in_quiet_hours(at(15, 0)));
        assert!(!prefs.is_in_quiet_hours(at(9, 0)));
    }

    #[test]
    fn test_due_schedules() {
        let mut prefs = NotificationPreferences::default();
        assert!(prefs.due_schedules(at(9, 0)).is_empty());

        prefs.enabled = true;
        let due = prefs.due_schedules(NaiveTime::from_hms_opt(9, 0, 42).unwrap());
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].id, "morning-water");
        assert!(prefs.due_schedules(at(9, 1)).is_empty());

        prefs.schedules[0].enabled = false;
        assert!(prefs.due_schedules(at(9, 0)).is_empty());
    }

    #[test]
    fn test_json_uses_hhmm() {
        let json = serde_json::to_value(NotificationPreferences::default()).unwrap();
        assert_eq!(json["quietHoursStart"], "22:00");
        assert_eq!(json["schedules"][0]["time"], "09:00");

        let back: NotificationPreferences = serde_json::from_value(json).unwrap();
        assert_eq!(back, NotificationPreferences::default());
    }
}
