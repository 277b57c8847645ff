//! Statistik över incheckningar och veckosammanfattning

use std::collections::BTreeMap;

use anyhow::Result;
use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::models::{Appointment, DailyLog, Memory};
use crate::utils::date::start_of_day;

use super::persistence::PersistenceSelector;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TrackerStats {
    pub total_days: usize,
    /// Antal dagar i följd med incheckning, räknat bakåt från idag
    pub streak: usize,
    pub mood_counts: BTreeMap<String, usize>,
    pub symptom_counts: BTreeMap<String, usize>,
}

impl TrackerStats {
    /// Vanligaste symtomen, flest först
    pub fn top_symptoms(&self, count: usize) -> Vec<(&str, usize)> {
        let mut symptoms: Vec<(&str, usize)> = self
            .symptom_counts
            .iter()
            .map(|(id, n)| (id.as_str(), *n))
            .collect();
        symptoms.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
        symptoms.truncate(count);
        symptoms
    }
}

pub fn tracker_stats(logs: &[DailyLog], today: NaiveDate) -> TrackerStats {
    let mut stats = TrackerStats {
        total_days: logs.len(),
        ..Default::default()
    };

    for log in logs {
        if let Some(mood) = &log.mood {
            *stats.mood_counts.entry(mood.label.clone()).or_default() += 1;
        }
        for symptom in &log.symptoms {
            *stats
                .symptom_counts
                .entry(symptom.symptom_id.clone())
                .or_default() += 1;
        }
    }

    let mut dates: Vec<NaiveDate> = logs.iter().map(|l| l.date).collect();
    dates.sort_unstable_by(|a, b| b.cmp(a));
    dates.dedup();

    for (i, date) in dates.iter().enumerate() {
        if *date == today - Duration::days(i as i64) {
            stats.streak += 1;
        } else {
            break;
        }
    }

    stats
}

/// Sammanfattning av en graviditetsvecka
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyRecap {
    pub week: i64,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub memories: Vec<Memory>,
    pub check_ins: usize,
    pub appointments: usize,
}

impl WeeklyRecap {
    pub fn has_content(&self) -> bool {
        !self.memories.is_empty() || self.check_ins > 0 || self.appointments > 0
    }

    pub fn check_in_label(&self) -> &'static str {
        if self.check_ins == 1 {
            "check-in"
        } else {
            "check-ins"
        }
    }
}

/// Veckan omfattar `lmp + 7*week` till och med sex dagar senare
pub fn weekly_recap(
    week: i64,
    lmp: NaiveDate,
    memories: &[Memory],
    logs: &[DailyLog],
    appointments: &[Appointment],
) -> WeeklyRecap {
    let start = lmp + Duration::days(week * 7);
    let end = start + Duration::days(6);
    let in_week = |d: NaiveDate| d >= start && d <= end;

    WeeklyRecap {
        week,
        start,
        end,
        memories: memories.iter().filter(|m| m.week == week).cloned().collect(),
        check_ins: logs.iter().filter(|l| in_week(l.date)).count(),
        appointments: appointments
            .iter()
            .filter(|a| in_week(start_of_day(a.datetime)))
            .count(),
    }
}

/// Statistik utifrån aktuellt lagringsläge
pub struct StatsService<'a> {
    selector: &'a PersistenceSelector,
}

impl<'a> StatsService<'a> {
    pub fn new(selector: &'a PersistenceSelector) -> Self {
        Self { selector }
    }

    pub fn tracker_stats(&self, today: NaiveDate) -> Result<TrackerStats> {
        Ok(tracker_stats(&self.selector.get_daily_logs()?, today))
    }

    /// Sammanfattning av innevarande vecka, `None` utan profil
    pub fn current_week_recap(&self, today: NaiveDate) -> Result<Option<WeeklyRecap>> {
        let Some(profile) = self.selector.get_profile()? else {
            return Ok(None);
        };

        let week = profile.gestational_age(today).weeks;
        Ok(Some(weekly_recap(
            week,
            profile.lmp(),
            &self.selector.local().get_memories_for_week(week)?,
            &self.selector.get_daily_logs()?,
            &self.selector.get_appointments()?,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use crate::models::{Rating, SymptomEntry};
    use crate::services::CloudStore;
    use crate::store::LocalStore;
    use crate::utils::date::anchor_instant;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn log(d: NaiveDate, mood: u8, symptoms: &[&str]) -> DailyLog {
        let mut log = DailyLog::new(d);
        log.mood = Rating::mood(mood);
        log.symptoms = symptoms.iter().map(|s| SymptomEntry::new(*s, 1)).collect();
        log
    }

    #[test]
    fn test_counts_and_streak() {
        let today = date(2024, 4, 10);
        let logs = vec![
            log(date(2024, 4, 10), 4, &["nausea"]),
            log(date(2024, 4, 9), 4, &["nausea", "fatigue"]),
            log(date(2024, 4, 8), 2, &[]),
            log(date(2024, 4, 5), 5, &["fatigue"]),
        ];

        let stats = tracker_stats(&logs, today);
        assert_eq!(stats.total_days, 4);
        assert_eq!(stats.streak, 3);
        assert_eq!(stats.mood_counts["Good"], 2);
        assert_eq!(stats.mood_counts["Low"], 1);
        assert_eq!(stats.symptom_counts["nausea"], 2);
        assert_eq!(stats.top_symptoms(1), vec![("fatigue", 2)]);
    }

    #[test]
    fn test_streak_requires_today() {
        let logs = vec![log(date(2024, 4, 9), 3, &[])];
        assert_eq!(tracker_stats(&logs, date(2024, 4, 10)).streak, 0);
        assert_eq!(tracker_stats(&[], date(2024, 4, 10)), TrackerStats::default());
    }

    #[test]
    fn test_weekly_recap_window() {
        let lmp = date(2024, 1, 1);
        // Vecka 2 = 15–21 januari
        let logs = vec![
            log(date(2024, 1, 14), 3, &[]),
            log(date(2024, 1, 15), 3, &[]),
            log(date(2024, 1, 21), 3, &[]),
            log(date(2024, 1, 22), 3, &[]),
        ];
        let appointments = vec![
            Appointment::new("Inskrivning", anchor_instant(date(2024, 1, 18))),
            Appointment::new("Senare", anchor_instant(date(2024, 2, 1))),
        ];
        let memories = vec![
            Memory::new(date(2024, 1, 16), "Today I felt…", "pirrigt", 2),
            Memory::new(date(2024, 1, 9), "Today I felt…", "trött", 1),
        ];

        let recap = weekly_recap(2, lmp, &memories, &logs, &appointments);
        assert_eq!(recap.start, date(2024, 1, 15));
        assert_eq!(recap.end, date(2024, 1, 21));
        assert_eq!(recap.check_ins, 2);
        assert_eq!(recap.appointments, 1);
        assert_eq!(recap.memories.len(), 1);
        assert!(recap.has_content());
        assert_eq!(recap.check_in_label(), "check-ins");
    }

    #[test]
    fn test_current_week_recap_via_selector() {
        let mut sel = PersistenceSelector::new(
            LocalStore::in_memory(),
            CloudStore::new(Database::open_in_memory().unwrap()),
        );
        let service = StatsService::new(&sel);
        assert!(service.current_week_recap(date(2024, 1, 15)).unwrap().is_none());

        sel.setup_profile(date(2024, 1, 1), None).unwrap();
        sel.save_daily_log(log(date(2024, 1, 15), 3, &[])).unwrap();

        let recap = StatsService::new(&sel)
            .current_week_recap(date(2024, 1, 16))
            .unwrap()
            .unwrap();
        assert_eq!(recap.week, 2);
        assert_eq!(recap.check_ins, 1);
        assert_eq!(recap.check_in_label(), "check-in");
    }
}
