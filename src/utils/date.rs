use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};

/// Parse ett datum från en sträng (flexibelt format)
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    // Försök olika format
    let formats = [
        "%Y-%m-%d",    // 2024-01-15
        "%Y/%m/%d",    // 2024/01/15
        "%d-%m-%Y",    // 15-01-2024
        "%d/%m/%Y",    // 15/01/2024
        "%Y%m%d",      // 20240115
    ];

    for format in formats {
        if let Ok(date) = NaiveDate::parse_from_str(s, format) {
            return Some(date);
        }
    }

    // Fullständig tidsstämpel, t.ex. 2024-01-15T10:30:00Z
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc).date_naive())
}

/// Parse en tidpunkt ("2024-05-01T09:30:00Z" eller "2024-05-01 09:30", tolkas som UTC)
pub fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = chrono::NaiveDateTime::parse_from_str(s, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }

    None
}

/// Formatera ett datum för visning och som nyckel (YYYY-MM-DD)
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Dygnets början för en tidpunkt
pub fn start_of_day(instant: DateTime<Utc>) -> NaiveDate {
    instant.date_naive()
}

/// Kalenderdatum som tidsstämpel (midnatt UTC)
pub fn anchor_instant(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
}

/// Dagens datum
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Datumsträng i formatet "Mon Jan 15 2024"
pub fn long_date_string(date: NaiveDate) -> String {
    date.format("%a %b %d %Y").to_string()
}

/// Parse klockslag "HH:MM"
pub fn parse_hhmm(s: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(s.trim(), "%H:%M").ok()
}

/// Formatera klockslag som "HH:MM"
pub fn format_hhmm(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

/// Serde-modul för klockslag lagrade som "HH:MM"
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_hhmm(*time))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        super::parse_hhmm(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("ogiltigt klockslag: {}", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2024-01-15"),
            Some(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap())
        );
        assert_eq!(
            parse_date("2024-01-15T23:10:00Z"),
            Some(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap())
        );
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("invalid"), None);
    }

    #[test]
    fn test_parse_datetime() {
        let dt = parse_datetime("2024-05-01 09:30").unwrap();
        assert_eq!(dt.to_rfc3339(), "2024-05-01T09:30:00+00:00");
        assert!(parse_datetime("imorgon").is_none());
    }

    #[test]
    fn test_start_of_day_ignores_time() {
        let morning = parse_datetime("2024-01-15 00:01").unwrap();
        let evening = parse_datetime("2024-01-15 23:59").unwrap();
        assert_eq!(start_of_day(morning), start_of_day(evening));
        assert_eq!(anchor_instant(start_of_day(evening)).to_rfc3339(), "2024-01-15T00:00:00+00:00");
    }

    #[test]
    fn test_long_date_string() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        assert_eq!(long_date_string(date), "Mon Jan 15 2024");
    }

    #[test]
    fn test_hhmm() {
        let t = parse_hhmm("20:30").unwrap();
        assert_eq!(format_hhmm(t), "20:30");
        assert!(parse_hhmm("25:00").is_none());
    }
}
