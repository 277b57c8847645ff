use std::fmt;

/// Fasta nycklar i den lokala lagringen, en per samling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    Profile,
    DailyLogs,
    JournalEntries,
    Appointments,
    Notes,
    BumpPhotos,
    Memories,
    NotificationPreferences,
    ComfortPreferences,
    LastCompletedWeek,
}

impl StorageKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Profile => "bloom_pregnancy_profile",
            Self::DailyLogs => "bloom_daily_logs",
            Self::JournalEntries => "bloom_journal_entries",
            Self::Appointments => "bloom_appointments",
            Self::Notes => "bloom_notes",
            Self::BumpPhotos => "bloom_bump_photos",
            Self::Memories => "bloom_memories",
            Self::NotificationPreferences => "bloom_notification_preferences",
            Self::ComfortPreferences => "bloom_comfort_preferences",
            Self::LastCompletedWeek => "bloom_last_completed_week",
        }
    }

    pub fn all() -> &'static [Self] {
        &[
            Self::Profile,
            Self::DailyLogs,
            Self::JournalEntries,
            Self::Appointments,
            Self::Notes,
            Self::BumpPhotos,
            Self::Memories,
            Self::NotificationPreferences,
            Self::ComfortPreferences,
            Self::LastCompletedWeek,
        ]
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
