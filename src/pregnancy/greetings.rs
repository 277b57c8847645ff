//! Hälsningar och uppmuntran som byts en gång per dag

use chrono::{NaiveDate, NaiveTime, Timelike};

use super::prompts::date_seed;

/// Del av dygnet som styr hälsningen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl TimeOfDay {
    /// 05–12 morgon, 12–17 eftermiddag, 17–21 kväll, annars natt
    pub fn from_time(time: NaiveTime) -> Self {
        match time.hour() {
            5..=11 => Self::Morning,
            12..=16 => Self::Afternoon,
            17..=20 => Self::Evening,
            _ => Self::Night,
        }
    }

    fn greetings(&self) -> &'static [&'static str] {
        match self {
            Self::Morning => &[
                "Good morning, {name} ☀️",
                "Rise and shine, {name} 🌸",
                "Beautiful morning, {name} 💕",
                "Wishing you a gentle morning, {name}",
                "A new day awaits you, {name} 🌷",
            ],
            Self::Afternoon => &[
                "Good afternoon, {name} 🌤️",
                "Hope you're having a lovely day, {name}",
                "Checking in on you, {name} 💕",
                "How are you feeling, {name}?",
                "Afternoon blessings, {name} 🌺",
            ],
            Self::Evening => &[
                "Good evening, {name} 🌙",
                "Rest easy tonight, {name} ✨",
                "You did beautifully today, {name}",
                "Time to unwind, {name} 💕",
                "Evening peace to you, {name} 🌸",
            ],
            Self::Night => &[
                "Sweet dreams ahead, {name} 🌙",
                "Rest well, {name} ✨",
                "You've earned your rest, {name}",
                "Goodnight, {name} 💕",
                "Peaceful night, {name} 🌙",
            ],
        }
    }
}

pub const ENCOURAGING_MESSAGES: &[&str] = &[
    "You're doing amazing 💕",
    "One day at a time",
    "You did enough today",
    "Be gentle with yourself",
    "You are stronger than you know",
    "Every day is a new beginning",
    "You're exactly where you need to be",
    "Trust your journey",
    "Your body knows what to do",
    "You've got this, always",
];

/// Två affirmationer per vecka, vecka 4–40
const WEEKLY_AFFIRMATIONS: &[(i64, [&str; 2])] = &[
    (4, ["Your little one is just beginning 🌱", "A beautiful journey starts now"]),
    (5, ["Tiny heart is forming 💕", "Magic is happening inside you"]),
    (6, ["Your baby is growing every day", "You're creating something wonderful"]),
    (7, ["Heart is beating now 💓", "Listen to your body's wisdom"]),
    (8, ["Baby is the size of a raspberry 🍇", "Every day is progress"]),
    (9, ["Little fingers are forming", "You're doing beautifully"]),
    (10, ["Baby can move now ✨", "Trust this amazing process"]),
    (11, ["Almost done with first trimester!", "You're so strong"]),
    (12, ["Baby can stretch and kick", "The hardest part may be behind you"]),
    (13, ["Welcome to second trimester 🌸", "A new chapter begins"]),
    (14, ["Baby can make faces now", "You might feel more energy soon"]),
    (15, ["Baby is forming taste buds", "Enjoy the little moments"]),
    (16, ["You might feel movement soon 🦋", "How exciting!"]),
    (17, ["Baby is growing quickly", "You're glowing"]),
    (18, ["Halfway there! 🎉", "What an incredible journey"]),
    (19, ["Baby can hear you now 💕", "Talk to your little one"]),
    (20, ["Halfway milestone! 🌟", "You're amazing"]),
    (21, ["Baby's movements get stronger", "Every kick is a hello"]),
    (22, ["Baby is developing routines", "Rest when you need to"]),
    (23, ["Baby recognizes your voice", "Your bond grows stronger"]),
    (24, ["Viability milestone 💪", "Such a strong baby"]),
    (25, ["Baby has a sleep cycle", "Growing so fast"]),
    (26, ["Eyes are opening now 👀", "World is waiting"]),
    (27, ["Third trimester soon!", "Home stretch approaching"]),
    (28, ["Welcome to third trimester 🌟", "Final chapter begins"]),
    (29, ["Baby is gaining weight", "Almost there"]),
    (30, ["Baby practices breathing", "Your body is incredible"]),
    (31, ["Baby's brain is developing fast", "You're doing great"]),
    (32, ["Baby is head-down soon", "Getting ready"]),
    (33, ["Baby gains half a pound a week", "Growing strong"]),
    (34, ["Baby's lungs maturing", "Almost ready"]),
    (35, ["Baby is fully formed 💕", "Just gaining weight now"]),
    (36, ["Full term is near!", "Home stretch"]),
    (37, ["Early term! Baby could come anytime", "You're ready"]),
    (38, ["Full term 🎉", "Any day now"]),
    (39, ["Baby is fully ready", "Excitement builds"]),
    (40, ["Due date week! 🌸", "Your baby will arrive when ready"]),
];

/// Hälsning med namn, samma under hela dagen för en given del av dygnet
pub fn personalized_greeting(name: &str, date: NaiveDate, time: NaiveTime) -> String {
    let greetings = TimeOfDay::from_time(time).greetings();
    greetings[date_seed(date) % greetings.len()].replace("{name}", name)
}

pub fn encouraging_message(date: NaiveDate) -> &'static str {
    ENCOURAGING_MESSAGES[date_seed(date) % ENCOURAGING_MESSAGES.len()]
}

/// Veckans affirmation. Veckor efter 40 och veckor utan egen text använder vecka 40.
pub fn weekly_affirmation(week: i64, date: NaiveDate) -> &'static str {
    let week = week.min(40);
    let affirmations = WEEKLY_AFFIRMATIONS
        .iter()
        .find(|(w, _)| *w == week)
        .or_else(|| WEEKLY_AFFIRMATIONS.last())
        .map(|(_, texts)| texts)
        .unwrap_or(&["", ""]);

    affirmations[date_seed(date) % affirmations.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        // "Mon Jan 15 2024", teckensumma 977
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    }

    fn time(h: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, 0, 0).unwrap()
    }

    #[test]
    fn test_time_of_day_buckets() {
        assert_eq!(TimeOfDay::from_time(time(4)), TimeOfDay::Night);
        assert_eq!(TimeOfDay::from_time(time(5)), TimeOfDay::Morning);
        assert_eq!(TimeOfDay::from_time(time(12)), TimeOfDay::Afternoon);
        assert_eq!(TimeOfDay::from_time(time(17)), TimeOfDay::Evening);
        assert_eq!(TimeOfDay::from_time(time(21)), TimeOfDay::Night);
    }

    #[test]
    fn test_greeting_uses_name_and_date() {
        // 977 % 5 = 2
        assert_eq!(
            personalized_greeting("Amina", date(), time(9)),
            "Beautiful morning, Amina 💕"
        );
        assert_eq!(
            personalized_greeting("Amina", date(), time(22)),
            "You've earned your rest, Amina"
        );
    }

    #[test]
    fn test_encouraging_message_is_daily() {
        assert_eq!(encouraging_message(date()), ENCOURAGING_MESSAGES[7]);
    }

    #[test]
    fn test_weekly_affirmation_falls_back_to_week_40() {
        // 977 % 2 = 1
        assert_eq!(weekly_affirmation(20, date()), "You're amazing");
        assert_eq!(weekly_affirmation(42, date()), "Your baby will arrive when ready");
        assert_eq!(weekly_affirmation(2, date()), "Your baby will arrive when ready");
    }
}
