//! Graviditetsberäkningar och statiskt innehåll (rena funktioner)

pub mod baby_size;
pub mod calculator;
pub mod celebration;
pub mod duas;
pub mod greetings;
pub mod guidance;
pub mod prompts;
pub mod support;

pub use baby_size::{get_baby_size, get_baby_size_by_week, BabySize, BabySizeInfo};
pub use calculator::{
    calculate_due_date_from_lmp, calculate_gestational_age, calculate_lmp_from_due_date,
    format_gestational_age, gestational_age_at, get_days_remaining, GestationalAge, Trimester,
    PREGNANCY_DAYS,
};
pub use celebration::{should_celebrate, Celebration, CelebrationLevel};
pub use duas::{daily_dua, duas_by_category, Dua, DuaCategory};
pub use greetings::{encouraging_message, personalized_greeting, weekly_affirmation, TimeOfDay};
pub use guidance::{get_trimester_guidance, get_week_milestone, TrimesterGuidance};
pub use prompts::get_today_prompt;
pub use support::{daily_focus, supportive_message};
