//! Stödjande meddelanden och dagens fokus

use chrono::{NaiveDate, NaiveTime, Timelike};

use super::prompts::date_seed;

pub const SUPPORTIVE_MESSAGES: &[&str] = &[
    "You're doing amazing, even on the hard days. Rest is productive.",
    "Every small step you take matters. Be proud of yourself.",
    "Your body is doing incredible work. Trust the process.",
    "It's okay to feel whatever you're feeling right now.",
    "You don't have to be perfect. You just have to be you.",
    "Be gentle with yourself today. You deserve kindness.",
    "Some days are harder than others. That's completely normal.",
    "You're stronger than you know, even when you don't feel it.",
    "Taking care of yourself IS taking care of your baby.",
    "It's okay to ask for help. You don't have to do this alone.",
    "Your baby already loves the sound of your voice.",
    "Every moment of connection matters, big or small.",
    "Your baby feels safe because of you.",
    "You're creating the most beautiful bond right now.",
    "Your love is already surrounding your little one.",
    "If you're tired, rest. Tomorrow is a new day.",
    "Take a deep breath. You're exactly where you need to be.",
    "A calm mama means a calm baby. Prioritize your peace.",
    "It's okay to slow down. The world can wait.",
    "Give yourself permission to just be today.",
    "You were made for this journey. Trust yourself.",
    "Every pregnancy is unique. Comparison steals joy.",
    "Your intuition is your superpower. Listen to it.",
    "The love you feel is already changing the world.",
    "You're writing a beautiful story, one day at a time.",
    "Everything is unfolding exactly as it should.",
    "This moment is precious. Breathe it in.",
    "You are blessed with this beautiful gift.",
    "Have patience with yourself and trust in Allah's plan.",
    "Every difficulty brings ease. Keep going.",
];

pub const DAILY_FOCUS_SUGGESTIONS: &[&str] = &[
    "Stay hydrated today 💧",
    "Take a short, gentle walk",
    "Do some light stretching",
    "Get some fresh air today",
    "Listen to your body's signals",
    "Write down one thing you're grateful for",
    "Call someone who makes you smile",
    "Allow yourself a moment of stillness",
    "Say something kind to yourself",
    "Let go of one worry today",
    "Take a moment for dua/prayer 🤲",
    "Listen to something peaceful",
    "Practice gratitude for this journey",
    "Find a quiet moment for reflection",
    "Connect with your baby through words",
    "Take your prenatal vitamin 💊",
    "Rest when you feel tired",
    "Eat something nourishing",
    "Drink a warm cup of tea 🍵",
    "Give yourself a 10-minute break",
];

/// Byts varje timme
pub fn supportive_message(date: NaiveDate, time: NaiveTime) -> &'static str {
    let seed = date_seed(date) + time.hour() as usize;
    SUPPORTIVE_MESSAGES[seed % SUPPORTIVE_MESSAGES.len()]
}

pub fn daily_focus(date: NaiveDate) -> &'static str {
    DAILY_FOCUS_SUGGESTIONS[date_seed(date) % DAILY_FOCUS_SUGGESTIONS.len()]
}
