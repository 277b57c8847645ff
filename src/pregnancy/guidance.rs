//! Statiska texter: veckomilstolpar, trimesterråd, symtom och skalor

use serde::Serialize;

use super::calculator::Trimester;

/// Meddelanden för vecka 4–40
const WEEK_MILESTONES: &[(i64, &str)] = &[
    (4, "Your baby is about the size of a poppy seed 🌱"),
    (5, "The heart begins to form ❤️"),
    (6, "The neural tube is developing 🧠"),
    (7, "Arms and legs are forming 👋"),
    (8, "Fingers and toes are developing ✨"),
    (9, "All essential organs have begun forming 🌸"),
    (10, "Your baby is now officially a fetus 🎉"),
    (11, "Bones are beginning to harden 💪"),
    (12, "Reflexes are developing 🤲"),
    (13, "Entering the second trimester! 🌟"),
    (14, "Your baby can make facial expressions 😊"),
    (15, "Your baby can sense light 💡"),
    (16, "You might start feeling movement soon 🦋"),
    (17, "Baby's skeleton is changing from cartilage to bone 🦴"),
    (18, "Your baby can hear sounds now 👂"),
    (19, "Vernix is forming to protect baby's skin 🛡️"),
    (20, "Halfway there! 🎊"),
    (21, "Baby's movements are getting stronger 💪"),
    (22, "Eyebrows and eyelids are fully formed 👁️"),
    (23, "Baby is practicing breathing movements 🌬️"),
    (24, "Viability milestone reached 🌈"),
    (25, "Baby responds to your voice 🗣️"),
    (26, "Eyes are beginning to open 👀"),
    (27, "Entering the third trimester! 🌟"),
    (28, "Baby can blink and has eyelashes ✨"),
    (29, "Brain is developing rapidly 🧠"),
    (30, "Baby is about 3 pounds now ⚖️"),
    (31, "All five senses are developed 🌸"),
    (32, "Baby is practicing breathing 💨"),
    (33, "Bones are hardening (except skull) 🦴"),
    (34, "Baby's immune system is developing 🛡️"),
    (35, "Most organs are fully developed 🎉"),
    (36, "Baby is getting ready for birth 🍼"),
    (37, "Full term begins! 🌟"),
    (38, "Baby could arrive any day now 🎊"),
    (39, "Almost there! Stay comfortable 💕"),
    (40, "Your due date is here! 🎉"),
];

/// Veckans milstolpe, eller en allmän text utanför vecka 4–40
pub fn get_week_milestone(week: i64) -> String {
    WEEK_MILESTONES
        .iter()
        .find(|(w, _)| *w == week)
        .map(|(_, message)| message.to_string())
        .unwrap_or_else(|| format!("Week {} of your beautiful journey 💕", week))
}

/// Råd för en trimester, fyra punkter per kategori
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrimesterGuidance {
    pub advice: [&'static str; 4],
    pub avoid: [&'static str; 4],
    pub care: [&'static str; 4],
}

const FIRST_TRIMESTER: TrimesterGuidance = TrimesterGuidance {
    advice: [
        "Take prenatal vitamins with folic acid daily",
        "Stay hydrated - aim for 8-10 glasses of water",
        "Get plenty of rest when you feel tired",
        "Schedule your first prenatal appointment",
    ],
    avoid: [
        "Alcohol and smoking",
        "Raw or undercooked meats and fish",
        "Unpasteurized dairy products",
        "High-mercury fish (shark, swordfish)",
    ],
    care: [
        "Listen to your body and rest when needed",
        "Gentle walks can help with energy",
        "Small, frequent meals may help with nausea",
        "Keep crackers by your bedside",
    ],
};

const SECOND_TRIMESTER: TrimesterGuidance = TrimesterGuidance {
    advice: [
        "Continue prenatal vitamins",
        "Start thinking about childbirth classes",
        "Consider a pregnancy pillow for comfort",
        "Stay active with gentle exercise",
    ],
    avoid: [
        "Heavy lifting",
        "Lying flat on your back for long periods",
        "Hot tubs and saunas",
        "Standing for very long periods",
    ],
    care: [
        "Moisturize to help with stretching skin",
        "Sleep on your left side when possible",
        "Talk and sing to your baby",
        "Take time for activities you enjoy",
    ],
};

const THIRD_TRIMESTER: TrimesterGuidance = TrimesterGuidance {
    advice: [
        "Pack your hospital bag",
        "Practice breathing techniques",
        "Finalize your birth plan",
        "Install the car seat",
    ],
    avoid: [
        "Strenuous exercise",
        "Travel far from home after 36 weeks",
        "Ignoring signs of labor",
        "Stress - try to stay calm and positive",
    ],
    care: [
        "Rest with your feet elevated",
        "Take warm (not hot) baths",
        "Practice relaxation techniques",
        "Spend quality time with your partner",
    ],
};

pub fn get_trimester_guidance(trimester: Trimester) -> &'static TrimesterGuidance {
    match trimester {
        Trimester::First => &FIRST_TRIMESTER,
        Trimester::Second => &SECOND_TRIMESTER,
        Trimester::Third => &THIRD_TRIMESTER,
    }
}

/// Symtom som kan loggas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SymptomInfo {
    pub id: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
}

pub const SYMPTOMS: &[SymptomInfo] = &[
    SymptomInfo { id: "nausea", label: "Nausea", icon: "🤢" },
    SymptomInfo { id: "fatigue", label: "Fatigue", icon: "😴" },
    SymptomInfo { id: "headache", label: "Headache", icon: "🤕" },
    SymptomInfo { id: "backpain", label: "Back Pain", icon: "🔙" },
    SymptomInfo { id: "cramping", label: "Cramping", icon: "💫" },
    SymptomInfo { id: "bloating", label: "Bloating", icon: "🎈" },
    SymptomInfo { id: "heartburn", label: "Heartburn", icon: "🔥" },
    SymptomInfo { id: "insomnia", label: "Insomnia", icon: "😵" },
    SymptomInfo { id: "swelling", label: "Swelling", icon: "🦶" },
    SymptomInfo { id: "moodswings", label: "Mood Swings", icon: "🎭" },
];

pub fn find_symptom(id: &str) -> Option<&'static SymptomInfo> {
    SYMPTOMS.iter().find(|s| s.id == id)
}

/// Ett steg på en 1–5-skala (humör eller energi)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScaleOption {
    pub value: u8,
    pub label: &'static str,
    pub emoji: &'static str,
}

pub const MOODS: &[ScaleOption] = &[
    ScaleOption { value: 1, label: "Struggling", emoji: "😔" },
    ScaleOption { value: 2, label: "Low", emoji: "😕" },
    ScaleOption { value: 3, label: "Okay", emoji: "😐" },
    ScaleOption { value: 4, label: "Good", emoji: "🙂" },
    ScaleOption { value: 5, label: "Great", emoji: "😊" },
];

pub const ENERGY_LEVELS: &[ScaleOption] = &[
    ScaleOption { value: 1, label: "Exhausted", emoji: "🪫" },
    ScaleOption { value: 2, label: "Low", emoji: "🔋" },
    ScaleOption { value: 3, label: "Moderate", emoji: "⚡" },
    ScaleOption { value: 4, label: "Good", emoji: "💪" },
    ScaleOption { value: 5, label: "Energized", emoji: "🌟" },
];

pub fn mood_option(value: u8) -> Option<&'static ScaleOption> {
    MOODS.iter().find(|m| m.value == value)
}

pub fn energy_option(value: u8) -> Option<&'static ScaleOption> {
    ENERGY_LEVELS.iter().find(|e| e.value == value)
}

/// Symtom som kräver omedelbar kontakt med vården
pub const RED_FLAG_SYMPTOMS: &[&str] = &[
    "Vaginal bleeding or fluid leakage",
    "Severe abdominal pain",
    "Severe headache or vision changes",
    "Reduced fetal movement (after 28 weeks)",
    "Fever over 38°C (100.4°F)",
    "Fainting or dizziness",
    "Difficulty breathing",
    "Chest pain",
    "Severe swelling of face or hands",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_milestone_lookup() {
        assert_eq!(get_week_milestone(20), "Halfway there! 🎊");
        assert_eq!(get_week_milestone(4), "Your baby is about the size of a poppy seed 🌱");
        assert_eq!(get_week_milestone(40), "Your due date is here! 🎉");
    }

    #[test]
    fn test_milestone_fallback() {
        assert_eq!(get_week_milestone(2), "Week 2 of your beautiful journey 💕");
        assert_eq!(get_week_milestone(42), "Week 42 of your beautiful journey 💕");
        assert_eq!(get_week_milestone(-1), "Week -1 of your beautiful journey 💕");
    }

    #[test]
    fn test_every_table_week_has_milestone() {
        for week in 4..=40 {
            assert!(!get_week_milestone(week).starts_with("Week "), "vecka {}", week);
        }
    }

    #[test]
    fn test_trimester_guidance() {
        let first = get_trimester_guidance(Trimester::First);
        assert_eq!(first.advice[0], "Take prenatal vitamins with folic acid daily");

        let third = get_trimester_guidance(Trimester::Third);
        assert_eq!(third.advice[0], "Pack your hospital bag");
        assert_eq!(third.care[3], "Spend quality time with your partner");

        assert_ne!(
            get_trimester_guidance(Trimester::Second),
            get_trimester_guidance(Trimester::First)
        );
    }

    #[test]
    fn test_scales() {
        assert_eq!(mood_option(1).map(|m| m.label), Some("Struggling"));
        assert_eq!(energy_option(3).map(|e| e.label), Some("Moderate"));
        assert!(mood_option(0).is_none());
        assert!(energy_option(6).is_none());
        assert_eq!(find_symptom("backpain").map(|s| s.label), Some("Back Pain"));
        assert_eq!(RED_FLAG_SYMPTOMS.len(), 9);
    }
}
