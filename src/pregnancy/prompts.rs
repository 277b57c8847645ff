//! Skrivförslag för minnesboken

use chrono::NaiveDate;

use crate::utils::date::long_date_string;

pub const MEMORY_PROMPTS: &[&str] = &[
    "Today I felt…",
    "I'm grateful for…",
    "One thing I want to tell my baby…",
    "A moment that made me smile today…",
    "Something I'm looking forward to…",
    "A prayer or wish for my baby…",
    "How I imagine meeting you…",
    "What I want you to know about this time…",
    "A feeling I want to remember…",
    "Something I learned about myself today…",
    "A moment of peace I experienced…",
    "What makes me feel connected to you…",
    "A dream I have for our family…",
    "Something I want to remember about this week…",
    "How I felt when I first knew about you…",
];

/// Teckensumman av datumsträngen. Samma dag ger samma urval i alla roterande listor.
pub(crate) fn date_seed(date: NaiveDate) -> usize {
    long_date_string(date).chars().map(|c| c as usize).sum()
}

fn prompt_index(date: NaiveDate) -> usize {
    date_seed(date) % MEMORY_PROMPTS.len()
}

/// Dagens skrivförslag. Samma datum ger alltid samma förslag.
pub fn get_today_prompt(date: NaiveDate) -> &'static str {
    MEMORY_PROMPTS[prompt_index(date)]
}

/// Flera förslag för dagen, med dagens förslag först
pub fn prompts_for_date(date: NaiveDate, count: usize) -> Vec<&'static str> {
    let start = prompt_index(date);
    MEMORY_PROMPTS
        .iter()
        .cycle()
        .skip(start)
        .take(count.min(MEMORY_PROMPTS.len()))
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_today_prompt_is_stable() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        assert_eq!(get_today_prompt(date), get_today_prompt(date));

        // "Mon Jan 15 2024" har teckensumman 977, 977 % 15 = 2
        assert_eq!(get_today_prompt(date), MEMORY_PROMPTS[2]);
    }

    #[test]
    fn test_prompts_for_date() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let prompts = prompts_for_date(date, 3);
        assert_eq!(prompts.len(), 3);
        assert_eq!(prompts[0], get_today_prompt(date));
        assert_eq!(prompts[1], MEMORY_PROMPTS[3]);

        assert_eq!(prompts_for_date(date, 100).len(), MEMORY_PROMPTS.len());
    }
}
