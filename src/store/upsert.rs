//! Ersätt-eller-lägg-till på en nyckel som anroparen väljer

use chrono::{DateTime, Utc};

use crate::models::{Appointment, BumpPhoto, DailyLog, JournalEntry, Memory, QuickNote};

/// Poster som får `updatedAt` satt när de skrivs över
pub trait Touch {
    fn touch(&mut self, now: DateTime<Utc>);
}

macro_rules! impl_touch {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Touch for $ty {
                fn touch(&mut self, now: DateTime<Utc>) {
                    self.updated_at = now;
                }
            }
        )*
    };
}

impl_touch!(DailyLog, JournalEntry, QuickNote, BumpPhoto, Memory);

impl Touch for Appointment {
    // Tider har ingen updatedAt
    fn touch(&mut self, _now: DateTime<Utc>) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    Inserted,
    Replaced,
}

/// Ersätt posten med samma nyckel (och stämpla den), annars lägg till sist
pub fn upsert_by<T, K, F>(items: &mut Vec<T>, mut record: T, key: F, now: DateTime<Utc>) -> Upsert
where
    T: Touch,
    K: PartialEq,
    F: Fn(&T) -> K,
{
    let wanted = key(&record);

    match items.iter().position(|existing| key(existing) == wanted) {
        Some(index) => {
            record.touch(now);
            items[index] = record;
            Upsert::Replaced
        }
        None => {
            items.push(record);
            Upsert::Inserted
        }
    }
}
