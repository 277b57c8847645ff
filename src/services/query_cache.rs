//! Cache för molnläsningar. Varje ändring nollställer samlingen för
//! användaren så att nästa läsning hämtar på nytt.

use std::collections::HashMap;
use std::sync::Mutex;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

/// Molnsamlingar som cachas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Profile,
    DailyLogs,
    JournalEntries,
    Appointments,
    Notes,
    TaskStatuses,
    CustomTasks,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct QueryKey {
    collection: Collection,
    user_id: String,
    /// Extra filter, t.ex. datum för avbockningar
    detail: Option<String>,
}

#[derive(Debug, Default)]
pub struct QueryCache {
    entries: Mutex<HashMap<QueryKey, Value>>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get<T: DeserializeOwned>(
        &self,
        collection: Collection,
        user_id: &str,
        detail: Option<&str>,
    ) -> Option<T> {
        let key = QueryKey {
            collection,
            user_id: user_id.to_string(),
            detail: detail.map(str::to_string),
        };

        let entries = self.entries.lock().ok()?;
        let value = entries.get(&key)?.clone();
        drop(entries);

        match serde_json::from_value(value) {
            Ok(v) => {
                debug!("Cacheträff: {:?}", collection);
                Some(v)
            }
            Err(e) => {
                warn!("Ogiltigt cachevärde för {:?}: {}", collection, e);
                None
            }
        }
    }

    pub fn put<T: Serialize>(
        &self,
        collection: Collection,
        user_id: &str,
        detail: Option<&str>,
        value: &T,
    ) {
        let Ok(value) = serde_json::to_value(value) else {
            return;
        };
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(
                QueryKey {
                    collection,
                    user_id: user_id.to_string(),
                    detail: detail.map(str::to_string),
                },
                value,
            );
        }
    }

    /// Glöm alla läsningar av samlingen för användaren
    pub fn invalidate(&self, collection: Collection, user_id: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.retain(|k, _| !(k.collection == collection && k.user_id == user_id));
        }
    }

    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.clear();
        }
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_and_get() {
        let cache = QueryCache::new();
        cache.put(Collection::Notes, "u1", None, &vec!["a".to_string()]);

        let hit: Option<Vec<String>> = cache.get(Collection::Notes, "u1", None);
        assert_eq!(hit, Some(vec!["a".to_string()]));

        let miss: Option<Vec<String>> = cache.get(Collection::Notes, "u2", None);
        assert!(miss.is_none());
    }

    #[test]
    fn test_invalidate_covers_all_details() {
        let cache = QueryCache::new();
        cache.put(Collection::TaskStatuses, "u1", Some("2024-06-01"), &1);
        cache.put(Collection::TaskStatuses, "u1", Some("2024-06-02"), &2);
        cache.put(Collection::TaskStatuses, "u2", Some("2024-06-01"), &3);
        cache.put(Collection::Notes, "u1", None, &4);

        cache.invalidate(Collection::TaskStatuses, "u1");

        assert_eq!(cache.len(), 2);
        assert!(cache
            .get::<i32>(Collection::TaskStatuses, "u1", Some("2024-06-01"))
            .is_none());
        assert_eq!(cache.get::<i32>(Collection::TaskStatuses, "u2", Some("2024-06-01")), Some(3));
        assert_eq!(cache.get::<i32>(Collection::Notes, "u1", None), Some(4));
    }

    #[test]
    fn test_clear() {
        let cache = QueryCache::new();
        cache.put(Collection::Profile, "u1", None, &"x");
        cache.clear();
        assert!(cache.is_empty());
    }
}
