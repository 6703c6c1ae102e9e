use crate::domain::model::ResolvedPayload;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

struct CacheEntry {
    value: ResolvedPayload,
    expires_at: Instant,
}

/// Time-bounded store for resolved payloads, keyed by `<departmentId>-<year>`.
/// One fixed TTL, no size bound, lazy expiry on read. The mutex only makes
/// individual map operations atomic; concurrent resolutions for the same key
/// may still race (last writer wins).
#[derive(Default)]
pub struct SubjectCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl SubjectCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the stored payload if present and not expired; an expired
    /// entry is evicted and reported as absent.
    pub fn get(&self, key: &str) -> Option<ResolvedPayload> {
        let mut entries = self.entries.lock().unwrap();
        match entries.get(key) {
            Some(entry) if Instant::now() < entry.expires_at => Some(entry.value.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    /// Stores a payload, overwriting any existing entry for the key.
    pub fn set(&self, key: &str, value: ResolvedPayload, ttl: Duration) {
        let mut entries = self.entries.lock().unwrap();
        entries.insert(
            key.to_string(),
            CacheEntry {
                value,
                expires_at: Instant::now() + ttl,
            },
        );
    }

    /// Removes one entry, or everything when no key is given.
    pub fn clear(&self, key: Option<&str>) {
        let mut entries = self.entries.lock().unwrap();
        match key {
            Some(key) => {
                entries.remove(key);
            }
            None => entries.clear(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Meta, Source};
    use chrono::Utc;

    fn payload(year: &str) -> ResolvedPayload {
        ResolvedPayload {
            subjects: vec![],
            meta: Meta {
                department: "J".to_string(),
                department_name: "情報工学科".to_string(),
                year: year.to_string(),
                fetched_at: Utc::now(),
                cached: false,
                source: Source::Csv,
            },
        }
    }

    #[test]
    fn round_trips_within_ttl() {
        let cache = SubjectCache::new();
        cache.set("14-2025", payload("2025"), Duration::from_secs(60));

        let hit = cache.get("14-2025").unwrap();
        assert_eq!(hit.meta.year, "2025");
        assert!(cache.get("14-2024").is_none());
    }

    #[test]
    fn expired_entry_is_evicted_on_read() {
        let cache = SubjectCache::new();
        cache.set("14-2025", payload("2025"), Duration::from_secs(0));

        std::thread::sleep(Duration::from_millis(5));
        assert!(cache.get("14-2025").is_none());
        // second read also misses; the entry is gone, not just hidden
        assert!(cache.get("14-2025").is_none());
    }

    #[test]
    fn set_overwrites_existing_entry() {
        let cache = SubjectCache::new();
        cache.set("14-2025", payload("2025"), Duration::from_secs(60));
        cache.set("14-2025", payload("2026"), Duration::from_secs(60));

        assert_eq!(cache.get("14-2025").unwrap().meta.year, "2026");
    }

    #[test]
    fn clear_removes_one_or_all() {
        let cache = SubjectCache::new();
        cache.set("14-2025", payload("2025"), Duration::from_secs(60));
        cache.set("15-2025", payload("2025"), Duration::from_secs(60));

        cache.clear(Some("14-2025"));
        assert!(cache.get("14-2025").is_none());
        assert!(cache.get("15-2025").is_some());

        cache.clear(None);
        assert!(cache.get("15-2025").is_none());
    }
}
