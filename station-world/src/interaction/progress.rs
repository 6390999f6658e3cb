use bevy::prelude::*;
use constants::station::TOTAL_STATIONS;
use constants::storage_keys::{FIRST_VISIT, VISITED};

use super::storage::KeyValueStore;

/// Outcome of recording a station visit, published to the progress bar and frontend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressUpdate {
    pub visited: usize,
    pub total: usize,
    pub ratio: f32,
    /// False when the key was already present.
    pub newly_visited: bool,
    /// True exactly once per process, on the call that reaches the total.
    pub journey_completed: bool,
}

/// Visited-station record and first-visit flag on top of durable storage.
///
/// Constructed once at startup with its storage injected, then borrowed by
/// the interaction manager. The visited set only ever grows.
#[derive(Resource)]
pub struct ProgressStore {
    storage: Box<dyn KeyValueStore>,
    total: usize,
    ratio: f32,
    completion_announced: bool,
}

impl ProgressStore {
    pub fn new(storage: Box<dyn KeyValueStore>) -> Self {
        Self::with_total(storage, TOTAL_STATIONS)
    }

    pub fn with_total(storage: Box<dyn KeyValueStore>, total: usize) -> Self {
        let mut store = Self {
            storage,
            total,
            ratio: 0.0,
            completion_announced: false,
        };
        store.ratio = store.ratio_for(store.visited().len());
        store
    }

    /// Progress key for a station, e.g. `fire-2`.
    pub fn station_key(category: &str, local_id: usize) -> String {
        format!("{category}-{local_id}")
    }

    /// Current visited keys in insertion order. Absent or corrupt storage reads as empty.
    pub fn visited(&self) -> Vec<String> {
        let raw = match self.storage.get(VISITED) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!("Visited stations unreadable, treating as none: {}", e);
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<String>>(&raw) {
            Ok(keys) => {
                let mut unique: Vec<String> = Vec::with_capacity(keys.len());
                for key in keys {
                    if !unique.contains(&key) {
                        unique.push(key);
                    }
                }
                unique
            }
            Err(e) => {
                warn!("Visited stations corrupt, treating as none: {}", e);
                Vec::new()
            }
        }
    }

    /// Persisted ids for one category, as they appear in the keys.
    pub fn visited_ids(&self, category: &str) -> Vec<usize> {
        let prefix = format!("{category}-");
        self.visited()
            .iter()
            .filter_map(|key| key.strip_prefix(&prefix)?.parse().ok())
            .collect()
    }

    /// Record a visit. Calling again with the same arguments changes nothing.
    pub fn mark_visited(&mut self, category: &str, local_id: usize) -> ProgressUpdate {
        let key = Self::station_key(category, local_id);
        let mut visited = self.visited();
        let newly_visited = !visited.contains(&key);

        if newly_visited {
            visited.push(key.clone());
            match serde_json::to_string(&visited) {
                Ok(json) => {
                    if let Err(e) = self.storage.set(VISITED, &json) {
                        warn!("Failed to persist visit {}: {}", key, e);
                    }
                }
                Err(e) => error!("Failed to encode visited stations: {}", e),
            }
            info!("Station visited: {} ({}/{})", key, visited.len(), self.total);
        }

        self.ratio = self.ratio_for(visited.len());

        let journey_completed = visited.len() >= self.total && !self.completion_announced;
        if journey_completed {
            self.completion_announced = true;
            info!("All {} stations visited", self.total);
        }

        ProgressUpdate {
            visited: visited.len(),
            total: self.total,
            ratio: self.ratio,
            newly_visited,
            journey_completed,
        }
    }

    /// Snapshot for UI seeding and frontend queries.
    pub fn snapshot(&self) -> ProgressUpdate {
        let visited = self.visited().len();
        ProgressUpdate {
            visited,
            total: self.total,
            ratio: self.ratio_for(visited),
            newly_visited: false,
            journey_completed: false,
        }
    }

    /// Whether the welcome modal still needs to be shown.
    pub fn first_visit_pending(&self) -> bool {
        match self.storage.get(FIRST_VISIT) {
            Ok(value) => value.as_deref() != Some("true"),
            Err(e) => {
                warn!("First-visit flag unreadable, showing welcome: {}", e);
                true
            }
        }
    }

    pub fn acknowledge_welcome(&mut self) {
        if let Err(e) = self.storage.set(FIRST_VISIT, "true") {
            warn!("Failed to persist first-visit flag: {}", e);
        }
    }

    fn ratio_for(&self, visited: usize) -> f32 {
        if self.total == 0 {
            return 1.0;
        }
        (visited as f32 / self.total as f32).min(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interaction::storage::{InMemoryStore, StorageError};

    struct UnavailableStore;

    impl KeyValueStore for UnavailableStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable)
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable)
        }
    }

    fn store() -> ProgressStore {
        ProgressStore::new(Box::new(InMemoryStore::new()))
    }

    #[test]
    fn marking_twice_keeps_a_single_key_and_ratio() {
        let mut progress = store();

        let first = progress.mark_visited("fire", 2);
        let second = progress.mark_visited("fire", 2);

        assert_eq!(progress.visited(), vec!["fire-2".to_string()]);
        assert!(first.newly_visited);
        assert!(!second.newly_visited);
        assert_eq!(first.ratio, second.ratio);
        assert!((first.ratio - 1.0 / 18.0).abs() < f32::EPSILON);
    }

    #[test]
    fn corrupt_visited_value_reads_as_empty() {
        let storage = InMemoryStore::new().with_value(VISITED, "{\"oops\":");
        let mut progress = ProgressStore::new(Box::new(storage));

        assert!(progress.visited().is_empty());
        let update = progress.mark_visited("herb", 0);
        assert_eq!(update.visited, 1);
        assert_eq!(progress.visited(), vec!["herb-0".to_string()]);
    }

    #[test]
    fn duplicate_keys_in_storage_are_counted_once() {
        let storage = InMemoryStore::new().with_value(VISITED, r#"["cart-0","cart-0","fire-1"]"#);
        let progress = ProgressStore::new(Box::new(storage));

        assert_eq!(progress.snapshot().visited, 2);
    }

    #[test]
    fn unavailable_storage_fails_open() {
        let mut progress = ProgressStore::new(Box::new(UnavailableStore));

        assert!(progress.visited().is_empty());
        assert!(progress.first_visit_pending());
        let update = progress.mark_visited("garden", 0);
        assert_eq!(update.visited, 1);
        progress.acknowledge_welcome();
    }

    #[test]
    fn completion_fires_once_on_the_last_unique_station() {
        let mut progress = store();
        let mut completions = 0;

        for id in 1..=6 {
            completions += progress.mark_visited("cabin", id).journey_completed as usize;
        }
        for id in 0..6 {
            completions += progress.mark_visited("fire", id).journey_completed as usize;
        }
        for name in ["herb", "logpile", "garden", "cart", "fishing"] {
            completions += progress.mark_visited(name, 0).journey_completed as usize;
        }
        assert_eq!(completions, 0);

        let last = progress.mark_visited("memorial", 0);
        assert!(last.journey_completed);
        assert_eq!(last.ratio, 1.0);

        let again = progress.mark_visited("memorial", 0);
        assert!(!again.journey_completed);
        let other = progress.mark_visited("fire", 3);
        assert!(!other.journey_completed);
    }

    #[test]
    fn welcome_flag_is_persisted() {
        let mut progress = store();
        assert!(progress.first_visit_pending());
        progress.acknowledge_welcome();
        assert!(!progress.first_visit_pending());
    }

    #[test]
    fn visited_ids_filters_by_category() {
        let storage =
            InMemoryStore::new().with_value(VISITED, r#"["cabin-1","fire-1","cabin-4","cabin-x"]"#);
        let progress = ProgressStore::new(Box::new(storage));

        assert_eq!(progress.visited_ids("cabin"), vec![1, 4]);
        assert_eq!(progress.visited_ids("fire"), vec![1]);
    }
}
