use analytics::AnalysisSnapshot;
use std::sync::Arc;

/// Holds the most recent snapshot keyed by the history's final sequence index.
///
/// The key alone cannot tell a fresh history from one that was reset and refilled to
/// the same length, so the owner must call `invalidate` on every mutation.
#[derive(Debug, Default)]
pub struct SnapshotCache {
    entry: Option<(Option<u64>, Arc<AnalysisSnapshot>)>,
    hits: u64,
    misses: u64,
}

impl SnapshotCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached snapshot for `key`, or builds, stores and returns a new one.
    pub fn get_or_insert_with<F>(&mut self, key: Option<u64>, build: F) -> Arc<AnalysisSnapshot>
    where
        F: FnOnce() -> AnalysisSnapshot,
    {
        if let Some((cached_key, snapshot)) = &self.entry {
            if *cached_key == key {
                self.hits += 1;
                tracing::debug!(key = ?key, "Snapshot cache hit");
                return Arc::clone(snapshot);
            }
        }

        self.misses += 1;
        tracing::debug!(key = ?key, "Snapshot cache miss");
        let snapshot = Arc::new(build());
        self.entry = Some((key, Arc::clone(&snapshot)));
        snapshot
    }

    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    pub fn is_empty(&self) -> bool {
        self.entry.is_none()
    }

    /// `(hits, misses)` since creation.
    pub fn stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_key_reuses_snapshot() {
        let mut cache = SnapshotCache::new();
        let first = cache.get_or_insert_with(Some(3), AnalysisSnapshot::default);
        let second = cache.get_or_insert_with(Some(3), || panic!("should not rebuild"));
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.stats(), (1, 1));
    }

    #[test]
    fn test_new_key_rebuilds() {
        let mut cache = SnapshotCache::new();
        let first = cache.get_or_insert_with(Some(3), AnalysisSnapshot::default);
        let second = cache.get_or_insert_with(Some(4), AnalysisSnapshot::empty);
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(cache.stats(), (0, 2));
    }

    #[test]
    fn test_invalidate_forces_rebuild() {
        let mut cache = SnapshotCache::new();
        cache.get_or_insert_with(None, AnalysisSnapshot::empty);
        cache.invalidate();
        assert!(cache.is_empty());
        cache.get_or_insert_with(None, AnalysisSnapshot::empty);
        assert_eq!(cache.stats(), (0, 2));
    }
}
