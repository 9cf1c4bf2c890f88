//! Active snapshot holder with copy-on-replace semantics
//!
//! Readers clone the `Arc` under a short read lock and keep using that
//! snapshot for the whole call, so a concurrent swap never tears a read.

use crate::snapshot::KnowledgeSnapshot;
use parking_lot::RwLock;
use std::sync::Arc;

#[derive(Debug, Default)]
pub struct SnapshotStore {
    current: RwLock<Option<Arc<KnowledgeSnapshot>>>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<Arc<KnowledgeSnapshot>> {
        self.current.read().clone()
    }

    /// Swap in a new snapshot and return the previous one.
    pub fn replace(&self, snapshot: Arc<KnowledgeSnapshot>) -> Option<Arc<KnowledgeSnapshot>> {
        self.current.write().replace(snapshot)
    }

    pub fn clear(&self) -> Option<Arc<KnowledgeSnapshot>> {
        self.current.write().take()
    }

    pub fn is_loaded(&self) -> bool {
        self.current.read().is_some()
    }

    pub fn version(&self) -> Option<String> {
        self.current.read().as_ref().map(|s| s.version().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_keeps_captured_snapshot() {
        let store = SnapshotStore::new();
        assert!(!store.is_loaded());

        let first = KnowledgeSnapshot::builtin().unwrap();
        assert!(store.replace(first.clone()).is_none());
        let captured = store.current().unwrap();

        let second = Arc::new((*first).clone());
        let previous = store.replace(second).unwrap();
        assert!(Arc::ptr_eq(&previous, &first));
        assert!(Arc::ptr_eq(&captured, &first));
        assert_eq!(store.version().as_deref(), Some(first.version()));
    }

    #[test]
    fn test_clear() {
        let store = SnapshotStore::new();
        store.replace(KnowledgeSnapshot::builtin().unwrap());
        assert!(store.clear().is_some());
        assert!(store.current().is_none());
    }
}
