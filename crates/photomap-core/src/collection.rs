//! Session photo collection
//!
//! `PhotoCollection` is an explicitly owned, append-only list of located
//! photos. Handles are cheap to clone and share one underlying list; every
//! append bumps a revision that subscribers can watch to re-render.
//!
//! The lock is a `std::sync::RwLock` and is never held across an await.
//! Poisoning only happens if a writer panicked mid-push, which leaves the
//! session unusable anyway, so poisoned locks are recovered rather than
//! propagated.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tokio::sync::watch;

use crate::models::PhotoRecord;

#[derive(Debug, Clone)]
pub struct PhotoCollection {
    records: Arc<RwLock<Vec<PhotoRecord>>>,
    revision: Arc<watch::Sender<u64>>,
}

impl PhotoCollection {
    /// Create an empty collection for a new session
    pub fn new() -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            records: Arc::new(RwLock::new(Vec::new())),
            revision: Arc::new(revision),
        }
    }

    /// Append a record; returns its position in the collection
    pub fn append(&self, record: PhotoRecord) -> usize {
        let index = {
            let mut records = self.write();
            records.push(record);
            records.len() - 1
        };
        self.revision.send_modify(|rev| *rev += 1);
        index
    }

    /// Copy of the current records, in append order
    pub fn snapshot(&self) -> Vec<PhotoRecord> {
        self.read().clone()
    }

    /// Record at `index`, if present
    pub fn get(&self, index: usize) -> Option<PhotoRecord> {
        self.read().get(index).cloned()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Number of appends so far
    pub fn revision(&self) -> u64 {
        *self.revision.borrow()
    }

    /// Receiver notified after every append
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<PhotoRecord>> {
        self.records.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<PhotoRecord>> {
        self.records.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for PhotoCollection {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    fn record(name: &str) -> PhotoRecord {
        PhotoRecord {
            image_data: Bytes::from_static(b"img"),
            mime: "image/jpeg".to_string(),
            latitude: 1.0,
            longitude: 2.0,
            file_name: name.to_string(),
        }
    }

    #[test]
    fn test_new_is_empty() {
        let collection = PhotoCollection::new();
        assert!(collection.is_empty());
        assert_eq!(collection.revision(), 0);
    }

    #[test]
    fn test_append_bumps_revision() {
        let collection = PhotoCollection::new();
        assert_eq!(collection.append(record("a.jpg")), 0);
        assert_eq!(collection.append(record("b.jpg")), 1);

        assert_eq!(collection.len(), 2);
        assert_eq!(collection.revision(), 2);
        assert_eq!(collection.get(1).unwrap().file_name, "b.jpg");
        assert!(collection.get(2).is_none());
    }

    #[test]
    fn test_clones_share_state() {
        let collection = PhotoCollection::new();
        let handle = collection.clone();
        handle.append(record("a.jpg"));
        assert_eq!(collection.len(), 1);
    }

    #[test]
    fn test_duplicate_names_are_kept() {
        let collection = PhotoCollection::new();
        collection.append(record("same.jpg"));
        collection.append(record("same.jpg"));
        assert_eq!(collection.len(), 2);
    }

    #[tokio::test]
    async fn test_subscribers_see_appends() {
        let collection = PhotoCollection::new();
        let mut rx = collection.subscribe();

        collection.append(record("a.jpg"));
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_appends_are_not_lost() {
        let collection = PhotoCollection::new();
        let mut tasks = tokio::task::JoinSet::new();

        for i in 0..64 {
            let c = collection.clone();
            tasks.spawn(async move {
                c.append(record(&format!("{}.jpg", i)));
            });
        }
        while tasks.join_next().await.is_some() {}

        assert_eq!(collection.len(), 64);
        assert_eq!(collection.revision(), 64);
    }
}
