//! In-memory remote document store.
//!
//! Stands in for a hosted document database in tests and single-process
//! deployments. Clones share one backing map, so two sessions holding clones
//! behave like two devices on the same account.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use hashbrown::HashMap;
use tokio::sync::broadcast;

use crate::record::ProgressRecord;

use super::{RemoteDocs, RemoteResult};

const WATCH_CAPACITY: usize = 64;

#[derive(Default)]
struct Shared {
    documents: HashMap<String, ProgressRecord>,
    watchers: HashMap<String, broadcast::Sender<ProgressRecord>>,
    write_counts: HashMap<String, u64>,
}

impl Shared {
    fn store(&mut self, user_id: &str, record: ProgressRecord) {
        self.documents.insert(user_id.to_string(), record.clone());
        *self.write_counts.entry(user_id.to_string()).or_insert(0) += 1;
        if let Some(tx) = self.watchers.get(user_id) {
            let _ = tx.send(record);
        }
    }
}

/// Shared in-memory implementation of [`RemoteDocs`].
#[derive(Clone, Default)]
pub struct MemoryRemote {
    shared: Arc<Mutex<Shared>>,
}

impl MemoryRemote {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current document for `user_id`, if any.
    pub fn document(&self, user_id: &str) -> Option<ProgressRecord> {
        self.lock().documents.get(user_id).cloned()
    }

    /// Number of completed writes against `user_id`'s document.
    pub fn write_count(&self, user_id: &str) -> u64 {
        self.lock().write_counts.get(user_id).copied().unwrap_or(0)
    }

    /// Overwrites a document directly, as another device would.
    pub fn publish(&self, user_id: &str, record: ProgressRecord) {
        self.lock().store(user_id, record);
    }

    fn lock(&self) -> MutexGuard<'_, Shared> {
        self.shared.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl RemoteDocs for MemoryRemote {
    fn get(&mut self, user_id: &str) -> RemoteResult<Option<ProgressRecord>> {
        Ok(self.lock().documents.get(user_id).cloned())
    }

    fn set(&mut self, user_id: &str, record: &ProgressRecord) -> RemoteResult<()> {
        self.lock().store(user_id, record.clone());
        Ok(())
    }

    fn watch(&mut self, user_id: &str) -> RemoteResult<broadcast::Receiver<ProgressRecord>> {
        let mut shared = self.lock();
        let tx = shared
            .watchers
            .entry(user_id.to_string())
            .or_insert_with(|| broadcast::channel(WATCH_CAPACITY).0);
        Ok(tx.subscribe())
    }
}
