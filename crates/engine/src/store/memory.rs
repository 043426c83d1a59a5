//! In-memory collection store, used by tests and ephemeral runs.

use std::{
    collections::HashMap,
    sync::{Arc, PoisonError, RwLock},
};

use serde_json::Value;

use super::{Collection, CollectionStore, StoreObserver, TracingObserver};
use crate::ResultEngine;

/// Collections kept in a shared map. Clones share the same data.
#[derive(Clone)]
pub struct MemoryStore {
    collections: Arc<RwLock<HashMap<Collection, Vec<Value>>>>,
    observer: Arc<dyn StoreObserver>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_observer(Arc::new(TracingObserver))
    }

    pub fn with_observer(observer: Arc<dyn StoreObserver>) -> Self {
        Self {
            collections: Arc::new(RwLock::new(HashMap::new())),
            observer,
        }
    }
}

impl CollectionStore for MemoryStore {
    fn read_collection(&self, collection: Collection) -> Vec<Value> {
        let collections = self
            .collections
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        collections.get(&collection).cloned().unwrap_or_default()
    }

    fn write_collection(&self, collection: Collection, records: &[Value]) -> ResultEngine<()> {
        let mut collections = self
            .collections
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        collections.insert(collection, records.to_vec());
        Ok(())
    }

    fn observer(&self) -> &dyn StoreObserver {
        self.observer.as_ref()
    }

    fn ensure_collections(&self) -> ResultEngine<()> {
        let mut collections = self
            .collections
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        for collection in Collection::ALL {
            collections.entry(collection).or_default();
        }
        Ok(())
    }
}

impl std::fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryStore").finish_non_exhaustive()
    }
}
