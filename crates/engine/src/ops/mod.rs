use chrono::NaiveDate;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::{
    Catalog, EngineError, ResultEngine,
    dates::Clock,
    store::{Collection, CollectionStore, ID_FIELD, StoreAnomaly, record_has_id},
};

mod goals;
mod metrics;
mod transactions;
mod users;

/// Repositories and metrics over a [`CollectionStore`].
#[derive(Debug)]
pub struct Engine<S: CollectionStore> {
    store: S,
    catalog: Catalog,
    clock: Clock,
}

impl<S: CollectionStore> Engine<S> {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder<S> {
        EngineBuilder::default()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Create missing collections as empty ones.
    pub fn ensure_collections(&self) -> ResultEngine<()> {
        self.store.ensure_collections()
    }

    /// Decode every record of `collection`, skipping (and reporting) the
    /// ones that do not match `T`.
    fn load<T: DeserializeOwned>(&self, collection: Collection) -> Vec<T> {
        self.store
            .read_collection(collection)
            .into_iter()
            .enumerate()
            .filter_map(|(index, raw)| self.decode(collection, index, raw))
            .collect()
    }

    fn decode<T: DeserializeOwned>(
        &self,
        collection: Collection,
        index: usize,
        raw: Value,
    ) -> Option<T> {
        match serde_json::from_value(raw) {
            Ok(record) => Some(record),
            Err(err) => {
                self.store.observer().observe(StoreAnomaly::InvalidRecord {
                    collection,
                    index,
                    reason: err.to_string(),
                });
                None
            }
        }
    }

    fn append<T: Serialize>(&self, collection: Collection, record: &T) -> ResultEngine<()> {
        let mut rows = self.store.read_collection(collection);
        rows.push(serde_json::to_value(record)?);
        self.store.write_collection(collection, &rows)?;
        tracing::debug!("appended record to {collection} ({} total)", rows.len());
        Ok(())
    }

    /// Overwrite the record at `index`, which must come from `find_index`.
    fn replace_at<T: Serialize>(
        &self,
        collection: Collection,
        index: usize,
        record: &T,
        not_found: impl FnOnce() -> EngineError,
    ) -> ResultEngine<()> {
        let mut rows = self.store.read_collection(collection);
        let slot = rows.get_mut(index).ok_or_else(not_found)?;
        *slot = serde_json::to_value(record)?;
        self.store.write_collection(collection, &rows)?;
        tracing::debug!("replaced record #{index} of {collection}");
        Ok(())
    }

    /// Remove every record with `id` (trimmed). Returns how many were removed.
    fn remove_by_id(&self, collection: Collection, id: &str) -> ResultEngine<usize> {
        let id = id.trim();
        let mut rows = self.store.read_collection(collection);
        let before = rows.len();
        rows.retain(|row| !record_has_id(row, id, ID_FIELD));
        let removed = before - rows.len();
        if removed > 0 {
            self.store.write_collection(collection, &rows)?;
            tracing::debug!("removed {removed} record(s) with id {id} from {collection}");
        }
        Ok(removed)
    }

    fn locate(&self, collection: Collection, id: &str) -> Option<usize> {
        self.store.find_index(collection, id, ID_FIELD)
    }
}

/// Id of an update payload, trimmed. Missing or blank ids are an error.
fn required_id(id: Option<&str>) -> ResultEngine<&str> {
    id.map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or(EngineError::MissingId)
}

/// The builder for `Engine`
pub struct EngineBuilder<S> {
    store: Option<S>,
    catalog: Catalog,
    clock: Clock,
}

impl<S> Default for EngineBuilder<S> {
    fn default() -> Self {
        Self {
            store: None,
            catalog: Catalog::default(),
            clock: Clock::System,
        }
    }
}

impl<S: CollectionStore> EngineBuilder<S> {
    /// Pass the required store
    pub fn store(mut self, store: S) -> EngineBuilder<S> {
        self.store = Some(store);
        self
    }

    /// Override the default categories and statuses
    pub fn catalog(mut self, catalog: Catalog) -> EngineBuilder<S> {
        self.catalog = catalog;
        self
    }

    /// Pin "today" instead of reading the system clock
    pub fn today(mut self, date: NaiveDate) -> EngineBuilder<S> {
        self.clock = Clock::Fixed(date);
        self
    }

    /// Construct `Engine`
    pub fn build(self) -> ResultEngine<Engine<S>> {
        let store = self
            .store
            .ok_or_else(|| EngineError::Storage("no store configured".to_string()))?;
        Ok(Engine {
            store,
            catalog: self.catalog,
            clock: self.clock,
        })
    }
}
