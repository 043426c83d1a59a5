//! Named record collections.
//!
//! A [`CollectionStore`] keeps one ordered sequence of raw JSON records per
//! [`Collection`]. Reads never fail: a missing resource is an empty
//! collection, and anything unreadable or malformed is reported to the
//! store's [`StoreObserver`] and then treated as empty as well. Writes fully
//! overwrite the collection.

use std::{fmt, str::FromStr};

use serde_json::Value;

use crate::{EngineError, ResultEngine};

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

mod json_file;
mod memory;

pub const ID_FIELD: &str = "id";

/// The persisted collections, one per entity kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Collection {
    Users,
    Incomes,
    Expenses,
    Goals,
}

impl Collection {
    pub const ALL: [Collection; 4] = [
        Collection::Users,
        Collection::Incomes,
        Collection::Expenses,
        Collection::Goals,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::Incomes => "incomes",
            Self::Expenses => "expenses",
            Self::Goals => "goals",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Collection {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "users" => Ok(Self::Users),
            "incomes" => Ok(Self::Incomes),
            "expenses" => Ok(Self::Expenses),
            "goals" => Ok(Self::Goals),
            _ => Err(EngineError::UnknownCollection(s.to_string())),
        }
    }
}

/// A storage condition the fail-open read policy hides from callers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreAnomaly {
    /// The resource exists but could not be read.
    Unreadable { collection: Collection, reason: String },
    /// The resource was read but is not a JSON array.
    Malformed { collection: Collection, reason: String },
    /// A record id is missing or not an integer; it counted as 0.
    InvalidId { collection: Collection, id: Option<String> },
    /// The largest id leaves no room for a successor.
    IdOverflow { collection: Collection },
    /// A record does not decode into its entity type and was skipped.
    InvalidRecord {
        collection: Collection,
        index: usize,
        reason: String,
    },
}

impl fmt::Display for StoreAnomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unreadable { collection, reason } => {
                write!(f, "collection '{collection}' unreadable, treated as empty: {reason}")
            }
            Self::Malformed { collection, reason } => {
                write!(f, "collection '{collection}' malformed, treated as empty: {reason}")
            }
            Self::InvalidId { collection, id } => match id {
                Some(id) => write!(f, "collection '{collection}' has non numeric id '{id}'"),
                None => write!(f, "collection '{collection}' has a record without id"),
            },
            Self::IdOverflow { collection } => {
                write!(f, "collection '{collection}' has no id left after the largest one")
            }
            Self::InvalidRecord {
                collection,
                index,
                reason,
            } => write!(f, "collection '{collection}' record #{index} skipped: {reason}"),
        }
    }
}

/// Receives storage anomalies.
pub trait StoreObserver: Send + Sync {
    fn observe(&self, anomaly: StoreAnomaly);
}

/// Default observer, logs every anomaly as a warning.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingObserver;

impl StoreObserver for TracingObserver {
    fn observe(&self, anomaly: StoreAnomaly) {
        tracing::warn!("{anomaly}");
    }
}

/// Storage of named, ordered record collections.
pub trait CollectionStore {
    /// Stored records of `collection`, or an empty vector when the
    /// collection is absent or cannot be decoded.
    fn read_collection(&self, collection: Collection) -> Vec<Value>;

    /// Replace the whole collection with `records`, in order.
    fn write_collection(&self, collection: Collection, records: &[Value]) -> ResultEngine<()>;

    fn observer(&self) -> &dyn StoreObserver;

    /// Create any missing collection as an empty one. Existing data is kept.
    fn ensure_collections(&self) -> ResultEngine<()> {
        Ok(())
    }

    /// `max(id) + 1` over the collection, `"1"` when it is empty.
    ///
    /// Ids that are missing or not integers count as 0 and are reported.
    /// Ids are not bounded by `i64`; past `i128::MAX` the maximum is
    /// returned again and [`StoreAnomaly::IdOverflow`] is reported.
    fn next_id(&self, collection: Collection, id_field: &str) -> String {
        let mut max_id: i128 = 0;
        for record in self.read_collection(collection) {
            let raw = record.get(id_field).and_then(id_string);
            match raw.as_deref().map(|id| id.trim().parse::<i128>()) {
                Some(Ok(current)) => max_id = max_id.max(current),
                _ => self
                    .observer()
                    .observe(StoreAnomaly::InvalidId { collection, id: raw }),
            }
        }
        match max_id.checked_add(1) {
            Some(next) => next.to_string(),
            None => {
                self.observer().observe(StoreAnomaly::IdOverflow { collection });
                max_id.to_string()
            }
        }
    }

    /// Position of the first record whose id equals `id_value` as a string.
    fn find_index(&self, collection: Collection, id_value: &str, id_field: &str) -> Option<usize> {
        self.read_collection(collection)
            .iter()
            .position(|record| record_has_id(record, id_value, id_field))
    }
}

/// String form of an id value; numeric ids are stringified.
pub fn id_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

pub(crate) fn record_has_id(record: &Value, id_value: &str, id_field: &str) -> bool {
    record
        .get(id_field)
        .and_then(id_string)
        .is_some_and(|id| id == id_value)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use serde_json::json;

    use super::*;

    #[derive(Default)]
    struct Recorder(Mutex<Vec<StoreAnomaly>>);

    impl StoreObserver for Recorder {
        fn observe(&self, anomaly: StoreAnomaly) {
            self.0.lock().unwrap().push(anomaly);
        }
    }

    #[test]
    fn collection_names_parse_case_insensitively() {
        assert_eq!(" Incomes ".parse::<Collection>().unwrap(), Collection::Incomes);
        assert_eq!(
            "wallets".parse::<Collection>(),
            Err(EngineError::UnknownCollection("wallets".to_string()))
        );
    }

    #[test]
    fn next_id_starts_at_one() {
        let store = MemoryStore::new();
        assert_eq!(store.next_id(Collection::Incomes, ID_FIELD), "1");
    }

    #[test]
    fn next_id_uses_max_not_len() {
        let store = MemoryStore::new();
        store
            .write_collection(
                Collection::Incomes,
                &[json!({"id": "7"}), json!({"id": 3}), json!({"id": "2"})],
            )
            .unwrap();
        assert_eq!(store.next_id(Collection::Incomes, ID_FIELD), "8");
    }

    #[test]
    fn next_id_reports_unparsable_ids() {
        let recorder = Arc::new(Recorder::default());
        let store = MemoryStore::with_observer(recorder.clone());
        store
            .write_collection(
                Collection::Goals,
                &[json!({"id": "abc"}), json!({"name": "no id"}), json!({"id": "4"})],
            )
            .unwrap();

        assert_eq!(store.next_id(Collection::Goals, ID_FIELD), "5");
        let seen = recorder.0.lock().unwrap();
        assert_eq!(
            *seen,
            vec![
                StoreAnomaly::InvalidId {
                    collection: Collection::Goals,
                    id: Some("abc".to_string())
                },
                StoreAnomaly::InvalidId {
                    collection: Collection::Goals,
                    id: None
                },
            ]
        );
    }

    #[test]
    fn next_id_goes_past_i64_max() {
        let store = MemoryStore::new();
        store
            .write_collection(Collection::Incomes, &[json!({"id": "9223372036854775807"})])
            .unwrap();
        assert_eq!(
            store.next_id(Collection::Incomes, ID_FIELD),
            "9223372036854775808"
        );
    }

    #[test]
    fn next_id_reports_exhausted_ids() {
        let recorder = Arc::new(Recorder::default());
        let store = MemoryStore::with_observer(recorder.clone());
        let max = i128::MAX.to_string();
        store
            .write_collection(Collection::Goals, &[json!({ "id": max })])
            .unwrap();

        assert_eq!(store.next_id(Collection::Goals, ID_FIELD), max);
        assert_eq!(
            *recorder.0.lock().unwrap(),
            vec![StoreAnomaly::IdOverflow {
                collection: Collection::Goals
            }]
        );
    }

    #[test]
    fn find_index_first_match_wins() {
        let store = MemoryStore::new();
        store
            .write_collection(
                Collection::Expenses,
                &[
                    json!({"id": "1", "amount": 1}),
                    json!({"id": "2", "amount": 2}),
                    json!({"id": 2, "amount": 3}),
                ],
            )
            .unwrap();
        assert_eq!(store.find_index(Collection::Expenses, "2", ID_FIELD), Some(1));
        assert_eq!(store.find_index(Collection::Expenses, "9", ID_FIELD), None);
    }

    #[test]
    fn find_index_honours_custom_id_field() {
        let store = MemoryStore::new();
        store
            .write_collection(
                Collection::Users,
                &[json!({"code": "a"}), json!({"code": "b"})],
            )
            .unwrap();
        assert_eq!(store.find_index(Collection::Users, "b", "code"), Some(1));
    }
}
