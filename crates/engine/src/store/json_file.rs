//! JSON documents on disk, one `<collection>.json` file per collection.

use std::{
    fs::{self, File},
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
    sync::Arc,
};

use serde_json::Value;

use super::{Collection, CollectionStore, StoreAnomaly, StoreObserver, TracingObserver};
use crate::ResultEngine;

/// File backed store rooted at a data directory.
#[derive(Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
    observer: Arc<dyn StoreObserver>,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self::with_observer(dir, Arc::new(TracingObserver))
    }

    pub fn with_observer(dir: impl Into<PathBuf>, observer: Arc<dyn StoreObserver>) -> Self {
        Self {
            dir: dir.into(),
            observer,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self, collection: Collection) -> PathBuf {
        self.dir.join(format!("{}.json", collection.as_str()))
    }

    fn temp_path(&self, collection: Collection) -> PathBuf {
        self.dir.join(format!(".{}.json.tmp", collection.as_str()))
    }
}

impl CollectionStore for JsonFileStore {
    fn read_collection(&self, collection: Collection) -> Vec<Value> {
        let content = match fs::read_to_string(self.path(collection)) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => return Vec::new(),
            Err(err) => {
                self.observer.observe(StoreAnomaly::Unreadable {
                    collection,
                    reason: err.to_string(),
                });
                return Vec::new();
            }
        };

        match serde_json::from_str::<Value>(&content) {
            Ok(Value::Array(records)) => records,
            Ok(_) => {
                self.observer.observe(StoreAnomaly::Malformed {
                    collection,
                    reason: "document is not an array".to_string(),
                });
                Vec::new()
            }
            Err(err) => {
                self.observer.observe(StoreAnomaly::Malformed {
                    collection,
                    reason: err.to_string(),
                });
                Vec::new()
            }
        }
    }

    /// The document is written to a temporary sibling, synced, then renamed
    /// over the destination.
    fn write_collection(&self, collection: Collection, records: &[Value]) -> ResultEngine<()> {
        fs::create_dir_all(&self.dir)?;
        let payload = serde_json::to_vec_pretty(records)?;
        let temp = self.temp_path(collection);

        let written = (|| -> std::io::Result<()> {
            let mut file = File::create(&temp)?;
            file.write_all(&payload)?;
            file.sync_all()?;
            fs::rename(&temp, self.path(collection))
        })();

        if let Err(err) = written {
            let _ = fs::remove_file(&temp);
            return Err(err.into());
        }
        tracing::debug!(
            "wrote {} records to {}",
            records.len(),
            self.path(collection).display()
        );
        Ok(())
    }

    fn observer(&self) -> &dyn StoreObserver {
        self.observer.as_ref()
    }

    fn ensure_collections(&self) -> ResultEngine<()> {
        fs::create_dir_all(&self.dir)?;
        for collection in Collection::ALL {
            let path = self.path(collection);
            if !path.exists() {
                fs::write(&path, "[]")?;
                tracing::info!("created empty collection {}", path.display());
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for JsonFileStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonFileStore")
            .field("dir", &self.dir)
            .finish_non_exhaustive()
    }
}
