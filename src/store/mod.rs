// Ordered cache stores: an in-memory ordered mapping synchronized with one
// external file by explicit load/save. The in-memory mapping is the source
// of truth during a session; nothing is flushed implicitly on drop.

use std::fs::OpenOptions;
use std::path::Path;

use crate::codec::Value;
use crate::error::{CacheError, Result};

pub mod blob;
pub mod json;
pub mod ordered;
pub mod paths;
pub mod text;

pub use blob::BlobStore;
pub use json::JsonStore;
pub use ordered::OrderedMap;
pub use text::TextStore;

/// A cache store: one in-memory ordered mapping plus one external copy.
///
/// `load` replaces the whole mapping from the external copy; `save`
/// overwrites the whole external copy from the mapping. Everything else
/// touches memory only. Not safe for concurrent mutation.
pub trait CacheStore {
    fn data(&self) -> &OrderedMap;

    fn data_mut(&mut self) -> &mut OrderedMap;

    /// Replace the in-memory mapping from the external copy.
    fn load(&mut self) -> Result<()>;

    /// Overwrite the external copy from the in-memory mapping.
    fn save(&self) -> Result<()>;

    fn get(&self, key: &str) -> Option<&Value> {
        self.data().get(key)
    }

    fn set(&mut self, key: impl Into<String>, value: Value) {
        self.data_mut().insert(key.into(), value);
    }

    fn delete(&mut self, key: &str) -> Option<Value> {
        self.data_mut().remove(key)
    }

    fn contains(&self, key: &str) -> bool {
        self.data().contains_key(key)
    }

    fn keys(&self) -> impl Iterator<Item = &str> {
        self.data().keys()
    }

    fn values(&self) -> impl Iterator<Item = &Value> {
        self.data().values()
    }

    fn entries(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.data().iter()
    }

    fn len(&self) -> usize {
        self.data().len()
    }

    fn is_empty(&self) -> bool {
        self.data().is_empty()
    }

    /// Reorder the in-memory mapping to match `keys`; all-or-nothing.
    fn reorder<S: AsRef<str>>(&mut self, keys: &[S]) -> Result<()> {
        self.data_mut().reorder(keys)
    }
}

/// Create the backing file (and parent directories) if absent, without
/// truncating an existing one.
pub(crate) fn ensure_backing_file(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    OpenOptions::new().append(true).create(true).open(path)?;
    Ok(())
}

/// Convert a decoded top-level payload into the store mapping. The payload
/// must be a map with text keys.
pub(crate) fn ordered_from_value(value: Value) -> Result<OrderedMap> {
    let Value::Map(entries) = value else {
        return Err(CacheError::Corrupt("cache payload is not a map".into()));
    };

    let mut map = OrderedMap::with_capacity(entries.len());
    for (key, val) in entries {
        match key {
            Value::Text(key) => map.insert(key, val),
            other => {
                return Err(CacheError::Corrupt(format!(
                    "non-text cache key: {other:?}"
                )));
            }
        }
    }
    Ok(map)
}
