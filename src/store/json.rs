// JSON cache store: the structured, human-editable backend.

use std::fs;
use std::path::PathBuf;

use tracing::warn;

use crate::error::Result;
use crate::store::{CacheStore, OrderedMap, ensure_backing_file};

/// Cache store persisted as pretty-printed JSON.
#[derive(Debug)]
pub struct JsonStore {
    path: PathBuf,
    data: OrderedMap,
}

impl JsonStore {
    /// Open a store at `path`, creating the backing file if absent and
    /// loading it. Unparseable JSON is reported and treated as empty.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        ensure_backing_file(&path)?;

        let mut store = Self {
            path,
            data: OrderedMap::new(),
        };
        if let Err(error) = store.load() {
            warn!(path = %store.path.display(), %error, "JSON cache unreadable; starting empty");
            store.data.clear();
        }
        Ok(store)
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl CacheStore for JsonStore {
    fn load(&mut self) -> Result<()> {
        let text = fs::read_to_string(&self.path)?;
        if text.trim().is_empty() {
            self.data = OrderedMap::new();
            return Ok(());
        }
        self.data = serde_json::from_str(&text)?;
        Ok(())
    }

    fn save(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.data)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    fn data(&self) -> &OrderedMap {
        &self.data
    }

    fn data_mut(&mut self) -> &mut OrderedMap {
        &mut self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::Value;
    use tempfile::TempDir;

    #[test]
    fn test_save_then_reload_round_trips() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("names.json");

        let mut store = JsonStore::open(&path).unwrap();
        store.set(
            "link1",
            Value::Map(vec![(Value::from("on"), Value::Bool(true))]),
        );
        store.save().unwrap();

        let reopened = JsonStore::open(&path).unwrap();
        assert_eq!(reopened.data(), store.data());
    }

    #[test]
    fn test_empty_file_is_empty_store() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("names.json");

        let store = JsonStore::open(&path).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_unparseable_json_surfaces_from_load_but_not_open() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("names.json");
        std::fs::write(&path, "{ not json").unwrap();

        let mut store = JsonStore::open(&path).unwrap();
        assert!(store.is_empty());
        assert!(store.load().is_err());
    }
}
