// Binary cache store: the whole mapping as one opaque bincode blob.

use std::fs;
use std::path::PathBuf;

use tracing::warn;

use crate::error::{CacheError, Result};
use crate::store::{CacheStore, OrderedMap, ensure_backing_file};

/// Cache store persisted as a single binary blob.
#[derive(Debug)]
pub struct BlobStore {
    path: PathBuf,
    data: OrderedMap,
}

impl BlobStore {
    /// Open a store at `path`, creating the backing file if absent and
    /// loading it.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        ensure_backing_file(&path)?;

        let mut store = Self {
            path,
            data: OrderedMap::new(),
        };
        store.load()?;
        Ok(store)
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl CacheStore for BlobStore {
    fn load(&mut self) -> Result<()> {
        let bytes = fs::read(&self.path)?;
        if bytes.is_empty() {
            self.data = OrderedMap::new();
            return Ok(());
        }

        // A truncated or unreadable blob yields a cold cache, not a failure.
        match bincode::deserialize::<OrderedMap>(&bytes) {
            Ok(data) => self.data = data,
            Err(error) => {
                warn!(path = %self.path.display(), %error, "binary cache unreadable; starting empty");
                self.data = OrderedMap::new();
            }
        }
        Ok(())
    }

    fn save(&self) -> Result<()> {
        let bytes =
            bincode::serialize(&self.data).map_err(|e| CacheError::Blob(e.to_string()))?;
        fs::write(&self.path, bytes)?;
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
        let path = temp_dir.path().join("servers.bin");

        let mut store = BlobStore::open(&path).unwrap();
        store.set(
            "Arena EU #1",
            Value::Seq(vec![Value::from("198.51.100.7"), Value::Int(27015)]),
        );
        store.save().unwrap();

        let reopened = BlobStore::open(&path).unwrap();
        assert_eq!(reopened.data(), store.data());
    }

    #[test]
    fn test_truncated_blob_treated_as_empty() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("servers.bin");
        std::fs::write(&path, &[0x01, 0x02]).unwrap();

        let store = BlobStore::open(&path).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_empty_file_is_empty_store() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("servers.bin");

        let store = BlobStore::open(&path).unwrap();
        assert!(store.is_empty());
    }
}
