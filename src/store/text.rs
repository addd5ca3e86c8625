// Text-file cache store backed by the wire codec.
// File layout: literal `[VALID]` prefix followed by the wrapped-Map encoding
// of the whole mapping. A file without the prefix holds no data.

use std::fs;
use std::path::PathBuf;

use tracing::warn;

use crate::codec::{self, disorder_entries};
use crate::error::Result;
use crate::store::{CacheStore, OrderedMap, ensure_backing_file, ordered_from_value};

/// Marker proving the file carries an encoded mapping.
pub const VALID_MARKER: &str = "[VALID]";

/// Cache store persisted as codec text.
#[derive(Debug)]
pub struct TextStore {
    path: PathBuf,
    data: OrderedMap,
}

impl TextStore {
    /// Open a store at `path`, creating the backing file if absent and
    /// loading it. A file that fails to decode is reported and treated as
    /// empty; the store stays usable.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        ensure_backing_file(&path)?;

        let mut store = Self {
            path,
            data: OrderedMap::new(),
        };
        if let Err(error) = store.load() {
            warn!(path = %store.path.display(), %error, "text cache unreadable; starting empty");
            store.data.clear();
        }
        Ok(store)
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl CacheStore for TextStore {
    fn data(&self) -> &OrderedMap {
        &self.data
    }

    fn data_mut(&mut self) -> &mut OrderedMap {
        &mut self.data
    }

    fn load(&mut self) -> Result<()> {
        let text = fs::read_to_string(&self.path)?;
        let Some(payload) = text.trim_end().strip_prefix(VALID_MARKER) else {
            // No marker (including an empty file) means no data, not an error.
            self.data = OrderedMap::new();
            return Ok(());
        };

        let value = codec::decode(payload)?;
        self.data = ordered_from_value(value)?;
        Ok(())
    }

    fn save(&self) -> Result<()> {
        let body = codec::encode(&disorder_entries(self.data.iter()));
        fs::write(&self.path, format!("{VALID_MARKER}{body}"))?;
        Ok(())
    }
}
