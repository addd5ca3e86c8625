// wirecache: text wire codec + ordered file-backed caches.
// Core of a game-server/profile tracker; network and UI layers live elsewhere.

pub mod codec;
pub mod error;
pub mod managers;
pub mod store;

pub use codec::{DecodeError, Tag, Value, decode, encode};
pub use error::{CacheError, Result};
pub use managers::{ProfileStatusCache, ServerNameCache};
pub use store::{BlobStore, CacheStore, JsonStore, OrderedMap, TextStore};
