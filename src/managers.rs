// Reconciliation managers layered over a cache store.
// Each one enforces a single domain invariant at construction (pruning stale
// profile links, deduplicating server addresses) and leaves persistence to
// an explicit commit.

use std::collections::HashSet;

use tracing::debug;

use crate::codec::Value;
use crate::error::Result;
use crate::store::CacheStore;

/// The fallback answer when a profile has no usable cached status.
pub fn unknown_status() -> Vec<Option<String>> {
    vec![None]
}

/// Cache of profile links to their last known status and flags.
///
/// Construction prunes every entry whose link is no longer tracked, so the
/// cache only ever answers for the current universe of links.
pub struct ProfileStatusCache<S: CacheStore> {
    store: S,
}

impl<S: CacheStore> ProfileStatusCache<S> {
    pub fn new(store: S, tracked_links: &HashSet<String>) -> Self {
        let mut cache = Self { store };
        cache.prune_untracked(tracked_links);
        cache
    }

    fn prune_untracked(&mut self, tracked_links: &HashSet<String>) {
        let stale: Vec<String> = self
            .store
            .keys()
            .filter(|link| !tracked_links.contains(*link))
            .map(str::to_owned)
            .collect();
        for link in stale {
            debug!(%link, "dropping untracked profile from cache");
            self.store.delete(&link);
        }
    }

    /// Last known status fields for a link, or the unknown marker.
    ///
    /// Never fails: a missing link, an empty stored status, or a stored
    /// record of the wrong shape all answer unknown.
    pub fn current_status(&self, link: &str) -> Vec<Option<String>> {
        let Some(info) = self.store.get(link) else {
            debug!(%link, "profile not found in cache");
            return unknown_status();
        };

        let status: Vec<Option<String>> = info
            .entry("current_status")
            .and_then(Value::as_seq)
            .map(|fields| {
                fields
                    .iter()
                    .map(|field| field.as_text().map(str::to_owned))
                    .collect()
            })
            .unwrap_or_default();

        if status.is_empty() {
            return unknown_status();
        }
        debug!(%link, ?status, "profile found in cache");
        status
    }

    /// Record the current status fields and flags for a link in memory;
    /// nothing reaches the external copy until `commit`.
    pub fn record_status(
        &mut self,
        link: impl Into<String>,
        statuses: &[&str],
        flags: &[(&str, bool)],
    ) {
        let info = Value::Map(vec![
            (
                Value::from("current_status"),
                Value::Seq(statuses.iter().map(|s| Value::from(*s)).collect()),
            ),
            (
                Value::from("flags"),
                Value::Map(
                    flags
                        .iter()
                        .map(|(name, on)| (Value::from(*name), Value::Bool(*on)))
                        .collect(),
                ),
            ),
        ]);
        self.store.set(link, info);
    }

    /// Reorder cached links to match the given sequence; all-or-nothing.
    pub fn reorder<K: AsRef<str>>(&mut self, links: &[K]) -> Result<()> {
        self.store.reorder(links)
    }

    /// Persist the in-memory cache to the external copy.
    pub fn commit(&self) -> Result<()> {
        self.store.save()
    }

    /// Discard in-memory changes by reloading the external copy.
    pub fn refresh(&mut self) -> Result<()> {
        self.store.load()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}

/// Cache of server names to their addresses.
///
/// Server names change while addresses stay put, which leaves two names
/// pointing at one server. Construction drops every entry whose value was
/// already seen earlier in iteration order, so the earliest name survives.
pub struct ServerNameCache<S: CacheStore> {
    store: S,
}

impl<S: CacheStore> ServerNameCache<S> {
    pub fn new(store: S) -> Self {
        let mut cache = Self { store };
        cache.dedupe_addresses();
        cache
    }

    fn dedupe_addresses(&mut self) {
        let mut seen: Vec<Value> = Vec::new();
        let names: Vec<String> = self.store.keys().map(str::to_owned).collect();
        for name in names {
            let Some(address) = self.store.get(&name) else {
                continue;
            };
            if seen.contains(address) {
                debug!(%name, "dropping duplicate server name from cache");
                self.store.delete(&name);
            } else {
                seen.push(address.clone());
            }
        }
    }

    /// Persist the in-memory cache to the external copy.
    pub fn commit(&self) -> Result<()> {
        self.store.save()
    }

    /// Discard in-memory changes by reloading the external copy.
    pub fn refresh(&mut self) -> Result<()> {
        self.store.load()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::TextStore;
    use tempfile::TempDir;

    fn open_store(dir: &TempDir, name: &str) -> TextStore {
        TextStore::open(dir.path().join(name)).unwrap()
    }

    fn tracked(links: &[&str]) -> HashSet<String> {
        links.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_prune_removes_untracked_links() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = open_store(&temp_dir, "profiles.txt");
        store.set("A", Value::Int(1));
        store.set("B", Value::Int(2));
        store.set("C", Value::Int(3));

        let cache = ProfileStatusCache::new(store, &tracked(&["A", "C"]));
        assert_eq!(cache.store().keys().collect::<Vec<_>>(), vec!["A", "C"]);
    }

    #[test]
    fn test_current_status_fallbacks() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = open_store(&temp_dir, "profiles.txt");
        // Entry with an empty status sequence.
        store.set(
            "empty",
            Value::Map(vec![(Value::from("current_status"), Value::Seq(vec![]))]),
        );
        // Entry with the wrong shape entirely.
        store.set("odd", Value::Int(7));

        let cache = ProfileStatusCache::new(store, &tracked(&["empty", "odd"]));
        assert_eq!(cache.current_status("missing"), vec![None]);
        assert_eq!(cache.current_status("empty"), vec![None]);
        assert_eq!(cache.current_status("odd"), vec![None]);
    }

    #[test]
    fn test_record_then_read_status() {
        let temp_dir = TempDir::new().unwrap();
        let store = open_store(&temp_dir, "profiles.txt");

        let mut cache = ProfileStatusCache::new(store, &tracked(&[]));
        cache.record_status(
            "link1",
            &["in-game", "Arena EU #1"],
            &[("notify", true), ("muted", false)],
        );

        assert_eq!(
            cache.current_status("link1"),
            vec![Some("in-game".to_owned()), Some("Arena EU #1".to_owned())]
        );
        let flags = cache.store().get("link1").unwrap().entry("flags").unwrap();
        assert_eq!(flags.entry("notify").and_then(Value::as_bool), Some(true));
    }

    #[test]
    fn test_write_through_visible_after_commit_and_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("profiles.txt");

        let mut cache =
            ProfileStatusCache::new(TextStore::open(&path).unwrap(), &tracked(&[]));
        cache.record_status("link1", &["online"], &[]);
        cache.commit().unwrap();

        let reopened = ProfileStatusCache::new(
            TextStore::open(&path).unwrap(),
            &tracked(&["link1"]),
        );
        assert_eq!(
            reopened.current_status("link1"),
            vec![Some("online".to_owned())]
        );
    }

    #[test]
    fn test_refresh_discards_uncommitted_changes() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("profiles.txt");

        let mut cache =
            ProfileStatusCache::new(TextStore::open(&path).unwrap(), &tracked(&[]));
        cache.record_status("link1", &["online"], &[]);
        cache.commit().unwrap();

        cache.record_status("link1", &["offline"], &[]);
        cache.refresh().unwrap();
        assert_eq!(
            cache.current_status("link1"),
            vec![Some("online".to_owned())]
        );
    }

    #[test]
    fn test_reorder_mismatch_surfaces_and_preserves_order() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = open_store(&temp_dir, "profiles.txt");
        store.set("A", Value::Int(1));
        store.set("B", Value::Int(2));

        let mut cache = ProfileStatusCache::new(store, &tracked(&["A", "B"]));
        assert!(cache.reorder(&["A", "Z"]).is_err());
        assert_eq!(cache.store().keys().collect::<Vec<_>>(), vec!["A", "B"]);

        cache.reorder(&["B", "A"]).unwrap();
        assert_eq!(cache.store().keys().collect::<Vec<_>>(), vec!["B", "A"]);
    }

    #[test]
    fn test_dedupe_keeps_earliest_name() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = open_store(&temp_dir, "servers.txt");
        store.set("k1", Value::from("v"));
        store.set("k2", Value::from("v"));
        store.set("k3", Value::from("w"));

        let cache = ServerNameCache::new(store);
        assert_eq!(cache.store().keys().collect::<Vec<_>>(), vec!["k1", "k3"]);
    }

    #[test]
    fn test_dedupe_on_address_pairs() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = open_store(&temp_dir, "servers.txt");
        let addr = |ip: &str, port: i64| Value::Seq(vec![Value::from(ip), Value::Int(port)]);
        store.set("Old Arena Name", addr("198.51.100.7", 27015));
        store.set("New Arena Name", addr("198.51.100.7", 27015));
        store.set("Other Server", addr("198.51.100.8", 27015));

        let cache = ServerNameCache::new(store);
        assert_eq!(
            cache.store().keys().collect::<Vec<_>>(),
            vec!["Old Arena Name", "Other Server"]
        );
    }
}
