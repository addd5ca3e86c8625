// Default cache file locations.
// One file per tracked dataset and backend encoding, under the platform
// cache directory.

use std::path::PathBuf;

use directories::ProjectDirs;

/// Base cache directory (~/.cache/wirecache on Linux).
pub fn cache_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "wirecache").map(|dirs| dirs.cache_dir().to_path_buf())
}

fn data_path(name: &str, extension: &str) -> Option<PathBuf> {
    cache_dir().map(|dir| dir.join(format!("{name}.{extension}")))
}

/// Profile status cache, codec text encoding.
pub fn profiles_text_path() -> Option<PathBuf> {
    data_path("profiles", "txt")
}

/// Profile status cache, binary blob encoding.
pub fn profiles_blob_path() -> Option<PathBuf> {
    data_path("profiles", "bin")
}

/// Profile status cache, JSON encoding.
pub fn profiles_json_path() -> Option<PathBuf> {
    data_path("profiles", "json")
}

/// Server name cache, codec text encoding.
pub fn servers_text_path() -> Option<PathBuf> {
    data_path("server_names", "txt")
}

/// Server name cache, binary blob encoding.
pub fn servers_blob_path() -> Option<PathBuf> {
    data_path("server_names", "bin")
}

/// Server name cache, JSON encoding.
pub fn servers_json_path() -> Option<PathBuf> {
    data_path("server_names", "json")
}
