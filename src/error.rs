// Error types for the wirecache library.
// Covers codec failures, store I/O, and reorder contract violations.

use thiserror::Error;

use crate::codec::DecodeError;

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("binary cache error: {0}")]
    Blob(String),

    #[error("cache payload corrupt: {0}")]
    Corrupt(String),

    #[error("reorder keys do not cover cached key {key:?}")]
    ReorderMismatch { key: String },
}

pub type Result<T> = std::result::Result<T, CacheError>;
