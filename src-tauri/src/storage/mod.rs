//! Key/value persistence with JSON documents.
//!
//! `KeyValueStore` is the raw string store (SQLite on desktop, memory in tests
//! or when the database cannot be opened). `StoreAdapter` layers serde on top
//! and contains every failure: reads degrade to "nothing stored", writes are
//! logged and reported but never abort the caller.

use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

use crate::config::DEFAULT_QUOTA_BYTES;
use crate::{log_debug, log_error, log_warn};

pub mod keys;
pub mod memory;
mod migrations;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

const ENABLE_LOGS: bool = true;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage backend error: {0}")]
    Backend(#[from] rusqlite::Error),

    #[error("failed to serialize document '{key}': {source}")]
    Serialization {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("document '{key}' is {size} bytes, over the {limit} byte quota")]
    QuotaExceeded {
        key: String,
        size: usize,
        limit: usize,
    },

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Raw string storage scoped to this installation. No expiry.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

#[derive(Clone)]
pub struct StoreAdapter {
    backend: Arc<dyn KeyValueStore>,
    quota_bytes: usize,
}

impl StoreAdapter {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self::with_quota(backend, DEFAULT_QUOTA_BYTES)
    }

    pub fn with_quota(backend: Arc<dyn KeyValueStore>, quota_bytes: usize) -> Self {
        Self {
            backend,
            quota_bytes,
        }
    }

    /// In-memory adapter; nothing survives the process.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// Load and decode the document under `key`.
    ///
    /// Backend failures and malformed JSON are logged and reported as `None`.
    pub fn read<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.backend.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                log_debug!("No stored document under '{}'", key);
                return None;
            }
            Err(err) => {
                log_warn!("Failed to read '{}': {}", key, err);
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(err) => {
                log_warn!("Ignoring malformed document under '{}': {}", key, err);
                None
            }
        }
    }

    /// Encode `value` and store it under `key`, replacing the previous document.
    pub fn write<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let result = self.try_write(key, value);
        if let Err(err) = &result {
            log_error!("Failed to persist '{}': {}", key, err);
        }
        result
    }

    pub fn remove(&self, key: &str) -> Result<(), StoreError> {
        let result = self.backend.remove(key);
        if let Err(err) = &result {
            log_error!("Failed to remove '{}': {}", key, err);
        }
        result
    }

    fn try_write<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let serialized =
            serde_json::to_string(value).map_err(|source| StoreError::Serialization {
                key: key.to_string(),
                source,
            })?;

        if serialized.len() > self.quota_bytes {
            return Err(StoreError::QuotaExceeded {
                key: key.to_string(),
                size: serialized.len(),
                limit: self.quota_bytes,
            });
        }

        self.backend.set(key, &serialized)?;
        log_debug!("Persisted '{}' ({} bytes)", key, serialized.len());
        Ok(())
    }
}
