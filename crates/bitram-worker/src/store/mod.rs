//! Versioned response store.
//!
//! The store maps a [`RequestDescriptor`] to a previously served response
//! inside a named generation. Entries are overwritten on every fresh
//! fetch and evicted only when their whole generation is deleted during
//! an activate transition; there is no per-entry expiry.
//!
//! The store is a constructor-injected dependency of the worker so hosts
//! can substitute their own backend. Two implementations ship here:
//! [`MemoryStore`] and the JSON-file-backed [`DiskStore`].

mod disk;
mod memory;

pub use disk::DiskStore;
pub use memory::MemoryStore;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{FetchResponse, RequestDescriptor};

/// A stored response plus the moment it was written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    pub response: FetchResponse,
    pub cached_at: DateTime<Utc>,
}

impl CacheEntry {
    pub fn new(response: FetchResponse) -> Self {
        Self {
            response,
            cached_at: Utc::now(),
        }
    }
}

/// Backend operations for the versioned response store.
///
/// Writers racing on the same key within a generation are last-write-wins;
/// the store is never asked to serialize them.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Look up the entry for a descriptor in the given generation.
    async fn get(&self, version: &str, descriptor: &RequestDescriptor)
        -> Result<Option<CacheEntry>>;

    /// Write (or overwrite) an entry, creating the generation on demand.
    async fn put(
        &self,
        version: &str,
        descriptor: &RequestDescriptor,
        entry: CacheEntry,
    ) -> Result<()>;

    /// Names of every generation currently present.
    async fn list_versions(&self) -> Result<Vec<String>>;

    /// Drop a whole generation and everything in it. Returns whether it
    /// existed.
    async fn delete_version(&self, version: &str) -> Result<bool>;
}
