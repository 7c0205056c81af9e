//! In-memory store, the reference backend and the substitution point for
//! tests.

use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{CacheEntry, CacheStore};
use crate::models::RequestDescriptor;

#[derive(Default)]
pub struct MemoryStore {
    versions: RwLock<HashMap<String, HashMap<RequestDescriptor, CacheEntry>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries in a generation; zero when it does not exist.
    pub async fn entry_count(&self, version: &str) -> usize {
        self.versions
            .read()
            .await
            .get(version)
            .map(|entries| entries.len())
            .unwrap_or(0)
    }
}

#[async_trait]
impl CacheStore for MemoryStore {
    async fn get(
        &self,
        version: &str,
        descriptor: &RequestDescriptor,
    ) -> Result<Option<CacheEntry>> {
        let versions = self.versions.read().await;
        Ok(versions
            .get(version)
            .and_then(|entries| entries.get(descriptor))
            .cloned())
    }

    async fn put(
        &self,
        version: &str,
        descriptor: &RequestDescriptor,
        entry: CacheEntry,
    ) -> Result<()> {
        let mut versions = self.versions.write().await;
        versions
            .entry(version.to_string())
            .or_default()
            .insert(descriptor.clone(), entry);
        Ok(())
    }

    async fn list_versions(&self) -> Result<Vec<String>> {
        let mut names: Vec<String> = self.versions.read().await.keys().cloned().collect();
        names.sort();
        Ok(names)
    }

    async fn delete_version(&self, version: &str) -> Result<bool> {
        Ok(self.versions.write().await.remove(version).is_some())
    }
}
