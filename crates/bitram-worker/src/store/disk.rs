//! Disk-backed store: one JSON file per cache generation.
//!
//! Each generation serializes to `<root>/<version>.json` as a map from
//! descriptor string to entry. Files are small (an app shell plus
//! opportunistically cached responses), so read-modify-write per put is
//! acceptable; a mutex keeps concurrent writers from interleaving file
//! access. Same-key overwrites remain last-write-wins.

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{CacheEntry, CacheStore};
use crate::models::RequestDescriptor;

pub struct DiskStore {
    root: PathBuf,
    lock: Mutex<()>,
}

impl DiskStore {
    pub fn new(root: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&root)
            .with_context(|| format!("Failed to create store directory: {}", root.display()))?;
        Ok(Self {
            root,
            lock: Mutex::new(()),
        })
    }

    fn version_path(&self, version: &str) -> PathBuf {
        self.root.join(format!("{}.json", version))
    }

    fn load_version(&self, version: &str) -> Result<HashMap<String, CacheEntry>> {
        let path = self.version_path(version);
        if !path.exists() {
            return Ok(HashMap::new());
        }

        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read store file: {}", version))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse store file: {}", version))
    }

    fn save_version(&self, version: &str, entries: &HashMap<String, CacheEntry>) -> Result<()> {
        let contents = serde_json::to_string_pretty(entries)?;
        std::fs::write(self.version_path(version), contents)
            .with_context(|| format!("Failed to write store file: {}", version))
    }
}

#[async_trait]
impl CacheStore for DiskStore {
    async fn get(
        &self,
        version: &str,
        descriptor: &RequestDescriptor,
    ) -> Result<Option<CacheEntry>> {
        let _guard = self.lock.lock().await;
        let entries = self.load_version(version)?;
        Ok(entries.get(&descriptor.to_string()).cloned())
    }

    async fn put(
        &self,
        version: &str,
        descriptor: &RequestDescriptor,
        entry: CacheEntry,
    ) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut entries = self.load_version(version)?;
        entries.insert(descriptor.to_string(), entry);
        self.save_version(version, &entries)
    }

    async fn list_versions(&self) -> Result<Vec<String>> {
        let _guard = self.lock.lock().await;
        let mut names = Vec::new();
        for dir_entry in std::fs::read_dir(&self.root)
            .with_context(|| format!("Failed to list store directory: {}", self.root.display()))?
        {
            let path = dir_entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    async fn delete_version(&self, version: &str) -> Result<bool> {
        let _guard = self.lock.lock().await;
        let path = self.version_path(version);
        if !path.exists() {
            return Ok(false);
        }
        std::fs::remove_file(&path)
            .with_context(|| format!("Failed to delete store file: {}", version))?;
        Ok(true)
    }
}
