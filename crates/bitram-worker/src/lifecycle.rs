//! Install/activate transitions.
//!
//! A worker generation runs install exactly once: it pre-populates the
//! store named by the current cache version with the whole app shell,
//! all-or-nothing, so the shell is never partially cached. Activation
//! purges every other generation and claims the open windows, after
//! which exactly one store exists and every open tab is controlled by
//! this generation.

use std::fmt;
use std::sync::Arc;

use anyhow::{Context, Result};
use futures::stream::{self, StreamExt, TryStreamExt};
use thiserror::Error;
use tracing::{debug, info};

use crate::clients::ClientRegistry;
use crate::config::WorkerConfig;
use crate::models::{FetchResponse, RequestDescriptor, WorkerRequest};
use crate::net::{FetchError, Network};
use crate::store::{CacheEntry, CacheStore};

/// Maximum concurrent shell fetches during install.
/// The shell is a handful of small documents; 4 keeps install fast
/// without competing with the page's own first-load traffic.
const MAX_CONCURRENT_SHELL_FETCHES: usize = 4;

/// Where a worker generation is in its life.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerPhase {
    /// Constructed, no transition run yet.
    Parsed,
    /// Install in progress (shell pre-population).
    Installing,
    /// Shell committed; eligible for activation.
    Installed,
    /// Activation in progress (purge + claim).
    Activating,
    /// Controlling transport for all open windows.
    Activated,
    /// Install or activation failed; the previous generation stays in
    /// control.
    Redundant,
}

impl fmt::Display for WorkerPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WorkerPhase::Parsed => "parsed",
            WorkerPhase::Installing => "installing",
            WorkerPhase::Installed => "installed",
            WorkerPhase::Activating => "activating",
            WorkerPhase::Activated => "activated",
            WorkerPhase::Redundant => "redundant",
        };
        f.write_str(name)
    }
}

/// Why an install transition failed. All of these are fatal to the new
/// generation; none are retried.
#[derive(Debug, Error)]
pub enum InstallError {
    #[error("app shell manifest entry {path:?} is not a valid path")]
    Manifest {
        path: String,
        #[source]
        source: url::ParseError,
    },

    #[error("app shell fetch failed for {path}")]
    Shell {
        path: String,
        #[source]
        source: FetchError,
    },

    #[error("cache store rejected app shell entry for {path}: {source}")]
    Store {
        path: String,
        source: anyhow::Error,
    },
}

pub struct LifecycleController {
    version: String,
    origin: url::Url,
    app_shell: Vec<String>,
    store: Arc<dyn CacheStore>,
    network: Arc<dyn Network>,
    clients: Arc<dyn ClientRegistry>,
}

impl LifecycleController {
    pub fn new(
        config: &WorkerConfig,
        store: Arc<dyn CacheStore>,
        network: Arc<dyn Network>,
        clients: Arc<dyn ClientRegistry>,
    ) -> Self {
        Self {
            version: config.cache_version.clone(),
            origin: config.origin.clone(),
            app_shell: config.app_shell.clone(),
            store,
            network,
            clients,
        }
    }

    /// Pre-populate the current generation with the app shell.
    ///
    /// Every entry is fetched before anything is written, so a single
    /// unfetchable path commits zero entries.
    pub async fn install(&self) -> Result<(), InstallError> {
        info!(
            version = %self.version,
            entries = self.app_shell.len(),
            "pre-populating app shell"
        );

        let fetched: Vec<(String, RequestDescriptor, FetchResponse)> =
            stream::iter(self.app_shell.clone())
                .map(|path| self.fetch_shell_entry(path))
                .buffered(MAX_CONCURRENT_SHELL_FETCHES)
                .try_collect()
                .await?;

        for (path, descriptor, response) in fetched {
            self.store
                .put(&self.version, &descriptor, CacheEntry::new(response))
                .await
                .map_err(|source| InstallError::Store {
                    path: path.clone(),
                    source,
                })?;
            debug!(path = %path, "app shell entry committed");
        }

        info!(version = %self.version, "app shell pre-population complete");
        Ok(())
    }

    async fn fetch_shell_entry(
        &self,
        path: String,
    ) -> Result<(String, RequestDescriptor, FetchResponse), InstallError> {
        let url = self.origin.join(&path).map_err(|source| InstallError::Manifest {
            path: path.clone(),
            source,
        })?;
        let request = WorkerRequest::get(url);
        let response = self
            .network
            .fetch(&request)
            .await
            .map_err(|source| InstallError::Shell {
                path: path.clone(),
                source,
            })?;
        Ok((path, request.descriptor(), response))
    }

    /// Purge stale generations, then claim every open window.
    ///
    /// Idempotent: once only the current generation remains and all
    /// windows are claimed, running it again changes nothing.
    pub async fn activate(&self) -> Result<()> {
        let versions = self
            .store
            .list_versions()
            .await
            .context("enumerating cache generations")?;

        for version in versions {
            if version == self.version {
                continue;
            }
            info!(stale = %version, "purging stale cache generation");
            self.store
                .delete_version(&version)
                .await
                .with_context(|| format!("purging stale generation {version}"))?;
        }

        // Take over already-open tabs now rather than on their next
        // navigation.
        self.clients.claim().await.context("claiming open windows")?;

        info!(version = %self.version, "activation complete");
        Ok(())
    }
}
