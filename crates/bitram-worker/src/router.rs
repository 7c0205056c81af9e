//! Strategy dispatch for intercepted requests.
//!
//! The router owns every store read and write on the request path.
//! Within one request the ordering is fixed by the strategy: network
//! before cache fallback (network-first) or cache before network
//! (cache-first). Across requests nothing is ordered; concurrent
//! handling tasks interleave freely at the I/O suspension points.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::models::{FetchResponse, RequestDescriptor, WorkerRequest};
use crate::net::{FetchError, Network};
use crate::routes::{RouteTable, Strategy};
use crate::store::{CacheEntry, CacheStore};
use crate::tasks::WorkSet;

/// Where the returned response came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServedFrom {
    Network,
    Cache,
}

/// A handled request: the response plus its provenance.
#[derive(Debug)]
pub struct FetchOutcome {
    pub response: FetchResponse,
    pub served_from: ServedFrom,
}

pub struct FetchRouter {
    version: String,
    routes: RouteTable,
    store: Arc<dyn CacheStore>,
    network: Arc<dyn Network>,
    writes: Arc<WorkSet>,
}

impl FetchRouter {
    pub fn new(
        version: String,
        routes: RouteTable,
        store: Arc<dyn CacheStore>,
        network: Arc<dyn Network>,
        writes: Arc<WorkSet>,
    ) -> Self {
        Self {
            version,
            routes,
            store,
            network,
            writes,
        }
    }

    /// Classify and dispatch one intercepted request.
    pub async fn handle(&self, request: &WorkerRequest) -> Result<FetchOutcome, FetchError> {
        let class = self.routes.classify(&request.url);
        debug!(url = %request.url, class = ?class, "dispatching intercepted request");
        match class.strategy() {
            Strategy::NetworkFirst => self.network_first(request).await,
            Strategy::CacheFirst => self.cache_first(request).await,
        }
    }

    /// Prefer a live result; the cache only covers network failure.
    async fn network_first(&self, request: &WorkerRequest) -> Result<FetchOutcome, FetchError> {
        let descriptor = request.descriptor();
        match self.network.fetch(request).await {
            Ok(response) => {
                self.store_detached(descriptor, response.clone());
                Ok(FetchOutcome {
                    response,
                    served_from: ServedFrom::Network,
                })
            }
            Err(network_err) => {
                warn!(url = %request.url, error = %network_err, "network fetch failed, trying cache");
                match self.lookup(&descriptor).await {
                    Some(entry) => Ok(FetchOutcome {
                        response: entry.response,
                        served_from: ServedFrom::Cache,
                    }),
                    // No synthetic offline response: the original
                    // failure propagates to the caller.
                    None => Err(network_err),
                }
            }
        }
    }

    /// Prefer the stored copy; build assets are content-hashed, so a hit
    /// is always correct and saves the round trip.
    async fn cache_first(&self, request: &WorkerRequest) -> Result<FetchOutcome, FetchError> {
        let descriptor = request.descriptor();
        if let Some(entry) = self.lookup(&descriptor).await {
            return Ok(FetchOutcome {
                response: entry.response,
                served_from: ServedFrom::Cache,
            });
        }

        let response = self.network.fetch(request).await?;
        self.store_detached(descriptor, response.clone());
        Ok(FetchOutcome {
            response,
            served_from: ServedFrom::Network,
        })
    }

    /// Store read with failures demoted to misses, so a broken store
    /// never masks the real network result.
    async fn lookup(&self, descriptor: &RequestDescriptor) -> Option<CacheEntry> {
        match self.store.get(&self.version, descriptor).await {
            Ok(entry) => entry,
            Err(err) => {
                warn!(descriptor = %descriptor, error = %err, "cache lookup failed, treating as miss");
                None
            }
        }
    }

    /// Write the entry off the request path. The caller's response is
    /// never blocked on the write, and a write failure is swallowed.
    fn store_detached(&self, descriptor: RequestDescriptor, response: FetchResponse) {
        let store = Arc::clone(&self.store);
        let version = self.version.clone();
        self.writes.spawn(async move {
            if let Err(err) = store
                .put(&version, &descriptor, CacheEntry::new(response))
                .await
            {
                warn!(descriptor = %descriptor, error = %err, "cache write failed");
            }
        });
    }
}
