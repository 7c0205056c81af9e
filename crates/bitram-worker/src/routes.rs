//! Request classification.
//!
//! Every intercepted request falls into exactly one [`RouteClass`],
//! which fixes the fetch strategy. Classification is a pure function of
//! the request URL against the configured origin and prefixes, so it is
//! testable apart from the dispatch machinery.

use url::Url;

use crate::config::WorkerConfig;

/// Dispatch category for an intercepted request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    /// API traffic or anything cross-origin.
    Api,
    /// Content-hashed build assets; a cache hit is always correct.
    StaticAsset,
    /// Pages, navigations, everything else.
    Page,
}

/// How a route class orders cache and network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    NetworkFirst,
    CacheFirst,
}

impl RouteClass {
    pub fn strategy(self) -> Strategy {
        match self {
            RouteClass::StaticAsset => Strategy::CacheFirst,
            RouteClass::Api | RouteClass::Page => Strategy::NetworkFirst,
        }
    }
}

/// The classification rules, captured once from config.
#[derive(Debug, Clone)]
pub struct RouteTable {
    origin: Url,
    api_prefix: String,
    asset_prefix: String,
}

impl RouteTable {
    pub fn new(origin: Url, api_prefix: String, asset_prefix: String) -> Self {
        Self {
            origin,
            api_prefix,
            asset_prefix,
        }
    }

    pub fn from_config(config: &WorkerConfig) -> Self {
        Self::new(
            config.origin.clone(),
            config.api_prefix.clone(),
            config.asset_prefix.clone(),
        )
    }

    /// Rules are ordered: cross-origin and API traffic first, then build
    /// assets, then everything else.
    pub fn classify(&self, url: &Url) -> RouteClass {
        if url.origin() != self.origin.origin() || url.path().starts_with(&self.api_prefix) {
            return RouteClass::Api;
        }
        if url.path().starts_with(&self.asset_prefix) {
            return RouteClass::StaticAsset;
        }
        RouteClass::Page
    }
}
