//! Transport seam between the router and the real network.
//!
//! The router only ever talks to the [`Network`] trait, so tests (and
//! hosts embedding the worker somewhere without direct socket access)
//! can substitute their own transport. [`HttpNetwork`] is the
//! reqwest-backed implementation used in production.

mod http;

pub use http::HttpNetwork;

use async_trait::async_trait;
use thiserror::Error;

use crate::lifecycle::WorkerPhase;
use crate::models::{FetchResponse, WorkerRequest};

/// Why an intercepted request could not be answered.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The transport failed and no cached copy exists. HTTP error
    /// statuses are not this; they come back as ordinary responses.
    #[error("network fetch failed: {0}")]
    Network(#[source] anyhow::Error),

    /// The request arrived before this worker generation finished
    /// activating.
    #[error("worker is not controlling transport yet (phase: {0})")]
    NotControlling(WorkerPhase),
}

/// One attempt against the network. No retry, no timeout; the single
/// attempt defines success or failure for the request.
#[async_trait]
pub trait Network: Send + Sync {
    async fn fetch(&self, request: &WorkerRequest) -> Result<FetchResponse, FetchError>;
}
