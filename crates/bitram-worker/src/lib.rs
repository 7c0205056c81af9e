//! Offline-resilience and push-delivery layer for the Bitram dashboard.
//!
//! This crate sits between the application's UI and the network: every
//! outgoing request passes through a [`Worker`] that classifies it and
//! answers it network-first (API and pages) or cache-first (immutable
//! build assets), backed by a versioned response store. Independently of
//! request traffic, the worker decodes server-pushed messages into
//! visible notifications and routes notification clicks to an existing
//! application window or a fresh one.
//!
//! The worker owns no sockets, windows, or notification surfaces
//! itself; those arrive as injected implementations of [`CacheStore`],
//! [`Network`], [`ClientRegistry`], and [`NotificationSink`], which is
//! also what makes the whole state machine testable in memory.

pub mod clients;
pub mod config;
pub mod lifecycle;
pub mod models;
pub mod net;
pub mod notify;
pub mod push;
pub mod router;
pub mod routes;
pub mod store;
pub mod tasks;
pub mod worker;

pub use clients::{ClientRegistry, ClientRoster};
pub use config::{WorkerConfig, CACHE_VERSION};
pub use lifecycle::{InstallError, LifecycleController, WorkerPhase};
pub use models::{
    ClientWindow, FetchResponse, Notification, PushPayload, RequestDescriptor, WorkerRequest,
};
pub use net::{FetchError, HttpNetwork, Network};
pub use notify::{ClickOutcome, NotificationRouter};
pub use push::{NotificationSink, PushHandler, PushOutcome};
pub use router::{FetchOutcome, FetchRouter, ServedFrom};
pub use routes::{RouteClass, RouteTable, Strategy};
pub use store::{CacheEntry, CacheStore, DiskStore, MemoryStore};
pub use worker::Worker;
