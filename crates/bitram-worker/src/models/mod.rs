//! Data types shared across the worker.
//!
//! These are plain data carriers: requests and responses as the router
//! sees them, push payloads as the wire delivers them, and the transient
//! client-window records the notification router enumerates.

pub mod client;
pub mod push;
pub mod request;

pub use client::ClientWindow;
pub use push::{Notification, PushPayload};
pub use request::{FetchResponse, RequestDescriptor, WorkerRequest};
