//! Push payloads and the notifications they materialize into.

use serde::{Deserialize, Serialize};

/// An inbound push message. Every field is optional; unknown fields are
/// ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PushPayload {
    pub title: Option<String>,
    pub body: Option<String>,
    pub url: Option<String>,
}

/// Display options for a materialized notification.
///
/// `url` is the opaque data field carried for the click router; it is
/// already defaulted to the dashboard path when the payload omitted one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub body: String,
    pub icon: String,
    pub badge: String,
    pub url: String,
}
