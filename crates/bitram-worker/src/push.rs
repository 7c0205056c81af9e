//! Inbound push handling.
//!
//! A push message either materializes into exactly one visible
//! notification or into nothing: events without a payload are ignored,
//! and undecodable payloads are dropped with a log line rather than
//! propagated (the condition is observable without failing the event).

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use tracing::{debug, warn};

use crate::config::WorkerConfig;
use crate::models::{Notification, PushPayload};

/// Host seam for showing and dismissing notifications.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn show(&self, notification: Notification) -> Result<()>;
    async fn close(&self, notification: &Notification) -> Result<()>;
}

/// What a push event turned into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PushOutcome {
    /// No payload; nothing shown.
    Ignored,
    /// Payload present but undecodable; nothing shown.
    DroppedInvalid,
    /// A notification was displayed.
    Shown(Notification),
}

/// Defaults applied when a payload omits fields.
#[derive(Debug, Clone)]
struct NotificationDefaults {
    title: String,
    icon: String,
    badge: String,
    url: String,
}

pub struct PushHandler {
    defaults: NotificationDefaults,
    sink: Arc<dyn NotificationSink>,
}

impl PushHandler {
    pub fn new(config: &WorkerConfig, sink: Arc<dyn NotificationSink>) -> Self {
        Self {
            defaults: NotificationDefaults {
                title: config.product_name.clone(),
                icon: config.notification_icon.clone(),
                badge: config.notification_badge.clone(),
                url: config.dashboard_path.clone(),
            },
            sink,
        }
    }

    /// Decode a push message and display its notification.
    ///
    /// The display is awaited inside this future; the host keeps the
    /// worker alive until the handler settles.
    pub async fn handle(&self, payload: Option<&[u8]>) -> Result<PushOutcome> {
        let Some(raw) = payload else {
            debug!("push event carried no payload, ignoring");
            return Ok(PushOutcome::Ignored);
        };

        let payload: PushPayload = match serde_json::from_slice(raw) {
            Ok(payload) => payload,
            Err(err) => {
                warn!(error = %err, "undecodable push payload dropped");
                return Ok(PushOutcome::DroppedInvalid);
            }
        };

        let notification = self.materialize(payload);
        self.sink.show(notification.clone()).await?;
        Ok(PushOutcome::Shown(notification))
    }

    fn materialize(&self, payload: PushPayload) -> Notification {
        Notification {
            title: payload.title.unwrap_or_else(|| self.defaults.title.clone()),
            body: payload.body.unwrap_or_default(),
            icon: self.defaults.icon.clone(),
            badge: self.defaults.badge.clone(),
            url: payload.url.unwrap_or_else(|| self.defaults.url.clone()),
        }
    }
}
