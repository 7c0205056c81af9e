//! Notification click routing.
//!
//! Clicking a notification lands the user in the app: the first open
//! window whose URL contains the carried target is focused, otherwise a
//! new window opens at the target. First match in enumeration order
//! wins; multiple matching tabs are not disambiguated further.

use std::sync::Arc;

use anyhow::Result;
use tracing::{debug, warn};

use crate::clients::ClientRegistry;
use crate::config::WorkerConfig;
use crate::models::Notification;
use crate::push::NotificationSink;

/// How a click was routed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// An existing window was focused.
    Focused(String),
    /// No window matched; a new one was opened.
    Opened(String),
}

pub struct NotificationRouter {
    dashboard_path: String,
    clients: Arc<dyn ClientRegistry>,
    sink: Arc<dyn NotificationSink>,
}

impl NotificationRouter {
    pub fn new(
        config: &WorkerConfig,
        clients: Arc<dyn ClientRegistry>,
        sink: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            dashboard_path: config.dashboard_path.clone(),
            clients,
            sink,
        }
    }

    pub async fn route_click(&self, notification: Notification) -> Result<ClickOutcome> {
        // Dismissal is unconditional and must not block routing.
        if let Err(err) = self.sink.close(&notification).await {
            warn!(error = %err, "failed to dismiss clicked notification");
        }

        let target = if notification.url.is_empty() {
            self.dashboard_path.as_str()
        } else {
            notification.url.as_str()
        };

        // Enumerate every window, including ones this generation does
        // not control yet.
        let windows = self.clients.window_clients(true).await?;
        for window in &windows {
            if window.url.contains(target) {
                self.clients.focus(&window.id).await?;
                debug!(client = %window.id, url = %window.url, "focused existing window");
                return Ok(ClickOutcome::Focused(window.id.clone()));
            }
        }

        let opened = self.clients.open_window(target).await?;
        debug!(client = %opened.id, url = %target, "opened new window");
        Ok(ClickOutcome::Opened(opened.id))
    }
}
