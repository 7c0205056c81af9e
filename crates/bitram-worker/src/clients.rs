//! The registry of open application windows.
//!
//! Enumeration order is the platform order: the click router iterates it
//! as-is and takes the first match, so the registry must hand windows
//! back in a stable order. [`ClientRoster`] keeps insertion order.

use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::{bail, Result};
use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::models::ClientWindow;

/// Host seam for window enumeration, focus, and creation.
#[async_trait]
pub trait ClientRegistry: Send + Sync {
    /// All window clients in platform order. With
    /// `include_uncontrolled`, windows not yet controlled by this worker
    /// generation are included too.
    async fn window_clients(&self, include_uncontrolled: bool) -> Result<Vec<ClientWindow>>;

    /// Bring an existing window to the foreground.
    async fn focus(&self, id: &str) -> Result<()>;

    /// Open (and focus) a new window at the given URL.
    async fn open_window(&self, url: &str) -> Result<ClientWindow>;

    /// Put every open window under this worker generation's control.
    async fn claim(&self) -> Result<()>;
}

/// In-memory registry. The host registers windows as tabs open and
/// close; ids are monotonic and never reused.
#[derive(Default)]
pub struct ClientRoster {
    windows: RwLock<Vec<ClientWindow>>,
    next_id: AtomicU64,
}

impl ClientRoster {
    pub fn new() -> Self {
        Self::default()
    }

    fn fresh_id(&self) -> String {
        format!("win-{}", self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    /// Register an already-open window. New tabs start uncontrolled;
    /// they come under control on claim or on their next navigation.
    pub async fn add_window(&self, url: &str) -> String {
        let id = self.fresh_id();
        let mut windows = self.windows.write().await;
        windows.push(ClientWindow {
            id: id.clone(),
            url: url.to_string(),
            focused: false,
            controlled: false,
        });
        id
    }

    /// Drop a window (tab closed).
    pub async fn remove_window(&self, id: &str) {
        self.windows.write().await.retain(|w| w.id != id);
    }
}

#[async_trait]
impl ClientRegistry for ClientRoster {
    async fn window_clients(&self, include_uncontrolled: bool) -> Result<Vec<ClientWindow>> {
        let windows = self.windows.read().await;
        Ok(windows
            .iter()
            .filter(|w| include_uncontrolled || w.controlled)
            .cloned()
            .collect())
    }

    async fn focus(&self, id: &str) -> Result<()> {
        let mut windows = self.windows.write().await;
        if !windows.iter().any(|w| w.id == id) {
            bail!("unknown client window: {id}");
        }
        for window in windows.iter_mut() {
            window.focused = window.id == id;
        }
        Ok(())
    }

    async fn open_window(&self, url: &str) -> Result<ClientWindow> {
        let window = ClientWindow {
            id: self.fresh_id(),
            url: url.to_string(),
            focused: true,
            controlled: true,
        };
        let mut windows = self.windows.write().await;
        for existing in windows.iter_mut() {
            existing.focused = false;
        }
        windows.push(window.clone());
        Ok(window)
    }

    async fn claim(&self) -> Result<()> {
        let mut windows = self.windows.write().await;
        for window in windows.iter_mut() {
            window.controlled = true;
        }
        Ok(())
    }
}
