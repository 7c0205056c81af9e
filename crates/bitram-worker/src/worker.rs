//! The worker itself: a long-lived service object with one handler per
//! event kind.
//!
//! The host runtime constructs one `Worker` per generation, drives
//! `handle_install` / `handle_activate` once each, and then feeds it
//! intercepted requests, push messages, and notification clicks. Every
//! handler returns a future; work that must finish before teardown is
//! awaited inside that future, so "keep me alive until this settles" is
//! simply "await the handler".

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::Result;
use tokio::sync::RwLock;
use tracing::{error, info};

use crate::clients::ClientRegistry;
use crate::config::WorkerConfig;
use crate::lifecycle::{InstallError, LifecycleController, WorkerPhase};
use crate::models::{Notification, WorkerRequest};
use crate::net::{FetchError, Network};
use crate::notify::{ClickOutcome, NotificationRouter};
use crate::push::{NotificationSink, PushHandler, PushOutcome};
use crate::router::{FetchOutcome, FetchRouter};
use crate::routes::RouteTable;
use crate::store::CacheStore;
use crate::tasks::WorkSet;

pub struct Worker {
    phase: RwLock<WorkerPhase>,
    skip_waiting: AtomicBool,
    lifecycle: LifecycleController,
    router: FetchRouter,
    push: PushHandler,
    notify: NotificationRouter,
    writes: Arc<WorkSet>,
}

impl Worker {
    pub fn new(
        config: WorkerConfig,
        store: Arc<dyn CacheStore>,
        network: Arc<dyn Network>,
        clients: Arc<dyn ClientRegistry>,
        notifications: Arc<dyn NotificationSink>,
    ) -> Self {
        let writes = Arc::new(WorkSet::new());
        let lifecycle = LifecycleController::new(
            &config,
            Arc::clone(&store),
            Arc::clone(&network),
            Arc::clone(&clients),
        );
        let router = FetchRouter::new(
            config.cache_version.clone(),
            RouteTable::from_config(&config),
            store,
            network,
            Arc::clone(&writes),
        );
        let push = PushHandler::new(&config, Arc::clone(&notifications));
        let notify = NotificationRouter::new(&config, clients, notifications);

        Self {
            phase: RwLock::new(WorkerPhase::Parsed),
            skip_waiting: AtomicBool::new(false),
            lifecycle,
            router,
            push,
            notify,
            writes,
        }
    }

    pub async fn phase(&self) -> WorkerPhase {
        *self.phase.read().await
    }

    async fn set_phase(&self, phase: WorkerPhase) {
        *self.phase.write().await = phase;
    }

    /// Whether this generation asked to replace its predecessor without
    /// waiting for open tabs to release it. Set by a successful install;
    /// the brief version-skew window across tabs is an accepted trade
    /// for faster rollout.
    pub fn wants_immediate_activation(&self) -> bool {
        self.skip_waiting.load(Ordering::Acquire)
    }

    /// Install transition: all-or-nothing app-shell pre-population.
    pub async fn handle_install(&self) -> Result<(), InstallError> {
        self.set_phase(WorkerPhase::Installing).await;
        match self.lifecycle.install().await {
            Ok(()) => {
                self.set_phase(WorkerPhase::Installed).await;
                self.skip_waiting.store(true, Ordering::Release);
                info!("install complete, requesting immediate activation");
                Ok(())
            }
            Err(err) => {
                self.set_phase(WorkerPhase::Redundant).await;
                error!(error = %err, "install failed, generation is redundant");
                Err(err)
            }
        }
    }

    /// Activate transition: purge stale generations, claim open windows.
    pub async fn handle_activate(&self) -> Result<()> {
        self.set_phase(WorkerPhase::Activating).await;
        match self.lifecycle.activate().await {
            Ok(()) => {
                self.set_phase(WorkerPhase::Activated).await;
                Ok(())
            }
            Err(err) => {
                self.set_phase(WorkerPhase::Redundant).await;
                error!(error = %err, "activation failed, generation is redundant");
                Err(err)
            }
        }
    }

    /// One intercepted request. Rejected until activation completes;
    /// only an activated generation controls page transport.
    pub async fn handle_fetch(&self, request: &WorkerRequest) -> Result<FetchOutcome, FetchError> {
        let phase = self.phase().await;
        if phase != WorkerPhase::Activated {
            return Err(FetchError::NotControlling(phase));
        }
        self.router.handle(request).await
    }

    /// One inbound push message.
    pub async fn handle_push(&self, payload: Option<&[u8]>) -> Result<PushOutcome> {
        self.push.handle(payload).await
    }

    /// One notification click.
    pub async fn handle_notification_click(
        &self,
        notification: Notification,
    ) -> Result<ClickOutcome> {
        self.notify.route_click(notification).await
    }

    /// Wait for detached cache writes to settle. Hosts tearing the
    /// worker down without calling this abandon those writes, which is
    /// tolerated for best-effort work.
    pub async fn drain_writes(&self) {
        self.writes.drain().await
    }
}
