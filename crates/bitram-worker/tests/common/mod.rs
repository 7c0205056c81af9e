// Allow dead code: fixtures are shared across test binaries that each
// use only a subset of them.
#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use url::Url;

use bitram_worker::{
    CacheEntry, CacheStore, ClientRoster, FetchError, FetchResponse, MemoryStore, Network,
    Notification, NotificationSink, RequestDescriptor, Worker, WorkerConfig, WorkerRequest,
};

/// A transport that answers from a script instead of the wire.
///
/// Every fetch is logged, so tests can assert that cache-first hits
/// never touch the network.
#[derive(Default)]
pub struct ScriptedNetwork {
    responses: Mutex<HashMap<String, FetchResponse>>,
    failing: Mutex<HashSet<String>>,
    offline: AtomicBool,
    calls: Mutex<Vec<String>>,
}

impl ScriptedNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, url: &str, response: FetchResponse) {
        self.responses
            .lock()
            .unwrap()
            .insert(url.to_string(), response);
    }

    pub fn respond_ok(&self, url: &str, body: &str) {
        self.respond(url, FetchResponse::ok(body.as_bytes().to_vec()));
    }

    /// Make one URL fail while the rest of the script keeps working.
    pub fn fail(&self, url: &str) {
        self.failing.lock().unwrap().insert(url.to_string());
    }

    /// Fail every fetch, as if the device lost connectivity.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_for(&self, url: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| *c == url).count()
    }
}

#[async_trait]
impl Network for ScriptedNetwork {
    async fn fetch(&self, request: &WorkerRequest) -> Result<FetchResponse, FetchError> {
        let url = request.url.to_string();
        self.calls.lock().unwrap().push(url.clone());

        if self.offline.load(Ordering::SeqCst) {
            return Err(FetchError::Network(anyhow!("network unreachable")));
        }
        if self.failing.lock().unwrap().contains(&url) {
            return Err(FetchError::Network(anyhow!("connection reset by peer")));
        }
        match self.responses.lock().unwrap().get(&url) {
            Some(response) => Ok(response.clone()),
            None => Err(FetchError::Network(anyhow!("no route to host: {url}"))),
        }
    }
}

/// A store whose reads or writes can be made to fail, for exercising
/// the swallow-and-log paths.
pub struct SaboteurStore {
    inner: MemoryStore,
    fail_puts: AtomicBool,
    fail_gets: AtomicBool,
}

impl SaboteurStore {
    pub fn new() -> Self {
        Self {
            inner: MemoryStore::new(),
            fail_puts: AtomicBool::new(false),
            fail_gets: AtomicBool::new(false),
        }
    }

    pub fn fail_puts(&self, fail: bool) {
        self.fail_puts.store(fail, Ordering::SeqCst);
    }

    pub fn fail_gets(&self, fail: bool) {
        self.fail_gets.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl CacheStore for SaboteurStore {
    async fn get(
        &self,
        version: &str,
        descriptor: &RequestDescriptor,
    ) -> Result<Option<CacheEntry>> {
        if self.fail_gets.load(Ordering::SeqCst) {
            return Err(anyhow!("store read refused"));
        }
        self.inner.get(version, descriptor).await
    }

    async fn put(
        &self,
        version: &str,
        descriptor: &RequestDescriptor,
        entry: CacheEntry,
    ) -> Result<()> {
        if self.fail_puts.load(Ordering::SeqCst) {
            return Err(anyhow!("store write refused"));
        }
        self.inner.put(version, descriptor, entry).await
    }

    async fn list_versions(&self) -> Result<Vec<String>> {
        self.inner.list_versions().await
    }

    async fn delete_version(&self, version: &str) -> Result<bool> {
        self.inner.delete_version(version).await
    }
}

/// Records shown and dismissed notifications instead of displaying
/// anything.
#[derive(Default)]
pub struct RecordingSink {
    shown: Mutex<Vec<Notification>>,
    closed: Mutex<Vec<Notification>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shown(&self) -> Vec<Notification> {
        self.shown.lock().unwrap().clone()
    }

    pub fn closed(&self) -> Vec<Notification> {
        self.closed.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationSink for RecordingSink {
    async fn show(&self, notification: Notification) -> Result<()> {
        self.shown.lock().unwrap().push(notification);
        Ok(())
    }

    async fn close(&self, notification: &Notification) -> Result<()> {
        self.closed.lock().unwrap().push(notification.clone());
        Ok(())
    }
}

/// Everything a scenario needs, wired to in-memory fakes.
pub struct Harness {
    pub worker: Worker,
    pub store: Arc<MemoryStore>,
    pub network: Arc<ScriptedNetwork>,
    pub roster: Arc<ClientRoster>,
    pub sink: Arc<RecordingSink>,
    pub config: WorkerConfig,
}

pub fn test_config() -> WorkerConfig {
    WorkerConfig {
        app_shell: vec!["/".to_string(), "/dashboard".to_string(), "/community".to_string()],
        ..WorkerConfig::default()
    }
}

pub fn harness() -> Harness {
    harness_with(test_config())
}

pub fn harness_with(config: WorkerConfig) -> Harness {
    let store = Arc::new(MemoryStore::new());
    let network = Arc::new(ScriptedNetwork::new());
    let roster = Arc::new(ClientRoster::new());
    let sink = Arc::new(RecordingSink::new());
    let worker = Worker::new(
        config.clone(),
        Arc::clone(&store) as Arc<dyn CacheStore>,
        Arc::clone(&network) as Arc<dyn Network>,
        Arc::clone(&roster) as Arc<dyn bitram_worker::ClientRegistry>,
        Arc::clone(&sink) as Arc<dyn NotificationSink>,
    );
    Harness {
        worker,
        store,
        network,
        roster,
        sink,
        config,
    }
}

/// Script a successful response for every app-shell entry.
pub fn script_shell(network: &ScriptedNetwork, config: &WorkerConfig) {
    for path in &config.app_shell {
        let url = config.origin.join(path).unwrap();
        network.respond_ok(url.as_str(), "shell");
    }
}

/// The usual preamble: shell scripted, installed, activated.
pub async fn install_and_activate(harness: &Harness) {
    script_shell(&harness.network, &harness.config);
    harness.worker.handle_install().await.unwrap();
    harness.worker.handle_activate().await.unwrap();
}

pub fn app_url(path: &str) -> Url {
    Url::parse("https://bitram.app").unwrap().join(path).unwrap()
}

pub fn get(path: &str) -> WorkerRequest {
    WorkerRequest::get(app_url(path))
}

/// A notification as the push handler would materialize it.
pub fn notification(url: &str) -> Notification {
    Notification {
        title: "Bitram".to_string(),
        body: String::new(),
        icon: "/icons/icon-192.png".to_string(),
        badge: "/icons/badge-72.png".to_string(),
        url: url.to_string(),
    }
}
