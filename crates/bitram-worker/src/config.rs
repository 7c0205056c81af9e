//! Worker configuration.
//!
//! Everything deployment-specific lives here: the cache generation tag,
//! the app-shell manifest, the route-classification prefixes, and the
//! notification defaults. Configuration is stored at
//! `~/.config/bitram/worker.json`; a missing file yields the defaults.

use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use url::Url;

/// Application name used for config/cache directory paths
const APP_NAME: &str = "bitram";

/// Config file name
const CONFIG_FILE: &str = "worker.json";

/// Current cache generation. Must be bumped on every deployment so the
/// activate transition purges the previous generation's store.
pub const CACHE_VERSION: &str = "bitram-v1";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Name of the store generation this worker reads and writes.
    #[serde(default = "default_cache_version")]
    pub cache_version: String,
    /// Origin the application is served from; anything else is
    /// cross-origin traffic.
    #[serde(default = "default_origin")]
    pub origin: Url,
    /// Ordered paths pre-populated during install. Install fails unless
    /// every one of them is fetchable.
    #[serde(default = "default_app_shell")]
    pub app_shell: Vec<String>,
    /// Path prefix routed with the network-first strategy.
    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,
    /// Path prefix of content-hashed build assets, routed cache-first.
    #[serde(default = "default_asset_prefix")]
    pub asset_prefix: String,
    /// Fallback notification title.
    #[serde(default = "default_product_name")]
    pub product_name: String,
    #[serde(default = "default_notification_icon")]
    pub notification_icon: String,
    #[serde(default = "default_notification_badge")]
    pub notification_badge: String,
    /// Where notification clicks land when the payload carried no url.
    #[serde(default = "default_dashboard_path")]
    pub dashboard_path: String,
}

fn default_cache_version() -> String {
    CACHE_VERSION.to_string()
}

fn default_origin() -> Url {
    Url::parse("https://bitram.app").expect("default origin is a valid URL")
}

fn default_app_shell() -> Vec<String> {
    [
        "/",
        "/dashboard",
        "/community",
        "/manifest.webmanifest",
        "/icons/icon-192.png",
        "/icons/icon-512.png",
    ]
    .iter()
    .map(|p| p.to_string())
    .collect()
}

fn default_api_prefix() -> String {
    "/api".to_string()
}

fn default_asset_prefix() -> String {
    "/_app/immutable/".to_string()
}

fn default_product_name() -> String {
    "Bitram".to_string()
}

fn default_notification_icon() -> String {
    "/icons/icon-192.png".to_string()
}

fn default_notification_badge() -> String {
    "/icons/badge-72.png".to_string()
}

fn default_dashboard_path() -> String {
    "/dashboard".to_string()
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            cache_version: default_cache_version(),
            origin: default_origin(),
            app_shell: default_app_shell(),
            api_prefix: default_api_prefix(),
            asset_prefix: default_asset_prefix(),
            product_name: default_product_name(),
            notification_icon: default_notification_icon(),
            notification_badge: default_notification_badge(),
            dashboard_path: default_dashboard_path(),
        }
    }
}

impl WorkerConfig {
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            Ok(serde_json::from_str(&contents)?)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Default location for the on-disk response store.
    pub fn cache_dir(&self) -> Result<PathBuf> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?;
        Ok(cache_dir.join(APP_NAME))
    }
}
