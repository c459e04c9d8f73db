use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use crate::auth::InactivityConfig;

const DEFAULT_SUPABASE_URL: &str = "http://localhost:54321";
const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 30 * 60;
const DEFAULT_IDLE_WARNING_SECS: u64 = 60;

/// Settings resolved at startup, before the app mounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    #[serde(default = "default_supabase_url", alias = "SUPABASE_URL")]
    pub supabase_url: String,
    #[serde(default, alias = "SUPABASE_ANON_KEY")]
    pub supabase_anon_key: String,
    #[serde(default = "default_idle_timeout", alias = "IDLE_TIMEOUT_SECS")]
    pub idle_timeout_secs: u64,
    #[serde(default = "default_idle_warning", alias = "IDLE_WARNING_SECS")]
    pub idle_warning_secs: u64,
}

fn default_supabase_url() -> String {
    DEFAULT_SUPABASE_URL.to_string()
}

fn default_idle_timeout() -> u64 {
    DEFAULT_IDLE_TIMEOUT_SECS
}

fn default_idle_warning() -> u64 {
    DEFAULT_IDLE_WARNING_SECS
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            supabase_url: default_supabase_url(),
            supabase_anon_key: String::new(),
            idle_timeout_secs: DEFAULT_IDLE_TIMEOUT_SECS,
            idle_warning_secs: DEFAULT_IDLE_WARNING_SECS,
        }
    }
}

impl RuntimeConfig {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// A zero timeout falls back to the default instead of signing users
    /// out immediately.
    pub fn inactivity(&self) -> InactivityConfig {
        let timeout = match self.idle_timeout_secs {
            0 => DEFAULT_IDLE_TIMEOUT_SECS,
            secs => secs,
        };
        InactivityConfig::new(Duration::seconds(timeout as i64))
            .with_warning(Duration::seconds(self.idle_warning_secs as i64))
    }
}

static RUNTIME_CONFIG: OnceLock<RuntimeConfig> = OnceLock::new();

/// Expects an optional global: `window.__SHEDULEAPP_ENV = { SUPABASE_URL: "..." }`.
#[cfg(target_arch = "wasm32")]
fn from_env_js() -> Option<RuntimeConfig> {
    let window = web_sys::window()?;
    let any = js_sys::Reflect::get(&window, &"__SHEDULEAPP_ENV".into()).ok()?;
    if any.is_undefined() || any.is_null() {
        return None;
    }
    let raw = js_sys::JSON::stringify(&any).ok()?.as_string()?;
    match RuntimeConfig::from_json(&raw) {
        Ok(cfg) => Some(cfg),
        Err(err) => {
            log::warn!("ignoring malformed __SHEDULEAPP_ENV: {err}");
            None
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn from_env_js() -> Option<RuntimeConfig> {
    None
}

#[cfg(target_arch = "wasm32")]
fn config_json_url() -> Option<String> {
    let origin = web_sys::window()?.location().origin().ok()?;
    Some(format!("{}/config.json", origin))
}

#[cfg(not(target_arch = "wasm32"))]
fn config_json_url() -> Option<String> {
    None
}

async fn fetch_runtime_config() -> Option<RuntimeConfig> {
    let url = config_json_url()?;
    let resp = reqwest::get(&url).await.ok()?;
    if !resp.status().is_success() {
        return None;
    }
    resp.json::<RuntimeConfig>().await.ok()
}

pub async fn init() -> &'static RuntimeConfig {
    if let Some(cached) = RUNTIME_CONFIG.get() {
        return cached;
    }
    let resolved = match from_env_js() {
        Some(cfg) => cfg,
        None => fetch_runtime_config().await.unwrap_or_else(|| {
            log::info!("no runtime config found, using defaults");
            RuntimeConfig::default()
        }),
    };
    RUNTIME_CONFIG.get_or_init(|| resolved)
}

/// Resolved config, or defaults when `init` has not finished.
pub fn runtime() -> RuntimeConfig {
    RUNTIME_CONFIG.get().cloned().unwrap_or_default()
}
