use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

use super::api_utils::normalize_base;

/// Default configuration embedded in the bundle
const DEFAULT_CONFIG: &str = include_str!("../../config.toml");

const DEFAULT_API_SERVER: &str = "http://127.0.0.1:8000/";
const DEFAULT_REFRESH_MS: u64 = 30_000;
const DEFAULT_SAVE_ACK_MS: u64 = 2_000;
/// setTimeout takes a u32 delay
pub const MAX_TIMER_MS: u64 = u32::MAX as u64;

/// Global JS object a deployment may define to point the console elsewhere
const RUNTIME_CONFIG_GLOBAL: &str = "__ADMIN_CONFIG__";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_api_server")]
    pub api_server: String,
    #[serde(default = "default_refresh_ms")]
    pub orders_refresh_interval_ms: u64,
    #[serde(default = "default_save_ack_ms")]
    pub save_ack_ms: u64,
}

fn default_api_server() -> String {
    DEFAULT_API_SERVER.to_string()
}

fn default_refresh_ms() -> u64 {
    DEFAULT_REFRESH_MS
}

fn default_save_ack_ms() -> u64 {
    DEFAULT_SAVE_ACK_MS
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_server: default_api_server(),
            orders_refresh_interval_ms: DEFAULT_REFRESH_MS,
            save_ack_ms: DEFAULT_SAVE_ACK_MS,
        }
    }
}

thread_local! {
    static CURRENT: AppConfig = AppConfig::load();
}

impl AppConfig {
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let mut config: AppConfig = toml::from_str(contents)?;
        config.api_server = normalize_base(&config.api_server);
        Ok(config)
    }

    pub fn with_api_server(mut self, api_server: &str) -> Self {
        self.api_server = normalize_base(api_server);
        self
    }

    pub fn orders_refresh_interval(&self) -> Duration {
        Duration::from_millis(self.orders_refresh_interval_ms.min(MAX_TIMER_MS))
    }

    pub fn save_ack(&self) -> Duration {
        Duration::from_millis(self.save_ack_ms.min(MAX_TIMER_MS))
    }

    /// Configuration of the running page, loaded once per page load
    pub fn current() -> AppConfig {
        CURRENT.with(|config| config.clone())
    }

    /// Load configuration
    ///
    /// Search order for the API server:
    /// 1. `window.__ADMIN_CONFIG__.apiServer`
    /// 2. `ADMIN_API_SERVER` at build time
    /// 3. Embedded `config.toml`
    fn load() -> AppConfig {
        let mut config = match Self::from_toml(DEFAULT_CONFIG) {
            Ok(config) => config,
            Err(e) => {
                log::error!("Embedded config is broken, using defaults: {}", e);
                AppConfig::default()
            }
        };

        if let Some(url) = option_env!("ADMIN_API_SERVER") {
            config = config.with_api_server(url);
        }
        if let Some(url) = runtime_api_server() {
            log::info!("Using API server from {}: {}", RUNTIME_CONFIG_GLOBAL, url);
            config = config.with_api_server(&url);
        }
        config
    }
}

#[cfg(target_arch = "wasm32")]
fn runtime_api_server() -> Option<String> {
    use wasm_bindgen::JsValue;

    let window = web_sys::window()?;
    let global = js_sys::Reflect::get(&window, &JsValue::from_str(RUNTIME_CONFIG_GLOBAL)).ok()?;
    if global.is_undefined() || global.is_null() {
        return None;
    }
    js_sys::Reflect::get(&global, &JsValue::from_str("apiServer"))
        .ok()?
        .as_string()
        .filter(|url| !url.trim().is_empty())
}

#[cfg(not(target_arch = "wasm32"))]
fn runtime_api_server() -> Option<String> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = AppConfig::from_toml(DEFAULT_CONFIG).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.orders_refresh_interval(), Duration::from_secs(30));
        assert_eq!(config.save_ack(), Duration::from_secs(2));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = AppConfig::from_toml(r#"api_server = "https://food.example.com/api""#).unwrap();
        assert_eq!(config.api_server, "https://food.example.com/api/");
        assert_eq!(config.orders_refresh_interval_ms, 30_000);
        assert_eq!(config.save_ack_ms, 2_000);
    }

    #[test]
    fn test_oversized_timers_are_clamped() {
        let config = AppConfig::from_toml(
            "orders_refresh_interval_ms = 9999999999999\nsave_ack_ms = 5000000000",
        )
        .unwrap();
        assert_eq!(config.orders_refresh_interval(), Duration::from_millis(MAX_TIMER_MS));
        assert_eq!(config.save_ack(), Duration::from_millis(MAX_TIMER_MS));
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        assert!(AppConfig::from_toml("orders_refresh_interval_ms = \"soon\"").is_err());
    }
}
