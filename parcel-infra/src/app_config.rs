use parcel_state::{
    OrderFilters, StoreSettings, DEFAULT_LOAD_ERROR_MESSAGE, DEFAULT_TOAST_TIMEOUT_MS,
};
use serde::Deserialize;
use std::env;
use std::path::Path;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub source: SourceConfig,
    #[serde(default)]
    pub orders: OrdersConfig,
    #[serde(default)]
    pub toast: ToastConfig,
    /// Initial filter criteria applied by the dashboard
    #[serde(default)]
    pub filters: OrderFilters,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Http,
    File,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SourceConfig {
    pub kind: SourceKind,
    pub url: Option<String>,
    pub path: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Deserialize, Clone)]
pub struct OrdersConfig {
    #[serde(default = "default_load_error_message")]
    pub load_error_message: String,
}

impl Default for OrdersConfig {
    fn default() -> Self {
        Self {
            load_error_message: default_load_error_message(),
        }
    }
}

fn default_load_error_message() -> String {
    DEFAULT_LOAD_ERROR_MESSAGE.to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct ToastConfig {
    #[serde(default = "default_toast_timeout_ms")]
    pub default_timeout_ms: i64,
}

impl Default for ToastConfig {
    fn default() -> Self {
        Self {
            default_timeout_ms: default_toast_timeout_ms(),
        }
    }
}

fn default_toast_timeout_ms() -> i64 {
    DEFAULT_TOAST_TIMEOUT_MS
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(Path::new("config"), "PARCEL")
    }

    /// Layered load: `default` (required), then `{RUN_MODE}` and `local`
    /// (optional), then `{env_prefix}_SECTION__KEY` variables.
    pub fn load_from(dir: &Path, env_prefix: &str) -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());
        let layer = |name: &str| dir.join(name).to_string_lossy().into_owned();

        let s = config::Config::builder()
            .add_source(config::File::with_name(&layer("default")))
            .add_source(config::File::with_name(&layer(&run_mode)).required(false))
            // Not checked in
            .add_source(config::File::with_name(&layer("local")).required(false))
            .add_source(
                config::Environment::with_prefix(env_prefix)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        s.try_deserialize()
    }

    pub fn store_settings(&self) -> StoreSettings {
        StoreSettings {
            load_error_message: self.orders.load_error_message.clone(),
            toast_timeout_ms: self.toast.default_timeout_ms,
        }
    }
}
