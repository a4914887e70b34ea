use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::errors::Result;

/// Default configuration file, read when present
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Prefix of structured environment overrides, e.g. `TEXTCOPY__SERVER__PORT`
pub const ENV_PREFIX: &str = "TEXTCOPY";

/// Static configuration, loaded once at startup.
///
/// Sources, lowest to highest priority:
/// 1. built-in defaults
/// 2. TOML file (`config.toml` unless `-c` says otherwise)
/// 3. `TEXTCOPY__SECTION__KEY` environment variables
/// 4. plain `PORT` and `STATIC_DIR` environment variables
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct StaticConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub frontend: FrontendConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl StaticConfig {
    /// Load from the given TOML file (or the default one) and the process
    /// environment.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let path = path.unwrap_or(DEFAULT_CONFIG_PATH);
        let required = path != DEFAULT_CONFIG_PATH;

        let mut config = Self::build(
            config::File::with_name(path).required(required),
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )?;
        config.apply_env_overrides(|key| std::env::var(key).ok());

        if Path::new(path).exists() {
            tracing::debug!("Configuration loaded from: {}", path);
        }

        Ok(config)
    }

    /// Parse a TOML document on top of the defaults, without consulting the
    /// environment.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Self::build(
            config::File::from_str(content, config::FileFormat::Toml),
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .source(Some(config::Map::new())),
        )
    }

    fn build<F, E>(file: F, env: E) -> Result<Self>
    where
        F: config::Source + Send + Sync + 'static,
        E: config::Source + Send + Sync + 'static,
    {
        let settings = config::Config::builder()
            .add_source(file)
            .add_source(env)
            .build()?;
        Ok(settings.try_deserialize::<StaticConfig>()?)
    }

    /// Plain variables understood by earlier deployments of the service
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup("PORT") {
            match port.parse() {
                Ok(port) => self.server.port = port,
                Err(_) => tracing::error!("Invalid PORT: {}", port),
            }
        }
        if let Some(dir) = lookup("STATIC_DIR").filter(|d| !d.is_empty()) {
            self.frontend.static_dir = dir;
        }
    }

    pub fn generate_sample_config() -> String {
        let sample_config = Self::default();
        toml::to_string_pretty(&sample_config)
            .unwrap_or_else(|e| format!("Error generating sample config: {}", e))
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)?;

        if let Some(parent) = path.as_ref().parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerConfig {
    #[serde(default = "default_server_host")]
    pub host: String,
    #[serde(default = "default_server_port")]
    pub port: u16,
    #[serde(default = "default_cpu_count")]
    pub cpu_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FrontendConfig {
    /// Directory holding the exported frontend build
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
    /// Path prefix of the JSON API
    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoreConfig {
    /// Slot lifetime, counted from creation
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,
}

impl StoreConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// `text` or `json`
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default = "default_max_backups")]
    pub max_backups: u32,
    #[serde(default = "default_enable_rotation")]
    pub enable_rotation: bool,
}

fn default_server_host() -> String {
    "0.0.0.0".to_string()
}

fn default_server_port() -> u16 {
    8080
}

fn default_cpu_count() -> usize {
    num_cpus::get()
}

fn default_static_dir() -> String {
    "./frontend/out".to_string()
}

fn default_api_prefix() -> String {
    "/api".to_string()
}

fn default_ttl_secs() -> u64 {
    crate::storage::DEFAULT_TTL.as_secs()
}

fn default_sweep_interval_secs() -> u64 {
    crate::storage::DEFAULT_SWEEP_INTERVAL.as_secs()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_max_backups() -> u32 {
    5
}

fn default_enable_rotation() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            cpu_count: default_cpu_count(),
        }
    }
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self {
            static_dir: default_static_dir(),
            api_prefix: default_api_prefix(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl_secs(),
            sweep_interval_secs: default_sweep_interval_secs(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
            max_backups: default_max_backups(),
            enable_rotation: default_enable_rotation(),
        }
    }
}
