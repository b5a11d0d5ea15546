use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::{env, time::Duration};
use url::Url;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub contact: ContactConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ContactConfig {
    /// Backend route receiving the contact form as JSON
    #[serde(default = "default_contact_endpoint")]
    pub endpoint: String,
    /// How long the success message stays visible
    #[serde(default = "default_clear_after_ms")]
    pub clear_after_ms: u64,
    /// Idle time after which a visitor's contact section is dropped
    #[serde(default = "default_visitor_ttl_secs")]
    pub visitor_ttl_secs: u64,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            endpoint: default_contact_endpoint(),
            clear_after_ms: default_clear_after_ms(),
            visitor_ttl_secs: default_visitor_ttl_secs(),
        }
    }
}

impl ContactConfig {
    pub fn clear_after(&self) -> Duration {
        Duration::from_millis(self.clear_after_ms)
    }

    pub fn visitor_ttl(&self) -> Duration {
        Duration::from_secs(self.visitor_ttl_secs)
    }
}

fn default_contact_endpoint() -> String {
    "http://127.0.0.1:3001/api/contact".to_string()
}

fn default_clear_after_ms() -> u64 {
    3_000
}

fn default_visitor_ttl_secs() -> u64 {
    1_800
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (PRESTIGIA__CONTACT__ENDPOINT, etc.)
    /// 2. Config file specified by path
    /// 3. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        builder = builder
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?;

        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        // Optional, ignored if missing
        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("PRESTIGIA")
                .separator("__")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.server.port == 0 {
            return Err("Server port must be greater than 0".to_string());
        }

        let endpoint = Url::parse(&self.contact.endpoint)
            .map_err(|e| format!("Invalid contact endpoint '{}': {e}", self.contact.endpoint))?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err("Contact endpoint must be an http(s) URL".to_string());
        }

        if self.contact.clear_after_ms == 0 {
            return Err("Contact clear_after_ms must be greater than 0".to_string());
        }

        if self.contact.visitor_ttl_secs == 0 {
            return Err("Contact visitor_ttl_secs must be greater than 0".to_string());
        }

        Ok(())
    }
}
