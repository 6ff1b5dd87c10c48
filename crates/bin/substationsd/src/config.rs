//! Configuration loading: TOML file with environment variable overrides.
//!
//! Looks for `substations.toml` in the working directory. Every field has a
//! default so the file is optional. Environment variables take precedence
//! over file values.

use std::num::NonZeroU32;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use substations_domain::catalog::{DEFAULT_TYPE_LABELS, TypeCatalog};
use substations_domain::error::CatalogError;
use substations_domain::listing::{DEFAULT_PAGE_SIZE, ListingPolicy};

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Database settings.
    pub database: DatabaseConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Listing and validation settings.
    pub registry: RegistryConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
    /// Directory holding the browser client. `None` disables static hosting.
    pub static_dir: Option<PathBuf>,
}

/// `SQLite` database configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// `SQLite` connection URL or file path.
    pub url: String,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// Registry behaviour injected into the listing service.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Number of substations per page.
    pub page_size: u32,
    /// Accepted substation type labels.
    pub substation_types: Vec<String>,
}

impl Config {
    /// Load configuration from `substations.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("substations.toml")?;
        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("SUBSTATIONS_HOST") {
            self.server.host = val;
        }
        if let Some(port) = var("SUBSTATIONS_PORT").and_then(|val| val.parse().ok()) {
            self.server.port = port;
        }
        if let Some(val) = var("SUBSTATIONS_BIND")
            && let Some((host, port)) = val.rsplit_once(':')
        {
            self.server.host = host.to_string();
            if let Ok(port) = port.parse() {
                self.server.port = port;
            }
        }
        if let Some(val) = var("SUBSTATIONS_STATIC_DIR") {
            // An empty value turns static hosting off.
            self.server.static_dir = (!val.is_empty()).then(|| PathBuf::from(val));
        }
        if let Some(val) = var("SUBSTATIONS_DATABASE_URL") {
            self.database.url = val;
        }
        if let Some(val) = var("SUBSTATIONS_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        self.listing_policy()?;
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Return the database URL in `sqlx`-compatible format.
    #[must_use]
    pub fn database_url(&self) -> &str {
        &self.database.url
    }

    /// Return the static client directory, if any.
    #[must_use]
    pub fn static_dir(&self) -> Option<&Path> {
        self.server.static_dir.as_deref()
    }

    /// Build the listing policy from the `[registry]` section.
    ///
    /// # Errors
    ///
    /// Returns an error if the page size is zero or the type labels are
    /// unusable.
    pub fn listing_policy(&self) -> Result<ListingPolicy, ConfigError> {
        let page_size = NonZeroU32::new(self.registry.page_size)
            .ok_or_else(|| ConfigError::Validation("page size must be non-zero".to_string()))?;
        let types = TypeCatalog::new(&self.registry.substation_types)?;
        Ok(ListingPolicy::new(page_size, types))
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            static_dir: Some(PathBuf::from("public")),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite:substations.db?mode=rwc".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "substationsd=info,substations=info,tower_http=debug".to_string(),
        }
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE.get(),
            substation_types: DEFAULT_TYPE_LABELS.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Unusable substation type labels.
    #[error("invalid substation types")]
    Catalog(#[from] CatalogError),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
