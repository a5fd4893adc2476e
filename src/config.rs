use std::env;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::store::StoreConfig;

const ENV_PREFIX: &str = "MESSAGE_BOARD";

/// Top-level application configuration loaded from file + environment.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub page: PageConfig,
    pub database: DatabaseSection,
    pub api: ApiSection,
    pub logging: LoggingSection,
}

impl AppConfig {
    /// Load configuration from disk and environment.
    pub fn load() -> Result<Self> {
        let config_path =
            env::var("MESSAGE_BOARD_CONFIG").unwrap_or_else(|_| "config.toml".to_string());
        Self::load_from(Path::new(&config_path))
    }

    /// Load configuration from `path` (skipped when absent) layered under the
    /// process environment.
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = Self::read(path)?;

        config
            .database
            .apply_legacy_env(|key| env::var(key).ok())?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration for the page server, which never opens a database:
    /// the `DB_*` variables and the database section are not checked.
    pub fn load_for_page() -> Result<Self> {
        let config_path =
            env::var("MESSAGE_BOARD_CONFIG").unwrap_or_else(|_| "config.toml".to_string());
        Self::load_for_page_from(Path::new(&config_path))
    }

    pub fn load_for_page_from(path: &Path) -> Result<Self> {
        let config = Self::read(path)?;
        config.validate_page()?;
        Ok(config)
    }

    fn read(path: &Path) -> Result<Self> {
        let mut builder = config::Config::builder();

        if path.exists() {
            builder = builder.add_source(config::File::from(PathBuf::from(path)));
        }

        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder.build()?;
        let mut config: Self = settings.try_deserialize()?;

        if config.logging.level.trim().is_empty() {
            config.logging.level = "info".to_string();
        }

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            bail!("server.port must be non-zero");
        }
        self.validate_page()?;
        if matches!(self.database.backend, StoreBackendKind::Postgres) {
            if self.database.host.trim().is_empty() {
                bail!("database.host must be specified");
            }
            if self.database.name.trim().is_empty() {
                bail!("database.name must be specified");
            }
        }
        Ok(())
    }

    pub fn validate_page(&self) -> Result<()> {
        if self.page.port == 0 {
            bail!("page.port must be non-zero");
        }
        Ok(())
    }

    /// Resolve the message store configuration.
    pub fn store_config(&self) -> StoreConfig {
        match self.database.backend {
            StoreBackendKind::Postgres => StoreConfig::Postgres {
                host: self.database.host.clone(),
                port: self.database.port,
                name: self.database.name.clone(),
                user: self.database.user.clone(),
                password: self.database.password.clone(),
            },
            StoreBackendKind::Memory => StoreConfig::Memory,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub host: String,
    pub port: u16,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl PageConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    pub backend: StoreBackendKind,
    pub host: String,
    pub port: u16,
    pub name: String,
    pub user: String,
    pub password: String,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            backend: StoreBackendKind::Postgres,
            host: "db".to_string(),
            port: 5432,
            name: "myapp".to_string(),
            user: "postgres".to_string(),
            password: "postgres".to_string(),
        }
    }
}

impl DatabaseSection {
    /// Apply the unprefixed `DB_*` variables used by container setups.
    pub fn apply_legacy_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("DB_HOST") {
            self.host = host;
        }
        if let Some(port) = lookup("DB_PORT") {
            self.port = port
                .trim()
                .parse()
                .with_context(|| format!("invalid DB_PORT '{}'", port))?;
        }
        if let Some(name) = lookup("DB_NAME") {
            self.name = name;
        }
        if let Some(user) = lookup("DB_USER") {
            self.user = user;
        }
        if let Some(password) = lookup("DB_PASSWORD") {
            self.password = password;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackendKind {
    #[default]
    Postgres,
    Memory,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ApiSection {
    /// Report malformed create requests as 400 instead of 500.
    pub strict_client_errors: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Text,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    #[default]
    Text,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn legacy_env_overrides_database_section() {
        let vars: HashMap<&str, &str> = [
            ("DB_HOST", "localhost"),
            ("DB_PORT", "6543"),
            ("DB_NAME", "board"),
            ("DB_USER", "app"),
            ("DB_PASSWORD", "secret"),
        ]
        .into_iter()
        .collect();

        let mut section = DatabaseSection::default();
        section
            .apply_legacy_env(|key| vars.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(section.host, "localhost");
        assert_eq!(section.port, 6543);
        assert_eq!(section.name, "board");
        assert_eq!(section.user, "app");
        assert_eq!(section.password, "secret");
    }

    #[test]
    fn legacy_env_rejects_bad_port() {
        let mut section = DatabaseSection::default();
        let result = section.apply_legacy_env(|key| {
            (key == "DB_PORT").then(|| "not-a-port".to_string())
        });
        assert!(result.is_err());
    }

    #[test]
    fn memory_backend_skips_database_validation() {
        let config = AppConfig {
            database: DatabaseSection {
                backend: StoreBackendKind::Memory,
                host: String::new(),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_ok());
        assert!(matches!(config.store_config(), StoreConfig::Memory));
    }
}
