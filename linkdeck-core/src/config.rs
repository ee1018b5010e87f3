//! Layered configuration for the linkdeck service
//!
//! Resolution order (later wins):
//! 1. Built-in defaults
//! 2. TOML file at `$LINKDECK_CONFIG` or `~/.linkdeck/config.toml` (optional)
//! 3. Environment variables (`PORT`, `DATABASE_URL`, `DB_HOST`, ...)

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{LinkdeckError, Result};

/// Categories created on first startup when no list is configured.
pub const DEFAULT_CATEGORIES: &[&str] = &[
    "Development",
    "Design",
    "Tools",
    "Learning",
    "Reading",
    "Entertainment",
    "Other",
];

const REDACTED: &str = "********";

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkdeckConfig {
    pub server: ServerSection,
    pub database: DatabaseConfig,
    pub catalog: CatalogConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    pub host: String,
    pub port: u16,
    /// Allow any CORS origin instead of localhost only
    pub cors_permissive: bool,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8092,
            cors_permissive: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Full connection string; takes precedence over the individual parts
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
    pub sslmode: String,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            host: "localhost".to_string(),
            port: 5432,
            user: "postgres".to_string(),
            password: String::new(),
            name: "linkdeck".to_string(),
            sslmode: "disable".to_string(),
            max_connections: 5,
        }
    }
}

impl DatabaseConfig {
    /// Connection string handed to the pool.
    ///
    /// Credentials are percent-encoded so passwords containing `@` or `/`
    /// survive the round trip.
    pub fn connection_url(&self) -> String {
        if let Some(url) = self.url.as_deref().filter(|u| !u.is_empty()) {
            return url.to_string();
        }

        let credentials = if self.password.is_empty() {
            urlencoding::encode(&self.user).into_owned()
        } else {
            format!(
                "{}:{}",
                urlencoding::encode(&self.user),
                urlencoding::encode(&self.password)
            )
        };

        format!(
            "postgres://{}@{}:{}/{}?sslmode={}",
            credentials, self.host, self.port, self.name, self.sslmode
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Category names inserted at startup (idempotent)
    pub seed_categories: Vec<String>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            seed_categories: DEFAULT_CATEGORIES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl CatalogConfig {
    /// Trimmed seed names with blanks and duplicates removed, first-seen order.
    pub fn seed_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::with_capacity(self.seed_categories.len());
        for raw in &self.seed_categories {
            let name = raw.trim();
            if name.is_empty() || names.iter().any(|n| n == name) {
                continue;
            }
            names.push(name.to_string());
        }
        names
    }
}

impl LinkdeckConfig {
    /// Load defaults, then the config file (if present), then the process environment.
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        let mut config = Self::from_file(&path)?.unwrap_or_default();
        config.apply_env(|key| env::var(key).ok())?;
        Ok(config)
    }

    /// Config file path: `$LINKDECK_CONFIG` or `~/.linkdeck/config.toml`
    pub fn config_path() -> PathBuf {
        if let Ok(path) = env::var("LINKDECK_CONFIG") {
            return PathBuf::from(path);
        }
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".linkdeck/config.toml")
    }

    /// Read a config file. A missing file is `Ok(None)`, a broken one is an error.
    pub fn from_file(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(None);
        }

        let content = fs::read_to_string(path).map_err(|source| LinkdeckError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        let config = toml::from_str(&content).map_err(|source| LinkdeckError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::debug!(path = %path.display(), "config file loaded");
        Ok(Some(config))
    }

    /// Overlay environment values using `lookup`.
    ///
    /// Takes a lookup function instead of reading `std::env` directly so tests
    /// don't have to mutate process state.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.server.port = parse_port("PORT", &port)?;
        }

        if let Some(url) = lookup("DATABASE_URL").filter(|u| !u.is_empty()) {
            self.database.url = Some(url);
        }
        if let Some(host) = lookup("DB_HOST") {
            self.database.host = host;
        }
        if let Some(port) = lookup("DB_PORT") {
            self.database.port = parse_port("DB_PORT", &port)?;
        }
        if let Some(user) = lookup("DB_USER") {
            self.database.user = user;
        }
        if let Some(password) = lookup("DB_PASSWORD") {
            self.database.password = password;
        }
        if let Some(name) = lookup("DB_NAME") {
            self.database.name = name;
        }
        if let Some(sslmode) = lookup("DB_SSLMODE") {
            self.database.sslmode = sslmode;
        }

        if let Some(list) = lookup("LINKDECK_SEED_CATEGORIES") {
            self.catalog.seed_categories = list.split(',').map(|s| s.trim().to_string()).collect();
        }

        Ok(())
    }

    /// Copy with secrets masked, for display.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if !copy.database.password.is_empty() {
            copy.database.password = REDACTED.to_string();
        }
        if copy.database.url.is_some() {
            copy.database.url = Some(REDACTED.to_string());
        }
        copy
    }

    /// Render as pretty TOML
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

fn parse_port(key: &'static str, value: &str) -> Result<u16> {
    value
        .trim()
        .parse::<u16>()
        .map_err(|e| LinkdeckError::invalid_env(key, value, e.to_string()))
}
