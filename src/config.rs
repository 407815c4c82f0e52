// ⚙️ Configuration
//
// Chooses the store backend once at startup. Sources: a TOML file or environment
// variables. The chosen store is injected into the service; nothing looks it up later.

use crate::store::{AccountStore, InMemoryAccountStore, SqliteAccountStore};
use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

pub const ENV_STORE: &str = "BANK_ACCOUNTS_STORE";
pub const ENV_DB: &str = "BANK_ACCOUNTS_DB";
pub const ENV_ADDR: &str = "BANK_ACCOUNTS_ADDR";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Unknown store backend: {0} (expected \"memory\" or \"sqlite\")")]
    UnknownBackend(String),

    #[error("The sqlite backend requires a database path (BANK_ACCOUNTS_DB)")]
    MissingDatabasePath,
}

// ============================================================================
// CONFIG TYPES
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(tag = "backend", rename_all = "lowercase")]
pub enum StoreConfig {
    /// Volatile map; restart loses all data
    #[default]
    Memory,
    /// SQLite database file
    Sqlite { path: PathBuf },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}

fn default_bind_addr() -> String {
    DEFAULT_BIND_ADDR.to_string()
}

// ============================================================================
// LOADING
// ============================================================================

impl AppConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Read `BANK_ACCOUNTS_STORE`, `BANK_ACCOUNTS_DB` and `BANK_ACCOUNTS_ADDR`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let db_path = lookup(ENV_DB).filter(|p| !p.is_empty()).map(PathBuf::from);

        let store = match lookup(ENV_STORE).as_deref() {
            None | Some("") => match db_path {
                Some(path) => StoreConfig::Sqlite { path },
                None => StoreConfig::Memory,
            },
            Some(backend) if backend.eq_ignore_ascii_case("memory") => StoreConfig::Memory,
            Some(backend) if backend.eq_ignore_ascii_case("sqlite") => StoreConfig::Sqlite {
                path: db_path.ok_or(ConfigError::MissingDatabasePath)?,
            },
            Some(other) => return Err(ConfigError::UnknownBackend(other.to_string())),
        };

        let server = ServerConfig {
            bind_addr: lookup(ENV_ADDR)
                .filter(|a| !a.is_empty())
                .unwrap_or_else(default_bind_addr),
        };

        Ok(AppConfig { store, server })
    }
}

impl StoreConfig {
    /// Build the configured store, ready to inject into `AccountService::new`.
    pub fn open_store(&self) -> anyhow::Result<Arc<dyn AccountStore>> {
        match self {
            StoreConfig::Memory => {
                tracing::info!("Using in-memory account store");
                Ok(Arc::new(InMemoryAccountStore::new()))
            }
            StoreConfig::Sqlite { path } => {
                tracing::info!("Using SQLite account store at {}", path.display());
                let store = SqliteAccountStore::open(path)
                    .with_context(|| format!("Failed to open store at {}", path.display()))?;
                Ok(Arc::new(store))
            }
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
