// Bank Accounts - Core Library
// Exposes the account model, stores and service for use in the CLI, API server, and tests

pub mod outcome;   // Success/failure contract shared by every layer
pub mod entities;  // Immutable Account value + validated factory
pub mod store;     // AccountStore trait + in-memory / SQLite backends
pub mod service;   // Orchestration exposed to hosts
pub mod config;    // Startup backend selection (TOML / env)
pub mod logging;

#[cfg(feature = "server")]
pub mod http;

// Re-export commonly used types
pub use outcome::{
    failed, succeeded, ErrorCategory, ErrorInfo, ErrorKind, Outcome, OutcomeStatus,
};
pub use entities::{Account, AccountProps, AccountUpdate};
pub use store::{AccountStore, InMemoryAccountStore, SqliteAccountStore};
pub use service::AccountService;
pub use config::{AppConfig, ConfigError, ServerConfig, StoreConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
