//! Configuration loaded from environment variables.
//!
//! | Variable | Default |
//! |---|---|
//! | `TUTORIALS_BIND_ADDR` | `0.0.0.0:8080` |
//! | `TUTORIALS_STORE` | `mongo` (or `memory`) |
//! | `MONGODB_URI` | `mongodb://localhost:27017` |
//! | `MONGODB_DATABASE` | `tutorials` |

use std::net::SocketAddr;
use std::str::FromStr;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_MONGODB_URI: &str = "mongodb://localhost:27017";
const DEFAULT_MONGODB_DATABASE: &str = "tutorials";

/// Which [`TutorialStore`](crate::store::TutorialStore) backend to run.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StoreBackend {
    Mongo,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mongo" | "mongodb" => Ok(Self::Mongo),
            "memory" => Ok(Self::Memory),
            _ => Err(ConfigError::UnknownStore(s.to_owned())),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub store: StoreBackend,
    pub mongodb_uri: String,
    pub mongodb_database: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup; `from_env` passes the process
    /// environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bind_addr = lookup("TUTORIALS_BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_owned());
        let bind_addr = bind_addr.parse()
            .map_err(|_| ConfigError::InvalidBindAddr(bind_addr))?;

        let store = match lookup("TUTORIALS_STORE") {
            Some(value) => value.parse()?,
            None => StoreBackend::Mongo,
        };

        let mongodb_uri = lookup("MONGODB_URI")
            .unwrap_or_else(|| DEFAULT_MONGODB_URI.to_owned());
        let mongodb_database = lookup("MONGODB_DATABASE")
            .unwrap_or_else(|| DEFAULT_MONGODB_DATABASE.to_owned());

        Ok(Self { bind_addr, store, mongodb_uri, mongodb_database })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid bind address `{0}`, expected host:port")]
    InvalidBindAddr(String),

    #[error("unknown store backend `{0}`, expected `mongo` or `memory`")]
    UnknownStore(String),
}
