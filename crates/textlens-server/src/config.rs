//! Server configuration
//!
//! Built once at startup from environment variables (a `.env` file is
//! loaded first when present) and shared read-only through `AppState`.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_COLLECTION: &str = "documents";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required environment variable {0}")]
    Missing(&'static str),

    #[error("Invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Where the document collection lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreLocation {
    /// `postgres://` or `postgresql://` connection URI
    Postgres(String),
    /// `file://` path to a JSON document file
    File(PathBuf),
}

impl std::str::FromStr for StoreLocation {
    type Err = String;

    fn from_str(uri: &str) -> Result<Self, Self::Err> {
        if uri.starts_with("postgres://") || uri.starts_with("postgresql://") {
            Ok(StoreLocation::Postgres(uri.to_string()))
        } else if let Some(path) = uri.strip_prefix("file://") {
            if path.is_empty() {
                return Err("file:// URI has no path".to_string());
            }
            Ok(StoreLocation::File(PathBuf::from(path)))
        } else {
            Err(format!("unsupported store URI scheme: {}", uri))
        }
    }
}

/// Document store settings
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub location: StoreLocation,
    pub collection: String,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Sent as the `api-key` header to both model endpoints
    pub api_key: String,
    pub completion_url: String,
    pub embedding_url: String,
    /// `None` disables collection vectorization
    pub store: Option<StoreConfig>,
    pub request_timeout: Option<Duration>,
    /// Inbound bearer token; `None` disables authentication
    pub server_api_key: Option<String>,
    pub bind_addr: SocketAddr,
}

impl AppConfig {
    /// Load from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Err(e) = dotenvy::dotenv() {
            tracing::debug!("No .env file loaded: {}", e);
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let required = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        let api_key = required("OPENAI_API_KEY")?;
        let completion_url = required("COMPLETION_URL")?;
        let embedding_url = required("EMBEDDING_URL")?;

        let store = match get("DOCUMENT_STORE_URI") {
            Some(uri) => {
                let location: StoreLocation = uri.parse().map_err(|reason| ConfigError::Invalid {
                    key: "DOCUMENT_STORE_URI",
                    reason,
                })?;
                Some(StoreConfig {
                    location,
                    collection: get("DOCUMENT_COLLECTION")
                        .unwrap_or_else(|| DEFAULT_COLLECTION.to_string()),
                })
            }
            None => None,
        };

        let request_timeout = match get("REQUEST_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|_| ConfigError::Invalid {
                    key: "REQUEST_TIMEOUT_SECS",
                    reason: format!("'{}' is not a whole number of seconds", raw),
                })?;
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        let bind_addr = get("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::Invalid {
                key: "BIND_ADDR",
                reason: e.to_string(),
            })?;

        Ok(Self {
            api_key,
            completion_url,
            embedding_url,
            store,
            request_timeout,
            server_api_key: get("TEXTLENS_API_KEY"),
            bind_addr,
        })
    }
}
