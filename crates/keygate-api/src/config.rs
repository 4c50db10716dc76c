//! # Configuration
//!
//! Binds the `ApiKey` value and its extraction settings once at startup.
//!
//! Sources, in increasing precedence:
//!
//! 1. YAML file (path from `--config` / `KEYGATE_CONFIG`)
//! 2. `KEYGATE_API_KEY` environment variable (the key only)
//! 3. `--port` / `PORT` (the port only)
//!
//! ```yaml
//! port: 8080
//! authentication:
//!   api_key: "secret123"
//!   header_name: "X-API-Key"
//!   query_param: "api_key"   # null disables query extraction
//! ```

use std::path::{Path, PathBuf};

use axum::http::HeaderName;
use serde::{Deserialize, Deserializer};
use zeroize::Zeroizing;

/// Default listening port.
pub const DEFAULT_PORT: u16 = 8080;
/// Default request header carrying the API key.
pub const DEFAULT_HEADER_NAME: &str = "X-API-Key";
/// Default query parameter carrying the API key.
pub const DEFAULT_QUERY_PARAM: &str = "api_key";

// ── File format ─────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    #[serde(default)]
    port: Option<u16>,
    #[serde(default)]
    authentication: AuthenticationSection,
}

#[derive(Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct AuthenticationSection {
    #[serde(default)]
    api_key: Option<String>,
    #[serde(default)]
    header_name: Option<String>,
    /// Absent means default; explicit `null` disables query extraction.
    #[serde(default, deserialize_with = "explicit_null")]
    query_param: Option<Option<String>>,
}

impl std::fmt::Debug for AuthenticationSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthenticationSection")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("header_name", &self.header_name)
            .field("query_param", &self.query_param)
            .finish()
    }
}

fn explicit_null<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

// ── Resolved configuration ──────────────────────────────────────────────────

/// Settings for the API key authentication scheme.
///
/// Custom `Debug` redacts the key value to prevent credential leakage in logs.
#[derive(Clone)]
pub struct ApiKeyAuthOptions {
    /// The expected key. Zeroized on drop.
    pub api_key: Zeroizing<String>,
    /// Header inspected first for the credential.
    pub header_name: HeaderName,
    /// Query parameter inspected when the header is absent. `None` disables it.
    pub query_param: Option<String>,
}

impl ApiKeyAuthOptions {
    /// Options with the default header and query parameter names.
    pub fn with_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Zeroizing::new(api_key.into()),
            header_name: HeaderName::from_static("x-api-key"),
            query_param: Some(DEFAULT_QUERY_PARAM.to_string()),
        }
    }
}

impl std::fmt::Debug for ApiKeyAuthOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKeyAuthOptions")
            .field("api_key", &"[REDACTED]")
            .field("header_name", &self.header_name)
            .field("query_param", &self.query_param)
            .finish()
    }
}

/// Process configuration, loaded once at startup and read-only afterwards.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Port to bind the HTTP server to.
    pub port: u16,
    /// Authentication scheme settings.
    pub auth: ApiKeyAuthOptions,
}

/// Overrides applied on top of the config file.
#[derive(Default)]
pub struct Overrides {
    pub api_key: Option<String>,
    pub port: Option<u16>,
}

impl std::fmt::Debug for Overrides {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Overrides")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("port", &self.port)
            .finish()
    }
}

impl AppConfig {
    /// Load configuration from an optional YAML file plus overrides.
    pub fn load(path: Option<&Path>, overrides: Overrides) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => {
                let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })?;
                parse_file(&raw)?
            }
            None => FileConfig::default(),
        };
        Self::resolve(file, overrides)
    }

    /// Parse configuration from a YAML string plus overrides.
    pub fn from_yaml_str(raw: &str, overrides: Overrides) -> Result<Self, ConfigError> {
        Self::resolve(parse_file(raw)?, overrides)
    }

    fn resolve(file: FileConfig, overrides: Overrides) -> Result<Self, ConfigError> {
        let FileConfig {
            port,
            authentication,
        } = file;

        // An empty override counts as unset, so the file value still applies.
        let api_key = overrides
            .api_key
            .filter(|k| !k.is_empty())
            .or(authentication.api_key)
            .filter(|k| !k.is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        let header_raw = authentication
            .header_name
            .unwrap_or_else(|| DEFAULT_HEADER_NAME.to_string());
        let header_name = HeaderName::from_bytes(header_raw.as_bytes())
            .map_err(|_| ConfigError::InvalidHeaderName(header_raw.clone()))?;

        let query_param = match authentication.query_param {
            None => Some(DEFAULT_QUERY_PARAM.to_string()),
            Some(None) => None,
            Some(Some(name)) if name.is_empty() => return Err(ConfigError::EmptyQueryParam),
            Some(Some(name)) => Some(name),
        };

        Ok(Self {
            port: overrides.port.or(port).unwrap_or(DEFAULT_PORT),
            auth: ApiKeyAuthOptions {
                api_key: Zeroizing::new(api_key),
                header_name,
                query_param,
            },
        })
    }
}

fn parse_file(raw: &str) -> Result<FileConfig, ConfigError> {
    // An empty document deserializes as unit, not as a mapping.
    if raw.trim().is_empty() {
        return Ok(FileConfig::default());
    }
    serde_yaml::from_str(raw).map_err(ConfigError::Parse)
}

/// Configuration errors. All are fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file: {0}")]
    Parse(#[source] serde_yaml::Error),
    #[error("API key is not configured (set authentication.api_key or KEYGATE_API_KEY)")]
    MissingApiKey,
    #[error("invalid header name: {0:?}")]
    InvalidHeaderName(String),
    #[error("query parameter name must not be empty")]
    EmptyQueryParam,
}
