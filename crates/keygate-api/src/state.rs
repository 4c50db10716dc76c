//! # Application State
//!
//! Shared state for the Axum application: the authentication scheme
//! captured at startup and the metrics counters.

use keygate_core::KeyError;

use crate::auth::ApiKeyAuth;
use crate::config::AppConfig;
use crate::middleware::metrics::ApiMetrics;

/// Shared application state passed to all route handlers.
///
/// Immutable after construction apart from the atomic counters.
#[derive(Debug, Clone)]
pub struct AppState {
    pub auth: ApiKeyAuth,
    pub metrics: ApiMetrics,
}

impl AppState {
    /// Build state from resolved configuration.
    pub fn from_config(config: &AppConfig) -> Result<Self, KeyError> {
        Ok(Self {
            auth: ApiKeyAuth::from_options(&config.auth)?,
            metrics: ApiMetrics::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AppConfig, ApiKeyAuthOptions};

    #[test]
    fn state_from_config() {
        let config = AppConfig {
            port: 8080,
            auth: ApiKeyAuthOptions::with_key("secret123"),
        };
        let state = AppState::from_config(&config).unwrap();
        assert_eq!(state.auth.header_name().as_str(), "x-api-key");
        assert_eq!(state.metrics.snapshot().requests, 0);
    }
}
