//! EasyPost client configuration.
//!
//! Configures the API base URL and the transport options applied to every
//! client handle. Defaults point to the production API. Override via
//! environment variables or explicit construction for staging/testing.

use std::time::Duration;

use url::Url;

/// Production API base address.
pub const DEFAULT_API_BASE: &str = "https://api.easypost.com/v2";

/// Options applied to every reqwest client built by a registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportOptions {
    /// Request timeout in milliseconds. `0` keeps reqwest's default (no timeout).
    pub timeout_ms: u64,
    /// `User-Agent` header sent with every request.
    pub user_agent: String,
}

impl Default for TransportOptions {
    fn default() -> Self {
        Self {
            timeout_ms: 0,
            user_agent: format!("EasyPost/RustAsync/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl TransportOptions {
    /// The request timeout, or `None` when the default applies.
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_ms > 0).then(|| Duration::from_millis(self.timeout_ms))
    }
}

/// Configuration for connecting to the EasyPost API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base address all resource paths are joined onto.
    /// Default: <https://api.easypost.com/v2>
    pub api_base: String,
    /// Transport options for the handle built for `api_base`.
    pub transport: TransportOptions,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            transport: TransportOptions::default(),
        }
    }
}

impl ClientConfig {
    /// Configuration for `api_base` with default transport options.
    pub fn with_api_base(api_base: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into(),
            ..Self::default()
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `EASYPOST_API_BASE` (default: `https://api.easypost.com/v2`)
    /// - `EASYPOST_TIMEOUT_MS` (default: 0, meaning no client-side timeout)
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            api_base: env_url("EASYPOST_API_BASE", DEFAULT_API_BASE)?,
            transport: TransportOptions {
                timeout_ms: env_u64("EASYPOST_TIMEOUT_MS", 0)?,
                ..TransportOptions::default()
            },
        })
    }

    /// Create a configuration pointing to a local mock server (for testing).
    pub fn local_mock(port: u16) -> Self {
        Self {
            api_base: format!("http://127.0.0.1:{port}/v2"),
            transport: TransportOptions {
                timeout_ms: 5_000,
                ..TransportOptions::default()
            },
        }
    }
}

/// Read a URL-valued variable, validating it but keeping the raw text so the
/// registry sees exactly what the operator configured.
fn env_url(var: &str, default: &str) -> Result<String, ConfigError> {
    let raw = std::env::var(var).unwrap_or_else(|_| default.to_string());
    Url::parse(raw.trim()).map_err(|e| ConfigError::InvalidUrl(var.to_string(), e.to_string()))?;
    Ok(raw)
}

fn env_u64(var: &str, default: u64) -> Result<u64, ConfigError> {
    match std::env::var(var) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidNumber(var.to_string(), raw)),
        Err(_) => Ok(default),
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
    #[error("invalid number for {0}: {1:?}")]
    InvalidNumber(String, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_production() {
        let cfg = ClientConfig::default();
        assert_eq!(cfg.api_base, "https://api.easypost.com/v2");
        assert_eq!(cfg.transport.timeout(), None);
        assert!(cfg.transport.user_agent.starts_with("EasyPost/RustAsync/"));
    }

    #[test]
    fn local_mock_builds_valid_config() {
        let cfg = ClientConfig::local_mock(9000);
        assert_eq!(cfg.api_base, "http://127.0.0.1:9000/v2");
        assert_eq!(cfg.transport.timeout(), Some(Duration::from_secs(5)));
    }

    #[test]
    fn env_url_uses_default_when_var_absent() {
        let url = env_url("NONEXISTENT_VAR_EP_12345", "https://example.com").unwrap();
        assert_eq!(url, "https://example.com");
    }

    #[test]
    fn env_url_rejects_invalid_url() {
        std::env::set_var("TEST_BAD_URL_EP", "not a url");
        let result = env_url("TEST_BAD_URL_EP", "https://example.com");
        std::env::remove_var("TEST_BAD_URL_EP");
        assert!(matches!(result, Err(ConfigError::InvalidUrl(var, _)) if var == "TEST_BAD_URL_EP"));
    }

    #[test]
    fn env_u64_parses_and_rejects() {
        std::env::set_var("TEST_TIMEOUT_EP_OK", " 1500 ");
        assert_eq!(env_u64("TEST_TIMEOUT_EP_OK", 0).unwrap(), 1500);
        std::env::remove_var("TEST_TIMEOUT_EP_OK");

        std::env::set_var("TEST_TIMEOUT_EP_BAD", "soon");
        let result = env_u64("TEST_TIMEOUT_EP_BAD", 0);
        std::env::remove_var("TEST_TIMEOUT_EP_BAD");
        assert!(matches!(result, Err(ConfigError::InvalidNumber(_, raw)) if raw == "soon"));

        assert_eq!(env_u64("NONEXISTENT_TIMEOUT_EP_12345", 7).unwrap(), 7);
    }
}
