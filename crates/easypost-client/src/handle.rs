//! Configured transport handles.
//!
//! A [`ClientHandle`] is a reqwest connection pool bound to one API base
//! address, with the [`WireFormat`] used to (de)serialize request and
//! response bodies attached. Handles are built by the
//! [`ClientRegistry`](crate::ClientRegistry) and shared as `Arc`s; nothing
//! mutates a handle after construction.

use std::fmt;

use easypost_wire::WireFormat;
use url::Url;

use crate::config::TransportOptions;
use crate::error::ClientError;

/// Normalized base address used to index the registry.
///
/// Surrounding whitespace and trailing `/` are removed, so
/// `https://api.easypost.com/v2/` and `https://api.easypost.com/v2` share a
/// handle. Nothing else about the address is interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClientKey(String);

impl ClientKey {
    pub fn new(base_address: &str) -> Self {
        Self(base_address.trim().trim_end_matches('/').to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClientKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A fully configured transport for one API base address.
#[derive(Debug)]
pub struct ClientHandle {
    key: ClientKey,
    base_url: Url,
    http: reqwest::Client,
    wire: WireFormat,
}

impl ClientHandle {
    /// Build a handle for `key`.
    ///
    /// # Errors
    ///
    /// [`ClientError::InvalidBaseUrl`] if the key is not an absolute URL,
    /// [`ClientError::Transport`] if reqwest rejects the configuration.
    pub(crate) fn build(
        key: ClientKey,
        options: &TransportOptions,
        wire: WireFormat,
    ) -> Result<Self, ClientError> {
        // Parse with a trailing slash so `join` appends rather than replaces
        // the last path segment.
        let base_url = Url::parse(&format!("{key}/")).map_err(|e| ClientError::InvalidBaseUrl {
            address: key.to_string(),
            reason: e.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidBaseUrl {
                address: key.to_string(),
                reason: "not a hierarchical URL".into(),
            });
        }

        let mut builder = reqwest::Client::builder().user_agent(options.user_agent.as_str());
        if let Some(timeout) = options.timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(|e| ClientError::Transport {
            address: key.to_string(),
            source: e,
        })?;

        Ok(Self {
            key,
            base_url,
            http,
            wire,
        })
    }

    /// The registry key this handle was built for.
    pub fn key(&self) -> &ClientKey {
        &self.key
    }

    /// The parsed base address (always ends in `/`).
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The underlying connection pool. Cloning a `reqwest::Client` is cheap
    /// and shares the pool.
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Serialization configuration for bodies sent and received through this handle.
    pub fn wire_format(&self) -> &WireFormat {
        &self.wire
    }

    /// Absolute URL for a resource path such as `"addresses"` or `"shipments/shp_123"`.
    pub fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ClientError::InvalidPath {
                address: self.key.to_string(),
                path: path.to_string(),
                reason: e.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(address: &str) -> Result<ClientHandle, ClientError> {
        ClientHandle::build(ClientKey::new(address), &TransportOptions::default(), WireFormat::default())
    }

    #[test]
    fn key_strips_whitespace_and_trailing_slashes() {
        assert_eq!(ClientKey::new(" https://api.easypost.com/v2// ").as_str(), "https://api.easypost.com/v2");
        assert_eq!(ClientKey::new("https://a.test"), ClientKey::new("https://a.test/"));
        assert_ne!(ClientKey::new("https://a.test"), ClientKey::new("https://A.test"));
    }

    #[test]
    fn endpoint_joins_below_base_path() {
        let handle = build("https://api.easypost.com/v2").unwrap();
        assert_eq!(handle.base_url().as_str(), "https://api.easypost.com/v2/");
        assert_eq!(
            handle.endpoint("addresses").unwrap().as_str(),
            "https://api.easypost.com/v2/addresses"
        );
        assert_eq!(
            handle.endpoint("/shipments/shp_123/rates").unwrap().as_str(),
            "https://api.easypost.com/v2/shipments/shp_123/rates"
        );
    }

    #[test]
    fn relative_address_is_rejected() {
        let err = build("api.easypost.com/v2").unwrap_err();
        assert!(matches!(err, ClientError::InvalidBaseUrl { .. }), "{err}");
    }

    #[test]
    fn non_hierarchical_address_is_rejected() {
        let err = build("mailto:support@easypost.com").unwrap_err();
        assert!(matches!(err, ClientError::InvalidBaseUrl { .. }), "{err}");
    }

    #[test]
    fn handle_carries_wire_format() {
        let handle = build("https://api.easypost.com/v2").unwrap();
        assert_eq!(handle.wire_format().wire_name("APIKey"), "api_key");
        assert_eq!(handle.key().as_str(), "https://api.easypost.com/v2");
    }
}
