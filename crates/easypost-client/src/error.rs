//! Client handle error types.

/// Errors from building or using a client handle.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The base address is not an absolute URL.
    #[error("invalid API base address {address:?}: {reason}")]
    InvalidBaseUrl { address: String, reason: String },
    /// The transport layer could not be configured.
    #[error("failed to build HTTP client for {address}: {source}")]
    Transport {
        address: String,
        source: reqwest::Error,
    },
    /// A resource path could not be joined onto the base address.
    #[error("invalid resource path {path:?} for {address}: {reason}")]
    InvalidPath {
        address: String,
        path: String,
        reason: String,
    },
}
