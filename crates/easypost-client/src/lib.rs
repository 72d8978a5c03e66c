//! # easypost-client — Client Handles for the EasyPost API
//!
//! Provides configured, shareable transport handles for the EasyPost JSON
//! API. Each [`ClientHandle`] bundles a reqwest connection pool for one API
//! base address with the [`WireFormat`](easypost_wire::WireFormat) that maps
//! model fields to snake_case keys and tolerates loosely typed scalars.
//!
//! ## Architecture
//!
//! The [`ClientRegistry`] builds at most one handle per distinct base
//! address and shares it by `Arc`. Registries are ordinary values owned by
//! whatever composes the SDK; [`ClientRegistry::global`] offers a
//! process-wide instance for callers without a place to keep one.
//!
//! Resource models, request verbs, authentication and retries live above
//! this crate and use a handle's [`http`](ClientHandle::http) client,
//! [`endpoint`](ClientHandle::endpoint) and
//! [`wire_format`](ClientHandle::wire_format).

pub mod config;
pub mod error;
pub mod handle;
pub mod registry;

pub use config::{ClientConfig, ConfigError, TransportOptions, DEFAULT_API_BASE};
pub use error::ClientError;
pub use handle::{ClientHandle, ClientKey};
pub use registry::ClientRegistry;

