//! # Client Registry — One Handle per API Base Address
//!
//! Building a reqwest client allocates a connection pool and TLS state, so
//! the client keeps exactly one [`ClientHandle`] per distinct base address
//! and hands out shared references to it.
//!
//! ## Locking
//!
//! The handle map is an immutable snapshot behind an `ArcSwap`. Lookups load
//! the current snapshot and take no lock, so a cache hit never waits on a
//! writer. On a miss the caller takes the registry's `parking_lot`
//! construction mutex, looks again (another caller may have won the race),
//! and only then builds the handle and publishes a new snapshot containing
//! it. Writers are serialized by that mutex, so a publish never drops a
//! concurrent insert. At most one handle is ever constructed per key. The
//! mutex is never held across `.await` points or network I/O.
//!
//! Entries are never evicted or replaced. A failed construction caches
//! nothing, so the next call for the same address tries again.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};

use arc_swap::ArcSwap;
use easypost_wire::WireFormat;
use parking_lot::Mutex;

use crate::config::{ClientConfig, TransportOptions};
use crate::error::ClientError;
use crate::handle::{ClientHandle, ClientKey};

/// Memoizing factory for [`ClientHandle`]s, keyed by normalized base address.
#[derive(Debug)]
pub struct ClientRegistry {
    /// Published snapshot; replaced wholesale, never mutated in place.
    handles: ArcSwap<HashMap<ClientKey, Arc<ClientHandle>>>,
    /// Serializes check-then-publish on a miss.
    build_lock: Mutex<()>,
    constructed: AtomicUsize,
    options: TransportOptions,
    wire: WireFormat,
}

impl Default for ClientRegistry {
    fn default() -> Self {
        Self::new(TransportOptions::default())
    }
}

impl ClientRegistry {
    /// Create an empty registry whose handles use `options` and the default
    /// snake_case [`WireFormat`].
    pub fn new(options: TransportOptions) -> Self {
        Self::with_wire_format(options, WireFormat::default())
    }

    /// Create an empty registry attaching `wire` to every handle.
    pub fn with_wire_format(options: TransportOptions, wire: WireFormat) -> Self {
        Self {
            handles: ArcSwap::from_pointee(HashMap::new()),
            build_lock: Mutex::new(()),
            constructed: AtomicUsize::new(0),
            options,
            wire,
        }
    }

    /// Create an empty registry using the transport options of `config`.
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.transport.clone())
    }

    /// A lazily created process-wide registry with default options.
    ///
    /// Prefer owning a [`ClientRegistry`] where possible; this exists for
    /// callers that have nowhere to keep one.
    pub fn global() -> &'static ClientRegistry {
        static GLOBAL: OnceLock<ClientRegistry> = OnceLock::new();
        GLOBAL.get_or_init(ClientRegistry::default)
    }

    /// Return the handle for `base_address`, building it on first use.
    ///
    /// # Errors
    ///
    /// Propagates [`ClientError`] from handle construction. Nothing is cached
    /// on failure.
    pub fn get_or_create(&self, base_address: &str) -> Result<Arc<ClientHandle>, ClientError> {
        let key = ClientKey::new(base_address);

        if let Some(handle) = self.lookup(&key) {
            return Ok(handle);
        }

        let _guard = self.build_lock.lock();
        if let Some(handle) = self.lookup(&key) {
            tracing::debug!(base_address = %key, "client handle created by a concurrent caller");
            return Ok(handle);
        }

        let handle = match ClientHandle::build(key.clone(), &self.options, self.wire) {
            Ok(handle) => Arc::new(handle),
            Err(e) => {
                tracing::warn!(base_address = %key, error = %e, "failed to construct client handle");
                return Err(e);
            }
        };
        self.constructed.fetch_add(1, Ordering::SeqCst);
        let mut next = HashMap::clone(&self.handles.load_full());
        next.insert(key.clone(), Arc::clone(&handle));
        self.handles.store(Arc::new(next));
        tracing::debug!(base_address = %key, "constructed client handle");
        Ok(handle)
    }

    fn lookup(&self, key: &ClientKey) -> Option<Arc<ClientHandle>> {
        self.handles.load().get(key).cloned()
    }

    /// Whether a handle exists for `base_address`.
    pub fn contains(&self, base_address: &str) -> bool {
        self.handles.load().contains_key(&ClientKey::new(base_address))
    }

    /// Number of cached handles.
    pub fn len(&self) -> usize {
        self.handles.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.load().is_empty()
    }

    /// Number of handles ever constructed by this registry.
    pub fn constructed(&self) -> usize {
        self.constructed.load(Ordering::SeqCst)
    }

    /// Transport options applied to new handles.
    pub fn options(&self) -> &TransportOptions {
        &self.options
    }
}
