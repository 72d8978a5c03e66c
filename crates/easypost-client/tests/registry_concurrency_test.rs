//! Concurrency tests for ClientRegistry::get_or_create().
//!
//! Many threads race on first access to the same base address; the registry
//! must build exactly one handle and every caller must observe it.

use std::sync::{Arc, Barrier};
use std::thread;

use easypost_client::{ClientHandle, ClientRegistry};

const THREADS: usize = 32;

fn race(registry: &ClientRegistry, addresses: &[&str]) -> Vec<Arc<ClientHandle>> {
    let barrier = Barrier::new(THREADS);
    thread::scope(|s| {
        let workers: Vec<_> = (0..THREADS)
            .map(|i| {
                let barrier = &barrier;
                let address = addresses[i % addresses.len()];
                s.spawn(move || {
                    barrier.wait();
                    registry.get_or_create(address).unwrap()
                })
            })
            .collect();
        workers.into_iter().map(|w| w.join().unwrap()).collect()
    })
}

#[test]
fn concurrent_first_access_constructs_once() {
    let registry = ClientRegistry::default();
    let handles = race(&registry, &["https://api.easypost.com/v2"]);

    assert_eq!(registry.constructed(), 1, "exactly one handle must be built");
    assert_eq!(registry.len(), 1);
    let first = &handles[0];
    assert!(handles.iter().all(|h| Arc::ptr_eq(h, first)));
}

#[test]
fn concurrent_access_to_distinct_addresses_builds_one_each() {
    let registry = ClientRegistry::default();
    let addresses = [
        "https://api.easypost.com/v2",
        "https://api.easypost.com/beta",
        "http://127.0.0.1:19000/v2",
        "http://127.0.0.1:19001/v2",
    ];
    let handles = race(&registry, &addresses);

    assert_eq!(registry.constructed(), addresses.len());
    assert_eq!(registry.len(), addresses.len());
    for (i, handle) in handles.iter().enumerate() {
        let expected = registry.get_or_create(addresses[i % addresses.len()]).unwrap();
        assert!(Arc::ptr_eq(handle, &expected));
    }
    assert_eq!(registry.constructed(), addresses.len(), "lookups must not rebuild");
}

#[test]
fn concurrent_failures_cache_nothing() {
    let registry = ClientRegistry::default();
    let barrier = Barrier::new(THREADS);
    let failures = thread::scope(|s| {
        let workers: Vec<_> = (0..THREADS)
            .map(|_| {
                let barrier = &barrier;
                let registry = &registry;
                s.spawn(move || {
                    barrier.wait();
                    registry.get_or_create("no scheme here").is_err()
                })
            })
            .collect();
        workers
            .into_iter()
            .map(|w| w.join().unwrap())
            .filter(|failed| *failed)
            .count()
    });

    assert_eq!(failures, THREADS);
    assert!(registry.is_empty());
    assert_eq!(registry.constructed(), 0);
}
