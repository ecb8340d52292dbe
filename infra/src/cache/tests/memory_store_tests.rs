//! Unit tests for the in-memory token store

use std::sync::Arc;
use std::time::Duration;

use tg_core::errors::StoreError;
use tg_core::services::TokenStore;

use crate::cache::{create_token_store, CacheConfig, InMemoryTokenStore};

const KEY: &str = "Email:VERIFICATION:CODE:dana@example.com";
const TTL: Duration = Duration::from_secs(180);

#[tokio::test]
async fn test_set_and_get() {
    let store = InMemoryTokenStore::new();

    store.set(KEY, "123456", TTL).await.unwrap();
    assert_eq!(store.get(KEY).await.unwrap(), "123456");
    assert!(store.exists(KEY).await.unwrap());
}

#[tokio::test]
async fn test_get_missing_is_not_found() {
    let store = InMemoryTokenStore::new();

    let err = store.get(KEY).await.unwrap_err();
    assert_eq!(err, StoreError::NotFound { key: KEY.to_string() });
    assert!(!store.exists(KEY).await.unwrap());
}

#[tokio::test]
async fn test_set_overwrites_value_and_ttl() {
    let store = InMemoryTokenStore::new();

    store.set(KEY, "AAAA", Duration::from_secs(10)).await.unwrap();
    store.set(KEY, "BBBB", TTL).await.unwrap();

    assert_eq!(store.get(KEY).await.unwrap(), "BBBB");
    assert!(store.ttl(KEY).await.unwrap() > Duration::from_secs(10));
}

#[tokio::test]
async fn test_set_if_absent() {
    let store = InMemoryTokenStore::new();

    assert!(store.set_if_absent(KEY, "111111", TTL).await.unwrap());
    assert!(!store.set_if_absent(KEY, "222222", TTL).await.unwrap());
    assert_eq!(store.get(KEY).await.unwrap(), "111111");
}

#[tokio::test]
async fn test_delete_reports_removal() {
    let store = InMemoryTokenStore::new();

    store.set(KEY, "123456", TTL).await.unwrap();
    assert!(store.delete(KEY).await.unwrap());
    assert!(!store.delete(KEY).await.unwrap());
    assert!(store.get(KEY).await.is_err());
}

#[tokio::test(start_paused = true)]
async fn test_entries_expire() {
    let store = InMemoryTokenStore::new();
    store.set(KEY, "123456", TTL).await.unwrap();

    tokio::time::advance(Duration::from_secs(179)).await;
    assert_eq!(store.get(KEY).await.unwrap(), "123456");

    tokio::time::advance(Duration::from_secs(1)).await;
    assert!(matches!(store.get(KEY).await, Err(StoreError::NotFound { .. })));
    assert!(!store.exists(KEY).await.unwrap());
    assert!(!store.delete(KEY).await.unwrap());
}

#[tokio::test(start_paused = true)]
async fn test_set_if_absent_after_expiry() {
    let store = InMemoryTokenStore::new();
    store.set_if_absent(KEY, "111111", TTL).await.unwrap();

    tokio::time::advance(TTL).await;
    assert!(store.set_if_absent(KEY, "222222", TTL).await.unwrap());
    assert_eq!(store.get(KEY).await.unwrap(), "222222");
}

#[tokio::test]
async fn test_oversized_ttl_is_capped() {
    let store = InMemoryTokenStore::new();
    let huge = Duration::from_secs(u64::MAX / 2);

    store.set(KEY, "123456", huge).await.unwrap();
    assert!(store.set_if_absent("other", "654321", huge).await.unwrap());

    assert_eq!(store.get(KEY).await.unwrap(), "123456");
    let remaining = store.ttl("other").await.unwrap();
    assert!(remaining <= Duration::from_secs(365 * 24 * 60 * 60));
    assert!(remaining > TTL);
}

#[tokio::test(start_paused = true)]
async fn test_purge_expired() {
    let store = InMemoryTokenStore::new();
    store.set("short", "1", Duration::from_secs(5)).await.unwrap();
    store.set("long", "2", TTL).await.unwrap();

    tokio::time::advance(Duration::from_secs(6)).await;
    assert_eq!(store.len().await, 1);
    assert_eq!(store.purge_expired().await, 1);
    assert!(!store.is_empty().await);
}

#[tokio::test]
async fn test_prefix_isolates_stores() {
    let store = InMemoryTokenStore::with_prefix(Some("tenant-a".to_string()));
    store.set(KEY, "123456", TTL).await.unwrap();

    assert_eq!(store.get(KEY).await.unwrap(), "123456");
    assert!(store.ttl(KEY).await.is_some());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_set_if_absent_has_one_winner() {
    let store = Arc::new(InMemoryTokenStore::new());

    let handles: Vec<_> = (0..32)
        .map(|i| {
            let store = store.clone();
            tokio::spawn(async move { store.set_if_absent(KEY, &i.to_string(), TTL).await })
        })
        .collect();

    let mut winners = 0;
    for handle in handles {
        if handle.await.unwrap().unwrap() {
            winners += 1;
        }
    }
    assert_eq!(winners, 1);
}

#[tokio::test]
async fn test_factory_builds_memory_store() {
    let store = create_token_store(&CacheConfig::memory()).await.unwrap();

    store.set(KEY, "654321", TTL).await.unwrap();
    assert_eq!(store.get(KEY).await.unwrap(), "654321");
    assert!(store.ping().await.is_ok());
}
