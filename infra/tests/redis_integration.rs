//! Integration tests for the Redis token store
//!
//! These tests require a running Redis instance to execute.
//! Run with: cargo test -p tg_infra --test redis_integration -- --ignored

#![cfg(feature = "redis-cache")]

use std::time::Duration;

use tg_core::errors::StoreError;
use tg_core::services::TokenStore;
use tg_infra::cache::{CacheConfig, RedisClient, RedisTokenStore};

fn test_config() -> CacheConfig {
    CacheConfig::new(
        std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string()),
    )
    .with_prefix("tokengate-test")
}

async fn store() -> RedisTokenStore {
    RedisTokenStore::new(RedisClient::new(test_config()).await.unwrap())
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_redis_connection() {
    let client = RedisClient::new(test_config()).await;
    assert!(client.is_ok(), "Failed to connect to Redis");
    assert!(client.unwrap().health_check().await.unwrap());
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_set_get_delete() {
    let store = store().await;
    let key = "Email:VERIFICATION:CODE:redis-set@example.com";

    store.set(key, "123456", Duration::from_secs(180)).await.unwrap();
    assert_eq!(store.get(key).await.unwrap(), "123456");

    assert!(store.delete(key).await.unwrap());
    assert!(!store.delete(key).await.unwrap());
    assert!(matches!(store.get(key).await, Err(StoreError::NotFound { .. })));
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_keys_are_prefixed_and_expire() {
    let store = store().await;
    let client = RedisClient::new(test_config()).await.unwrap();
    let key = "IMG:VERIFICATION:CODE:CACHE:redis-ttl@example.com";

    store.set(key, "K7PX", Duration::from_secs(180)).await.unwrap();

    let ttl = client
        .ttl(&format!("tokengate-test:{}", key))
        .await
        .unwrap()
        .expect("key has an expiry");
    assert!(ttl > 170 && ttl <= 180);

    store.delete(key).await.unwrap();
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_expiry() {
    let store = store().await;
    let key = "Email:VERIFICATION:CODE:redis-expiry@example.com";

    store.set(key, "654321", Duration::from_secs(1)).await.unwrap();
    assert!(store.exists(key).await.unwrap());

    tokio::time::sleep(Duration::from_secs(2)).await;
    assert!(!store.exists(key).await.unwrap());
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_set_if_absent() {
    let store = store().await;
    let key = "Email:VERIFICATION:CODE:redis-nx@example.com";
    let _ = store.delete(key).await;

    assert!(store.set_if_absent(key, "111111", Duration::from_secs(60)).await.unwrap());
    assert!(!store.set_if_absent(key, "222222", Duration::from_secs(60)).await.unwrap());
    assert_eq!(store.get(key).await.unwrap(), "111111");

    store.delete(key).await.unwrap();
}
