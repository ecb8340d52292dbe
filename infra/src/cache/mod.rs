//! Cache module - token store implementations
//!
//! This module provides the stores verification codes live in: a Redis
//! client with connection retry and backoff, the Redis-backed token store
//! built on it, and a process-local store for development and tests.

pub mod memory_store;
#[cfg(feature = "redis-cache")]
pub mod redis_client;
#[cfg(feature = "redis-cache")]
pub mod redis_token_store;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use tg_core::services::TokenStore;

use crate::InfrastructureError;

pub use memory_store::InMemoryTokenStore;
#[cfg(feature = "redis-cache")]
pub use redis_client::RedisClient;
#[cfg(feature = "redis-cache")]
pub use redis_token_store::RedisTokenStore;

// Re-export commonly used types
pub use tg_shared::config::cache::{CacheConfig, CacheType};

/// Create a token store based on configuration
///
/// # Arguments
///
/// * `config` - Cache configuration selecting and configuring the store
///
/// # Returns
///
/// A shared token store, or an error if Redis cannot be reached
pub async fn create_token_store(
    config: &CacheConfig,
) -> Result<Arc<dyn TokenStore>, InfrastructureError> {
    match config.cache_type {
        CacheType::Memory => {
            tracing::warn!("Using in-memory token store; codes are not shared between instances");
            Ok(Arc::new(InMemoryTokenStore::with_prefix(config.key_prefix.clone())))
        }
        #[cfg(feature = "redis-cache")]
        CacheType::Redis => {
            let client = RedisClient::new(config.clone()).await?;
            Ok(Arc::new(RedisTokenStore::new(client)))
        }
        #[cfg(not(feature = "redis-cache"))]
        CacheType::Redis => Err(InfrastructureError::Config(
            "Redis token store requires the redis-cache feature".to_string(),
        )),
    }
}
