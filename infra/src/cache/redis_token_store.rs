//! Redis-backed token store
//!
//! Every key is namespaced with the deployment prefix from the cache
//! configuration before it reaches Redis; expiry is delegated to Redis TTLs.

use async_trait::async_trait;
use std::time::Duration;

use tg_core::errors::{StoreError, StoreResult};
use tg_core::services::TokenStore;

use super::redis_client::RedisClient;
use crate::InfrastructureError;

/// Token store on top of [`RedisClient`]
#[derive(Clone)]
pub struct RedisTokenStore {
    client: RedisClient,
}

impl RedisTokenStore {
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }

    /// Fully qualified Redis key for a store key
    pub fn redis_key(&self, key: &str) -> String {
        self.client.config().make_key(key)
    }
}

/// Redis expiry in whole seconds; sub-second TTLs round up so a code is never stored without expiry
pub(crate) fn ttl_seconds(ttl: Duration) -> u64 {
    let secs = ttl.as_secs();
    if ttl.subsec_nanos() > 0 || secs == 0 {
        secs.saturating_add(1)
    } else {
        secs
    }
}

fn backend(e: InfrastructureError) -> StoreError {
    StoreError::Backend {
        message: e.to_string(),
    }
}

#[async_trait]
impl TokenStore for RedisTokenStore {
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> StoreResult<()> {
        self.client
            .set_with_expiry(&self.redis_key(key), value, ttl_seconds(ttl))
            .await
            .map_err(backend)
    }

    async fn set_if_absent(&self, key: &str, value: &str, ttl: Duration) -> StoreResult<bool> {
        self.client
            .set_nx_with_expiry(&self.redis_key(key), value, ttl_seconds(ttl))
            .await
            .map_err(backend)
    }

    async fn exists(&self, key: &str) -> StoreResult<bool> {
        self.client
            .exists(&self.redis_key(key))
            .await
            .map_err(backend)
    }

    async fn get(&self, key: &str) -> StoreResult<String> {
        match self.client.get(&self.redis_key(key)).await.map_err(backend)? {
            Some(value) => Ok(value),
            None => Err(StoreError::NotFound {
                key: key.to_string(),
            }),
        }
    }

    async fn delete(&self, key: &str) -> StoreResult<bool> {
        self.client
            .delete(&self.redis_key(key))
            .await
            .map_err(backend)
    }

    async fn ping(&self) -> StoreResult<()> {
        match self.client.health_check().await.map_err(backend)? {
            true => Ok(()),
            false => Err(StoreError::Backend {
                message: "unexpected PING reply".to_string(),
            }),
        }
    }
}
