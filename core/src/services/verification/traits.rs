//! Traits for the collaborators the services depend on

use async_trait::async_trait;
use std::time::Duration;

use crate::domain::ImageCode;
use crate::errors::{RenderError, StoreResult, TransportError};

/// Namespaced key-value store holding live tokens
///
/// Every operation addresses a single key. Implementations must make each
/// operation atomic for that key; no multi-key transactions are required.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Upsert `value` under `key`, replacing any existing value and TTL
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> StoreResult<()>;

    /// Write `value` only if no live entry exists; `true` when written
    async fn set_if_absent(&self, key: &str, value: &str, ttl: Duration) -> StoreResult<bool>;

    /// Whether a live entry exists under `key`
    async fn exists(&self, key: &str) -> StoreResult<bool>;

    /// Stored value, or `StoreError::NotFound` when absent or expired
    async fn get(&self, key: &str) -> StoreResult<String>;

    /// Remove `key`; `true` when a live entry was removed
    async fn delete(&self, key: &str) -> StoreResult<bool>;

    /// Backend liveness probe
    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}

/// Renders an image captcha together with its answer
#[async_trait]
pub trait CaptchaRenderer: Send + Sync {
    async fn render(&self) -> Result<ImageCode, RenderError>;
}

/// Outbound mail transport
#[async_trait]
pub trait MailTransport: Send + Sync {
    /// Deliver `body` to every address in `recipients`
    async fn send(&self, body: &str, recipients: &[String]) -> Result<(), TransportError>;

    /// Name of the provider, for logs
    fn provider_name(&self) -> &str;
}
