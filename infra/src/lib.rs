//! # Infrastructure Layer
//!
//! Concrete implementations of the collaborators the Tokengate core depends
//! on: token stores, mail transports and the captcha renderer.
//!
//! ## Architecture
//!
//! The infrastructure layer contains:
//! - **Cache**: Redis-backed and in-memory [`TokenStore`] implementations
//! - **Mail**: SMTP (lettre) and mock [`MailTransport`] implementations
//! - **Captcha**: PNG image captcha [`CaptchaRenderer`]
//!
//! ## Features
//!
//! - `redis-cache`: Enable the Redis token store (default)
//! - `smtp-mail`: Enable the SMTP mail transport (default)

use std::sync::Arc;

use tg_core::services::{CaptchaRenderer, MailTransport, TokenStore};
use tg_shared::config::AppConfig;

// Re-export core types for convenience
pub use tg_core::errors::*;

/// Cache module - token store implementations
pub mod cache;

/// Captcha module - image captcha rendering
pub mod captcha;

/// Mail module - outbound mail transports
pub mod mail;

/// Infrastructure service container
///
/// Holds the trait objects the core services are wired with.
#[derive(Clone)]
pub struct InfrastructureServices {
    /// Token store selected by `cache.cache_type`
    pub token_store: Arc<dyn TokenStore>,
    /// Image captcha renderer
    pub captcha_renderer: Arc<dyn CaptchaRenderer>,
    /// Mail transport selected by `mail.provider`
    pub mail_transport: Arc<dyn MailTransport>,
}

/// Initialize infrastructure services
///
/// This function sets up:
/// - The token store (Redis connection or in-memory map)
/// - The captcha renderer
/// - The mail transport
pub async fn initialize(config: &AppConfig) -> Result<InfrastructureServices, InfrastructureError> {
    tracing::info!("Initializing infrastructure services...");

    let token_store = cache::create_token_store(&config.cache).await?;
    let captcha_renderer: Arc<dyn CaptchaRenderer> = Arc::new(
        captcha::ImageCaptchaRenderer::new(config.verification.captcha.clone())?,
    );
    let mail_transport = mail::create_mail_transport(&config.mail)?;

    tracing::info!(
        cache_type = ?config.cache.cache_type,
        mail_provider = mail_transport.provider_name(),
        "Infrastructure services initialized successfully"
    );

    Ok(InfrastructureServices {
        token_store,
        captcha_renderer,
        mail_transport,
    })
}

/// Load application configuration, reading a `.env` file first if present
pub fn load_config() -> Result<AppConfig, InfrastructureError> {
    dotenvy::dotenv().ok();
    AppConfig::load().map_err(|e| InfrastructureError::Config(e.to_string()))
}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Redis cache error
    #[cfg(feature = "redis-cache")]
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Operation did not complete in time
    #[error("Timeout: {0}")]
    Timeout(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Mail transport error
    #[error("Mail error: {0}")]
    Mail(String),

    /// Captcha rendering error
    #[error("Captcha error: {0}")]
    Captcha(String),
}
