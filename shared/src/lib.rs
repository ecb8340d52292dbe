//! Shared utilities and common types for the Tokengate server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types (cache, mail, verification, server, logging)
//! - The API response envelope and error codes
//! - Utility functions (email validation, identity masking)

pub mod config;
pub mod errors;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, CacheConfig, CacheType, CaptchaConfig, Environment, LoggingConfig, MailConfig,
    ServerConfig, VerificationConfig,
};
pub use errors::error_codes;
pub use types::ApiResponse;
pub use utils::validation;
