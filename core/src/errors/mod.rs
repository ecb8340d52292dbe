//! Error taxonomy for issuance, verification and the collaborators they call.
//!
//! Collaborator failures (`StoreError`, `RenderError`, `TransportError`) are
//! caught where the call is made and converted to the narrowest
//! [`DomainError`]; raw backend errors never cross the service boundary.

use thiserror::Error;

/// Errors surfaced by the issuance service
#[derive(Error, Debug)]
pub enum DomainError {
    /// Empty or malformed identity
    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    /// An unconsumed email code is still live for this identity
    #[error("A verification code is already pending for {identity}")]
    AlreadyPending { identity: String },

    /// The captcha renderer failed or timed out
    #[error("Code generation failed: {message}")]
    GenerationFailed { message: String },

    /// The token store failed or timed out
    #[error("Storage failed: {message}")]
    StorageFailed { message: String },

    /// The mail transport failed or timed out
    #[error("Dispatch failed: {message}")]
    DispatchFailed { message: String },
}

impl DomainError {
    /// Whether the error was caused by the request rather than a collaborator
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            DomainError::InvalidRequest { .. } | DomainError::AlreadyPending { .. }
        )
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

/// Token store errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No live entry under the key (never issued, expired or consumed)
    #[error("Key not found: {key}")]
    NotFound { key: String },

    #[error("Cache backend error: {message}")]
    Backend { message: String },

    #[error("Cache operation timed out after {millis}ms")]
    Timeout { millis: u64 },
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Captcha renderer errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("Captcha rendering failed: {0}")]
    Failed(String),

    #[error("Captcha rendering timed out after {millis}ms")]
    Timeout { millis: u64 },
}

/// Mail transport errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("Invalid recipient: {0}")]
    InvalidRecipient(String),

    #[error("Message rejected: {0}")]
    Rejected(String),

    #[error("Mail transport timed out after {millis}ms")]
    Timeout { millis: u64 },
}
