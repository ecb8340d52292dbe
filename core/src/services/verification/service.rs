//! Single-use verification shared by both code kinds

use constant_time_eq::constant_time_eq;
use std::sync::Arc;

use tg_shared::validation::mask_email;

use crate::domain::{normalize_code, VerificationKind};
use crate::errors::StoreError;

use super::config::VerificationServiceConfig;
use super::deadline::with_deadline;
use super::traits::TokenStore;

/// Checks presented codes against the token store
///
/// A successful check consumes the token; every other outcome, including
/// store failures, is reported as `false`.
pub struct VerificationService<S: TokenStore + ?Sized> {
    /// Token store holding live codes
    store: Arc<S>,
    /// Service configuration
    config: VerificationServiceConfig,
}

impl<S: TokenStore + ?Sized> VerificationService<S> {
    /// Create a new verification service
    ///
    /// # Arguments
    ///
    /// * `store` - Token store implementation
    /// * `config` - Service configuration
    pub fn new(store: Arc<S>, config: VerificationServiceConfig) -> Self {
        Self { store, config }
    }

    /// Verify an email code
    pub async fn verify_email_code(&self, presented: &str, identity: &str) -> bool {
        self.verify(presented, identity, VerificationKind::Email).await
    }

    /// Verify an image captcha answer
    pub async fn verify_image_code(&self, presented: &str, identity: &str) -> bool {
        self.verify(presented, identity, VerificationKind::Image).await
    }

    /// Verify a presented code and consume it on match
    ///
    /// # Arguments
    ///
    /// * `presented` - Code as typed by the user
    /// * `identity` - Identity the code was issued for
    /// * `kind` - Which namespace to look in
    ///
    /// # Returns
    ///
    /// `true` only when a live code matched and this caller consumed it.
    /// A mismatch leaves the code live.
    pub async fn verify(&self, presented: &str, identity: &str, kind: VerificationKind) -> bool {
        let key = kind.cache_key(identity);
        let masked = mask_email(identity);
        let timeout = self.config.operation_timeout;

        let stored = match with_deadline(timeout, self.store.get(&key), |millis| {
            StoreError::Timeout { millis }
        })
        .await
        {
            Ok(value) => value,
            Err(StoreError::NotFound { .. }) => {
                tracing::info!(
                    identity = %masked,
                    kind = %kind,
                    event = "code_not_found",
                    "Verification code expired or absent"
                );
                return false;
            }
            Err(e) => {
                tracing::error!(
                    identity = %masked,
                    kind = %kind,
                    error = %e,
                    event = "code_lookup_failed",
                    "Failed to read verification code"
                );
                return false;
            }
        };

        if !codes_match(&stored, presented) {
            tracing::warn!(
                identity = %masked,
                kind = %kind,
                event = "code_mismatch",
                "Incorrect verification code"
            );
            return false;
        }

        match with_deadline(timeout, self.store.delete(&key), |millis| {
            StoreError::Timeout { millis }
        })
        .await
        {
            Ok(true) => {
                tracing::info!(
                    identity = %masked,
                    kind = %kind,
                    event = "code_verified",
                    "Verification code verified and consumed"
                );
                true
            }
            Ok(false) => {
                tracing::warn!(
                    identity = %masked,
                    kind = %kind,
                    event = "code_already_consumed",
                    "Verification code was consumed by a concurrent request"
                );
                false
            }
            Err(e) => {
                // Matched; a failed delete leaves the code to expire on its own
                tracing::error!(
                    identity = %masked,
                    kind = %kind,
                    error = %e,
                    event = "code_consume_failed",
                    "Failed to delete verified code"
                );
                true
            }
        }
    }
}

/// Compare a stored and a presented code
///
/// Both sides are normalized (trimmed, uppercased) and then compared in
/// constant time.
pub fn codes_match(stored: &str, presented: &str) -> bool {
    let stored = normalize_code(stored);
    let presented = normalize_code(presented);

    if stored.is_empty() || stored.len() != presented.len() {
        return false;
    }

    constant_time_eq(stored.as_bytes(), presented.as_bytes())
}
