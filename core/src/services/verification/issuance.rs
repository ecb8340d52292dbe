//! Issuance of email codes and image captchas

use std::future::Future;
use std::sync::Arc;

use tg_shared::validation::{is_valid_email, mask_email, not_empty};

use crate::domain::{EmailCode, VerificationKind};
use crate::errors::{DomainError, DomainResult, StoreError, StoreResult, TransportError};

use super::config::VerificationServiceConfig;
use super::deadline::with_deadline;
use super::generator::CodeGenerator;
use super::traits::{CaptchaRenderer, MailTransport, TokenStore};
use super::types::{EmailCodeIssued, ImageCodeIssued};

/// Orchestrates generation, duplicate suppression, storage and dispatch
///
/// Every collaborator failure is fatal to the request only; nothing is
/// retried here, the caller re-issues.
pub struct IssuanceService<S, R, M>
where
    S: TokenStore + ?Sized,
    R: CaptchaRenderer + ?Sized,
    M: MailTransport + ?Sized,
{
    /// Token store holding live codes
    store: Arc<S>,
    /// Code generator wrapping the captcha renderer
    generator: CodeGenerator<R>,
    /// Outbound mail transport
    mailer: Arc<M>,
    /// Service configuration
    config: VerificationServiceConfig,
}

impl<S, R, M> IssuanceService<S, R, M>
where
    S: TokenStore + ?Sized,
    R: CaptchaRenderer + ?Sized,
    M: MailTransport + ?Sized,
{
    /// Create a new issuance service
    ///
    /// # Arguments
    ///
    /// * `store` - Token store implementation
    /// * `renderer` - Captcha renderer implementation
    /// * `mailer` - Mail transport implementation
    /// * `config` - Service configuration
    pub fn new(
        store: Arc<S>,
        renderer: Arc<R>,
        mailer: Arc<M>,
        config: VerificationServiceConfig,
    ) -> Self {
        let generator = CodeGenerator::new(renderer, &config);
        Self {
            store,
            generator,
            mailer,
            config,
        }
    }

    pub fn config(&self) -> &VerificationServiceConfig {
        &self.config
    }

    /// Issue an image captcha for an identity
    ///
    /// This method:
    /// 1. Rejects an empty identity
    /// 2. Renders a captcha
    /// 3. Stores the answer, replacing any unconsumed answer for the identity
    /// 4. Returns only the image payload
    ///
    /// # Returns
    ///
    /// * `Ok(ImageCodeIssued)` - The image to show the requester
    /// * `Err(DomainError)` - `InvalidRequest`, `GenerationFailed` or `StorageFailed`
    pub async fn issue_image_code(&self, identity: &str) -> DomainResult<ImageCodeIssued> {
        if !not_empty(identity) {
            tracing::warn!(
                kind = "image",
                event = "invalid_identity",
                "Rejected image code request with empty identity"
            );
            return Err(DomainError::InvalidRequest {
                message: "email address is required".to_string(),
            });
        }

        let masked = mask_email(identity);
        let key = VerificationKind::Image.cache_key(identity);

        let (image_base64, answer) = self
            .generator
            .generate_image_code()
            .await
            .map_err(|e| {
                tracing::error!(
                    identity = %masked,
                    error = %e,
                    event = "captcha_generation_failed",
                    "Failed to render image captcha"
                );
                DomainError::GenerationFailed {
                    message: e.to_string(),
                }
            })?
            .into_parts();

        self.store_call(self.store.set(&key, &answer, self.config.code_ttl))
            .await
            .map_err(|e| {
                tracing::error!(
                    identity = %masked,
                    kind = "image",
                    error = %e,
                    event = "code_storage_failed",
                    "Failed to store image captcha answer"
                );
                DomainError::StorageFailed {
                    message: e.to_string(),
                }
            })?;

        tracing::info!(
            identity = %masked,
            event = "image_code_issued",
            ttl_secs = self.config.code_ttl.as_secs(),
            "Issued image captcha"
        );

        Ok(ImageCodeIssued { image_base64 })
    }

    /// Issue a numeric code and send it to an email address
    ///
    /// This method:
    /// 1. Rejects an empty or malformed address
    /// 2. Generates a code and writes it only if no code is pending
    /// 3. Mails the code and its lifetime to the address
    /// 4. Deletes the code again when the mail cannot be sent
    ///
    /// # Returns
    ///
    /// * `Ok(EmailCodeIssued)` - Receipt without the code value
    /// * `Err(DomainError)` - `InvalidRequest`, `AlreadyPending`, `StorageFailed`
    ///   or `DispatchFailed`
    pub async fn issue_email_code(&self, identity: &str) -> DomainResult<EmailCodeIssued> {
        if !not_empty(identity) {
            tracing::warn!(
                kind = "email",
                event = "invalid_identity",
                "Rejected email code request with empty identity"
            );
            return Err(DomainError::InvalidRequest {
                message: "email address is required".to_string(),
            });
        }

        let masked = mask_email(identity);

        if !is_valid_email(identity) {
            tracing::warn!(
                identity = %masked,
                event = "invalid_identity",
                "Rejected email code request with malformed address"
            );
            return Err(DomainError::InvalidRequest {
                message: "invalid email address format".to_string(),
            });
        }

        let key = VerificationKind::Email.cache_key(identity);
        let code = self.generator.generate_email_code();

        // Duplicate guard and write in one atomic step
        let written = self
            .store_call(
                self.store
                    .set_if_absent(&key, &code.to_string(), self.config.code_ttl),
            )
            .await
            .map_err(|e| {
                tracing::error!(
                    identity = %masked,
                    kind = "email",
                    error = %e,
                    event = "code_storage_failed",
                    "Failed to store email verification code"
                );
                DomainError::StorageFailed {
                    message: e.to_string(),
                }
            })?;

        if !written {
            tracing::info!(
                identity = %masked,
                event = "code_already_pending",
                "Email verification code still pending, refusing to issue another"
            );
            return Err(DomainError::AlreadyPending {
                identity: identity.to_string(),
            });
        }

        let minutes = self.config.ttl_minutes();
        let body = compose_email_body(code, minutes);
        let recipients = [identity.to_string()];

        let dispatch = with_deadline(
            self.config.operation_timeout,
            self.mailer.send(&body, &recipients),
            |millis| TransportError::Timeout { millis },
        )
        .await;

        if let Err(e) = dispatch {
            tracing::error!(
                identity = %masked,
                provider = self.mailer.provider_name(),
                error = %e,
                event = "email_dispatch_failed",
                "Failed to send verification email"
            );

            // An unsent code must not stay claimable
            match self.store_call(self.store.delete(&key)).await {
                Ok(_) => tracing::debug!(
                    identity = %masked,
                    event = "compensating_delete",
                    "Removed unsent email verification code"
                ),
                Err(del) => tracing::error!(
                    identity = %masked,
                    error = %del,
                    event = "compensating_delete_failed",
                    "Failed to remove unsent email verification code"
                ),
            }

            return Err(DomainError::DispatchFailed {
                message: e.to_string(),
            });
        }

        tracing::info!(
            identity = %masked,
            provider = self.mailer.provider_name(),
            event = "email_code_issued",
            "Sent email verification code"
        );

        Ok(EmailCodeIssued {
            recipient: identity.to_string(),
            expires_in_minutes: minutes,
        })
    }

    /// Whether an unconsumed email code is live for an identity
    pub async fn is_email_code_pending(&self, identity: &str) -> DomainResult<bool> {
        let key = VerificationKind::Email.cache_key(identity);
        self.store_call(self.store.exists(&key))
            .await
            .map_err(|e| {
                tracing::error!(
                    identity = %mask_email(identity),
                    error = %e,
                    "Failed to check for a pending email code"
                );
                DomainError::StorageFailed {
                    message: e.to_string(),
                }
            })
    }

    async fn store_call<T>(&self, call: impl Future<Output = StoreResult<T>>) -> StoreResult<T> {
        with_deadline(self.config.operation_timeout, call, |millis| {
            StoreError::Timeout { millis }
        })
        .await
    }
}

/// Message body for an email code
pub fn compose_email_body(code: EmailCode, minutes: u64) -> String {
    let unit = if minutes == 1 { "minute" } else { "minutes" };
    format!(
        "Your registration verification code is: {}. It is valid for {} {}.",
        code, minutes, unit
    )
}
