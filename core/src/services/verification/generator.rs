//! Code generation for both verification kinds

use rand::{rngs::OsRng, Rng};
use std::ops::RangeInclusive;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::{EmailCode, ImageCode};
use crate::errors::RenderError;

use super::config::VerificationServiceConfig;
use super::deadline::with_deadline;
use super::traits::CaptchaRenderer;

/// Produces token payloads, independent of storage
pub struct CodeGenerator<R: CaptchaRenderer + ?Sized> {
    renderer: Arc<R>,
    email_code_range: RangeInclusive<u32>,
    render_timeout: Option<Duration>,
}

impl<R: CaptchaRenderer + ?Sized> CodeGenerator<R> {
    pub fn new(renderer: Arc<R>, config: &VerificationServiceConfig) -> Self {
        Self {
            renderer,
            email_code_range: config.email_code_range.clone(),
            render_timeout: config.operation_timeout,
        }
    }

    /// Draw a numeric email code uniformly from the configured range
    ///
    /// Uses OsRng (OS-provided CSPRNG) so consecutive codes are not
    /// predictable from one another.
    pub fn generate_email_code(&self) -> EmailCode {
        let mut rng = OsRng;
        EmailCode::new(rng.gen_range(self.email_code_range.clone()))
    }

    /// Render an image captcha through the external renderer
    pub async fn generate_image_code(&self) -> Result<ImageCode, RenderError> {
        with_deadline(self.render_timeout, self.renderer.render(), |millis| {
            RenderError::Timeout { millis }
        })
        .await
    }
}
