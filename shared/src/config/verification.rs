//! Verification code configuration module

use serde::{Deserialize, Serialize};

/// Shortest accepted code lifetime
pub const MIN_CODE_TTL_SECONDS: u64 = 1;

/// Longest accepted code lifetime (one day)
pub const MAX_CODE_TTL_SECONDS: u64 = 86_400;

/// Issuance and verification settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VerificationConfig {
    /// Lifetime of an issued code in seconds
    #[serde(default = "default_code_ttl")]
    pub code_ttl_seconds: u64,

    /// Smallest numeric email code
    #[serde(default = "default_email_code_min")]
    pub email_code_min: u32,

    /// Largest numeric email code (inclusive)
    #[serde(default = "default_email_code_max")]
    pub email_code_max: u32,

    /// Deadline for each store, renderer or transport call in milliseconds
    #[serde(default = "default_operation_timeout")]
    pub operation_timeout_ms: u64,

    /// Image captcha settings
    #[serde(default)]
    pub captcha: CaptchaConfig,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            code_ttl_seconds: default_code_ttl(),
            email_code_min: default_email_code_min(),
            email_code_max: default_email_code_max(),
            operation_timeout_ms: default_operation_timeout(),
            captcha: CaptchaConfig::default(),
        }
    }
}

impl VerificationConfig {
    /// Reject settings the services cannot honour
    pub fn validate(&self) -> Result<(), String> {
        if !(MIN_CODE_TTL_SECONDS..=MAX_CODE_TTL_SECONDS).contains(&self.code_ttl_seconds) {
            return Err(format!(
                "verification.code_ttl_seconds must be between {} and {}, got {}",
                MIN_CODE_TTL_SECONDS, MAX_CODE_TTL_SECONDS, self.code_ttl_seconds
            ));
        }
        Ok(())
    }
}

/// Image captcha rendering settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CaptchaConfig {
    /// Number of characters in the answer
    pub length: usize,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Random noise dots drawn over the text
    pub noise_dots: u32,
    /// Random noise lines drawn over the text
    pub noise_lines: u32,
}

impl Default for CaptchaConfig {
    fn default() -> Self {
        Self {
            length: 4,
            width: 160,
            height: 60,
            noise_dots: 150,
            noise_lines: 4,
        }
    }
}

fn default_code_ttl() -> u64 {
    180 // 3 minutes
}

fn default_email_code_min() -> u32 {
    100_000
}

fn default_email_code_max() -> u32 {
    999_999
}

fn default_operation_timeout() -> u64 {
    5_000
}
