//! Verification kinds and the cache key namespace each one owns.
//!
//! A token is never stored as a struct. It is the triple
//! (`kind.cache_key(identity)`, code, TTL) held by the token store, so the
//! prefixes below are the contract between issuance and verification.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Key prefix for numeric codes sent by email
pub const EMAIL_CODE_KEY_PREFIX: &str = "Email:VERIFICATION:CODE:";

/// Key prefix for image captcha answers
pub const IMAGE_CODE_KEY_PREFIX: &str = "IMG:VERIFICATION:CODE:CACHE:";

/// Lifetime of an issued code in whole minutes
pub const CODE_EXPIRATION_MINUTES: u64 = 3;

/// Lifetime of an issued code
pub const CODE_EXPIRATION: Duration = Duration::from_secs(CODE_EXPIRATION_MINUTES * 60);

/// The kind of verification token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationKind {
    /// Numeric code delivered to an email address
    Email,
    /// Answer to an image captcha
    Image,
}

impl VerificationKind {
    /// Key prefix owned by this kind
    pub fn key_prefix(&self) -> &'static str {
        match self {
            VerificationKind::Email => EMAIL_CODE_KEY_PREFIX,
            VerificationKind::Image => IMAGE_CODE_KEY_PREFIX,
        }
    }

    /// Build the cache key for an identity
    pub fn cache_key(&self, identity: &str) -> String {
        format!("{}{}", self.key_prefix(), identity)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationKind::Email => "email",
            VerificationKind::Image => "image",
        }
    }
}

impl fmt::Display for VerificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
