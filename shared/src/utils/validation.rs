//! Identity validation and log masking helpers

use once_cell::sync::Lazy;
use regex::Regex;

/// Longest address accepted as an identity (RFC 5321 path limit)
pub const MAX_EMAIL_LENGTH: usize = 254;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9](?:[A-Za-z0-9\-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9\-]*[A-Za-z0-9])?)*\.[A-Za-z]{2,}$").unwrap()
});

/// Check if a string is not blank
pub fn not_empty(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Check if an email address is syntactically valid
pub fn is_valid_email(email: &str) -> bool {
    email.len() <= MAX_EMAIL_LENGTH && EMAIL_REGEX.is_match(email)
}

/// Mask an identity for logging
///
/// Email addresses keep the first character of the local part and the
/// domain (`a***@example.com`); anything else keeps its last four characters.
pub fn mask_email(identity: &str) -> String {
    match identity.split_once('@') {
        Some((local, domain)) => {
            let first: String = local.chars().take(1).collect();
            format!("{}***@{}", first, domain)
        }
        None => {
            let count = identity.chars().count();
            if count <= 4 {
                "****".to_string()
            } else {
                let tail: String = identity.chars().skip(count - 4).collect();
                format!("***{}", tail)
            }
        }
    }
}
