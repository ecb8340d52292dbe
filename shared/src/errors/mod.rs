//! Shared error codes

/// Machine-readable error codes carried in the API envelope
pub mod error_codes {
    pub const INVALID_REQUEST: &str = "INVALID_REQUEST";
    pub const VERIFICATION_CODE_PENDING: &str = "VERIFICATION_CODE_PENDING";
    pub const CAPTCHA_GENERATION_FAILED: &str = "CAPTCHA_GENERATION_FAILED";
    pub const CACHE_ERROR: &str = "CACHE_ERROR";
    pub const EMAIL_DISPATCH_FAILED: &str = "EMAIL_DISPATCH_FAILED";
    pub const NOT_FOUND: &str = "NOT_FOUND";
}
