//! Types for issuance results

use serde::Serialize;

/// Result of issuing an image captcha
#[derive(Debug, Clone, Serialize)]
pub struct ImageCodeIssued {
    /// Base64 image payload for the requester
    pub image_base64: String,
}

/// Result of issuing an email code; never carries the code itself
#[derive(Debug, Clone, Serialize)]
pub struct EmailCodeIssued {
    /// Address the code was sent to
    pub recipient: String,
    /// Code lifetime in whole minutes
    pub expires_in_minutes: u64,
}
