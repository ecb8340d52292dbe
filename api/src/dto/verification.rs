use serde::{Deserialize, Serialize};
use validator::Validate;

/// Query string for both send endpoints
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SendCodeQuery {
    /// Identity the code is issued for; an email address for email codes
    #[serde(default)]
    #[validate(length(max = 254))]
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageCodeResponse {
    /// `data:image/png;base64,...` payload
    pub img_base64: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailCodeResponse {
    pub message: String,
    pub expires_in_minutes: u64,
}
