//! Mapping of domain errors to HTTP responses

use actix_web::{http::StatusCode, HttpResponse};
use validator::ValidationErrors;

use tg_core::errors::DomainError;
use tg_shared::{error_codes, ApiResponse};

/// HTTP status and error code for a domain error
pub fn status_and_code(error: &DomainError) -> (StatusCode, &'static str) {
    match error {
        DomainError::InvalidRequest { .. } => (StatusCode::BAD_REQUEST, error_codes::INVALID_REQUEST),
        DomainError::AlreadyPending { .. } => {
            (StatusCode::BAD_REQUEST, error_codes::VERIFICATION_CODE_PENDING)
        }
        DomainError::GenerationFailed { .. } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            error_codes::CAPTCHA_GENERATION_FAILED,
        ),
        DomainError::StorageFailed { .. } => {
            (StatusCode::INTERNAL_SERVER_ERROR, error_codes::CACHE_ERROR)
        }
        DomainError::DispatchFailed { .. } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            error_codes::EMAIL_DISPATCH_FAILED,
        ),
    }
}

/// Message shown to the caller; collaborator details stay in the logs
fn public_message(error: &DomainError) -> String {
    match error {
        DomainError::InvalidRequest { message } => message.clone(),
        DomainError::AlreadyPending { .. } => {
            "A verification code has already been sent, please check your inbox".to_string()
        }
        DomainError::GenerationFailed { .. } => "Failed to generate captcha image".to_string(),
        DomainError::StorageFailed { .. } => "Verification code storage is unavailable".to_string(),
        DomainError::DispatchFailed { .. } => "Failed to send verification email".to_string(),
    }
}

/// Handle domain errors and convert them to the standard envelope
pub fn domain_error_response(error: &DomainError, request_id: &str) -> HttpResponse {
    let (status, code) = status_and_code(error);

    if error.is_client_error() {
        tracing::warn!(request_id, code, error = %error, "Request rejected");
    } else {
        tracing::error!(request_id, code, error = %error, "Request failed");
    }

    HttpResponse::build(status).json(
        ApiResponse::<()>::error(code, public_message(error)).with_request_id(request_id),
    )
}

/// Handle query validation failures
pub fn validation_error_response(errors: &ValidationErrors, request_id: &str) -> HttpResponse {
    tracing::warn!(request_id, errors = ?errors, "Validation failed");

    HttpResponse::BadRequest().json(
        ApiResponse::<()>::error(error_codes::INVALID_REQUEST, "Invalid email parameter")
            .with_request_id(request_id),
    )
}
