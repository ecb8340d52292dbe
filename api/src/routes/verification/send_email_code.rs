use actix_web::{web, HttpResponse};
use tracing_actix_web::RequestId;
use validator::Validate;

use tg_shared::ApiResponse;

use crate::app::AppState;
use crate::dto::{EmailCodeResponse, SendCodeQuery};
use crate::handlers::{domain_error_response, validation_error_response};

/// Handler for GET /api/v1/verification/sendEmailVerificationCode
///
/// Emails a numeric code to `email` unless one is already pending.
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "success": true,
///     "data": {
///         "message": "Email verification code sent, please check your inbox!",
///         "expires_in_minutes": 3
///     },
///     "timestamp": "2026-10-19T10:00:00Z",
///     "request_id": "550e8400-e29b-41d4-a716-446655440000"
/// }
/// ```
///
/// ## Errors
/// 400 `INVALID_REQUEST` or `VERIFICATION_CODE_PENDING`,
/// 500 `CACHE_ERROR` or `EMAIL_DISPATCH_FAILED`
pub async fn send_email_verification_code(
    state: web::Data<AppState>,
    query: web::Query<SendCodeQuery>,
    request_id: RequestId,
) -> HttpResponse {
    let request_id = request_id.to_string();
    let query = query.into_inner();

    if let Err(errors) = query.validate() {
        return validation_error_response(&errors, &request_id);
    }

    match state.issuance.issue_email_code(&query.email).await {
        Ok(issued) => HttpResponse::Ok().json(
            ApiResponse::success(EmailCodeResponse {
                message: "Email verification code sent, please check your inbox!".to_string(),
                expires_in_minutes: issued.expires_in_minutes,
            })
            .with_request_id(request_id),
        ),
        Err(e) => domain_error_response(&e, &request_id),
    }
}
