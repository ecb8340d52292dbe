use actix_web::{web, HttpResponse};
use tracing_actix_web::RequestId;
use validator::Validate;

use tg_shared::ApiResponse;

use crate::app::AppState;
use crate::dto::{ImageCodeResponse, SendCodeQuery};
use crate::handlers::{domain_error_response, validation_error_response};

/// Handler for GET /api/v1/verification/sendImgVerificationCode
///
/// Renders a captcha for the identity in `email` and stores its answer,
/// replacing any unconsumed one.
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "success": true,
///     "data": { "img_base64": "data:image/png;base64,iVBORw0..." },
///     "timestamp": "2026-10-19T10:00:00Z",
///     "request_id": "550e8400-e29b-41d4-a716-446655440000"
/// }
/// ```
///
/// ## Errors
/// 400 `INVALID_REQUEST`, 500 `CAPTCHA_GENERATION_FAILED` or `CACHE_ERROR`
pub async fn send_img_verification_code(
    state: web::Data<AppState>,
    query: web::Query<SendCodeQuery>,
    request_id: RequestId,
) -> HttpResponse {
    let request_id = request_id.to_string();
    let query = query.into_inner();

    if let Err(errors) = query.validate() {
        return validation_error_response(&errors, &request_id);
    }

    match state.issuance.issue_image_code(&query.email).await {
        Ok(issued) => HttpResponse::Ok().json(
            ApiResponse::success(ImageCodeResponse {
                img_base64: issued.image_base64,
            })
            .with_request_id(request_id),
        ),
        Err(e) => domain_error_response(&e, &request_id),
    }
}
