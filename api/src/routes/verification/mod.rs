//! Verification code routes
//!
//! - `GET /verification/sendImgVerificationCode?email=` - issue an image captcha
//! - `GET /verification/sendEmailVerificationCode?email=` - email a numeric code

pub mod send_email_code;
pub mod send_img_code;

use actix_web::web;

pub use send_email_code::send_email_verification_code;
pub use send_img_code::send_img_verification_code;

/// Register the verification routes under the enclosing scope
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/verification")
            .route(
                "/sendImgVerificationCode",
                web::get().to(send_img_verification_code),
            )
            .route(
                "/sendEmailVerificationCode",
                web::get().to(send_email_verification_code),
            ),
    );
}
