//! Integration tests for the verification routes

use std::sync::Arc;
use std::time::Duration;

use actix_web::{http::StatusCode, test, web};
use async_trait::async_trait;
use serde_json::Value;

use tg_api::{create_app, AppState};
use tg_core::domain::ImageCode;
use tg_core::errors::{RenderError, StoreError, StoreResult};
use tg_core::services::{CaptchaRenderer, MailTransport, TokenStore, VerificationServiceConfig};
use tg_infra::cache::InMemoryTokenStore;
use tg_infra::captcha::ImageCaptchaRenderer;
use tg_infra::mail::MockMailTransport;
use tg_infra::InfrastructureServices;
use tg_shared::config::{CaptchaConfig, ServerConfig};

const EMAIL: &str = "henry@example.com";

struct DownStore;

#[async_trait]
impl TokenStore for DownStore {
    async fn set(&self, _key: &str, _value: &str, _ttl: Duration) -> StoreResult<()> {
        Err(down())
    }

    async fn set_if_absent(&self, _key: &str, _value: &str, _ttl: Duration) -> StoreResult<bool> {
        Err(down())
    }

    async fn exists(&self, _key: &str) -> StoreResult<bool> {
        Err(down())
    }

    async fn get(&self, _key: &str) -> StoreResult<String> {
        Err(down())
    }

    async fn delete(&self, _key: &str) -> StoreResult<bool> {
        Err(down())
    }

    async fn ping(&self) -> StoreResult<()> {
        Err(down())
    }
}

fn down() -> StoreError {
    StoreError::Backend {
        message: "connection refused".to_string(),
    }
}

struct BrokenRenderer;

#[async_trait]
impl CaptchaRenderer for BrokenRenderer {
    async fn render(&self) -> Result<ImageCode, RenderError> {
        Err(RenderError::Failed("font not loaded".to_string()))
    }
}

struct Setup {
    store: Arc<dyn TokenStore>,
    renderer: Arc<dyn CaptchaRenderer>,
    mailer: Arc<MockMailTransport>,
}

impl Setup {
    fn healthy() -> Self {
        Self {
            store: Arc::new(InMemoryTokenStore::new()),
            renderer: Arc::new(ImageCaptchaRenderer::new(CaptchaConfig::default()).unwrap()),
            mailer: Arc::new(MockMailTransport::with_options(false, false)),
        }
    }

    fn state(&self) -> web::Data<AppState> {
        let mail_transport: Arc<dyn MailTransport> = self.mailer.clone();
        web::Data::new(AppState::new(
            InfrastructureServices {
                token_store: self.store.clone(),
                captcha_renderer: self.renderer.clone(),
                mail_transport,
            },
            VerificationServiceConfig::default(),
        ))
    }
}

async fn get_json(state: web::Data<AppState>, uri: &str) -> (StatusCode, Value) {
    let app = test::init_service(create_app(state, &ServerConfig::default())).await;
    let req = test::TestRequest::get().uri(uri).to_request();
    let resp = test::call_service(&app, req).await;
    let status = resp.status();
    let body: Value = test::read_body_json(resp).await;
    (status, body)
}

fn img_uri(email: &str) -> String {
    format!("/api/v1/verification/sendImgVerificationCode?email={}", email)
}

fn email_uri(email: &str) -> String {
    format!("/api/v1/verification/sendEmailVerificationCode?email={}", email)
}

#[actix_rt::test]
async fn test_health_check() {
    let (status, body) = get_json(Setup::healthy().state(), "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["cache"], "up");
}

#[actix_rt::test]
async fn test_health_check_reports_store_outage() {
    let setup = Setup {
        store: Arc::new(DownStore),
        ..Setup::healthy()
    };
    let (status, body) = get_json(setup.state(), "/health").await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["cache"], "down");
}

#[actix_rt::test]
async fn test_send_img_code_success() {
    let setup = Setup::healthy();
    let (status, body) = get_json(setup.state(), &img_uri(EMAIL)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert!(body["data"]["img_base64"]
        .as_str()
        .unwrap()
        .starts_with("data:image/png;base64,"));
    assert!(body["request_id"].is_string());
    assert!(setup
        .store
        .exists(&format!("IMG:VERIFICATION:CODE:CACHE:{}", EMAIL))
        .await
        .unwrap());
}

#[actix_rt::test]
async fn test_send_img_code_requires_identity() {
    let (status, body) = get_json(
        Setup::healthy().state(),
        "/api/v1/verification/sendImgVerificationCode",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "INVALID_REQUEST");
}

#[actix_rt::test]
async fn test_send_img_code_renderer_failure() {
    let setup = Setup {
        renderer: Arc::new(BrokenRenderer),
        ..Setup::healthy()
    };
    let (status, body) = get_json(setup.state(), &img_uri(EMAIL)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "CAPTCHA_GENERATION_FAILED");
}

#[actix_rt::test]
async fn test_send_email_code_success() {
    let setup = Setup::healthy();
    let (status, body) = get_json(setup.state(), &email_uri(EMAIL)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["data"]["message"],
        "Email verification code sent, please check your inbox!"
    );
    assert_eq!(body["data"]["expires_in_minutes"], 3);
    assert_eq!(setup.mailer.get_message_count(), 1);
}

#[actix_rt::test]
async fn test_send_email_code_invalid_address() {
    let setup = Setup::healthy();
    let too_long = format!("{}@example.com", "x".repeat(300));

    for uri in [email_uri("not-an-email"), email_uri(""), email_uri(&too_long)] {
        let (status, body) = get_json(setup.state(), &uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(body["code"], "INVALID_REQUEST");
    }
    assert_eq!(setup.mailer.get_message_count(), 0);
}

#[actix_rt::test]
async fn test_send_email_code_twice_is_pending() {
    let setup = Setup::healthy();
    let state = setup.state();

    let (status, _) = get_json(state.clone(), &email_uri(EMAIL)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = get_json(state, &email_uri(EMAIL)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VERIFICATION_CODE_PENDING");
    assert_eq!(setup.mailer.get_message_count(), 1);
}

#[actix_rt::test]
async fn test_send_email_code_dispatch_failure() {
    let setup = Setup {
        mailer: Arc::new(MockMailTransport::with_options(false, true)),
        ..Setup::healthy()
    };
    let (status, body) = get_json(setup.state(), &email_uri(EMAIL)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "EMAIL_DISPATCH_FAILED");
    assert!(!setup
        .store
        .exists(&format!("Email:VERIFICATION:CODE:{}", EMAIL))
        .await
        .unwrap());
}

#[actix_rt::test]
async fn test_store_outage_maps_to_cache_error() {
    let setup = Setup {
        store: Arc::new(DownStore),
        ..Setup::healthy()
    };

    let (status, body) = get_json(setup.state(), &email_uri(EMAIL)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "CACHE_ERROR");
    assert!(!body["error"].as_str().unwrap().contains("refused"));

    let (status, body) = get_json(setup.state(), &img_uri(EMAIL)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "CACHE_ERROR");
}

#[actix_rt::test]
async fn test_issued_email_code_verifies_through_state() {
    let setup = Setup::healthy();
    let state = setup.state();

    let (status, _) = get_json(state.clone(), &email_uri(EMAIL)).await;
    assert_eq!(status, StatusCode::OK);

    let body = setup.mailer.last_message_to(EMAIL).unwrap();
    let code = body
        .split(|c: char| !c.is_ascii_digit())
        .find(|part| part.len() == 6)
        .unwrap()
        .to_string();

    assert!(!state.verification.verify_email_code("000000x", EMAIL).await);
    assert!(state.verification.verify_email_code(&code, EMAIL).await);
    assert!(!state.verification.verify_email_code(&code, EMAIL).await);
}

#[actix_rt::test]
async fn test_unknown_route() {
    let (status, body) = get_json(Setup::healthy().state(), "/api/v1/nope").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}
