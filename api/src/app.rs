//! Application state and factory
//!
//! This module holds the shared application state and provides the factory
//! for creating the Actix-web application.

use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{error, web, App, HttpRequest, HttpResponse};
use tracing_actix_web::TracingLogger;

use tg_core::services::{
    CaptchaRenderer, IssuanceService, MailTransport, TokenStore, VerificationService,
    VerificationServiceConfig,
};
use tg_infra::InfrastructureServices;
use tg_shared::config::ServerConfig;
use tg_shared::{error_codes, ApiResponse};

use crate::middleware::cors::create_cors;
use crate::routes;

/// Issuance service wired with trait objects
pub type SharedIssuanceService = IssuanceService<dyn TokenStore, dyn CaptchaRenderer, dyn MailTransport>;

/// Verification service wired with a trait object store
pub type SharedVerificationService = VerificationService<dyn TokenStore>;

/// Application state that holds shared services
pub struct AppState {
    /// Issues image captchas and email codes
    pub issuance: Arc<SharedIssuanceService>,
    /// Consumes codes; for other modules, not exposed as a route
    pub verification: Arc<SharedVerificationService>,
    /// Store handle for health checks
    pub token_store: Arc<dyn TokenStore>,
}

impl AppState {
    /// Wire the services over the given infrastructure
    pub fn new(infra: InfrastructureServices, config: VerificationServiceConfig) -> Self {
        let issuance = IssuanceService::new(
            infra.token_store.clone(),
            infra.captcha_renderer,
            infra.mail_transport,
            config.clone(),
        );
        let verification = VerificationService::new(infra.token_store.clone(), config);

        Self {
            issuance: Arc::new(issuance),
            verification: Arc::new(verification),
            token_store: infra.token_store,
        }
    }
}

/// Create and configure the application with all dependencies
pub fn create_app(
    app_state: web::Data<AppState>,
    server: &ServerConfig,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        // Add application state
        .app_data(app_state)
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        // Add middleware (CORS inside the request span)
        .wrap(create_cors(server))
        .wrap(TracingLogger::default())
        // Health check endpoint
        .route("/health", web::get().to(health_check))
        // API v1 routes
        .service(web::scope("/api/v1").configure(routes::verification::configure))
        // Default 404 handler
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
///
/// Reports 503 when the token store does not answer.
async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let cache = match state.token_store.ping().await {
        Ok(()) => "up",
        Err(e) => {
            tracing::warn!(error = %e, "Token store health check failed");
            "down"
        }
    };

    let body = serde_json::json!({
        "status": if cache == "up" { "healthy" } else { "degraded" },
        "service": "tokengate-api",
        "version": env!("CARGO_PKG_VERSION"),
        "cache": cache,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    if cache == "up" {
        HttpResponse::Ok().json(body)
    } else {
        HttpResponse::ServiceUnavailable().json(body)
    }
}

/// Malformed query strings get the standard envelope instead of plain text
fn query_error_handler(err: error::QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let response = HttpResponse::BadRequest().json(ApiResponse::<()>::error(
        error_codes::INVALID_REQUEST,
        err.to_string(),
    ));
    error::InternalError::from_response(err, response).into()
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::<()>::error(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
