//! CORS middleware configuration for cross-origin requests.
//!
//! The verification endpoints are called from browser sign-up forms, so
//! only `GET` needs to be allowed. With no configured origins any origin is
//! accepted, which suits development; deployments list their front-end
//! origins in `ALLOWED_ORIGINS` (or `server.allowed_origins`).

use actix_cors::Cors;
use actix_web::http::{header, Method};

use tg_shared::config::ServerConfig;

/// Max age for preflight cache in seconds
const CORS_MAX_AGE: usize = 3600;

/// Creates a CORS middleware instance from the server configuration.
pub fn create_cors(server: &ServerConfig) -> Cors {
    let origins = server.origins();

    let cors = Cors::default()
        .allowed_methods(vec![Method::GET, Method::OPTIONS])
        .allowed_headers(vec![
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::ORIGIN,
            header::HeaderName::from_static("x-requested-with"),
        ])
        .expose_headers(vec![header::HeaderName::from_static("x-request-id")])
        .max_age(CORS_MAX_AGE);

    if origins.is_empty() {
        tracing::info!("Configuring permissive CORS (no allowed origins configured)");
        return cors.allow_any_origin();
    }

    origins.iter().fold(cors, |cors, origin| {
        tracing::info!("Adding allowed origin: {}", origin);
        cors.allowed_origin(origin)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, web, App, HttpResponse};

    async fn ok() -> HttpResponse {
        HttpResponse::Ok().finish()
    }

    #[actix_rt::test]
    async fn test_configured_origin_is_allowed() {
        let server = ServerConfig {
            allowed_origins: "https://app.example.com".to_string(),
            ..Default::default()
        };
        let app = test::init_service(
            App::new()
                .wrap(create_cors(&server))
                .route("/", web::get().to(ok)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/")
            .insert_header((header::ORIGIN, "https://app.example.com"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert!(resp.status().is_success());
        assert_eq!(
            resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "https://app.example.com"
        );
    }

    #[actix_rt::test]
    async fn test_unknown_origin_is_rejected() {
        let server = ServerConfig {
            allowed_origins: "https://app.example.com".to_string(),
            ..Default::default()
        };
        let app = test::init_service(
            App::new()
                .wrap(create_cors(&server))
                .route("/", web::get().to(ok)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/")
            .insert_header((header::ORIGIN, "https://evil.example.net"))
            .to_request();
        let resp = test::try_call_service(&app, req).await;

        // Rejected either as an error or as a response without the allow header
        if let Ok(resp) = resp {
            assert!(resp
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .is_none());
        }
    }

    #[actix_rt::test]
    async fn test_permissive_without_configured_origins() {
        let app = test::init_service(
            App::new()
                .wrap(create_cors(&ServerConfig::default()))
                .route("/", web::get().to(ok)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/")
            .insert_header((header::ORIGIN, "http://localhost:5173"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert!(resp.status().is_success());
        assert!(resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_some());
    }
}
