//! # Tokengate API
//!
//! actix-web surface over the issuance service: image captcha and email
//! code endpoints, a health check, and the shared application state other
//! modules use to reach the verification service.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod telemetry;

pub use app::{create_app, AppState};
