//! Verification code lifecycle
//!
//! This module provides the complete token workflow:
//! - Code generation (numeric email codes, image captchas)
//! - Issuance with duplicate suppression and compensating cleanup
//! - Single-use verification shared by both kinds
//! - Traits for the token store, captcha renderer and mail transport

mod config;
mod deadline;
mod generator;
mod issuance;
mod service;
mod traits;
mod types;


pub use config::VerificationServiceConfig;
pub use generator::CodeGenerator;
pub use issuance::{compose_email_body, IssuanceService};
pub use service::{codes_match, VerificationService};
pub use traits::{CaptchaRenderer, MailTransport, TokenStore};
pub use types::{EmailCodeIssued, ImageCodeIssued};
