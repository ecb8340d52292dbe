//! # Tokengate Core
//!
//! Core business logic for issuing and consuming single-use verification
//! codes. This crate contains the domain types, the error taxonomy, the
//! collaborator traits (token store, captcha renderer, mail transport) and
//! the issuance and verification services built on top of them.

pub mod domain;
pub mod errors;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use services::*;
