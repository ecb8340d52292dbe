//! Response helpers shared by route handlers

pub mod error;

pub use error::{domain_error_response, status_and_code, validation_error_response};
