//! HTTP route handlers

pub mod verification;
