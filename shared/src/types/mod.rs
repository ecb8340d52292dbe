//! Type definitions shared by the HTTP layer
//!
//! - `response` - API response envelope

pub mod response;

pub use response::ApiResponse;
