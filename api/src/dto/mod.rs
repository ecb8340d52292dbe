//! Request and response bodies

pub mod verification;

pub use verification::{EmailCodeResponse, ImageCodeResponse, SendCodeQuery};
