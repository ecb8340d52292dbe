//! Domain layer: verification kinds, cache key naming and code values.

pub mod code;
pub mod verification_kind;

#[cfg(test)]
mod tests;

pub use code::{normalize_code, EmailCode, ImageCode};
pub use verification_kind::{
    VerificationKind, CODE_EXPIRATION, CODE_EXPIRATION_MINUTES, EMAIL_CODE_KEY_PREFIX,
    IMAGE_CODE_KEY_PREFIX,
};
