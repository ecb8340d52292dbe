//! Business services containing domain logic and use cases.

pub mod verification;

// Re-export commonly used types
pub use verification::{
    CaptchaRenderer, CodeGenerator, EmailCodeIssued, ImageCodeIssued, IssuanceService,
    MailTransport, TokenStore, VerificationService, VerificationServiceConfig,
};
