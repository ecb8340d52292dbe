//! Mail Transport Module
//!
//! This module provides the transports verification emails are sent
//! through: SMTP via lettre for real delivery, and a mock that logs
//! messages to the console for development.

#[cfg(feature = "smtp-mail")]
pub mod smtp;
pub mod mock_mail;


use std::sync::Arc;

use tg_core::services::MailTransport;
use tg_shared::config::MailConfig;

use crate::InfrastructureError;

pub use mock_mail::MockMailTransport;
#[cfg(feature = "smtp-mail")]
pub use smtp::SmtpMailTransport;

/// Create a mail transport based on configuration
///
/// `smtp` with a relay host builds the SMTP transport; `smtp` without a
/// host and unknown providers fall back to the mock transport.
///
/// # Returns
///
/// A shared mail transport, or an error if the SMTP settings are invalid
pub fn create_mail_transport(
    config: &MailConfig,
) -> Result<Arc<dyn MailTransport>, InfrastructureError> {
    match config.provider.as_str() {
        "mock" => Ok(Arc::new(MockMailTransport::new())),
        #[cfg(feature = "smtp-mail")]
        "smtp" if config.smtp_enabled() => Ok(Arc::new(SmtpMailTransport::new(config)?)),
        "smtp" => {
            tracing::warn!("SMTP host not configured, using mock mail transport");
            Ok(Arc::new(MockMailTransport::new()))
        }
        other => {
            tracing::warn!(
                "Unknown mail provider '{}', using mock implementation",
                other
            );
            Ok(Arc::new(MockMailTransport::new()))
        }
    }
}
