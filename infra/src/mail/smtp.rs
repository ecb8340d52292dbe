//! SMTP mail transport on lettre

use async_trait::async_trait;
use lettre::message::{header, Mailbox, Message};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Tokio1Executor};
use std::time::Duration;
use tracing::{error, info};

use tg_core::errors::TransportError;
use tg_core::services::MailTransport;
use tg_shared::config::MailConfig;
use tg_shared::validation::mask_email;

use crate::InfrastructureError;

/// Sends verification emails through an SMTP relay
#[derive(Clone)]
pub struct SmtpMailTransport {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    subject: String,
}

impl SmtpMailTransport {
    /// Build the transport from configuration
    ///
    /// Uses implicit TLS unless `use_starttls` is set. Credentials are only
    /// applied when both username and password are present.
    pub fn new(config: &MailConfig) -> Result<Self, InfrastructureError> {
        let from = config
            .from_address
            .parse::<Mailbox>()
            .map_err(|e| InfrastructureError::Config(format!("Invalid SMTP_FROM address: {}", e)))?;

        let builder = if config.use_starttls {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)
        }
        .map_err(|e| InfrastructureError::Mail(format!("Failed to configure SMTP transport: {}", e)))?
        .port(config.smtp_port)
        .timeout(Some(Duration::from_secs(config.send_timeout_secs)));

        let builder = if let (Some(username), Some(password)) =
            (&config.smtp_username, &config.smtp_password)
        {
            builder.credentials(Credentials::new(username.to_string(), password.to_string()))
        } else {
            builder
        };

        info!(
            host = %config.smtp_host,
            port = config.smtp_port,
            starttls = config.use_starttls,
            "SMTP mail transport configured"
        );

        Ok(Self {
            transport: builder.build(),
            from,
            subject: config.subject.clone(),
        })
    }

    fn build_message(&self, recipient: &str, body: &str) -> Result<Message, TransportError> {
        let to = recipient
            .parse::<Mailbox>()
            .map_err(|_| TransportError::InvalidRecipient(mask_email(recipient)))?;

        Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(self.subject.as_str())
            .header(header::ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .map_err(|e| TransportError::Rejected(format!("Failed to build email message: {}", e)))
    }
}

#[async_trait]
impl MailTransport for SmtpMailTransport {
    async fn send(&self, body: &str, recipients: &[String]) -> Result<(), TransportError> {
        for recipient in recipients {
            let message = self.build_message(recipient, body)?;

            self.transport.send(message).await.map_err(|e| {
                error!(
                    recipient = %mask_email(recipient),
                    error = %e,
                    "SMTP delivery failed"
                );
                TransportError::Rejected(format!("Failed to send email: {}", e))
            })?;

            info!(recipient = %mask_email(recipient), "Email sent successfully");
        }
        Ok(())
    }

    fn provider_name(&self) -> &str {
        "smtp"
    }
}
