//! Outbound mail configuration module

use serde::{Deserialize, Serialize};

/// Mail transport configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MailConfig {
    /// Transport provider ("smtp" or "mock")
    pub provider: String,

    /// SMTP relay host; an empty host disables SMTP
    #[serde(default)]
    pub smtp_host: String,

    /// SMTP port
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,

    /// SMTP username
    #[serde(default)]
    pub smtp_username: Option<String>,

    /// SMTP password
    #[serde(default)]
    pub smtp_password: Option<String>,

    /// Use STARTTLS instead of implicit TLS
    #[serde(default)]
    pub use_starttls: bool,

    /// Sender mailbox, e.g. `Tokengate <no-reply@example.com>`
    pub from_address: String,

    /// Subject line for verification mails
    #[serde(default = "default_subject")]
    pub subject: String,

    /// Timeout for a single SMTP send in seconds
    #[serde(default = "default_send_timeout")]
    pub send_timeout_secs: u64,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            provider: String::from("mock"),
            smtp_host: String::new(),
            smtp_port: default_smtp_port(),
            smtp_username: None,
            smtp_password: None,
            use_starttls: false,
            from_address: String::from("Tokengate <no-reply@tokengate.local>"),
            subject: default_subject(),
            send_timeout_secs: default_send_timeout(),
        }
    }
}

impl MailConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            provider: std::env::var("MAIL_PROVIDER").unwrap_or(defaults.provider.clone()),
            smtp_host: std::env::var("SMTP_HOST").unwrap_or_default(),
            smtp_port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.smtp_port),
            smtp_username: std::env::var("SMTP_USERNAME").ok(),
            smtp_password: std::env::var("SMTP_PASSWORD").ok(),
            use_starttls: std::env::var("SMTP_STARTTLS")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
            from_address: std::env::var("SMTP_FROM").unwrap_or(defaults.from_address.clone()),
            ..defaults
        }
    }

    /// Whether the SMTP provider is selected and has a relay host
    pub fn smtp_enabled(&self) -> bool {
        self.provider == "smtp" && !self.smtp_host.trim().is_empty()
    }
}

fn default_smtp_port() -> u16 {
    465
}

fn default_subject() -> String {
    String::from("Your verification code")
}

fn default_send_timeout() -> u64 {
    10
}
