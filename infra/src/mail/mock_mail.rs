//! Mock Mail Transport Implementation
//!
//! Logs verification emails to the console instead of sending them.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{info, warn};

use tg_core::errors::TransportError;
use tg_core::services::MailTransport;
use tg_shared::validation::{is_valid_email, mask_email};

/// Mock mail transport for development and testing
///
/// This implementation:
/// - Validates recipient addresses
/// - Prints messages to the console
/// - Optionally keeps the last message per recipient for inspection
///
/// [`MockMailTransport::new`] is what the server runs with and records
/// nothing. [`MockMailTransport::with_options`] records, for tests.
#[derive(Clone)]
pub struct MockMailTransport {
    /// Counter for tracking number of messages sent
    message_count: Arc<AtomicU64>,
    /// Last body per recipient, when recording
    outbox: Option<Arc<Mutex<HashMap<String, String>>>>,
    /// Whether to simulate failures
    simulate_failure: bool,
    /// Whether to print messages to console
    console_output: bool,
}

impl MockMailTransport {
    /// Console-only transport that keeps no message bodies
    pub fn new() -> Self {
        Self {
            message_count: Arc::new(AtomicU64::new(0)),
            outbox: None,
            simulate_failure: false,
            console_output: true,
        }
    }

    /// Recording transport with configurable options
    ///
    /// Holds one body per distinct recipient; meant for tests.
    pub fn with_options(console_output: bool, simulate_failure: bool) -> Self {
        Self {
            message_count: Arc::new(AtomicU64::new(0)),
            outbox: Some(Arc::new(Mutex::new(HashMap::new()))),
            simulate_failure,
            console_output,
        }
    }

    /// Get the total number of messages sent
    pub fn get_message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }

    /// Last body sent to `recipient`; always `None` when not recording
    pub fn last_message_to(&self, recipient: &str) -> Option<String> {
        let outbox = self.outbox.as_ref()?.lock().ok()?;
        outbox.get(recipient).cloned()
    }
}

impl Default for MockMailTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MailTransport for MockMailTransport {
    async fn send(&self, body: &str, recipients: &[String]) -> Result<(), TransportError> {
        if let Some(bad) = recipients.iter().find(|r| !is_valid_email(r)) {
            return Err(TransportError::InvalidRecipient(mask_email(bad)));
        }

        if self.simulate_failure {
            warn!(
                recipients = recipients.len(),
                "Mock mail transport simulating failure"
            );
            return Err(TransportError::Rejected(
                "Simulated mail delivery failure".to_string(),
            ));
        }

        let count = self.message_count.fetch_add(1, Ordering::SeqCst) + 1;

        if let Some(Ok(mut outbox)) = self.outbox.as_ref().map(|o| o.lock()) {
            for recipient in recipients {
                outbox.insert(recipient.clone(), body.to_string());
            }
        }

        if self.console_output {
            println!("\n{}", "=".repeat(60));
            println!("MOCK MAIL TRANSPORT - MESSAGE #{}", count);
            println!("{}", "=".repeat(60));
            println!("To: {}", recipients.join(", "));
            println!("Content: {}", body);
            println!("{}\n", "=".repeat(60));
        }

        for recipient in recipients {
            info!(
                target: "mail_transport",
                provider = "mock",
                recipient = %mask_email(recipient),
                message_length = body.len(),
                "Mail sent successfully (mock)"
            );
        }

        Ok(())
    }

    fn provider_name(&self) -> &str {
        "mock"
    }
}
