//! Configuration for the verification services

use std::ops::RangeInclusive;
use std::time::Duration;

use tg_shared::config::{VerificationConfig, MAX_CODE_TTL_SECONDS, MIN_CODE_TTL_SECONDS};

use crate::domain::CODE_EXPIRATION;

/// Configuration shared by issuance and verification
#[derive(Debug, Clone)]
pub struct VerificationServiceConfig {
    /// Lifetime of an issued code, enforced by the token store
    pub code_ttl: Duration,
    /// Range numeric email codes are drawn from
    pub email_code_range: RangeInclusive<u32>,
    /// Deadline applied to every store, renderer and transport call
    pub operation_timeout: Option<Duration>,
}

impl Default for VerificationServiceConfig {
    fn default() -> Self {
        Self {
            code_ttl: CODE_EXPIRATION,
            email_code_range: 100_000..=999_999,
            operation_timeout: Some(Duration::from_secs(5)),
        }
    }
}

impl VerificationServiceConfig {
    /// Code lifetime rounded to whole minutes, as shown to users, never 0
    pub fn ttl_minutes(&self) -> u64 {
        (self.code_ttl.as_secs().saturating_add(30) / 60).max(1)
    }
}

impl From<&VerificationConfig> for VerificationServiceConfig {
    fn from(config: &VerificationConfig) -> Self {
        let low = config.email_code_min.min(config.email_code_max);
        let high = config.email_code_min.max(config.email_code_max);

        Self {
            code_ttl: Duration::from_secs(
                config
                    .code_ttl_seconds
                    .clamp(MIN_CODE_TTL_SECONDS, MAX_CODE_TTL_SECONDS),
            ),
            email_code_range: low..=high,
            operation_timeout: match config.operation_timeout_ms {
                0 => None,
                ms => Some(Duration::from_millis(ms)),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_ttl(secs: u64) -> VerificationServiceConfig {
        VerificationServiceConfig {
            code_ttl: Duration::from_secs(secs),
            ..Default::default()
        }
    }

    #[test]
    fn test_ttl_minutes_rounding() {
        assert_eq!(VerificationServiceConfig::default().ttl_minutes(), 3);
        assert_eq!(with_ttl(150).ttl_minutes(), 3);
        assert_eq!(with_ttl(149).ttl_minutes(), 2);
        assert_eq!(with_ttl(10).ttl_minutes(), 1);
    }

    #[test]
    fn test_ttl_minutes_does_not_overflow() {
        assert_eq!(with_ttl(u64::MAX).ttl_minutes(), u64::MAX / 60);
    }

    #[test]
    fn test_code_ttl_clamped_from_settings() {
        let zero = VerificationConfig {
            code_ttl_seconds: 0,
            ..Default::default()
        };
        let huge = VerificationConfig {
            code_ttl_seconds: u64::MAX,
            ..Default::default()
        };

        assert_eq!(
            VerificationServiceConfig::from(&zero).code_ttl,
            Duration::from_secs(MIN_CODE_TTL_SECONDS)
        );
        assert_eq!(
            VerificationServiceConfig::from(&huge).code_ttl,
            Duration::from_secs(MAX_CODE_TTL_SECONDS)
        );
        assert_eq!(VerificationServiceConfig::from(&huge).ttl_minutes(), 1_440);
    }
}
