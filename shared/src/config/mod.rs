//! Configuration module with business-specific sub-modules
//!
//! - `cache` - token store selection and Redis configuration
//! - `environment` - environment detection and logging configuration
//! - `mail` - outbound mail transport configuration
//! - `server` - HTTP server and CORS configuration
//! - `verification` - code lifetime, code range, deadlines and captcha settings

pub mod cache;
pub mod environment;
pub mod mail;
pub mod server;
pub mod verification;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use cache::{CacheConfig, CacheType};
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use mail::MailConfig;
pub use server::ServerConfig;
pub use verification::{
    CaptchaConfig, VerificationConfig, MAX_CODE_TTL_SECONDS, MIN_CODE_TTL_SECONDS,
};

/// Prefix for environment variables overriding any configuration key,
/// e.g. `TOKENGATE__CACHE__URL` or `TOKENGATE__VERIFICATION__CODE_TTL_SECONDS`
pub const ENV_PREFIX: &str = "TOKENGATE";

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Token store configuration
    pub cache: CacheConfig,

    /// Mail transport configuration
    pub mail: MailConfig,

    /// Verification code configuration
    #[serde(default)]
    pub verification: VerificationConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            server: ServerConfig::default(),
            cache: CacheConfig::default(),
            mail: MailConfig::default(),
            verification: VerificationConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Load configuration from conventional environment variables
    pub fn from_env() -> Self {
        let environment = Environment::from_env();
        Self {
            environment,
            server: ServerConfig::from_env(),
            cache: CacheConfig::from_env(),
            mail: MailConfig::from_env(),
            verification: VerificationConfig::default(),
            logging: LoggingConfig::for_environment(environment),
        }
    }

    /// Load layered configuration
    ///
    /// Sources, lowest precedence first:
    /// 1. [`AppConfig::from_env`] (built-in defaults plus conventional variables)
    /// 2. an optional `config/<environment>.toml` file
    /// 3. `TOKENGATE__SECTION__KEY` environment variables
    ///
    /// The merged result is checked with [`AppConfig::validate`].
    pub fn load() -> Result<Self, config::ConfigError> {
        let base = Self::from_env();
        let file = base.environment.config_file();

        let loaded: Self = config::Config::builder()
            .add_source(config::Config::try_from(&base)?)
            .add_source(config::File::with_name(&file).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        loaded.validate().map_err(config::ConfigError::Message)?;
        Ok(loaded)
    }

    /// Cross-field checks serde cannot express
    pub fn validate(&self) -> Result<(), String> {
        self.verification.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_default() {
        let config = AppConfig::default();
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.cache.cache_type, CacheType::Redis);
        assert_eq!(config.mail.provider, "mock");
        assert_eq!(config.verification.code_ttl_seconds, 180);
    }

    #[test]
    fn test_app_config_roundtrips_through_config_crate() {
        let base = AppConfig::default();
        let loaded: AppConfig = config::Config::builder()
            .add_source(config::Config::try_from(&base).unwrap())
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(loaded.server.port, base.server.port);
        assert_eq!(loaded.cache.url, base.cache.url);
        assert_eq!(loaded.verification.email_code_max, 999_999);
    }

    #[test]
    fn test_app_config_rejects_zero_code_ttl() {
        let mut config = AppConfig::default();
        assert!(config.validate().is_ok());

        config.verification.code_ttl_seconds = 0;
        assert!(config.validate().is_err());
    }
}
