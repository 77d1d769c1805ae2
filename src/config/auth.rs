//! Authentication and authorization configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use super::server::Environment;

/// Identity and authority configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Secret used to verify session token signatures
    pub session_secret: SecretString,

    /// Base URL of the administrative authority service
    pub authority_url: String,

    /// API key sent to the authority with every privilege check
    pub authority_api_key: SecretString,

    /// Authority round-trip timeout in seconds
    #[serde(default = "default_authority_timeout")]
    pub authority_timeout_secs: u64,
}

impl AuthConfig {
    /// Get authority timeout as Duration
    pub fn authority_timeout(&self) -> Duration {
        Duration::from_secs(self.authority_timeout_secs)
    }

    /// Validate authentication configuration
    ///
    /// In production, requires HTTPS for the authority URL.
    /// In development, allows localhost with HTTP/HTTPS.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.session_secret.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("SESSION_SECRET"));
        }
        if self.authority_url.is_empty() {
            return Err(ValidationError::MissingRequired("AUTHORITY_URL"));
        }
        if self.authority_api_key.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("AUTHORITY_API_KEY"));
        }
        if self.authority_timeout_secs == 0 || self.authority_timeout_secs > 60 {
            return Err(ValidationError::InvalidTimeout);
        }

        // In production, require HTTPS
        if *environment == Environment::Production && !self.authority_url.starts_with("https://") {
            return Err(ValidationError::AuthorityMustBeHttps);
        }

        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_secret: SecretString::new(String::new()),
            authority_url: String::new(),
            authority_api_key: SecretString::new(String::new()),
            authority_timeout_secs: default_authority_timeout(),
        }
    }
}

fn default_authority_timeout() -> u64 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> AuthConfig {
        AuthConfig {
            session_secret: SecretString::new("session-secret".to_string()),
            authority_url: "https://authority.example.com".to_string(),
            authority_api_key: SecretString::new("key-123".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_auth_config_defaults() {
        let config = AuthConfig::default();
        assert_eq!(config.authority_timeout_secs, 10);
    }

    #[test]
    fn test_authority_timeout_duration() {
        let config = AuthConfig {
            authority_timeout_secs: 5,
            ..valid_config()
        };
        assert_eq!(config.authority_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_validation_missing_session_secret() {
        let config = AuthConfig {
            session_secret: SecretString::new(String::new()),
            ..valid_config()
        };
        assert!(config.validate(&Environment::Development).is_err());
    }

    #[test]
    fn test_validation_missing_authority_url() {
        let config = AuthConfig {
            authority_url: String::new(),
            ..valid_config()
        };
        assert!(config.validate(&Environment::Development).is_err());
    }

    #[test]
    fn test_validation_missing_api_key() {
        let config = AuthConfig {
            authority_api_key: SecretString::new(String::new()),
            ..valid_config()
        };
        assert!(config.validate(&Environment::Development).is_err());
    }

    #[test]
    fn test_validation_production_requires_https() {
        let config = AuthConfig {
            authority_url: "http://authority.example.com".to_string(),
            ..valid_config()
        };
        // Allowed in development
        assert!(config.validate(&Environment::Development).is_ok());
        // Rejected in production
        assert!(config.validate(&Environment::Production).is_err());
    }

    #[test]
    fn test_validation_valid_config() {
        assert!(valid_config().validate(&Environment::Production).is_ok());
    }
}
