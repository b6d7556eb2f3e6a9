//! Credential management for authenticated endpoints.

use secrecy::{ExposeSecret, SecretString};

use crate::error::ClientError;

/// Default environment variable holding the API key.
pub const API_KEY_ENV: &str = "KRAKEN_API_KEY";
/// Default environment variable holding the base64-encoded API secret.
pub const API_SECRET_ENV: &str = "KRAKEN_API_SECRET";

/// API credentials: the public key identifier and the base64-encoded
/// signing secret.
///
/// The secret is wrapped in [`SecretString`] so it is zeroized on drop and
/// never shows up in `Debug` output. Credentials are owned by the client
/// instance for its lifetime; nothing here persists them.
#[derive(Clone)]
pub struct Credentials {
    /// The API key (public identifier)
    pub api_key: String,
    api_secret: SecretString,
}

impl Credentials {
    /// Create credentials from an API key and a base64-encoded secret.
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: SecretString::from(api_secret.into()),
        }
    }

    /// Load credentials from `KRAKEN_API_KEY` and `KRAKEN_API_SECRET`.
    pub fn from_env() -> Result<Self, ClientError> {
        Self::from_env_vars(API_KEY_ENV, API_SECRET_ENV)
    }

    /// Load credentials from custom environment variable names.
    pub fn from_env_vars(key_var: &str, secret_var: &str) -> Result<Self, ClientError> {
        let api_key = std::env::var(key_var)
            .map_err(|_| ClientError::Configuration(format!("{key_var} is not set")))?;
        let api_secret = std::env::var(secret_var)
            .map_err(|_| ClientError::Configuration(format!("{secret_var} is not set")))?;
        Ok(Self::new(api_key, api_secret))
    }

    /// Get the base64-encoded API secret for signing.
    ///
    /// This method exposes the secret; call it only at the signing site.
    pub fn expose_secret(&self) -> &str {
        self.api_secret.expose_secret()
    }

    /// Whether either half of the credentials is empty.
    ///
    /// An empty key or secret is treated the same as absent credentials by
    /// the private dispatcher.
    pub fn is_incomplete(&self) -> bool {
        self.api_key.is_empty() || self.api_secret.expose_secret().is_empty()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("api_secret", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_secret() {
        let creds = Credentials::new("my_key", "super_secret");
        let debug_str = format!("{creds:?}");
        assert!(debug_str.contains("my_key"));
        assert!(!debug_str.contains("super_secret"));
        assert!(debug_str.contains("[REDACTED]"));
    }

    #[test]
    fn test_incomplete_detection() {
        assert!(Credentials::new("", "secret").is_incomplete());
        assert!(Credentials::new("key", "").is_incomplete());
        assert!(!Credentials::new("key", "secret").is_incomplete());
    }

    #[test]
    fn test_from_env_missing_is_configuration_error() {
        let err = Credentials::from_env_vars("KRAKEN_TEST_NO_SUCH_KEY", "KRAKEN_TEST_NO_SUCH_SECRET")
            .unwrap_err();
        assert!(matches!(err, ClientError::Configuration(_)));
    }
}
