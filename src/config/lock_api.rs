//! Smart-lock cloud API configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;

/// Smart-lock cloud API configuration (Danalock account + endpoints)
#[derive(Debug, Clone, Deserialize)]
pub struct LockApiConfig {
    /// Account username for the OAuth2 password grant
    #[serde(default)]
    pub username: String,

    /// Account password for the OAuth2 password grant
    #[serde(default = "empty_secret")]
    pub password: SecretString,

    /// Base URL of the lock cloud API
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Base URL of the bridge execute/poll service
    #[serde(default = "default_bridge_base_url")]
    pub bridge_base_url: String,
}

impl LockApiConfig {
    /// Validate lock API configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.username.is_empty() {
            return Err(ValidationError::MissingRequired("LOCK_API__USERNAME"));
        }
        if self.password.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("LOCK_API__PASSWORD"));
        }
        if !is_http_url(&self.api_base_url) {
            return Err(ValidationError::InvalidLockApiUrl);
        }
        if !is_http_url(&self.bridge_base_url) {
            return Err(ValidationError::InvalidBridgeUrl);
        }
        Ok(())
    }
}

impl Default for LockApiConfig {
    fn default() -> Self {
        Self {
            username: String::new(),
            password: empty_secret(),
            api_base_url: default_api_base_url(),
            bridge_base_url: default_bridge_base_url(),
        }
    }
}

pub(crate) fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

fn empty_secret() -> SecretString {
    SecretString::new(String::new())
}

fn default_api_base_url() -> String {
    "https://api.danalock.com".to_string()
}

fn default_bridge_base_url() -> String {
    "https://bridge.danalockservices.com".to_string()
}
