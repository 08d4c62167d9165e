//! Payment processor configuration

use serde::Deserialize;

use super::error::ValidationError;
use super::lock_api::is_http_url;

/// Payment processor configuration (BTCPay-compatible server)
///
/// The API key itself is not configured here: callers pass it per request in
/// the `x-btcpay-api-key` header and the server never persists it.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentConfig {
    /// Base URL of the payment server
    #[serde(default = "default_server_url")]
    pub server_url: String,

    /// Store identifier on the payment server
    #[serde(default = "default_store_id")]
    pub store_id: String,

    /// Metadata `type` value that marks an invoice as a membership payment
    #[serde(default = "default_membership_metadata_type")]
    pub membership_metadata_type: String,
}

impl PaymentConfig {
    /// Validate payment configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.store_id.is_empty() {
            return Err(ValidationError::MissingRequired("PAYMENT__STORE_ID"));
        }
        if !is_http_url(&self.server_url) {
            return Err(ValidationError::InvalidPaymentServerUrl);
        }
        Ok(())
    }
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            store_id: default_store_id(),
            membership_metadata_type: default_membership_metadata_type(),
        }
    }
}

fn default_server_url() -> String {
    "https://btcpay.example.com".to_string()
}

fn default_store_id() -> String {
    "store-1".to_string()
}

fn default_membership_metadata_type() -> String {
    "membership".to_string()
}
