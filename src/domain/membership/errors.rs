//! Membership-specific error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | ApiKeyMissing | 401 |
//! | NotValid | 403 |
//! | InvoiceNotFound | 404 |
//! | Upstream | 500 |
//! | InvalidPayload | 500 |
//! | Lock(inner) | per inner |

use crate::domain::lock::LockError;

/// Errors raised while validating membership or unlocking for a member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MembershipError {
    /// The payment API key header was not supplied.
    ApiKeyMissing,

    /// The referenced invoice does not exist on the processor.
    InvoiceNotFound(String),

    /// No qualifying invoice; the gate refuses the operation.
    NotValid { invoice_count: usize },

    /// The payment processor returned an unexpected response.
    Upstream(String),

    /// The processor response did not match the expected shape.
    InvalidPayload(String),

    /// The gated lock operation itself failed.
    Lock(LockError),
}

impl MembershipError {
    pub fn api_key_missing() -> Self {
        MembershipError::ApiKeyMissing
    }

    pub fn invoice_not_found(id: impl Into<String>) -> Self {
        MembershipError::InvoiceNotFound(id.into())
    }

    pub fn not_valid(invoice_count: usize) -> Self {
        MembershipError::NotValid { invoice_count }
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        MembershipError::Upstream(message.into())
    }

    pub fn invalid_payload(message: impl Into<String>) -> Self {
        MembershipError::InvalidPayload(message.into())
    }

    /// Returns a user-facing error message.
    pub fn message(&self) -> String {
        match self {
            MembershipError::ApiKeyMissing => "Payment API key required".to_string(),
            MembershipError::InvoiceNotFound(id) => format!("Invoice {} not found", id),
            MembershipError::NotValid { .. } => {
                "No valid membership invoice found".to_string()
            }
            MembershipError::Upstream(msg) => format!("Payment processor error: {}", msg),
            MembershipError::InvalidPayload(msg) => {
                format!("Invalid payment processor response: {}", msg)
            }
            MembershipError::Lock(err) => err.message(),
        }
    }
}

impl std::fmt::Display for MembershipError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for MembershipError {}

impl From<LockError> for MembershipError {
    fn from(err: LockError) -> Self {
        MembershipError::Lock(err)
    }
}
