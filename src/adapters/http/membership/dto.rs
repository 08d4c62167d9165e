//! HTTP DTOs for the membership endpoints.
//!
//! Membership payloads use camelCase field names, mirroring the payment
//! processor's own JSON conventions; the member-unlock response keeps the
//! snake_case outer shape of the other lock operations with the camelCase
//! membership proof nested inside.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::application::handlers::membership::{UnlockForMemberResult, ValidateInvoiceResult};
use crate::domain::membership::{Invoice, InvoiceStatus, InvoiceVerdict, MembershipStatus};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request to validate a specific invoice as membership proof.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateInvoiceRequest {
    pub invoice_id: String,
}

/// Request body for a member unlock; the body itself is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberUnlockRequest {
    /// Specific invoice presented as proof.
    #[serde(default)]
    pub invoice_id: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

fn rfc3339(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

/// Invoice summary nested in membership responses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceSummaryResponse {
    pub id: String,
    pub amount: String,
    pub currency: String,
    /// Creation time (ISO 8601).
    pub created_time: String,
    pub metadata: Map<String, Value>,
}

impl From<Invoice> for InvoiceSummaryResponse {
    fn from(invoice: Invoice) -> Self {
        Self {
            id: invoice.id,
            amount: invoice.amount,
            currency: invoice.currency,
            created_time: rfc3339(invoice.created_time),
            metadata: invoice.metadata,
        }
    }
}

/// Derived membership status.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MembershipStatusResponse {
    pub is_valid: bool,
    pub invoice_count: usize,
    pub most_recent_invoice: Option<InvoiceSummaryResponse>,
    /// When the membership lapses (ISO 8601).
    pub expires_at: Option<String>,
}

impl From<MembershipStatus> for MembershipStatusResponse {
    fn from(status: MembershipStatus) -> Self {
        Self {
            is_valid: status.is_valid,
            invoice_count: status.invoice_count,
            most_recent_invoice: status.most_recent_invoice.map(Into::into),
            expires_at: status.expires_at.map(rfc3339),
        }
    }
}

/// Response for the membership-status lookup on a lock.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MembershipLookupResponse {
    pub lock_name: String,
    pub membership: MembershipStatusResponse,
}

/// Invoice details in a validation response, including its status.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceDetailsResponse {
    pub id: String,
    pub status: InvoiceStatus,
    /// Creation time (ISO 8601).
    pub created_time: String,
    pub amount: String,
    pub currency: String,
    pub metadata: Map<String, Value>,
}

impl From<Invoice> for InvoiceDetailsResponse {
    fn from(invoice: Invoice) -> Self {
        Self {
            id: invoice.id,
            status: invoice.status,
            created_time: rfc3339(invoice.created_time),
            amount: invoice.amount,
            currency: invoice.currency,
            metadata: invoice.metadata,
        }
    }
}

/// Response for a single-invoice validation; negative verdicts are still 200.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateInvoiceResponse {
    pub is_valid: bool,
    pub message: String,
    pub invoice: InvoiceDetailsResponse,
    pub expires_at: Option<String>,
}

impl From<ValidateInvoiceResult> for ValidateInvoiceResponse {
    fn from(result: ValidateInvoiceResult) -> Self {
        let (is_valid, message, expires_at) = match result.verdict {
            InvoiceVerdict::Valid { expires_at } => (
                true,
                "Valid membership invoice".to_string(),
                Some(rfc3339(expires_at)),
            ),
            InvoiceVerdict::NotSettled => (false, "Invoice is not paid".to_string(), None),
            InvoiceVerdict::OutsideWindow => {
                (false, "Invoice is older than 30 days".to_string(), None)
            }
        };
        Self {
            is_valid,
            message,
            invoice: result.invoice.into(),
            expires_at,
        }
    }
}

/// Membership proof attached to a successful member unlock.
#[derive(Debug, Clone, Serialize)]
pub struct MembershipProofResponse {
    pub valid: bool,
    #[serde(rename = "invoiceId")]
    pub invoice_id: Option<String>,
    #[serde(rename = "expiresAt")]
    pub expires_at: Option<String>,
}

/// Response for a successful member unlock.
#[derive(Debug, Clone, Serialize)]
pub struct MemberUnlockResponse {
    pub success: bool,
    pub lock_name: String,
    pub operation: String,
    pub afi_status: i64,
    pub afi_status_text: String,
    pub membership: MembershipProofResponse,
}

impl From<UnlockForMemberResult> for MemberUnlockResponse {
    fn from(result: UnlockForMemberResult) -> Self {
        Self {
            success: true,
            lock_name: result.lock_name,
            operation: "unlock".to_string(),
            afi_status: result.payload.afi_status,
            afi_status_text: result.payload.afi_status_text,
            membership: MembershipProofResponse {
                valid: true,
                invoice_id: result.proof.invoice_id,
                expires_at: result.proof.expires_at.map(rfc3339),
            },
        }
    }
}
