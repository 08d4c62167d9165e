//! Membership evaluation over fetched invoices.
//!
//! A membership is valid iff at least one settled invoice matching the
//! required metadata was created within the last 30 days (inclusive). Expiry
//! is derived from the most recent qualifying invoice. The evaluation is a
//! pure function over already-fetched invoices; callers narrow the upstream
//! query, but the invariant is enforced here regardless.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use super::invoice::Invoice;

/// Exact-match metadata filter for membership invoices.
///
/// Every key/value pair must match the invoice metadata exactly. An empty
/// filter matches every invoice; an invoice without metadata never matches a
/// non-empty filter.
#[derive(Debug, Clone, Default)]
pub struct MetadataFilter(Map<String, Value>);

impl MetadataFilter {
    pub fn new(entries: Map<String, Value>) -> Self {
        Self(entries)
    }

    /// Filter on a single metadata key/value pair.
    pub fn single(key: impl Into<String>, value: impl Into<Value>) -> Self {
        let mut entries = Map::new();
        entries.insert(key.into(), value.into());
        Self(entries)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn matches(&self, invoice: &Invoice) -> bool {
        self.0
            .iter()
            .all(|(key, value)| invoice.metadata.get(key) == Some(value))
    }
}

/// Derived membership state; recomputed per request, never persisted.
#[derive(Debug, Clone)]
pub struct MembershipStatus {
    pub is_valid: bool,
    /// Number of qualifying invoices found.
    pub invoice_count: usize,
    /// The newest qualifying invoice, if any.
    pub most_recent_invoice: Option<Invoice>,
    /// When the membership lapses; `None` when invalid.
    pub expires_at: Option<DateTime<Utc>>,
}

impl MembershipStatus {
    fn invalid(invoice_count: usize) -> Self {
        Self {
            is_valid: false,
            invoice_count,
            most_recent_invoice: None,
            expires_at: None,
        }
    }
}

/// Evaluate membership from a batch of invoices.
///
/// An empty result is not an error: it yields `is_valid == false`.
pub fn evaluate(invoices: &[Invoice], filter: &MetadataFilter, now: DateTime<Utc>) -> MembershipStatus {
    let qualifying: Vec<&Invoice> = invoices
        .iter()
        .filter(|inv| inv.status.is_settled() && inv.within_window(now) && filter.matches(inv))
        .collect();

    let most_recent = qualifying
        .iter()
        .max_by_key(|inv| inv.created_time)
        .map(|inv| (*inv).clone());

    match most_recent {
        Some(invoice) => {
            let expires_at = invoice.membership_expiry();
            MembershipStatus {
                is_valid: true,
                invoice_count: qualifying.len(),
                most_recent_invoice: Some(invoice),
                expires_at: Some(expires_at),
            }
        }
        None => MembershipStatus::invalid(0),
    }
}

/// Verdict on a single invoice presented as membership proof.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvoiceVerdict {
    Valid { expires_at: DateTime<Utc> },
    /// Payment has not cleared.
    NotSettled,
    /// Older than the membership window.
    OutsideWindow,
}

impl InvoiceVerdict {
    pub fn is_valid(&self) -> bool {
        matches!(self, InvoiceVerdict::Valid { .. })
    }
}

/// Validate a single invoice against the settled + window rules.
///
/// The metadata filter is deliberately not applied here: a caller presenting
/// a specific invoice id has already identified the payment.
pub fn validate_invoice(invoice: &Invoice, now: DateTime<Utc>) -> InvoiceVerdict {
    if !invoice.status.is_settled() {
        return InvoiceVerdict::NotSettled;
    }
    if !invoice.within_window(now) {
        return InvoiceVerdict::OutsideWindow;
    }
    InvoiceVerdict::Valid {
        expires_at: invoice.membership_expiry(),
    }
}
