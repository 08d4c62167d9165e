//! ValidateInvoiceHandler - Query handler for checking one invoice as proof.

use std::sync::Arc;

use chrono::Utc;

use crate::domain::membership::{validate_invoice, Invoice, InvoiceVerdict, MembershipError};
use crate::ports::InvoiceSource;

/// Query to validate a specific invoice as membership proof.
#[derive(Debug, Clone)]
pub struct ValidateInvoiceQuery {
    pub invoice_id: String,
}

/// Result of an invoice validation; the verdict may be negative without this
/// being an error.
#[derive(Debug, Clone)]
pub struct ValidateInvoiceResult {
    pub invoice: Invoice,
    pub verdict: InvoiceVerdict,
}

/// Handler for validating a single invoice by id.
pub struct ValidateInvoiceHandler {
    source: Arc<dyn InvoiceSource>,
}

impl ValidateInvoiceHandler {
    pub fn new(source: Arc<dyn InvoiceSource>) -> Self {
        Self { source }
    }

    pub async fn handle(
        &self,
        query: ValidateInvoiceQuery,
    ) -> Result<ValidateInvoiceResult, MembershipError> {
        let invoice = self.source.invoice_by_id(&query.invoice_id).await?;
        let verdict = validate_invoice(&invoice, Utc::now());

        tracing::debug!(
            invoice_id = %invoice.id,
            valid = verdict.is_valid(),
            "Invoice validated"
        );
        Ok(ValidateInvoiceResult { invoice, verdict })
    }
}
