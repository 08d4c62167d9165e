//! CheckMembershipHandler - Query handler for deriving membership status.

use std::sync::Arc;

use chrono::{Duration, Utc};

use crate::domain::membership::{
    evaluate, InvoiceStatus, MembershipError, MembershipStatus, MetadataFilter,
    MEMBERSHIP_WINDOW_DAYS,
};
use crate::ports::{InvoiceQuery, InvoiceSource};

/// Maximum invoices fetched per membership check; one page only.
const INVOICE_PAGE_SIZE: u32 = 100;

/// Query to derive membership status for a metadata filter.
#[derive(Debug, Clone)]
pub struct CheckMembershipQuery {
    pub filter: MetadataFilter,
}

/// Handler for membership checks against the payment processor.
///
/// Fetches one page of settled invoices from the membership window and runs
/// the pure evaluation over them.
pub struct CheckMembershipHandler {
    source: Arc<dyn InvoiceSource>,
}

impl CheckMembershipHandler {
    pub fn new(source: Arc<dyn InvoiceSource>) -> Self {
        Self { source }
    }

    pub async fn handle(
        &self,
        query: CheckMembershipQuery,
    ) -> Result<MembershipStatus, MembershipError> {
        let now = Utc::now();
        let window_start = now - Duration::days(MEMBERSHIP_WINDOW_DAYS);

        let invoice_query = InvoiceQuery::new()
            .with_start_date(window_start.timestamp())
            .with_status(InvoiceStatus::Settled)
            .with_take(INVOICE_PAGE_SIZE);

        let invoices = self.source.invoices(&invoice_query).await?;
        let status = evaluate(&invoices, &query.filter, now);

        tracing::debug!(
            is_valid = status.is_valid,
            invoice_count = status.invoice_count,
            "Membership evaluated"
        );
        Ok(status)
    }
}
