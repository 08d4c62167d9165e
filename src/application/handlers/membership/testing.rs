//! Shared mocks for the membership handlers.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use serde_json::{Map, Value};

use crate::domain::membership::{Invoice, InvoiceStatus};
use crate::ports::{InvoiceQuery, InvoiceSource, PaymentApiError};

/// Invoice source backed by a fixed invoice list, recording the last query.
pub struct MockInvoiceSource {
    invoices: Vec<Invoice>,
    last_query: Mutex<Option<InvoiceQuery>>,
    fail: bool,
}

impl MockInvoiceSource {
    pub fn with_invoices(invoices: Vec<Invoice>) -> Self {
        Self {
            invoices,
            last_query: Mutex::new(None),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            invoices: Vec::new(),
            last_query: Mutex::new(None),
            fail: true,
        }
    }

    pub fn last_query(&self) -> Option<InvoiceQuery> {
        self.last_query.lock().unwrap().clone()
    }
}

#[async_trait]
impl InvoiceSource for MockInvoiceSource {
    async fn invoices(&self, query: &InvoiceQuery) -> Result<Vec<Invoice>, PaymentApiError> {
        if self.fail {
            return Err(PaymentApiError::upstream(502, "Failed to fetch invoices"));
        }
        *self.last_query.lock().unwrap() = Some(query.clone());
        Ok(self.invoices.clone())
    }

    async fn invoice_by_id(&self, invoice_id: &str) -> Result<Invoice, PaymentApiError> {
        if self.fail {
            return Err(PaymentApiError::upstream(502, "Failed to fetch invoice"));
        }
        self.invoices
            .iter()
            .find(|inv| inv.id == invoice_id)
            .cloned()
            .ok_or_else(|| PaymentApiError::not_found(invoice_id))
    }
}

/// A settled membership-tagged invoice created `age_days` ago.
pub fn membership_invoice(id: &str, age_days: i64) -> Invoice {
    let mut metadata = Map::new();
    metadata.insert("type".to_string(), Value::String("membership".to_string()));
    Invoice {
        id: id.to_string(),
        status: InvoiceStatus::Settled,
        created_time: Utc::now() - Duration::days(age_days),
        amount: "15.00".to_string(),
        currency: "EUR".to_string(),
        metadata,
    }
}

/// An invoice that fails the settled check.
pub fn unpaid_invoice(id: &str) -> Invoice {
    Invoice {
        status: InvoiceStatus::New,
        ..membership_invoice(id, 1)
    }
}
