//! Invoice source port for the payment processor API.
//!
//! The processor is multi-tenant on API keys: every caller of the internal
//! API supplies its own key per request, so sources are built per request
//! through [`InvoiceSourceFactory`] rather than shared.

use std::sync::Arc;

use async_trait::async_trait;
use secrecy::SecretString;

use crate::domain::membership::{Invoice, InvoiceStatus, MembershipError};

/// Port for payment processor invoice access.
#[async_trait]
pub trait InvoiceSource: Send + Sync {
    /// Fetch invoices matching the query. One page only; the processor caps
    /// `take` server-side.
    async fn invoices(&self, query: &InvoiceQuery) -> Result<Vec<Invoice>, PaymentApiError>;

    /// Fetch a single invoice by id. Fails with a `NotFound` error when the
    /// processor does not know the id.
    async fn invoice_by_id(&self, invoice_id: &str) -> Result<Invoice, PaymentApiError>;
}

/// Builds an [`InvoiceSource`] scoped to one caller's API key.
pub trait InvoiceSourceFactory: Send + Sync {
    fn with_api_key(&self, api_key: SecretString) -> Arc<dyn InvoiceSource>;
}

/// Invoice listing query.
#[derive(Debug, Clone, Default)]
pub struct InvoiceQuery {
    pub skip: Option<u32>,
    pub take: Option<u32>,
    /// Lower creation-time bound, unix seconds.
    pub start_date: Option<i64>,
    /// Upper creation-time bound, unix seconds.
    pub end_date: Option<i64>,
    pub status: Vec<InvoiceStatus>,
    pub search_term: Option<String>,
}

impl InvoiceQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_take(mut self, take: u32) -> Self {
        self.take = Some(take);
        self
    }

    pub fn with_skip(mut self, skip: u32) -> Self {
        self.skip = Some(skip);
        self
    }

    pub fn with_start_date(mut self, unix_seconds: i64) -> Self {
        self.start_date = Some(unix_seconds);
        self
    }

    pub fn with_end_date(mut self, unix_seconds: i64) -> Self {
        self.end_date = Some(unix_seconds);
        self
    }

    pub fn with_status(mut self, status: InvoiceStatus) -> Self {
        self.status.push(status);
        self
    }

    pub fn with_search_term(mut self, term: impl Into<String>) -> Self {
        self.search_term = Some(term.into());
        self
    }
}

/// Errors from payment processor operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentApiError {
    pub code: PaymentApiErrorCode,
    pub message: String,
}

/// Payment processor error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentApiErrorCode {
    /// Network connectivity issue.
    NetworkError,

    /// Requested resource does not exist.
    NotFound,

    /// Processor returned a non-2xx status.
    UpstreamStatus,

    /// Processor response body did not parse.
    InvalidResponse,
}

impl PaymentApiError {
    pub fn new(code: PaymentApiErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(PaymentApiErrorCode::NetworkError, message)
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::new(PaymentApiErrorCode::NotFound, resource)
    }

    pub fn upstream(status: u16, context: impl std::fmt::Display) -> Self {
        Self::new(
            PaymentApiErrorCode::UpstreamStatus,
            format!("{} (status {})", context, status),
        )
    }

    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::new(PaymentApiErrorCode::InvalidResponse, message)
    }
}

impl std::fmt::Display for PaymentApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for PaymentApiError {}

impl From<PaymentApiError> for MembershipError {
    fn from(err: PaymentApiError) -> Self {
        match err.code {
            PaymentApiErrorCode::NotFound => MembershipError::InvoiceNotFound(err.message),
            PaymentApiErrorCode::InvalidResponse => MembershipError::InvalidPayload(err.message),
            PaymentApiErrorCode::NetworkError | PaymentApiErrorCode::UpstreamStatus => {
                MembershipError::Upstream(err.message)
            }
        }
    }
}
