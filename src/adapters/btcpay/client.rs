//! BTCPay-compatible payment processor adapter.
//!
//! Implements the `InvoiceSource` trait against the processor's Greenfield
//! REST API. Authentication is a static `Authorization: token <key>` header;
//! keys arrive per request, so the factory builds a client per caller.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};

use crate::config::PaymentConfig;
use crate::domain::membership::Invoice;
use crate::ports::{InvoiceQuery, InvoiceSource, InvoiceSourceFactory, PaymentApiError};

use super::dto::ApiErrorBody;

/// BTCPay API configuration for one caller.
#[derive(Clone)]
pub struct BtcPayConfig {
    /// Base URL of the payment server.
    server_url: String,

    /// Store identifier scoping every endpoint.
    store_id: String,

    /// Caller's API key.
    api_key: SecretString,
}

impl BtcPayConfig {
    pub fn new(
        server_url: impl Into<String>,
        store_id: impl Into<String>,
        api_key: SecretString,
    ) -> Self {
        Self {
            server_url: server_url.into(),
            store_id: store_id.into(),
            api_key,
        }
    }
}

/// BTCPay payment processor adapter.
pub struct BtcPayClient {
    config: BtcPayConfig,
    http_client: reqwest::Client,
}

impl BtcPayClient {
    /// Create a new adapter with the given configuration.
    pub fn new(config: BtcPayConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }

    fn invoices_url(&self) -> String {
        format!(
            "{}/api/v1/stores/{}/invoices",
            self.config.server_url, self.config.store_id
        )
    }

    /// Flatten a query into repeatable key/value pairs; dates go out as unix
    /// seconds, statuses as one `status` pair each.
    fn query_pairs(query: &InvoiceQuery) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(skip) = query.skip {
            pairs.push(("skip", skip.to_string()));
        }
        if let Some(take) = query.take {
            pairs.push(("take", take.to_string()));
        }
        if let Some(start) = query.start_date {
            pairs.push(("startDate", start.to_string()));
        }
        if let Some(end) = query.end_date {
            pairs.push(("endDate", end.to_string()));
        }
        for status in &query.status {
            pairs.push(("status", status.as_str().to_string()));
        }
        if let Some(term) = &query.search_term {
            pairs.push(("searchTerm", term.clone()));
        }
        pairs
    }

    async fn error_from_response(
        response: reqwest::Response,
        context: &str,
    ) -> PaymentApiError {
        let status = response.status();
        let detail = response
            .json::<ApiErrorBody>()
            .await
            .map(|body| body.describe())
            .unwrap_or_else(|_| "unreadable error body".to_string());
        tracing::warn!(status = %status, context, detail = %detail, "Payment processor request failed");
        PaymentApiError::upstream(status.as_u16(), format!("{}: {}", context, detail))
    }
}

#[async_trait]
impl InvoiceSource for BtcPayClient {
    async fn invoices(&self, query: &InvoiceQuery) -> Result<Vec<Invoice>, PaymentApiError> {
        let response = self
            .http_client
            .get(self.invoices_url())
            .header(
                "Authorization",
                format!("token {}", self.config.api_key.expose_secret()),
            )
            .query(&Self::query_pairs(query))
            .send()
            .await
            .map_err(|e| PaymentApiError::network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response, "Failed to fetch invoices").await);
        }

        response
            .json()
            .await
            .map_err(|e| PaymentApiError::invalid_response(e.to_string()))
    }

    async fn invoice_by_id(&self, invoice_id: &str) -> Result<Invoice, PaymentApiError> {
        let url = format!("{}/{}", self.invoices_url(), invoice_id);

        let response = self
            .http_client
            .get(&url)
            .header(
                "Authorization",
                format!("token {}", self.config.api_key.expose_secret()),
            )
            .send()
            .await
            .map_err(|e| PaymentApiError::network(e.to_string()))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(PaymentApiError::not_found(invoice_id));
        }
        if !response.status().is_success() {
            return Err(
                Self::error_from_response(response, "Failed to fetch invoice details").await,
            );
        }

        response
            .json()
            .await
            .map_err(|e| PaymentApiError::invalid_response(e.to_string()))
    }
}

/// Builds per-caller [`BtcPayClient`]s from the configured server and store.
pub struct BtcPayClientFactory {
    server_url: String,
    store_id: String,
}

impl BtcPayClientFactory {
    pub fn new(config: &PaymentConfig) -> Self {
        Self {
            server_url: config.server_url.clone(),
            store_id: config.store_id.clone(),
        }
    }
}

impl InvoiceSourceFactory for BtcPayClientFactory {
    fn with_api_key(&self, api_key: SecretString) -> Arc<dyn InvoiceSource> {
        Arc::new(BtcPayClient::new(BtcPayConfig::new(
            self.server_url.clone(),
            self.store_id.clone(),
            api_key,
        )))
    }
}
