//! Integration tests for the BTCPay payment processor adapter.
//!
//! Runs a fake processor on a loopback socket and drives the real client
//! against it: token-header auth, query-parameter shape, and 404 mapping.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, RawQuery, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use secrecy::SecretString;
use serde_json::json;

use latchkey::adapters::btcpay::{BtcPayClient, BtcPayConfig};
use latchkey::domain::membership::InvoiceStatus;
use latchkey::ports::{InvoiceQuery, InvoiceSource, PaymentApiErrorCode};

// ═══════════════════════════════════════════════════════════════════════════
// Fake Payment Processor
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Clone, Default)]
struct ProcessorState {
    last_query: Arc<Mutex<Option<String>>>,
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == "token test-key")
}

async fn invoices_endpoint(
    State(state): State<ProcessorState>,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
) -> impl IntoResponse {
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    *state.last_query.lock().unwrap() = query;
    Json(json!([
        {
            "id": "inv-1",
            "status": "Settled",
            "createdTime": 1767052800,
            "amount": "15.00",
            "currency": "EUR",
            "metadata": {"type": "membership"}
        },
        {
            "id": "inv-2",
            "status": "New",
            "createdTime": 1767139200,
            "amount": "5.00",
            "currency": "EUR"
        }
    ]))
    .into_response()
}

async fn invoice_endpoint(
    headers: HeaderMap,
    Path(invoice_id): Path<String>,
) -> impl IntoResponse {
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    if invoice_id != "inv-1" {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({"code": "invoice-not-found", "message": "unknown invoice"})),
        )
            .into_response();
    }
    Json(json!({
        "id": "inv-1",
        "status": "Settled",
        "createdTime": 1767052800,
        "amount": "15.00",
        "currency": "EUR",
        "metadata": {"type": "membership"}
    }))
    .into_response()
}

async fn spawn_processor(state: ProcessorState) -> SocketAddr {
    let app = Router::new()
        .route("/api/v1/stores/store-1/invoices", get(invoices_endpoint))
        .route(
            "/api/v1/stores/store-1/invoices/:invoice_id",
            get(invoice_endpoint),
        )
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn client_for(addr: SocketAddr, api_key: &str) -> BtcPayClient {
    BtcPayClient::new(BtcPayConfig::new(
        format!("http://{}", addr),
        "store-1",
        SecretString::new(api_key.to_string()),
    ))
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn invoices_sends_dates_as_unix_seconds_and_repeats_status() {
    let state = ProcessorState::default();
    let last_query = state.last_query.clone();
    let addr = spawn_processor(state).await;
    let client = client_for(addr, "test-key");

    let invoices = client
        .invoices(
            &InvoiceQuery::new()
                .with_take(100)
                .with_start_date(1_767_052_800)
                .with_status(InvoiceStatus::Settled)
                .with_status(InvoiceStatus::Complete),
        )
        .await
        .unwrap();

    assert_eq!(invoices.len(), 2);
    assert_eq!(invoices[0].id, "inv-1");
    assert_eq!(invoices[0].status, InvoiceStatus::Settled);
    assert_eq!(invoices[0].created_time.timestamp(), 1767052800);
    assert_eq!(invoices[1].status, InvoiceStatus::New);
    assert!(invoices[1].metadata.is_empty());

    let query = last_query.lock().unwrap().clone().unwrap();
    assert_eq!(
        query,
        "take=100&startDate=1767052800&status=Settled&status=Complete"
    );
}

#[tokio::test]
async fn invoice_by_id_parses_metadata() {
    let addr = spawn_processor(ProcessorState::default()).await;
    let client = client_for(addr, "test-key");

    let invoice = client.invoice_by_id("inv-1").await.unwrap();
    assert_eq!(invoice.metadata.get("type").unwrap(), "membership");
}

#[tokio::test]
async fn unknown_invoice_maps_to_not_found() {
    let addr = spawn_processor(ProcessorState::default()).await;
    let client = client_for(addr, "test-key");

    let err = client.invoice_by_id("missing").await.unwrap_err();
    assert_eq!(err.code, PaymentApiErrorCode::NotFound);
}

#[tokio::test]
async fn wrong_api_key_is_upstream_error() {
    let addr = spawn_processor(ProcessorState::default()).await;
    let client = client_for(addr, "wrong-key");

    let err = client.invoices(&InvoiceQuery::new()).await.unwrap_err();
    assert_eq!(err.code, PaymentApiErrorCode::UpstreamStatus);
    assert!(err.message.contains("401"));
}
