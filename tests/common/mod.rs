//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use chrono::{Duration, Utc};
use secrecy::SecretString;
use serde_json::{json, Map, Value};

use latchkey::adapters::http::{api_router, AppState};
use latchkey::application::{BridgeExecutor, LockDirectory};
use latchkey::domain::lock::{
    BridgeCommand, BridgeJob, BridgeResponse, BridgeStatus, DeviceInfo, Lock, LockModule,
    PairedDevice, BRIDGE_DEVICE_TYPE,
};
use latchkey::domain::membership::{Invoice, InvoiceStatus, MetadataFilter};
use latchkey::ports::{
    GatewayError, InvoiceQuery, InvoiceSource, InvoiceSourceFactory, LockGateway, PaymentApiError,
};

// ═══════════════════════════════════════════════════════════════════════════
// Lock Gateway Fixture
// ═══════════════════════════════════════════════════════════════════════════

/// Gateway over a fixed account with scripted poll behavior.
pub struct ScriptedGateway {
    locks: Vec<Lock>,
    /// Poll statuses replayed in order; exhausted → `Pending` forever.
    poll_statuses: Mutex<Vec<BridgeStatus>>,
    result: Option<Value>,
}

impl ScriptedGateway {
    pub fn new(poll_statuses: Vec<BridgeStatus>, result: Option<Value>) -> Self {
        Self {
            locks: vec![front_door()],
            poll_statuses: Mutex::new(poll_statuses),
            result,
        }
    }

    /// A gateway whose jobs immediately succeed with an operate payload.
    pub fn succeeding() -> Self {
        Self::new(vec![BridgeStatus::Succeeded], Some(operate_payload()))
    }

    /// A gateway whose jobs never leave `Pending`.
    pub fn never_finishing() -> Self {
        Self::new(Vec::new(), None)
    }
}

#[async_trait]
impl LockGateway for ScriptedGateway {
    async fn list_locks(&self) -> Result<Vec<Lock>, GatewayError> {
        Ok(self.locks.clone())
    }

    async fn paired_devices(
        &self,
        _serial_number: &str,
    ) -> Result<Vec<PairedDevice>, GatewayError> {
        Ok(vec![PairedDevice {
            kind: "paired".to_string(),
            device: DeviceInfo {
                serial_number: "BR-1".to_string(),
                name: "Hall bridge".to_string(),
                device_type: BRIDGE_DEVICE_TYPE.to_string(),
                timezone: "Europe/Riga".to_string(),
            },
        }])
    }

    async fn submit_command(&self, _command: &BridgeCommand) -> Result<BridgeJob, GatewayError> {
        Ok(BridgeJob {
            id: "job-1".to_string(),
        })
    }

    async fn poll_job(&self, job: &BridgeJob) -> Result<BridgeResponse, GatewayError> {
        let mut statuses = self.poll_statuses.lock().unwrap();
        let status = if statuses.is_empty() {
            BridgeStatus::Pending
        } else {
            statuses.remove(0)
        };
        let result = status.is_terminal().then(|| self.result.clone()).flatten();
        Ok(BridgeResponse {
            id: job.id.clone(),
            status,
            result,
        })
    }
}

pub fn front_door() -> Lock {
    Lock {
        id: "lock-1".to_string(),
        name: "Front Door".to_string(),
        kind: "danalockv3".to_string(),
        address: "aa:bb:cc:dd:ee:ff".to_string(),
        timezone: "Europe/Riga".to_string(),
        afi: Some(LockModule {
            serial_number: "AFI-1".to_string(),
            device_type: "danalockv3".to_string(),
        }),
    }
}

pub fn operate_payload() -> Value {
    json!({
        "afi_status": 0,
        "afi_status_text": "ok",
        "dmi_status": 0,
        "dmi_status_text": "ok"
    })
}

pub fn state_payload() -> Value {
    json!({
        "state": "Locked",
        "lock_status": "OK",
        "is_blocked": false,
        "afi_status": 0,
        "afi_status_text": "ok",
        "dmi_status": 0,
        "dmi_status_text": "ok"
    })
}

// ═══════════════════════════════════════════════════════════════════════════
// Invoice Source Fixture
// ═══════════════════════════════════════════════════════════════════════════

struct FixedInvoiceSource {
    invoices: Vec<Invoice>,
}

#[async_trait]
impl InvoiceSource for FixedInvoiceSource {
    async fn invoices(&self, _query: &InvoiceQuery) -> Result<Vec<Invoice>, PaymentApiError> {
        Ok(self.invoices.clone())
    }

    async fn invoice_by_id(&self, invoice_id: &str) -> Result<Invoice, PaymentApiError> {
        self.invoices
            .iter()
            .find(|inv| inv.id == invoice_id)
            .cloned()
            .ok_or_else(|| PaymentApiError::not_found(invoice_id))
    }
}

/// Factory handing every caller the same fixed invoice list, recording the
/// API keys it was asked for.
pub struct FixedInvoiceFactory {
    invoices: Vec<Invoice>,
    pub keys_seen: Mutex<Vec<String>>,
}

impl FixedInvoiceFactory {
    pub fn new(invoices: Vec<Invoice>) -> Self {
        Self {
            invoices,
            keys_seen: Mutex::new(Vec::new()),
        }
    }
}

impl InvoiceSourceFactory for FixedInvoiceFactory {
    fn with_api_key(&self, api_key: SecretString) -> Arc<dyn InvoiceSource> {
        use secrecy::ExposeSecret;
        self.keys_seen
            .lock()
            .unwrap()
            .push(api_key.expose_secret().to_string());
        Arc::new(FixedInvoiceSource {
            invoices: self.invoices.clone(),
        })
    }
}

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

// ═══════════════════════════════════════════════════════════════════════════
// App Assembly
// ═══════════════════════════════════════════════════════════════════════════

/// Build the full API router over a scripted gateway and fixed invoices.
pub fn app_with(gateway: Arc<dyn LockGateway>, invoices: Vec<Invoice>) -> Router {
    let factory = Arc::new(FixedInvoiceFactory::new(invoices));
    app_with_factory(gateway, factory)
}

pub fn app_with_factory(
    gateway: Arc<dyn LockGateway>,
    factory: Arc<FixedInvoiceFactory>,
) -> Router {
    let directory = Arc::new(LockDirectory::new(gateway.clone()));
    let executor = Arc::new(BridgeExecutor::new(gateway.clone()));
    let state = AppState {
        gateway,
        directory,
        executor,
        invoice_sources: factory,
        membership_filter: MetadataFilter::single("type", "membership"),
    };
    Router::new().nest("/api/v1", api_router()).with_state(state)
}
