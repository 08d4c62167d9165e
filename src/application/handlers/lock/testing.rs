//! Shared test harness for the bridge-backed lock handlers.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::application::{BridgeExecutor, LockDirectory};
use crate::domain::lock::{
    BridgeCommand, BridgeJob, BridgeResponse, BridgeStatus, DeviceInfo, Lock, LockModule,
    PairedDevice, BRIDGE_DEVICE_TYPE,
};
use crate::ports::{GatewayError, LockGateway};

/// What the scripted gateway should do for a handler test.
pub struct HarnessBehavior {
    /// Terminal status the first poll reports.
    pub terminal_status: BridgeStatus,
    /// Result payload attached to the terminal response.
    pub result: Option<Value>,
    /// Whether the fixture lock carries a radio-module serial number.
    pub lock_has_serial: bool,
}

impl Default for HarnessBehavior {
    fn default() -> Self {
        Self {
            terminal_status: BridgeStatus::Succeeded,
            result: None,
            lock_has_serial: true,
        }
    }
}

struct HarnessGateway {
    behavior: HarnessBehavior,
}

#[async_trait]
impl LockGateway for HarnessGateway {
    async fn list_locks(&self) -> Result<Vec<Lock>, GatewayError> {
        Ok(vec![Lock {
            id: "lock-1".to_string(),
            name: "Front Door".to_string(),
            kind: "danalockv3".to_string(),
            address: "aa:bb".to_string(),
            timezone: "Europe/Riga".to_string(),
            afi: self.behavior.lock_has_serial.then(|| LockModule {
                serial_number: "AFI-1".to_string(),
                device_type: "danalockv3".to_string(),
            }),
        }])
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
        Ok(BridgeResponse {
            id: job.id.clone(),
            status: self.behavior.terminal_status.clone(),
            result: self.behavior.result.clone(),
        })
    }
}

/// Build a directory and executor over a scripted gateway. The fixture
/// account has one lock named "Front Door" with serial "AFI-1".
pub fn harness(behavior: HarnessBehavior) -> (Arc<LockDirectory>, Arc<BridgeExecutor>) {
    let gateway: Arc<dyn LockGateway> = Arc::new(HarnessGateway { behavior });
    let directory = Arc::new(LockDirectory::new(gateway.clone()));
    let executor = Arc::new(BridgeExecutor::new(gateway));
    (directory, executor)
}
