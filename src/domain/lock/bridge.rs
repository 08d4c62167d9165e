//! Bridge command protocol types.
//!
//! Commands are submitted to the bridge execute endpoint as a job; the job is
//! then polled until it reports a terminal status. The result payload is
//! operation-specific and stays as raw JSON until the caller extracts the
//! typed payload for the operation it submitted.

use serde::{Deserialize, Serialize};

/// Operations the bridge can relay to a lock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LockCommand {
    /// Read bolt state (`afi.lock.get-state`).
    GetState,
    /// Throw or retract the bolt (`afi.lock.operate`).
    Operate(OperateAction),
    /// Read battery information (`afi.power-source.get-information2`).
    BatteryLevel,
}

impl LockCommand {
    /// Vendor operation name sent on the wire.
    pub fn operation(&self) -> &'static str {
        match self {
            LockCommand::GetState => "afi.lock.get-state",
            LockCommand::Operate(_) => "afi.lock.operate",
            LockCommand::BatteryLevel => "afi.power-source.get-information2",
        }
    }

    /// Operation arguments; empty for argument-less operations.
    pub fn arguments(&self) -> Vec<String> {
        match self {
            LockCommand::Operate(action) => vec![action.as_str().to_string()],
            _ => Vec::new(),
        }
    }
}

/// Direction of an operate command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperateAction {
    Lock,
    Unlock,
}

impl OperateAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperateAction::Lock => "lock",
            OperateAction::Unlock => "unlock",
        }
    }
}

/// A fully addressed command ready for submission.
#[derive(Debug, Clone)]
pub struct BridgeCommand {
    /// Serial number of the target lock module.
    pub device: String,
    pub command: LockCommand,
}

impl BridgeCommand {
    pub fn new(device: impl Into<String>, command: LockCommand) -> Self {
        Self {
            device: device.into(),
            command,
        }
    }
}

/// Handle for a submitted bridge job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeJob {
    pub id: String,
}

/// Job status reported by the poll endpoint.
///
/// Only `Succeeded` and `Failed` are terminal; `Pending` and any other vendor
/// string keep the poll loop running.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BridgeStatus {
    Pending,
    Succeeded,
    Failed,
    Other(String),
}

impl BridgeStatus {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "Pending" => BridgeStatus::Pending,
            "Succeeded" => BridgeStatus::Succeeded,
            "Failed" => BridgeStatus::Failed,
            other => BridgeStatus::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            BridgeStatus::Pending => "Pending",
            BridgeStatus::Succeeded => "Succeeded",
            BridgeStatus::Failed => "Failed",
            BridgeStatus::Other(s) => s,
        }
    }

    /// Whether polling should stop on this status.
    pub fn is_terminal(&self) -> bool {
        matches!(self, BridgeStatus::Succeeded | BridgeStatus::Failed)
    }
}

impl std::fmt::Display for BridgeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A poll response for a bridge job.
#[derive(Debug, Clone)]
pub struct BridgeResponse {
    pub id: String,
    pub status: BridgeStatus,
    /// Operation-specific payload; present once the job has run.
    pub result: Option<serde_json::Value>,
}

impl BridgeResponse {
    /// Extract the typed payload for the submitted operation.
    ///
    /// Fails when the result is missing or does not match the expected shape.
    pub fn payload<T: serde::de::DeserializeOwned>(&self) -> Result<T, String> {
        let value = self
            .result
            .clone()
            .ok_or_else(|| format!("job {} returned no result payload", self.id))?;
        serde_json::from_value(value).map_err(|e| format!("malformed result payload: {}", e))
    }
}

/// Result of `afi.lock.get-state`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LockStatePayload {
    pub state: String,
    pub lock_status: String,
    pub is_blocked: bool,
    pub afi_status: i64,
    pub afi_status_text: String,
    pub dmi_status: i64,
    pub dmi_status_text: String,
}

/// Result of `afi.lock.operate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperatePayload {
    pub afi_status: i64,
    pub afi_status_text: String,
    pub dmi_status: i64,
    pub dmi_status_text: String,
}

/// Result of `afi.power-source.get-information2`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatteryPayload {
    pub battery_level: i64,
    pub afi_status: i64,
    pub afi_status_text: String,
    pub dmi_status: i64,
    pub dmi_status_text: String,
}
