//! HTTP DTOs for the lock endpoints.
//!
//! Lock inventory responses reuse the domain [`Lock`] shape directly; the
//! operation responses flatten the bridge payloads down to the fields
//! callers act on.

use serde::Serialize;

use crate::application::handlers::lock::{
    GetBatteryLevelResult, GetLockStateResult, OperateLockResult,
};

/// Response for a state read.
#[derive(Debug, Clone, Serialize)]
pub struct LockStateResponse {
    pub lock_name: String,
    pub state: String,
    pub lock_status: String,
    pub is_blocked: bool,
    pub afi_status: i64,
    pub afi_status_text: String,
}

impl From<GetLockStateResult> for LockStateResponse {
    fn from(result: GetLockStateResult) -> Self {
        Self {
            lock_name: result.lock_name,
            state: result.payload.state,
            lock_status: result.payload.lock_status,
            is_blocked: result.payload.is_blocked,
            afi_status: result.payload.afi_status,
            afi_status_text: result.payload.afi_status_text,
        }
    }
}

/// Response for a lock/unlock command.
#[derive(Debug, Clone, Serialize)]
pub struct OperateResponse {
    pub success: bool,
    pub lock_name: String,
    pub operation: String,
    pub afi_status: i64,
    pub afi_status_text: String,
}

impl From<OperateLockResult> for OperateResponse {
    fn from(result: OperateLockResult) -> Self {
        Self {
            success: true,
            lock_name: result.lock_name,
            operation: result.action.as_str().to_string(),
            afi_status: result.payload.afi_status,
            afi_status_text: result.payload.afi_status_text,
        }
    }
}

/// Response for a battery read.
#[derive(Debug, Clone, Serialize)]
pub struct BatteryLevelResponse {
    pub lock_name: String,
    pub battery_level: i64,
    pub afi_status: i64,
    pub afi_status_text: String,
}

impl From<GetBatteryLevelResult> for BatteryLevelResponse {
    fn from(result: GetBatteryLevelResult) -> Self {
        Self {
            lock_name: result.lock_name,
            battery_level: result.payload.battery_level,
            afi_status: result.payload.afi_status,
            afi_status_text: result.payload.afi_status_text,
        }
    }
}
