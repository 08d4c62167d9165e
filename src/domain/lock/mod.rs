//! Lock domain: devices, the bridge command protocol, and lock errors.

mod bridge;
mod device;
mod errors;

pub use bridge::{
    BatteryPayload, BridgeCommand, BridgeJob, BridgeResponse, BridgeStatus, LockCommand,
    LockStatePayload, OperateAction, OperatePayload,
};
pub use device::{DeviceInfo, Lock, LockModule, PairedDevice, BRIDGE_DEVICE_TYPE};
pub use errors::LockError;
