//! Lock and paired-device records sourced from the lock cloud API.

use serde::{Deserialize, Serialize};

/// Paired device type identifying a V3 bridge.
pub const BRIDGE_DEVICE_TYPE: &str = "danabridgev3";

/// A lock registered on the cloud account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lock {
    /// Cloud identifier.
    pub id: String,

    /// Human-assigned name; the internal API addresses locks by this.
    pub name: String,

    /// Vendor device type string.
    #[serde(rename = "type")]
    pub kind: String,

    /// Bluetooth address.
    pub address: String,

    /// IANA timezone of the installation.
    pub timezone: String,

    /// Radio module details; absent on some legacy devices.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub afi: Option<LockModule>,
}

/// Radio module (AFI) details of a lock.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LockModule {
    pub serial_number: String,
    pub device_type: String,
}

impl Lock {
    /// The module serial number used to address the lock on the bridge, if
    /// the lock has one.
    pub fn serial_number(&self) -> Option<&str> {
        self.afi.as_ref().map(|m| m.serial_number.as_str())
    }
}

/// A device paired with a lock (bridges, remotes, keypads).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairedDevice {
    /// Pairing relation type.
    #[serde(rename = "type")]
    pub kind: String,

    /// The paired device itself.
    pub device: DeviceInfo,
}

/// Device details within a pairing record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceInfo {
    pub serial_number: String,
    pub name: String,
    pub device_type: String,
    pub timezone: String,
}

impl PairedDevice {
    /// Whether this paired device is a bridge capable of relaying commands.
    pub fn is_bridge(&self) -> bool {
        self.device.device_type == BRIDGE_DEVICE_TYPE
    }
}
