//! Lock directory - name-keyed resolution of locks and their bridges.
//!
//! The account's lock inventory changes rarely, so resolutions are cached by
//! name for the process lifetime with no eviction. Concurrent callers may
//! both miss and populate an entry; the writes are idempotent, so last-write
//! wins is harmless.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::lock::{Lock, LockError, PairedDevice};
use crate::ports::LockGateway;

/// Resolves lock names to cloud records and bridge devices.
pub struct LockDirectory {
    gateway: Arc<dyn LockGateway>,
    locks: RwLock<HashMap<String, Lock>>,
    bridges: RwLock<HashMap<String, PairedDevice>>,
}

impl LockDirectory {
    pub fn new(gateway: Arc<dyn LockGateway>) -> Self {
        Self {
            gateway,
            locks: RwLock::new(HashMap::new()),
            bridges: RwLock::new(HashMap::new()),
        }
    }

    /// Resolve a lock by its human-assigned name.
    pub async fn lock_by_name(&self, lock_name: &str) -> Result<Lock, LockError> {
        if let Some(lock) = self.locks.read().await.get(lock_name) {
            return Ok(lock.clone());
        }

        let locks = self.gateway.list_locks().await?;
        let lock = locks
            .into_iter()
            .find(|l| l.name == lock_name)
            .ok_or_else(|| LockError::not_found(lock_name))?;

        self.locks
            .write()
            .await
            .insert(lock_name.to_string(), lock.clone());
        Ok(lock)
    }

    /// Resolve the radio-module serial number used to address a lock.
    pub async fn serial_number(&self, lock_name: &str) -> Result<String, LockError> {
        let lock = self.lock_by_name(lock_name).await?;
        lock.serial_number()
            .map(str::to_string)
            .ok_or_else(|| LockError::missing_serial_number(lock_name))
    }

    /// Resolve the bridge device paired with a lock.
    pub async fn bridge_for_lock(&self, lock_name: &str) -> Result<PairedDevice, LockError> {
        if let Some(bridge) = self.bridges.read().await.get(lock_name) {
            return Ok(bridge.clone());
        }

        let serial = self.serial_number(lock_name).await?;
        let devices = self.gateway.paired_devices(&serial).await?;
        let bridge = devices
            .into_iter()
            .find(PairedDevice::is_bridge)
            .ok_or_else(|| LockError::bridge_not_found(lock_name))?;

        self.bridges
            .write()
            .await
            .insert(lock_name.to_string(), bridge.clone());
        Ok(bridge)
    }
}
