//! ListLocksHandler - Query handler for the account's lock inventory.

use std::sync::Arc;

use crate::domain::lock::{Lock, LockError};
use crate::ports::LockGateway;

/// Handler for listing all locks on the account.
pub struct ListLocksHandler {
    gateway: Arc<dyn LockGateway>,
}

impl ListLocksHandler {
    pub fn new(gateway: Arc<dyn LockGateway>) -> Self {
        Self { gateway }
    }

    pub async fn handle(&self) -> Result<Vec<Lock>, LockError> {
        Ok(self.gateway.list_locks().await?)
    }
}
