//! GetLockStateHandler - Query handler for reading bolt state.

use std::sync::Arc;

use crate::application::{BridgeExecutor, LockDirectory};
use crate::domain::lock::{
    BridgeCommand, BridgeStatus, LockCommand, LockError, LockStatePayload,
};

/// Query to read the state of a named lock.
#[derive(Debug, Clone)]
pub struct GetLockStateQuery {
    pub lock_name: String,
}

/// Result of a successful state read.
#[derive(Debug, Clone)]
pub struct GetLockStateResult {
    pub lock_name: String,
    pub payload: LockStatePayload,
}

/// Handler for reading lock state through the bridge.
pub struct GetLockStateHandler {
    directory: Arc<LockDirectory>,
    executor: Arc<BridgeExecutor>,
}

impl GetLockStateHandler {
    pub fn new(directory: Arc<LockDirectory>, executor: Arc<BridgeExecutor>) -> Self {
        Self {
            directory,
            executor,
        }
    }

    pub async fn handle(&self, query: GetLockStateQuery) -> Result<GetLockStateResult, LockError> {
        let serial = self.directory.serial_number(&query.lock_name).await?;
        let command = BridgeCommand::new(serial, LockCommand::GetState);
        let operation = command.command.operation();

        let response = self.executor.execute(command).await?;
        if response.status != BridgeStatus::Succeeded {
            return Err(LockError::command_failed(operation, response.status.as_str()));
        }

        let payload = response
            .payload::<LockStatePayload>()
            .map_err(LockError::invalid_payload)?;

        Ok(GetLockStateResult {
            lock_name: query.lock_name,
            payload,
        })
    }
}
