//! GetBatteryLevelHandler - Query handler for reading battery information.

use std::sync::Arc;

use crate::application::{BridgeExecutor, LockDirectory};
use crate::domain::lock::{
    BatteryPayload, BridgeCommand, BridgeStatus, LockCommand, LockError,
};

/// Query to read the battery level of a named lock.
#[derive(Debug, Clone)]
pub struct GetBatteryLevelQuery {
    pub lock_name: String,
}

/// Result of a successful battery read.
#[derive(Debug, Clone)]
pub struct GetBatteryLevelResult {
    pub lock_name: String,
    pub payload: BatteryPayload,
}

/// Handler for reading battery information through the bridge.
pub struct GetBatteryLevelHandler {
    directory: Arc<LockDirectory>,
    executor: Arc<BridgeExecutor>,
}

impl GetBatteryLevelHandler {
    pub fn new(directory: Arc<LockDirectory>, executor: Arc<BridgeExecutor>) -> Self {
        Self {
            directory,
            executor,
        }
    }

    pub async fn handle(
        &self,
        query: GetBatteryLevelQuery,
    ) -> Result<GetBatteryLevelResult, LockError> {
        let serial = self.directory.serial_number(&query.lock_name).await?;
        let command = BridgeCommand::new(serial, LockCommand::BatteryLevel);
        let operation = command.command.operation();

        let response = self.executor.execute(command).await?;
        if response.status != BridgeStatus::Succeeded {
            return Err(LockError::command_failed(operation, response.status.as_str()));
        }

        let payload = response
            .payload::<BatteryPayload>()
            .map_err(LockError::invalid_payload)?;

        Ok(GetBatteryLevelResult {
            lock_name: query.lock_name,
            payload,
        })
    }
}
