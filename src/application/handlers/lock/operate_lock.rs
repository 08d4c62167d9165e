//! OperateLockHandler - Command handler for throwing or retracting the bolt.

use std::sync::Arc;

use crate::application::{BridgeExecutor, LockDirectory};
use crate::domain::lock::{
    BridgeCommand, BridgeStatus, LockCommand, LockError, OperateAction, OperatePayload,
};

/// Command to operate a named lock.
#[derive(Debug, Clone)]
pub struct OperateLockCommand {
    pub lock_name: String,
    pub action: OperateAction,
}

/// Result of a successful operate command.
#[derive(Debug, Clone)]
pub struct OperateLockResult {
    pub lock_name: String,
    pub action: OperateAction,
    pub payload: OperatePayload,
}

/// Handler for lock/unlock commands through the bridge.
pub struct OperateLockHandler {
    directory: Arc<LockDirectory>,
    executor: Arc<BridgeExecutor>,
}

impl OperateLockHandler {
    pub fn new(directory: Arc<LockDirectory>, executor: Arc<BridgeExecutor>) -> Self {
        Self {
            directory,
            executor,
        }
    }

    pub async fn handle(&self, command: OperateLockCommand) -> Result<OperateLockResult, LockError> {
        let serial = self.directory.serial_number(&command.lock_name).await?;
        let bridge_command = BridgeCommand::new(serial, LockCommand::Operate(command.action));
        let operation = bridge_command.command.operation();

        tracing::info!(
            lock_name = %command.lock_name,
            action = command.action.as_str(),
            "Operating lock"
        );

        let response = self.executor.execute(bridge_command).await?;
        if response.status != BridgeStatus::Succeeded {
            return Err(LockError::command_failed(operation, response.status.as_str()));
        }

        let payload = response
            .payload::<OperatePayload>()
            .map_err(LockError::invalid_payload)?;

        Ok(OperateLockResult {
            lock_name: command.lock_name,
            action: command.action,
            payload,
        })
    }
}
