//! Bridge command cycle.
//!
//! Submits a command as a job, waits a fixed initial delay for the bridge to
//! reach the lock over radio, then polls at a fixed interval until the job
//! reports a terminal status or the attempt budget runs out. No backoff, no
//! jitter, no cancellation: the bridge finishes most commands within the
//! initial delay and the rest within a few polls.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::lock::{BridgeCommand, BridgeResponse, LockError};
use crate::ports::LockGateway;

/// Fixed timing of the poll loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSchedule {
    /// Wait before the first poll.
    pub initial_delay: Duration,
    /// Wait after each non-terminal poll.
    pub poll_interval: Duration,
    /// Maximum number of polls before giving up.
    pub max_attempts: u32,
}

impl Default for PollSchedule {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_secs(7),
            poll_interval: Duration::from_secs(2),
            max_attempts: 10,
        }
    }
}

/// Runs bridge commands to completion over a [`LockGateway`].
pub struct BridgeExecutor {
    gateway: Arc<dyn LockGateway>,
    schedule: PollSchedule,
}

impl BridgeExecutor {
    pub fn new(gateway: Arc<dyn LockGateway>) -> Self {
        Self {
            gateway,
            schedule: PollSchedule::default(),
        }
    }

    /// Override the poll timing (for tests).
    pub fn with_schedule(mut self, schedule: PollSchedule) -> Self {
        self.schedule = schedule;
        self
    }

    /// Submit a command and wait for its terminal response.
    ///
    /// Returns the terminal [`BridgeResponse`] whether the job succeeded or
    /// failed on the lock; callers decide what a `Failed` status means for
    /// their operation. Errors with [`LockError::Timeout`] when the job
    /// never leaves a non-terminal status within the attempt budget.
    pub async fn execute(&self, command: BridgeCommand) -> Result<BridgeResponse, LockError> {
        let operation = command.command.operation();
        let job = self.gateway.submit_command(&command).await?;

        tracing::debug!(job_id = %job.id, operation, "Bridge job submitted, waiting for result");
        tokio::time::sleep(self.schedule.initial_delay).await;

        for attempt in 1..=self.schedule.max_attempts {
            let response = self.gateway.poll_job(&job).await?;

            if response.status.is_terminal() {
                tracing::debug!(
                    job_id = %job.id,
                    operation,
                    status = %response.status,
                    attempt,
                    "Bridge job finished"
                );
                return Ok(response);
            }

            tokio::time::sleep(self.schedule.poll_interval).await;
        }

        tracing::warn!(job_id = %job.id, operation, "Bridge job never reached a terminal status");
        Err(LockError::timeout(job.id))
    }
}
