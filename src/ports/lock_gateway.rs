//! Lock gateway port for the smart-lock cloud API.
//!
//! Defines the contract for lock cloud integrations: account inventory,
//! paired-device lookup, and the bridge execute/poll pair. Implementations
//! own authentication; callers never see tokens.

use async_trait::async_trait;

use crate::domain::lock::{
    BridgeCommand, BridgeJob, BridgeResponse, Lock, LockError, PairedDevice,
};

/// Port for smart-lock cloud integrations.
#[async_trait]
pub trait LockGateway: Send + Sync {
    /// List all locks registered on the account.
    async fn list_locks(&self) -> Result<Vec<Lock>, GatewayError>;

    /// List devices paired with the lock identified by `serial_number`.
    async fn paired_devices(&self, serial_number: &str)
        -> Result<Vec<PairedDevice>, GatewayError>;

    /// Submit a command to the bridge execute endpoint.
    ///
    /// Returns the job handle to poll. Submission does not wait for the
    /// command to run on the lock.
    async fn submit_command(&self, command: &BridgeCommand) -> Result<BridgeJob, GatewayError>;

    /// Poll a previously submitted job once.
    async fn poll_job(&self, job: &BridgeJob) -> Result<BridgeResponse, GatewayError>;
}

/// Errors from lock gateway operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayError {
    pub code: GatewayErrorCode,
    pub message: String,
}

/// Gateway error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayErrorCode {
    /// Token exchange failed, or a request stayed unauthorized after the
    /// single re-authentication retry.
    AuthenticationFailed,

    /// Network connectivity issue.
    NetworkError,

    /// Upstream returned a non-2xx status.
    UpstreamStatus,

    /// Upstream response body did not parse.
    InvalidResponse,
}

impl GatewayError {
    pub fn new(code: GatewayErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(GatewayErrorCode::AuthenticationFailed, message)
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(GatewayErrorCode::NetworkError, message)
    }

    pub fn upstream(status: u16, context: impl std::fmt::Display) -> Self {
        Self::new(
            GatewayErrorCode::UpstreamStatus,
            format!("{} (status {})", context, status),
        )
    }

    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::new(GatewayErrorCode::InvalidResponse, message)
    }
}

impl std::fmt::Display for GatewayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for GatewayError {}

impl From<GatewayError> for LockError {
    fn from(err: GatewayError) -> Self {
        match err.code {
            GatewayErrorCode::AuthenticationFailed => {
                LockError::AuthenticationFailed(err.message)
            }
            GatewayErrorCode::InvalidResponse => LockError::InvalidPayload(err.message),
            GatewayErrorCode::NetworkError | GatewayErrorCode::UpstreamStatus => {
                LockError::Upstream(err.message)
            }
        }
    }
}
