//! Lock-side error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | NotFound | 404 |
//! | MissingSerialNumber | 404 |
//! | BridgeNotFound | 404 |
//! | Timeout | 504 |
//! | AuthenticationFailed | 500 |
//! | CommandFailed | 500 |
//! | InvalidPayload | 500 |
//! | Upstream | 500 |

/// Errors raised while resolving or operating a lock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LockError {
    /// No lock with this name exists on the account.
    NotFound(String),

    /// The lock has no radio-module serial number and cannot be addressed.
    MissingSerialNumber(String),

    /// No bridge is paired with the lock.
    BridgeNotFound(String),

    /// The bridge job never reached a terminal status.
    Timeout { job_id: String },

    /// Token exchange or refresh against the lock cloud failed.
    AuthenticationFailed(String),

    /// The bridge reported a terminal status other than success.
    CommandFailed { operation: String, status: String },

    /// The bridge result payload did not match the operation's shape.
    InvalidPayload(String),

    /// The lock cloud or bridge service returned an unexpected response.
    Upstream(String),
}

impl LockError {
    pub fn not_found(name: impl Into<String>) -> Self {
        LockError::NotFound(name.into())
    }

    pub fn missing_serial_number(name: impl Into<String>) -> Self {
        LockError::MissingSerialNumber(name.into())
    }

    pub fn bridge_not_found(name: impl Into<String>) -> Self {
        LockError::BridgeNotFound(name.into())
    }

    pub fn timeout(job_id: impl Into<String>) -> Self {
        LockError::Timeout {
            job_id: job_id.into(),
        }
    }

    pub fn authentication_failed(message: impl Into<String>) -> Self {
        LockError::AuthenticationFailed(message.into())
    }

    pub fn command_failed(operation: impl Into<String>, status: impl Into<String>) -> Self {
        LockError::CommandFailed {
            operation: operation.into(),
            status: status.into(),
        }
    }

    pub fn invalid_payload(message: impl Into<String>) -> Self {
        LockError::InvalidPayload(message.into())
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        LockError::Upstream(message.into())
    }

    /// Returns a user-facing error message.
    pub fn message(&self) -> String {
        match self {
            LockError::NotFound(name) => format!("Lock \"{}\" not found", name),
            LockError::MissingSerialNumber(name) => {
                format!("Lock \"{}\" does not have a serial number", name)
            }
            LockError::BridgeNotFound(name) => {
                format!("No bridge found paired with lock \"{}\"", name)
            }
            LockError::Timeout { job_id } => {
                format!("Bridge command timeout (job {})", job_id)
            }
            LockError::AuthenticationFailed(msg) => {
                format!("Lock cloud authentication failed: {}", msg)
            }
            LockError::CommandFailed { operation, status } => {
                format!("Operation {} finished with status {}", operation, status)
            }
            LockError::InvalidPayload(msg) => format!("Invalid bridge payload: {}", msg),
            LockError::Upstream(msg) => format!("Lock cloud error: {}", msg),
        }
    }
}

impl std::fmt::Display for LockError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for LockError {}
