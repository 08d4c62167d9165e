//! Wire types for the lock cloud and bridge services.

use serde::{Deserialize, Serialize};

use crate::domain::lock::{BridgeCommand, BridgeJob, BridgeResponse, BridgeStatus};

/// OAuth2 token endpoint response.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[allow(dead_code)]
    pub token_type: String,
    #[allow(dead_code)]
    pub expires_in: u64,
    #[allow(dead_code)]
    pub refresh_token: String,
}

/// Bridge execute request body.
#[derive(Debug, Clone, Serialize)]
pub struct ExecuteRequest {
    pub device: String,
    pub operation: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub arguments: Vec<String>,
}

impl From<&BridgeCommand> for ExecuteRequest {
    fn from(command: &BridgeCommand) -> Self {
        Self {
            device: command.device.clone(),
            operation: command.command.operation().to_string(),
            arguments: command.command.arguments(),
        }
    }
}

/// Bridge execute response: the job handle.
#[derive(Debug, Clone, Deserialize)]
pub struct ExecuteResponse {
    pub id: String,
}

impl From<ExecuteResponse> for BridgeJob {
    fn from(response: ExecuteResponse) -> Self {
        BridgeJob { id: response.id }
    }
}

/// Bridge poll request body.
#[derive(Debug, Clone, Serialize)]
pub struct PollRequest {
    pub id: String,
}

/// Bridge poll response.
#[derive(Debug, Clone, Deserialize)]
pub struct PollResponse {
    pub id: String,
    pub status: String,
    #[serde(default)]
    pub result: Option<serde_json::Value>,
}

impl From<PollResponse> for BridgeResponse {
    fn from(response: PollResponse) -> Self {
        BridgeResponse {
            id: response.id,
            status: BridgeStatus::parse(&response.status),
            result: response.result,
        }
    }
}
