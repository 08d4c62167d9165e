//! HTTP handlers for lock endpoints.
//!
//! These handlers connect Axum routes to application layer command/query
//! handlers and map lock errors to HTTP statuses.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::application::handlers::lock::{
    GetBatteryLevelQuery, GetLockStateQuery, OperateLockCommand,
};
use crate::domain::lock::{LockError, OperateAction};

use super::super::error::ErrorResponse;
use super::super::state::AppState;
use super::dto::{BatteryLevelResponse, LockStateResponse, OperateResponse};

/// GET /api/v1/locks - List all locks on the account
pub async fn list_locks(State(state): State<AppState>) -> Result<impl IntoResponse, LocksApiError> {
    let locks = state.list_locks_handler().handle().await?;
    Ok(Json(locks))
}

/// GET /api/v1/{lock_name}/get-state - Read bolt state
pub async fn get_lock_state(
    State(state): State<AppState>,
    Path(lock_name): Path<String>,
) -> Result<impl IntoResponse, LocksApiError> {
    let result = state
        .get_lock_state_handler()
        .handle(GetLockStateQuery { lock_name })
        .await?;
    Ok(Json(LockStateResponse::from(result)))
}

/// GET /api/v1/{lock_name}/lock - Throw the bolt
pub async fn lock(
    State(state): State<AppState>,
    Path(lock_name): Path<String>,
) -> Result<impl IntoResponse, LocksApiError> {
    operate(state, lock_name, OperateAction::Lock).await
}

/// GET /api/v1/{lock_name}/unlock - Retract the bolt (no membership gate)
pub async fn unlock(
    State(state): State<AppState>,
    Path(lock_name): Path<String>,
) -> Result<impl IntoResponse, LocksApiError> {
    operate(state, lock_name, OperateAction::Unlock).await
}

async fn operate(
    state: AppState,
    lock_name: String,
    action: OperateAction,
) -> Result<Json<OperateResponse>, LocksApiError> {
    let result = state
        .operate_lock_handler()
        .handle(OperateLockCommand { lock_name, action })
        .await?;
    Ok(Json(OperateResponse::from(result)))
}

/// GET /api/v1/{lock_name}/battery-level - Read battery information
pub async fn battery_level(
    State(state): State<AppState>,
    Path(lock_name): Path<String>,
) -> Result<impl IntoResponse, LocksApiError> {
    let result = state
        .get_battery_level_handler()
        .handle(GetBatteryLevelQuery { lock_name })
        .await?;
    Ok(Json(BatteryLevelResponse::from(result)))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts lock errors to HTTP responses.
pub struct LocksApiError(pub LockError);

impl From<LockError> for LocksApiError {
    fn from(err: LockError) -> Self {
        Self(err)
    }
}

/// Status and code for a lock error; shared with the membership module for
/// gated unlocks.
pub(crate) fn lock_error_parts(err: &LockError) -> (StatusCode, &'static str) {
    match err {
        LockError::NotFound(_) => (StatusCode::NOT_FOUND, "LOCK_NOT_FOUND"),
        LockError::MissingSerialNumber(_) => (StatusCode::NOT_FOUND, "LOCK_NOT_ADDRESSABLE"),
        LockError::BridgeNotFound(_) => (StatusCode::NOT_FOUND, "BRIDGE_NOT_FOUND"),
        LockError::Timeout { .. } => (StatusCode::GATEWAY_TIMEOUT, "BRIDGE_TIMEOUT"),
        LockError::AuthenticationFailed(_) => {
            (StatusCode::INTERNAL_SERVER_ERROR, "UPSTREAM_AUTH_FAILED")
        }
        LockError::CommandFailed { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "COMMAND_FAILED"),
        LockError::InvalidPayload(_) => {
            (StatusCode::INTERNAL_SERVER_ERROR, "INVALID_UPSTREAM_PAYLOAD")
        }
        LockError::Upstream(_) => (StatusCode::INTERNAL_SERVER_ERROR, "UPSTREAM_ERROR"),
    }
}

impl IntoResponse for LocksApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, error_code) = lock_error_parts(&self.0);
        if status.is_server_error() {
            tracing::error!(error = %self.0, "Lock request failed");
        }
        let body = ErrorResponse::new(error_code, self.0.message());
        (status, Json(body)).into_response()
    }
}
