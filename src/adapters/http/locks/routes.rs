//! Axum router configuration for lock endpoints.

use axum::{routing::get, Router};

use super::super::state::AppState;
use super::handlers::{battery_level, get_lock_state, list_locks, lock, unlock};

/// Create the lock API router.
///
/// # Routes
///
/// - `GET /locks` - List all locks on the account
/// - `GET /{lock_name}/get-state` - Read bolt state
/// - `GET /{lock_name}/lock` - Throw the bolt
/// - `GET /{lock_name}/unlock` - Retract the bolt (no membership gate)
/// - `GET /{lock_name}/battery-level` - Read battery information
pub fn locks_routes() -> Router<AppState> {
    Router::new()
        .route("/locks", get(list_locks))
        .route("/:lock_name/get-state", get(get_lock_state))
        .route("/:lock_name/lock", get(lock))
        .route("/:lock_name/unlock", get(unlock))
        .route("/:lock_name/battery-level", get(battery_level))
}
