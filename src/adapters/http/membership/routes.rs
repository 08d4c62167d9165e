//! Axum router configuration for membership endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::super::state::AppState;
use super::handlers::{membership_status, unlock_member, validate_invoice};

/// Create the membership API router.
///
/// # Routes (all require the `x-btcpay-api-key` header)
///
/// - `GET  /{lock_name}/unlock-member` - Membership status without unlocking
/// - `POST /{lock_name}/unlock-member` - Unlock gated on membership
/// - `POST /membership/validate-invoice` - Validate one invoice as proof
pub fn membership_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/:lock_name/unlock-member",
            get(membership_status).post(unlock_member),
        )
        .route("/membership/validate-invoice", post(validate_invoice))
}
