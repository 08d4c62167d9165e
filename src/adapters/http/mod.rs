//! HTTP adapters - the internal REST API.

pub mod error;
pub mod locks;
pub mod membership;
pub mod state;

pub use error::ErrorResponse;
pub use state::AppState;

use axum::Router;

/// The complete API router, mounted by `main` under `/api/v1`.
pub fn api_router() -> Router<AppState> {
    Router::new()
        .merge(locks::locks_routes())
        .merge(membership::membership_routes())
}
