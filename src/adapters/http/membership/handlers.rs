//! HTTP handlers for membership endpoints.
//!
//! Every membership endpoint requires the caller's payment API key in the
//! `x-btcpay-api-key` header; the key scopes a per-request invoice source
//! and is never persisted server-side.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use secrecy::SecretString;

use crate::application::handlers::membership::{
    CheckMembershipQuery, UnlockForMemberCommand, ValidateInvoiceQuery,
};
use crate::domain::membership::MembershipError;

use super::super::error::ErrorResponse;
use super::super::locks::handlers::lock_error_parts;
use super::super::state::AppState;
use super::dto::{
    MemberUnlockRequest, MemberUnlockResponse, MembershipLookupResponse,
    MembershipStatusResponse, ValidateInvoiceRequest, ValidateInvoiceResponse,
};

/// Header carrying the caller's payment API key.
pub const API_KEY_HEADER: &str = "x-btcpay-api-key";

// ════════════════════════════════════════════════════════════════════════════════
// API Key Extraction
// ════════════════════════════════════════════════════════════════════════════════

/// Caller's payment API key extracted from the request.
#[derive(Clone)]
pub struct BtcPayApiKey(pub SecretString);

/// Rejection type for BtcPayApiKey extraction.
pub struct ApiKeyRequired;

impl IntoResponse for ApiKeyRequired {
    fn into_response(self) -> axum::response::Response {
        let error = ErrorResponse::new("API_KEY_REQUIRED", "Payment API key required");
        (StatusCode::UNAUTHORIZED, Json(error)).into_response()
    }
}

impl<S> axum::extract::FromRequestParts<S> for BtcPayApiKey
where
    S: Send + Sync,
{
    type Rejection = ApiKeyRequired;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            let key = parts
                .headers
                .get(API_KEY_HEADER)
                .and_then(|v| v.to_str().ok())
                .filter(|v| !v.is_empty())
                .ok_or(ApiKeyRequired)?;

            Ok(BtcPayApiKey(SecretString::new(key.to_string())))
        })
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/v1/{lock_name}/unlock-member - Membership status without unlocking
pub async fn membership_status(
    State(state): State<AppState>,
    Path(lock_name): Path<String>,
    api_key: BtcPayApiKey,
) -> Result<impl IntoResponse, MembershipApiError> {
    let source = state.invoice_sources.with_api_key(api_key.0);
    let status = state
        .check_membership_handler(source)
        .handle(CheckMembershipQuery {
            filter: state.membership_filter.clone(),
        })
        .await?;

    Ok(Json(MembershipLookupResponse {
        lock_name,
        membership: MembershipStatusResponse::from(status),
    }))
}

/// POST /api/v1/{lock_name}/unlock-member - Unlock gated on membership
pub async fn unlock_member(
    State(state): State<AppState>,
    Path(lock_name): Path<String>,
    api_key: BtcPayApiKey,
    body: Option<Json<MemberUnlockRequest>>,
) -> Result<impl IntoResponse, MembershipApiError> {
    let request = body.map(|Json(r)| r).unwrap_or_default();
    let source = state.invoice_sources.with_api_key(api_key.0);

    let result = state
        .unlock_for_member_handler(source)
        .handle(UnlockForMemberCommand {
            lock_name,
            invoice_id: request.invoice_id,
            filter: state.membership_filter.clone(),
        })
        .await?;

    Ok(Json(MemberUnlockResponse::from(result)))
}

/// POST /api/v1/membership/validate-invoice - Validate one invoice as proof
pub async fn validate_invoice(
    State(state): State<AppState>,
    api_key: BtcPayApiKey,
    Json(request): Json<ValidateInvoiceRequest>,
) -> Result<impl IntoResponse, MembershipApiError> {
    let source = state.invoice_sources.with_api_key(api_key.0);
    let result = state
        .validate_invoice_handler(source)
        .handle(ValidateInvoiceQuery {
            invoice_id: request.invoice_id,
        })
        .await?;

    Ok(Json(ValidateInvoiceResponse::from(result)))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts membership errors to HTTP responses.
pub struct MembershipApiError(pub MembershipError);

impl From<MembershipError> for MembershipApiError {
    fn from(err: MembershipError) -> Self {
        Self(err)
    }
}

impl IntoResponse for MembershipApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, error_code) = match &self.0 {
            MembershipError::ApiKeyMissing => (StatusCode::UNAUTHORIZED, "API_KEY_REQUIRED"),
            MembershipError::NotValid { .. } => (StatusCode::FORBIDDEN, "MEMBERSHIP_REQUIRED"),
            MembershipError::InvoiceNotFound(_) => (StatusCode::NOT_FOUND, "INVOICE_NOT_FOUND"),
            MembershipError::Upstream(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "PAYMENT_UPSTREAM_ERROR")
            }
            MembershipError::InvalidPayload(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INVALID_UPSTREAM_PAYLOAD")
            }
            MembershipError::Lock(inner) => lock_error_parts(inner),
        };

        if status.is_server_error() {
            tracing::error!(error = %self.0, "Membership request failed");
        }
        let body = ErrorResponse::new(error_code, self.0.message());
        (status, Json(body)).into_response()
    }
}
