//! UnlockForMemberHandler - Command handler for membership-gated unlocks.
//!
//! A caller may present a specific invoice id as proof; if that invoice does
//! not hold up, the handler falls back to scanning recent invoices rather
//! than failing fast. Only when no proof exists at all does the gate refuse,
//! and the unlock command is never submitted.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::application::handlers::lock::{OperateLockCommand, OperateLockHandler};
use crate::application::{BridgeExecutor, LockDirectory};
use crate::domain::lock::{OperateAction, OperatePayload};
use crate::domain::membership::{
    validate_invoice, InvoiceVerdict, MembershipError, MetadataFilter,
};
use crate::ports::InvoiceSource;

use super::check_membership::{CheckMembershipHandler, CheckMembershipQuery};

/// Command to unlock a lock for a paying member.
#[derive(Debug, Clone)]
pub struct UnlockForMemberCommand {
    pub lock_name: String,
    /// Specific invoice presented as proof, if any.
    pub invoice_id: Option<String>,
    /// Metadata filter for the fallback membership scan.
    pub filter: MetadataFilter,
}

/// Proof of membership attached to a successful unlock.
#[derive(Debug, Clone)]
pub struct MembershipProof {
    pub invoice_id: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
}

/// Result of a successful member unlock.
#[derive(Debug, Clone)]
pub struct UnlockForMemberResult {
    pub lock_name: String,
    pub payload: OperatePayload,
    pub proof: MembershipProof,
}

/// Handler gating unlock commands on membership.
pub struct UnlockForMemberHandler {
    directory: Arc<LockDirectory>,
    executor: Arc<BridgeExecutor>,
    source: Arc<dyn InvoiceSource>,
}

impl UnlockForMemberHandler {
    pub fn new(
        directory: Arc<LockDirectory>,
        executor: Arc<BridgeExecutor>,
        source: Arc<dyn InvoiceSource>,
    ) -> Self {
        Self {
            directory,
            executor,
            source,
        }
    }

    pub async fn handle(
        &self,
        command: UnlockForMemberCommand,
    ) -> Result<UnlockForMemberResult, MembershipError> {
        let proof = self.establish_proof(&command).await?;

        tracing::info!(
            lock_name = %command.lock_name,
            invoice_id = proof.invoice_id.as_deref().unwrap_or("-"),
            "Membership verified, unlocking"
        );

        let operate = OperateLockHandler::new(self.directory.clone(), self.executor.clone());
        let result = operate
            .handle(OperateLockCommand {
                lock_name: command.lock_name,
                action: OperateAction::Unlock,
            })
            .await?;

        Ok(UnlockForMemberResult {
            lock_name: result.lock_name,
            payload: result.payload,
            proof,
        })
    }

    async fn establish_proof(
        &self,
        command: &UnlockForMemberCommand,
    ) -> Result<MembershipProof, MembershipError> {
        if let Some(invoice_id) = &command.invoice_id {
            match self.source.invoice_by_id(invoice_id).await {
                Ok(invoice) => {
                    if let InvoiceVerdict::Valid { expires_at } =
                        validate_invoice(&invoice, Utc::now())
                    {
                        return Ok(MembershipProof {
                            invoice_id: Some(invoice.id),
                            expires_at: Some(expires_at),
                        });
                    }
                    tracing::debug!(
                        invoice_id = %invoice_id,
                        "Presented invoice rejected, scanning instead"
                    );
                }
                Err(e) => {
                    tracing::warn!(
                        invoice_id = %invoice_id,
                        error = %e,
                        "Failed to verify presented invoice"
                    );
                }
            }
        }

        let check = CheckMembershipHandler::new(self.source.clone());
        let status = check
            .handle(CheckMembershipQuery {
                filter: command.filter.clone(),
            })
            .await?;

        if !status.is_valid {
            return Err(MembershipError::not_valid(status.invoice_count));
        }

        Ok(MembershipProof {
            invoice_id: status.most_recent_invoice.map(|inv| inv.id),
            expires_at: status.expires_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::lock::testing::{harness, HarnessBehavior};
    use crate::application::handlers::membership::testing::{
        membership_invoice, unpaid_invoice, MockInvoiceSource,
    };
    use crate::domain::lock::{BridgeStatus, LockError};
    use serde_json::json;

    fn operate_result() -> serde_json::Value {
        json!({
            "afi_status": 0,
            "afi_status_text": "ok",
            "dmi_status": 0,
            "dmi_status_text": "ok"
        })
    }

    fn filter() -> MetadataFilter {
        MetadataFilter::single("type", "membership")
    }

    fn command(invoice_id: Option<&str>) -> UnlockForMemberCommand {
        UnlockForMemberCommand {
            lock_name: "Front Door".to_string(),
            invoice_id: invoice_id.map(str::to_string),
            filter: filter(),
        }
    }

    fn handler_with(source: Arc<MockInvoiceSource>) -> UnlockForMemberHandler {
        let (directory, executor) = harness(HarnessBehavior {
            result: Some(operate_result()),
            ..HarnessBehavior::default()
        });
        UnlockForMemberHandler::new(directory, executor, source)
    }

    #[tokio::test(start_paused = true)]
    async fn refuses_without_any_valid_invoice() {
        let handler = handler_with(Arc::new(MockInvoiceSource::with_invoices(vec![])));

        let err = handler.handle(command(None)).await.unwrap_err();
        assert!(matches!(err, MembershipError::NotValid { invoice_count: 0 }));
    }

    #[tokio::test(start_paused = true)]
    async fn unlocks_with_valid_membership_scan() {
        let handler = handler_with(Arc::new(MockInvoiceSource::with_invoices(vec![
            membership_invoice("inv-1", 5),
        ])));

        let result = handler.handle(command(None)).await.unwrap();
        assert_eq!(result.proof.invoice_id.as_deref(), Some("inv-1"));
        assert!(result.proof.expires_at.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn presented_valid_invoice_short_circuits_the_scan() {
        let source = Arc::new(MockInvoiceSource::with_invoices(vec![membership_invoice(
            "inv-9", 2,
        )]));
        let handler = handler_with(source.clone());

        let result = handler.handle(command(Some("inv-9"))).await.unwrap();
        assert_eq!(result.proof.invoice_id.as_deref(), Some("inv-9"));
        // The fallback scan never ran.
        assert!(source.last_query().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn rejected_presented_invoice_falls_back_to_scan() {
        let source = Arc::new(MockInvoiceSource::with_invoices(vec![
            unpaid_invoice("inv-bad"),
            membership_invoice("inv-good", 4),
        ]));
        let handler = handler_with(source.clone());

        let result = handler.handle(command(Some("inv-bad"))).await.unwrap();
        assert_eq!(result.proof.invoice_id.as_deref(), Some("inv-good"));
        assert!(source.last_query().is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn unknown_presented_invoice_falls_back_to_scan() {
        let source = Arc::new(MockInvoiceSource::with_invoices(vec![membership_invoice(
            "inv-good", 4,
        )]));
        let handler = handler_with(source);

        let result = handler.handle(command(Some("missing"))).await.unwrap();
        assert_eq!(result.proof.invoice_id.as_deref(), Some("inv-good"));
    }

    #[tokio::test(start_paused = true)]
    async fn failed_unlock_surfaces_lock_error() {
        let (directory, executor) = harness(HarnessBehavior {
            terminal_status: BridgeStatus::Failed,
            ..HarnessBehavior::default()
        });
        let source = Arc::new(MockInvoiceSource::with_invoices(vec![membership_invoice(
            "inv-1", 5,
        )]));
        let handler = UnlockForMemberHandler::new(directory, executor, source);

        let err = handler.handle(command(None)).await.unwrap_err();
        assert!(matches!(
            err,
            MembershipError::Lock(LockError::CommandFailed { .. })
        ));
    }
}
