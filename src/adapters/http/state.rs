//! Shared application state for the HTTP layer.

use std::sync::Arc;

use crate::application::handlers::lock::{
    GetBatteryLevelHandler, GetLockStateHandler, ListLocksHandler, OperateLockHandler,
};
use crate::application::handlers::membership::{
    CheckMembershipHandler, UnlockForMemberHandler, ValidateInvoiceHandler,
};
use crate::application::{BridgeExecutor, LockDirectory};
use crate::domain::membership::MetadataFilter;
use crate::ports::{InvoiceSource, InvoiceSourceFactory, LockGateway};

/// Shared application state containing all dependencies.
///
/// This struct is cloned for each request and contains Arc-wrapped
/// dependencies for efficient sharing across handlers.
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<dyn LockGateway>,
    pub directory: Arc<LockDirectory>,
    pub executor: Arc<BridgeExecutor>,
    pub invoice_sources: Arc<dyn InvoiceSourceFactory>,
    /// Metadata filter marking invoices as membership payments.
    pub membership_filter: MetadataFilter,
}

impl AppState {
    /// Wire the default directory and executor over a gateway.
    pub fn new(
        gateway: Arc<dyn LockGateway>,
        invoice_sources: Arc<dyn InvoiceSourceFactory>,
        membership_filter: MetadataFilter,
    ) -> Self {
        let directory = Arc::new(LockDirectory::new(gateway.clone()));
        let executor = Arc::new(BridgeExecutor::new(gateway.clone()));
        Self {
            gateway,
            directory,
            executor,
            invoice_sources,
            membership_filter,
        }
    }

    /// Create handlers on demand from the shared state.
    pub fn list_locks_handler(&self) -> ListLocksHandler {
        ListLocksHandler::new(self.gateway.clone())
    }

    pub fn get_lock_state_handler(&self) -> GetLockStateHandler {
        GetLockStateHandler::new(self.directory.clone(), self.executor.clone())
    }

    pub fn operate_lock_handler(&self) -> OperateLockHandler {
        OperateLockHandler::new(self.directory.clone(), self.executor.clone())
    }

    pub fn get_battery_level_handler(&self) -> GetBatteryLevelHandler {
        GetBatteryLevelHandler::new(self.directory.clone(), self.executor.clone())
    }

    pub fn check_membership_handler(
        &self,
        source: Arc<dyn InvoiceSource>,
    ) -> CheckMembershipHandler {
        CheckMembershipHandler::new(source)
    }

    pub fn validate_invoice_handler(
        &self,
        source: Arc<dyn InvoiceSource>,
    ) -> ValidateInvoiceHandler {
        ValidateInvoiceHandler::new(source)
    }

    pub fn unlock_for_member_handler(
        &self,
        source: Arc<dyn InvoiceSource>,
    ) -> UnlockForMemberHandler {
        UnlockForMemberHandler::new(self.directory.clone(), self.executor.clone(), source)
    }
}
