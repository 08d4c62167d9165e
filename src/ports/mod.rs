//! Ports layer - contracts between the application core and adapters.

mod invoice_source;
mod lock_gateway;

pub use invoice_source::{
    InvoiceQuery, InvoiceSource, InvoiceSourceFactory, PaymentApiError, PaymentApiErrorCode,
};
pub use lock_gateway::{GatewayError, GatewayErrorCode, LockGateway};
