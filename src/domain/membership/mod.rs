//! Membership domain: invoices and the derived membership status.

mod errors;
mod evaluation;
mod invoice;

pub use errors::MembershipError;
pub use evaluation::{
    evaluate, validate_invoice, InvoiceVerdict, MembershipStatus, MetadataFilter,
};
pub use invoice::{Invoice, InvoiceStatus, MEMBERSHIP_WINDOW_DAYS};
