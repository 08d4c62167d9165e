//! BTCPay payment processor adapter - `InvoiceSource` implementation.

mod client;
mod dto;

pub use client::{BtcPayClient, BtcPayClientFactory, BtcPayConfig};
