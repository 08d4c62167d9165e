//! Latchkey - members' door-access service.
//!
//! Proxies a smart-lock cloud API (asynchronous bridge command protocol) and
//! a BTCPay-compatible payment processor, gating unlock operations on a
//! 30-day settled-invoice membership window.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
