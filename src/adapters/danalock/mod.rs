//! Danalock cloud adapter - `LockGateway` implementation.

mod client;
mod dto;

pub use client::{DanalockClient, DanalockConfig};
