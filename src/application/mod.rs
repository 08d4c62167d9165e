//! Application layer - services and handlers orchestrating the ports.

mod bridge;
mod directory;
pub mod handlers;

pub use bridge::{BridgeExecutor, PollSchedule};
pub use directory::LockDirectory;
