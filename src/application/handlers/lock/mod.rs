//! Lock operation handlers.

mod get_battery_level;
mod get_lock_state;
mod list_locks;
mod operate_lock;

#[cfg(test)]
pub(crate) mod testing;

pub use get_battery_level::{GetBatteryLevelHandler, GetBatteryLevelQuery, GetBatteryLevelResult};
pub use get_lock_state::{GetLockStateHandler, GetLockStateQuery, GetLockStateResult};
pub use list_locks::ListLocksHandler;
pub use operate_lock::{OperateLockCommand, OperateLockHandler, OperateLockResult};
