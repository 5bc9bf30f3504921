//! Well-known stream and projection names.

/// Commands to check inventories arrive here.
pub const COMMAND_STREAM: &str = "command-ic";

/// Successful check results.
pub const RESULT_STREAM: &str = "ic";

/// Exceptions raised while checking.
pub const EXCEPTION_STREAM: &str = "exception-ic";

/// Projection holding per-inventory state.
pub const INVENTORY_STATE_PROJECTION: &str = "inventory-ic-state";
