/// Check command handler
pub mod check;

/// Plan (dry-run) command handler
pub mod plan;

/// Sync command handler
pub mod sync;

/// Version command handler
pub mod version;
