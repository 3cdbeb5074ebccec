// Constants for the interpreter

/// Maximum number of instructions a batch run may execute before giving up.
/// Guards [`interpret`](crate::interpreter::engine::interpret) against programs that never halt.
pub const DEFAULT_STEP_LIMIT: usize = 10_000_000;

/// Default memory budget for the snapshot history (64 MB)
pub const DEFAULT_SNAPSHOT_LIMIT: usize = 64 * 1024 * 1024;
