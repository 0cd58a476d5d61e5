// Constants for the interpreter

/// Initial tape length in cells
pub const INITIAL_TAPE_LEN: usize = 30_000;

/// Default memory budget for the snapshot history (256 MB)
pub const DEFAULT_SNAPSHOT_LIMIT: usize = 256 * 1024 * 1024;
