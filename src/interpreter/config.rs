//! Execution configuration
//!
//! Everything the engine needs to know besides the program and its input is
//! passed in an [`ExecConfig`] at construction time. Nothing is read from the
//! process environment once execution starts.

use super::constants::{DEFAULT_SNAPSHOT_LIMIT, INITIAL_TAPE_LEN};
use clap::ValueEnum;

/// How the engine walks the program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ExecutionMode {
    /// One dispatch per source command, jumps through the jump table
    Interpreted,
    /// One dispatch per run-length instruction
    #[default]
    Compiled,
}

/// What `,` does when the input source is exhausted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum EofPolicy {
    /// Leave the current cell as it is
    #[default]
    Unchanged,
    /// Store 0 in the current cell
    Zero,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecConfig {
    pub mode: ExecutionMode,
    pub eof_policy: EofPolicy,
    /// Tape length at start, in cells
    pub initial_tape_len: usize,
    /// Upper bound on tape growth (`None` = until allocation fails)
    pub max_tape_len: Option<usize>,
    /// Upper bound on output length (`None` = until allocation fails)
    pub max_output_len: Option<usize>,
    /// Stop with an error after this many executed instructions
    pub step_limit: Option<u64>,
    /// Record a snapshot after every instruction
    pub record_history: bool,
    /// Memory budget for recorded snapshots, in bytes
    pub snapshot_limit: usize,
}

impl Default for ExecConfig {
    fn default() -> Self {
        ExecConfig {
            mode: ExecutionMode::default(),
            eof_policy: EofPolicy::default(),
            initial_tape_len: INITIAL_TAPE_LEN,
            max_tape_len: None,
            max_output_len: None,
            step_limit: None,
            record_history: false,
            snapshot_limit: DEFAULT_SNAPSHOT_LIMIT,
        }
    }
}

impl ExecConfig {
    pub fn with_mode(mut self, mode: ExecutionMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_eof_policy(mut self, eof_policy: EofPolicy) -> Self {
        self.eof_policy = eof_policy;
        self
    }

    pub fn with_history(mut self, snapshot_limit: usize) -> Self {
        self.record_history = true;
        self.snapshot_limit = snapshot_limit;
        self
    }
}
