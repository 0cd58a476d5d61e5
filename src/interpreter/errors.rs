//! Error types for validation and execution
//!
//! - [`ValidationError`]: structural problems found before execution starts
//! - [`RuntimeError`]: fatal conditions raised while the program runs
//! - [`Error`]: either of the above, returned by the one-shot [`crate::execute`]
//!
//! All errors are fatal. The engine never retries or recovers mid-loop; any
//! output produced before a [`RuntimeError`] stays valid and can still be
//! flushed by the caller.

use std::fmt;
use std::io;
use thiserror::Error;

/// Bracket balance errors reported by the validator
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A `]` appeared with no pending `[`
    #[error("Unmatched ']' at position {position}")]
    UnmatchedClose { position: usize },

    /// Scan finished with `[` still open; `position` is the innermost one
    #[error("Unmatched '[' at position {position} ({count} more '[' than ']')")]
    UnmatchedOpen { count: usize, position: usize },
}

impl ValidationError {
    /// Source position the error points at
    pub fn position(&self) -> usize {
        match self {
            ValidationError::UnmatchedClose { position } => *position,
            ValidationError::UnmatchedOpen { position, .. } => *position,
        }
    }
}

/// Memory region whose growth failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Tape,
    Output,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resource::Tape => write!(f, "tape"),
            Resource::Output => write!(f, "output buffer"),
        }
    }
}

/// Errors that can occur during execution
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// `<` executed with the cursor at cell 0
    #[error("Cursor moved left of cell 0 at position {position}")]
    CursorUnderflow { position: usize },

    /// Tape or output growth could not obtain memory (or hit its configured cap)
    #[error("Out of memory: could not grow {resource} to {requested} bytes")]
    ResourceExhausted { resource: Resource, requested: usize },

    /// Reading from the input source failed (end of input is not an error)
    #[error("Input read failed at position {position}: {source}")]
    InputFailed {
        position: usize,
        #[source]
        source: io::Error,
    },

    /// The diagnostic trace writer failed
    #[error("Trace output failed: {source}")]
    TraceWriteFailed {
        #[source]
        source: io::Error,
    },

    /// A caller cancelled the run through its cancel token
    #[error("Execution cancelled after {steps} steps")]
    Cancelled { steps: u64 },

    /// The configured step limit was reached
    #[error("Step limit of {limit} exceeded")]
    StepLimitExceeded { limit: u64 },

    /// Snapshot history limit exceeded
    #[error("Snapshot memory limit exceeded: {current} bytes used, limit is {limit}")]
    SnapshotLimitExceeded { current: usize, limit: usize },

    /// History navigation went past either end
    #[error("{message}")]
    HistoryUnavailable { message: String },
}

impl RuntimeError {
    /// Source position the error is attributed to, if any
    pub fn position(&self) -> Option<usize> {
        match self {
            RuntimeError::CursorUnderflow { position } => Some(*position),
            RuntimeError::InputFailed { position, .. } => Some(*position),
            RuntimeError::ResourceExhausted { .. }
            | RuntimeError::TraceWriteFailed { .. }
            | RuntimeError::Cancelled { .. }
            | RuntimeError::StepLimitExceeded { .. }
            | RuntimeError::SnapshotLimitExceeded { .. }
            | RuntimeError::HistoryUnavailable { .. } => None,
        }
    }
}

/// Any failure of a complete validate-and-run cycle
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}
