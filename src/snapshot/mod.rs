// Snapshot management for step-through history and tracing

use crate::interpreter::errors::RuntimeError;
use crate::parser::program::Command;
use std::fmt::Write as _;

/// State after one executed instruction
///
/// Only non-zero cells are stored. Output is append-only, so a snapshot keeps
/// just the output length; the bytes themselves are a prefix of the final output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub step: u64,
    /// Source position of the instruction just executed (`None` before the first one)
    pub position: Option<usize>,
    pub command: Option<Command>,
    pub cursor: usize,
    pub tape_len: usize,
    pub cells: Vec<(usize, u8)>, // (index, value), sorted by index
    pub output_len: usize,
}

impl Snapshot {
    /// Estimate the memory usage of this snapshot in bytes
    pub fn estimated_size(&self) -> usize {
        std::mem::size_of::<Snapshot>() + self.cells.len() * std::mem::size_of::<(usize, u8)>()
    }

    /// Cell value at `index` as of this snapshot
    pub fn cell(&self, index: usize) -> u8 {
        match self.cells.binary_search_by_key(&index, |&(i, _)| i) {
            Ok(found) => self.cells[found].1,
            Err(_) => 0,
        }
    }

    /// One-line dump: step, instruction, cursor, non-zero cells, output so far
    ///
    /// `output` is the full output buffer; only the first `output_len` bytes are shown.
    pub fn trace_line(&self, output: &[u8]) -> String {
        let mut line = format!("step {}", self.step);
        match (self.position, self.command) {
            (Some(position), Some(command)) => {
                let _ = write!(line, " @{} '{}'", position, command);
            }
            _ => line.push_str(" start"),
        }
        let _ = write!(line, " cursor={} cells=[", self.cursor);
        for (n, (index, value)) in self.cells.iter().enumerate() {
            if n > 0 {
                line.push(' ');
            }
            let _ = write!(line, "{}:{}", index, value);
        }
        let shown = &output[..self.output_len.min(output.len())];
        let _ = write!(line, "] output=\"{}\"", shown.escape_ascii());
        line
    }
}

/// Manages execution history for stepping backward and forward
#[derive(Debug)]
pub struct SnapshotManager {
    snapshots: Vec<Snapshot>,
    max_memory: usize,
    current_memory: usize,
}

impl SnapshotManager {
    pub fn new(max_memory: usize) -> Self {
        SnapshotManager {
            snapshots: Vec::new(),
            max_memory,
            current_memory: 0,
        }
    }

    /// Add a snapshot to history
    pub fn push(&mut self, snapshot: Snapshot) -> Result<(), RuntimeError> {
        let snapshot_size = snapshot.estimated_size();

        if self.current_memory + snapshot_size > self.max_memory {
            return Err(RuntimeError::SnapshotLimitExceeded {
                current: self.current_memory,
                limit: self.max_memory,
            });
        }

        self.current_memory += snapshot_size;
        self.snapshots.push(snapshot);
        Ok(())
    }

    pub fn get(&self, index: usize) -> Option<&Snapshot> {
        self.snapshots.get(index)
    }

    pub fn last(&self) -> Option<&Snapshot> {
        self.snapshots.last()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Snapshot> {
        self.snapshots.iter()
    }

    /// Get current memory usage
    pub fn memory_usage(&self) -> usize {
        self.current_memory
    }

    /// Get max memory limit
    pub fn memory_limit(&self) -> usize {
        self.max_memory
    }
}
