//! Per-step recording and history navigation
//!
//! Adds `impl Interpreter` methods that capture a [`Snapshot`] after each
//! executed instruction (for the trace channel and the step-through UI) and
//! move a cursor through the recorded history once the run is over.

use crate::interpreter::engine::Interpreter;
use crate::interpreter::errors::RuntimeError;
use crate::parser::program::Command;
use crate::snapshot::Snapshot;
use std::io::Write;
use tracing::warn;

impl Interpreter {
    fn capture(&self, position: Option<usize>, command: Option<Command>) -> Snapshot {
        Snapshot {
            step: self.steps,
            position,
            command,
            cursor: self.tape.cursor(),
            tape_len: self.tape.len(),
            cells: self.tape.non_zero_cells(),
            output_len: self.output.len(),
        }
    }

    /// Take a snapshot of the current execution state
    pub(crate) fn take_snapshot(
        &mut self,
        position: Option<usize>,
        command: Option<Command>,
    ) -> Result<(), RuntimeError> {
        let snapshot = self.capture(position, command);
        self.push_snapshot(snapshot)
    }

    fn push_snapshot(&mut self, snapshot: Snapshot) -> Result<(), RuntimeError> {
        if let Err(e) = self.snapshot_manager.push(snapshot) {
            warn!(
                snapshots = self.snapshot_manager.len(),
                limit = self.snapshot_manager.memory_limit(),
                "snapshot history full"
            );
            return Err(e);
        }
        Ok(())
    }

    /// Emit the trace line and history snapshot for one executed instruction
    pub(crate) fn record_step(
        &mut self,
        position: usize,
        command: Command,
    ) -> Result<(), RuntimeError> {
        if self.trace.is_none() && !self.config.record_history {
            return Ok(());
        }

        let snapshot = self.capture(Some(position), Some(command));

        if let Some(trace) = self.trace.as_mut() {
            writeln!(trace, "{}", snapshot.trace_line(self.output.as_bytes()))
                .map_err(|source| RuntimeError::TraceWriteFailed { source })?;
        }

        if self.config.record_history {
            self.push_snapshot(snapshot)?;
        }
        Ok(())
    }

    pub(crate) fn flush_trace(&mut self) -> Result<(), RuntimeError> {
        if let Some(trace) = self.trace.as_mut() {
            trace
                .flush()
                .map_err(|source| RuntimeError::TraceWriteFailed { source })?;
        }
        Ok(())
    }

    /// Step backward in history
    pub fn step_backward(&mut self) -> Result<(), RuntimeError> {
        if self.history_position == 0 {
            return Err(RuntimeError::HistoryUnavailable {
                message: "Already at the beginning of execution".to_string(),
            });
        }
        self.history_position -= 1;
        Ok(())
    }

    /// Step forward in history
    pub fn step_forward(&mut self) -> Result<(), RuntimeError> {
        if self.history_position + 1 >= self.snapshot_manager.len() {
            return Err(RuntimeError::HistoryUnavailable {
                message: "No more snapshots available (execution finished)".to_string(),
            });
        }
        self.history_position += 1;
        Ok(())
    }

    /// Rewind to the beginning of execution history
    pub fn rewind_to_start(&mut self) -> Result<(), RuntimeError> {
        if self.snapshot_manager.is_empty() {
            return Err(RuntimeError::HistoryUnavailable {
                message: "No snapshots available".to_string(),
            });
        }
        self.history_position = 0;
        Ok(())
    }

    /// Move to the last recorded snapshot
    pub fn jump_to_end(&mut self) -> Result<(), RuntimeError> {
        if self.snapshot_manager.is_empty() {
            return Err(RuntimeError::HistoryUnavailable {
                message: "No snapshots available".to_string(),
            });
        }
        self.history_position = self.snapshot_manager.len() - 1;
        Ok(())
    }

    /// Snapshot at the current history position
    pub fn current_snapshot(&self) -> Option<&Snapshot> {
        self.snapshot_manager.get(self.history_position)
    }

    /// Get the current history position
    pub fn history_position(&self) -> usize {
        self.history_position
    }

    /// Get the total number of snapshots
    pub fn total_snapshots(&self) -> usize {
        self.snapshot_manager.len()
    }

    pub fn snapshots(&self) -> &crate::snapshot::SnapshotManager {
        &self.snapshot_manager
    }
}
