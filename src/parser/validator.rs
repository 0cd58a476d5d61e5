//! Bracket validation and jump table construction
//!
//! [`validate`] makes one pass over the program with a stack of pending `[`
//! positions. Every `]` pops its partner and records the pair in both
//! directions, so each runtime jump is a single table lookup.

use super::program::{Command, Program};
use crate::interpreter::errors::ValidationError;
use rustc_hash::FxHashMap;

/// Matching-bracket positions, keyed by source position
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JumpTable {
    partners: FxHashMap<usize, usize>,
}

impl JumpTable {
    /// Position of the bracket matching the one at `position`
    pub fn partner(&self, position: usize) -> Option<usize> {
        self.partners.get(&position).copied()
    }

    /// Number of bracket pairs
    pub fn pairs(&self) -> usize {
        self.partners.len() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.partners.is_empty()
    }

    fn link(&mut self, open: usize, close: usize) {
        self.partners.insert(open, close);
        self.partners.insert(close, open);
    }
}

/// Check bracket balance and build the jump table
pub fn validate(program: &Program) -> Result<JumpTable, ValidationError> {
    let mut pending: Vec<usize> = Vec::new();
    let mut table = JumpTable::default();

    for (position, command) in program.commands() {
        match command {
            Command::LoopStart => pending.push(position),
            Command::LoopEnd => {
                let open = pending
                    .pop()
                    .ok_or(ValidationError::UnmatchedClose { position })?;
                table.link(open, position);
            }
            _ => {}
        }
    }

    if let Some(&innermost) = pending.last() {
        return Err(ValidationError::UnmatchedOpen {
            count: pending.len(),
            position: innermost,
        });
    }

    Ok(table)
}
