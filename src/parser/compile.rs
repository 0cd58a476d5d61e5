//! Run-length compilation
//!
//! Folds runs of `>`, `<`, `+`, `-` into single counted [`Instruction`]s and
//! resolves bracket jumps to instruction indices. Comments between repeated
//! commands do not break a run: `+ + +` compiles to one `+` with count 3.
//!
//! The compiled form is observably identical to interpreting the source
//! directly; it only executes fewer dispatch iterations.

use super::program::{Command, Program};
use crate::interpreter::errors::ValidationError;

/// A counted command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    pub command: Command,
    /// Run length for `> < + -`, always 1 otherwise
    pub count: usize,
    /// Partner instruction index for `[` and `]`, unused otherwise
    pub jump: usize,
    /// Source position of the first folded byte
    pub position: usize,
}

impl Instruction {
    fn new(command: Command, position: usize) -> Self {
        Instruction {
            command,
            count: 1,
            jump: 0,
            position,
        }
    }
}

/// Compile a program into counted instructions
///
/// Performs the same balance check as [`super::validator::validate`], so an
/// unbalanced program fails here with the same error.
pub fn compile(program: &Program) -> Result<Vec<Instruction>, ValidationError> {
    let mut instructions: Vec<Instruction> = Vec::new();
    // (instruction index, source position) of pending `[`
    let mut pending: Vec<(usize, usize)> = Vec::new();

    for (position, command) in program.commands() {
        match command {
            c if c.is_foldable() => match instructions.last_mut() {
                Some(last) if last.command == c => last.count += 1,
                _ => instructions.push(Instruction::new(c, position)),
            },
            Command::LoopStart => {
                pending.push((instructions.len(), position));
                instructions.push(Instruction::new(command, position));
            }
            Command::LoopEnd => {
                let (open, _) = pending
                    .pop()
                    .ok_or(ValidationError::UnmatchedClose { position })?;
                let close = instructions.len();
                instructions[open].jump = close;
                let mut end = Instruction::new(command, position);
                end.jump = open;
                instructions.push(end);
            }
            _ => instructions.push(Instruction::new(command, position)),
        }
    }

    if let Some(&(_, innermost)) = pending.last() {
        return Err(ValidationError::UnmatchedOpen {
            count: pending.len(),
            position: innermost,
        });
    }

    Ok(instructions)
}
