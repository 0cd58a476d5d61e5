//! Interpreted dispatch: one source byte per iteration
//!
//! The instruction pointer is a source position. Bracket jumps set it to the
//! partner's position from the jump table; the loop's unconditional `ip += 1`
//! then lands just past that partner, so a taken `[` skips the body and a
//! taken `]` re-enters it.

use crate::interpreter::engine::Interpreter;
use crate::interpreter::errors::RuntimeError;
use crate::parser::program::Command;

impl Interpreter {
    /// Execute the byte at the instruction pointer
    ///
    /// Returns the executed `(position, command)`, or `None` for a comment byte.
    pub(crate) fn execute_command(&mut self) -> Result<Option<(usize, Command)>, RuntimeError> {
        let position = self.ip;
        let Some(command) = self.program.command_at(position) else {
            return Ok(None);
        };

        match command {
            Command::Right => self.tape.move_right(1)?,
            Command::Left => self.tape.move_left(1, position)?,
            Command::Increment => self.tape.increment(1),
            Command::Decrement => self.tape.decrement(1),
            Command::Output => self.output.push(self.tape.current())?,
            Command::Input => self.read_into_cell(position)?,
            Command::LoopStart => {
                if self.tape.current() == 0 {
                    self.jump_from(position);
                }
            }
            Command::LoopEnd => {
                if self.tape.current() != 0 {
                    self.jump_from(position);
                }
            }
        }

        Ok(Some((position, command)))
    }

    /// Move the instruction pointer to the partner of the bracket at `position`
    fn jump_from(&mut self, position: usize) {
        // Validation in `Interpreter::new` guarantees every bracket has a partner
        if let Some(partner) = self.jumps.partner(position) {
            self.ip = partner;
        }
    }
}
