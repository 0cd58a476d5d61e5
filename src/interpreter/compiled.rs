//! Compiled dispatch: one run-length instruction per iteration

use crate::interpreter::engine::Interpreter;
use crate::interpreter::errors::RuntimeError;
use crate::parser::compile::Instruction;
use crate::parser::program::Command;

impl Interpreter {
    /// Execute the instruction at the instruction pointer
    ///
    /// Returns the source position and command of the executed instruction.
    pub(crate) fn execute_instruction(
        &mut self,
    ) -> Result<Option<(usize, Command)>, RuntimeError> {
        let Some(&Instruction {
            command,
            count,
            jump,
            position,
        }) = self.code.get(self.ip)
        else {
            return Ok(None);
        };

        match command {
            Command::Right => self.tape.move_right(count)?,
            Command::Left => self.tape.move_left(count, position)?,
            Command::Increment => self.tape.increment((count % 256) as u8),
            Command::Decrement => self.tape.decrement((count % 256) as u8),
            Command::Output => self.output.push(self.tape.current())?,
            Command::Input => self.read_into_cell(position)?,
            Command::LoopStart => {
                if self.tape.current() == 0 {
                    self.ip = jump;
                }
            }
            Command::LoopEnd => {
                if self.tape.current() != 0 {
                    self.ip = jump;
                }
            }
        }

        Ok(Some((position, command)))
    }
}
