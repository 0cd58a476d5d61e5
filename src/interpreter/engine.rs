// Execution engine for the interpreter

use crate::interpreter::cancel::CancelToken;
use crate::interpreter::config::{ExecConfig, ExecutionMode};
use crate::interpreter::errors::{Error, RuntimeError};
use crate::interpreter::input::Input;
use crate::memory::{OutputBuffer, Tape};
use crate::parser::compile::{compile, Instruction};
use crate::parser::program::{Command, Program};
use crate::parser::validator::{validate, JumpTable};
use crate::snapshot::SnapshotManager;
use std::io::Write;
use tracing::{debug, info, warn};

/// The main interpreter that executes a program
pub struct Interpreter {
    /// Program source, comments included
    pub(crate) program: Program,

    /// Bracket partners by source position
    pub(crate) jumps: JumpTable,

    /// Run-length instructions (empty in interpreted mode)
    pub(crate) code: Vec<Instruction>,

    pub(crate) config: ExecConfig,

    pub(crate) tape: Tape,

    pub(crate) output: OutputBuffer,

    pub(crate) input: Input,

    /// Source position (interpreted) or instruction index (compiled)
    pub(crate) ip: usize,

    /// Number of commands executed so far (comments not counted, folded runs
    /// counted per command)
    pub(crate) steps: u64,

    pub(crate) cancel: CancelToken,

    /// Diagnostic channel receiving one line per executed instruction
    pub(crate) trace: Option<Box<dyn Write>>,

    /// Snapshot manager for stepping through history
    pub(crate) snapshot_manager: SnapshotManager,

    /// Current position in execution history
    pub(crate) history_position: usize,

    /// Whether the program ran to its end
    pub(crate) finished: bool,
}

impl Interpreter {
    /// Validate `program` and prepare a run
    ///
    /// Fails before any state is created if the brackets are unbalanced, and
    /// with [`RuntimeError::ResourceExhausted`] if the initial tape cannot be
    /// allocated.
    pub fn new(program: Program, config: ExecConfig) -> Result<Self, Error> {
        let jumps = validate(&program)?;
        let code = match config.mode {
            ExecutionMode::Compiled => compile(&program)?,
            ExecutionMode::Interpreted => Vec::new(),
        };

        debug!(
            bytes = program.len(),
            loops = jumps.pairs(),
            instructions = code.len(),
            "program validated"
        );

        let tape = Tape::new(config.initial_tape_len)?.with_max_len(config.max_tape_len);
        let output = OutputBuffer::new().with_max_len(config.max_output_len);
        let snapshot_manager = SnapshotManager::new(config.snapshot_limit);

        Ok(Interpreter {
            program,
            jumps,
            code,
            config,
            tape,
            output,
            input: Input::empty(),
            ip: 0,
            steps: 0,
            cancel: CancelToken::new(),
            trace: None,
            snapshot_manager,
            history_position: 0,
            finished: false,
        })
    }

    /// Source of bytes for `,`
    pub fn with_input(mut self, input: Input) -> Self {
        self.input = input;
        self
    }

    pub fn with_cancel_token(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Write a state dump after every executed instruction
    pub fn with_trace(mut self, trace: Box<dyn Write>) -> Self {
        self.trace = Some(trace);
        self
    }

    /// Run the program to completion
    ///
    /// On error the output produced so far stays in [`Interpreter::output`].
    pub fn run(&mut self) -> Result<(), RuntimeError> {
        info!(
            mode = ?self.config.mode,
            commands = self.program.command_count(),
            "execution started"
        );

        if self.config.record_history && self.snapshot_manager.is_empty() {
            self.take_snapshot(None, None)?;
        }

        let result = self.dispatch_loop().and_then(|()| self.flush_trace());

        match &result {
            Ok(()) => info!(
                steps = self.steps,
                output_bytes = self.output.len(),
                tape_len = self.tape.len(),
                "execution finished"
            ),
            Err(e) => warn!(steps = self.steps, error = %e, "execution stopped"),
        }

        self.history_position = self.snapshot_manager.len().saturating_sub(1);
        result
    }

    fn dispatch_loop(&mut self) -> Result<(), RuntimeError> {
        let end = match self.config.mode {
            ExecutionMode::Interpreted => self.program.len(),
            ExecutionMode::Compiled => self.code.len(),
        };

        while self.ip < end {
            if self.cancel.is_cancelled() {
                return Err(RuntimeError::Cancelled { steps: self.steps });
            }
            let cost = self.pending_cost();
            if let Some(limit) = self.config.step_limit {
                if cost > 0 && self.steps + cost > limit {
                    return Err(RuntimeError::StepLimitExceeded { limit });
                }
            }

            let executed = match self.config.mode {
                ExecutionMode::Interpreted => self.execute_command()?,
                ExecutionMode::Compiled => self.execute_instruction()?,
            };
            self.ip += 1;

            if let Some((position, command)) = executed {
                self.steps += cost;
                self.record_step(position, command)?;
            }
        }

        self.finished = true;
        Ok(())
    }

    /// Source commands the instruction at the instruction pointer stands for
    ///
    /// A folded run of `k` commands costs `k`, so step counts and the step
    /// limit mean the same thing in both modes. Comment bytes cost nothing.
    fn pending_cost(&self) -> u64 {
        match self.config.mode {
            ExecutionMode::Interpreted => self.program.command_at(self.ip).map_or(0, |_| 1),
            ExecutionMode::Compiled => self.code.get(self.ip).map_or(0, |i| i.count as u64),
        }
    }

    /// Apply the end-of-input policy or store the next input byte
    pub(crate) fn read_into_cell(&mut self, position: usize) -> Result<(), RuntimeError> {
        use crate::interpreter::config::EofPolicy;

        match self.input.read_byte() {
            Ok(Some(byte)) => self.tape.set_current(byte),
            Ok(None) => match self.config.eof_policy {
                EofPolicy::Unchanged => {}
                EofPolicy::Zero => self.tape.set_current(0),
            },
            Err(source) => return Err(RuntimeError::InputFailed { position, source }),
        }
        Ok(())
    }

    // ========== Getter methods ==========

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn jump_table(&self) -> &JumpTable {
        &self.jumps
    }

    /// Compiled instructions (empty in interpreted mode)
    pub fn instructions(&self) -> &[Instruction] {
        &self.code
    }

    pub fn config(&self) -> &ExecConfig {
        &self.config
    }

    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    /// Mutable tape access, for seeding cells before [`Interpreter::run`]
    pub fn tape_mut(&mut self) -> &mut Tape {
        &mut self.tape
    }

    pub fn output(&self) -> &OutputBuffer {
        &self.output
    }

    pub fn into_output(self) -> OutputBuffer {
        self.output
    }

    /// Number of instructions executed
    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Command under the instruction pointer, if any
    pub fn current_command(&self) -> Option<Command> {
        match self.config.mode {
            ExecutionMode::Interpreted => self.program.command_at(self.ip),
            ExecutionMode::Compiled => self.code.get(self.ip).map(|i| i.command),
        }
    }
}
