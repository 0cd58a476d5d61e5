//! # Introduction
//!
//! bli runs Brainfuck programs on a growable byte tape. It validates the
//! brackets up front, precomputes every loop jump, and can record a snapshot
//! of the tape after each instruction. The snapshot history is then navigated
//! forward and backward through a terminal UI built with
//! [ratatui](https://docs.rs/ratatui).
//!
//! ## Execution pipeline
//!
//! ```text
//! Source → Validator → JumpTable / Instructions → Interpreter ↔ Tape → Output
//!                                                      ↓
//!                                                  Snapshots → TUI
//! ```
//!
//! 1. [`parser`]: holds the [`parser::program::Program`], checks bracket
//!    balance, builds the [`parser::validator::JumpTable`], and folds runs
//!    into counted instructions.
//! 2. [`interpreter`]: the fetch-decode-execute loop, input source,
//!    configuration, cancellation, and error types.
//! 3. [`memory`]: the [`memory::Tape`] (doubling growth, wrapping cells) and
//!    the append-only [`memory::OutputBuffer`].
//! 4. [`snapshot`]: per-step snapshots with a memory budget; also the
//!    source of the `--step` trace lines.
//! 5. [`ui`]: ratatui-based TUI; not part of the stable library API.
//! 6. [`codegen`]: builds a program that prints a given text.
//!
//! ## Example
//!
//! ```
//! use bli::interpreter::input::Input;
//!
//! let output = bli::execute(b"++++++++[>++++++++<-]>+.", Input::empty()).unwrap();
//! assert_eq!(output.as_bytes(), b"A");
//! ```

pub mod codegen;
pub mod interpreter;
pub mod memory;
pub mod parser;
pub mod snapshot;
pub mod ui;

pub use interpreter::errors::Error;

use interpreter::config::ExecConfig;
use interpreter::engine::Interpreter;
use interpreter::input::Input;
use memory::OutputBuffer;
use parser::program::Program;

/// Validate and run `source` with the default configuration
pub fn execute(source: &[u8], input: Input) -> Result<OutputBuffer, Error> {
    execute_with(Program::new(source), ExecConfig::default(), input)
}

/// Validate and run `program` with an explicit configuration
pub fn execute_with(
    program: Program,
    config: ExecConfig,
    input: Input,
) -> Result<OutputBuffer, Error> {
    let mut interpreter = Interpreter::new(program, config)?.with_input(input);
    interpreter.run()?;
    Ok(interpreter.into_output())
}
