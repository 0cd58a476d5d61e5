//! Program loading and static analysis
//!
//! This module turns raw source bytes into something the engine can execute:
//! - [`program`]: the immutable [`program::Program`] and its eight [`program::Command`]s
//! - [`validator`]: bracket balance check producing a [`validator::JumpTable`]
//! - [`compile`]: run-length folding into counted [`compile::Instruction`]s
//!
//! # Comments
//!
//! Every byte that is not one of `> < + - . , [ ]` is a comment. Comments are
//! kept in the [`program::Program`] so that source positions reported by errors,
//! snapshots, and the UI line up with the file the user wrote.
//!
//! # Validation Before Execution
//!
//! Validation is a single linear pass and always finishes before the first
//! instruction runs. An unbalanced program never produces output.

pub mod compile;
pub mod program;
pub mod validator;
