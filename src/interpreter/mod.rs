//! Program execution engine
//!
//! This module provides the core execution logic:
//! - [`engine`]: [`engine::Interpreter`], which owns the tape, output, and input of one run
//! - [`errors`]: validation and runtime error types
//! - [`config`]: [`config::ExecConfig`], execution mode and end-of-input policy
//! - [`input`]: the byte source read by `,`
//! - [`cancel`]: a [`cancel::CancelToken`] for stopping a run from outside
//!
//! # Execution Model
//!
//! The program is validated when the interpreter is built, so an unbalanced
//! program never starts. `run` then loops fetch-decode-execute until the
//! instruction pointer walks off the end, a fatal error occurs, or the cancel
//! token is set. The dispatch itself lives in two `impl Interpreter` files:
//! `commands` walks the source with the jump table, `compiled` walks run-length
//! instructions. `history` records snapshots and navigates them afterwards.

pub mod cancel;
mod commands;
mod compiled;
pub mod config;
pub mod constants;
pub mod engine;
pub mod errors;
mod history;
pub mod input;
