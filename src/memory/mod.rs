//! Memory model for the interpreter
//!
//! This module provides the two pieces of state an execution owns:
//! - [`tape`]: the growable byte tape and its cursor
//! - [`output`]: the append-only output sink
//!
//! # Cell Semantics
//!
//! Cells are unsigned bytes. `+` and `-` wrap modulo 256:
//! ```text
//! 255 + 1  →  0
//!   0 - 1  →  255
//! ```
//!
//! # Growth
//!
//! Both structures grow on demand and never shrink. Growth goes through
//! fallible reservation, so an allocation failure surfaces as
//! [`RuntimeError::ResourceExhausted`](crate::interpreter::errors::RuntimeError::ResourceExhausted)
//! and leaves existing contents untouched.

pub mod output;
pub mod tape;

pub use output::OutputBuffer;
pub use tape::Tape;
