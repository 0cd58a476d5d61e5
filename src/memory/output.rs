//! Append-only output sink

use crate::interpreter::errors::{Resource, RuntimeError};
use std::io::{self, Write};

/// Bytes produced by `.`, held until the run ends
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputBuffer {
    bytes: Vec<u8>,
    max_len: Option<usize>,
}

impl OutputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cap the buffer at `max_len` bytes
    pub fn with_max_len(mut self, max_len: Option<usize>) -> Self {
        self.max_len = max_len;
        self
    }

    /// Append one byte
    pub fn push(&mut self, byte: u8) -> Result<(), RuntimeError> {
        let requested = self.bytes.len() + 1;
        if self.max_len.is_some_and(|max| requested > max) {
            return Err(RuntimeError::ResourceExhausted {
                resource: Resource::Output,
                requested,
            });
        }
        self.bytes
            .try_reserve(1)
            .map_err(|_| RuntimeError::ResourceExhausted {
                resource: Resource::Output,
                requested,
            })?;
        self.bytes.push(byte);
        Ok(())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Output as text, replacing invalid UTF-8
    pub fn as_text(&self) -> String {
        String::from_utf8_lossy(&self.bytes).into_owned()
    }

    /// Write everything accumulated so far and flush the writer
    pub fn flush_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(&self.bytes)?;
        writer.flush()
    }
}
