//! Byte source for the `,` command
//!
//! Bytes are served from a preset buffer first (the `--args` text), then from
//! an optional reader. Once both are exhausted, [`Input::read_byte`] returns
//! `Ok(None)` and the engine applies its [`EofPolicy`](super::config::EofPolicy).

use std::fmt;
use std::io::{self, BufReader, Read};

pub struct Input {
    preset: Vec<u8>,
    next: usize,
    reader: Option<Box<dyn Read>>,
}

impl Input {
    /// No input at all; every `,` hits end of input
    pub fn empty() -> Self {
        Input {
            preset: Vec::new(),
            next: 0,
            reader: None,
        }
    }

    /// Serve exactly these bytes, then end of input
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Input::empty().with_preset(bytes)
    }

    /// Read from `reader` (blocking) after any preset bytes
    pub fn from_reader<R: Read + 'static>(reader: R) -> Self {
        Input {
            reader: Some(Box::new(BufReader::new(reader))),
            ..Input::empty()
        }
    }

    /// Bytes served before the reader is consulted
    pub fn with_preset(mut self, bytes: impl Into<Vec<u8>>) -> Self {
        self.preset = bytes.into();
        self.next = 0;
        self
    }

    /// Next byte, `None` at end of input
    pub fn read_byte(&mut self) -> io::Result<Option<u8>> {
        if let Some(&byte) = self.preset.get(self.next) {
            self.next += 1;
            return Ok(Some(byte));
        }

        let Some(reader) = self.reader.as_mut() else {
            return Ok(None);
        };

        let mut buf = [0u8; 1];
        loop {
            match reader.read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(buf[0])),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }
}

impl Default for Input {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Debug for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Input")
            .field("preset_remaining", &(self.preset.len() - self.next))
            .field("has_reader", &self.reader.is_some())
            .finish()
    }
}
