//! Program text and command decoding

use std::fmt;

/// Line and column of a source byte (both 1-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        SourceLocation { line, column }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// The eight meaningful symbols
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Right,     // >
    Left,      // <
    Increment, // +
    Decrement, // -
    Output,    // .
    Input,     // ,
    LoopStart, // [
    LoopEnd,   // ]
}

impl Command {
    /// Decode a source byte, returning `None` for comment bytes
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            b'>' => Some(Command::Right),
            b'<' => Some(Command::Left),
            b'+' => Some(Command::Increment),
            b'-' => Some(Command::Decrement),
            b'.' => Some(Command::Output),
            b',' => Some(Command::Input),
            b'[' => Some(Command::LoopStart),
            b']' => Some(Command::LoopEnd),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Command::Right => '>',
            Command::Left => '<',
            Command::Increment => '+',
            Command::Decrement => '-',
            Command::Output => '.',
            Command::Input => ',',
            Command::LoopStart => '[',
            Command::LoopEnd => ']',
        }
    }

    /// Whether consecutive occurrences can be folded into one counted instruction
    pub fn is_foldable(self) -> bool {
        matches!(
            self,
            Command::Right | Command::Left | Command::Increment | Command::Decrement
        )
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Immutable program source
///
/// All bytes are kept, including comments, so positions match the original text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    source: Vec<u8>,
}

impl Program {
    pub fn new(source: impl Into<Vec<u8>>) -> Self {
        Program {
            source: source.into(),
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.source
    }

    pub fn len(&self) -> usize {
        self.source.len()
    }

    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }

    /// Command at `position`, or `None` for comments and out-of-range positions
    pub fn command_at(&self, position: usize) -> Option<Command> {
        self.source.get(position).copied().and_then(Command::from_byte)
    }

    /// Iterate over `(position, command)` pairs, skipping comments
    pub fn commands(&self) -> impl Iterator<Item = (usize, Command)> + '_ {
        self.source
            .iter()
            .enumerate()
            .filter_map(|(i, &b)| Command::from_byte(b).map(|c| (i, c)))
    }

    /// Number of meaningful commands (comments excluded)
    pub fn command_count(&self) -> usize {
        self.commands().count()
    }

    /// Line/column of a source position
    pub fn location_of(&self, position: usize) -> SourceLocation {
        let end = position.min(self.source.len());
        let prefix = &self.source[..end];
        let line = prefix.iter().filter(|&&b| b == b'\n').count() + 1;
        let column = match prefix.iter().rposition(|&b| b == b'\n') {
            Some(newline) => end - newline,
            None => end + 1,
        };
        SourceLocation::new(line, column)
    }

    /// Source as text, replacing invalid UTF-8
    pub fn as_text(&self) -> String {
        String::from_utf8_lossy(&self.source).into_owned()
    }
}

impl From<&str> for Program {
    fn from(source: &str) -> Self {
        Program::new(source.as_bytes())
    }
}

impl From<String> for Program {
    fn from(source: String) -> Self {
        Program::new(source.into_bytes())
    }
}
