use std::borrow::Cow;
use std::fmt;
use thiserror::Error;

/// A location in the input stream.
///
/// `offset` counts bytes from zero. `line` and `column` count from one;
/// columns are measured in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub offset: u64,
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub const START: Position = Position {
        offset: 0,
        line: 1,
        column: 1,
    };

    /// Advance past `b`.
    pub(crate) fn advance(&mut self, b: u8) {
        self.offset += 1;
        if b == b'\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::START
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "line {}, column {} (offset {})",
            self.line, self.column, self.offset
        )
    }
}

fn ch(b: &u8) -> char {
    char::from(*b)
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxErrorKind {
    #[error("unmatched opener '{}'", ch(.0))]
    UnmatchedOpener(u8),

    #[error("unmatched closer '{}'", ch(.0))]
    UnmatchedCloser(u8),

    #[error("mismatched matchers '{}' and '{}'", ch(.opener), ch(.closer))]
    MismatchedMatchers { opener: u8, closer: u8 },

    #[error("expected '{}'", ch(.0))]
    ExpectedOpener(u8),

    /// Raised by grammars layered on top of matchertext.
    #[error("{0}")]
    Grammar(Cow<'static, str>),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} at {position}")]
pub struct SyntaxError {
    pub kind: SyntaxErrorKind,
    pub position: Position,
}

impl SyntaxError {
    pub fn new(kind: SyntaxErrorKind, position: Position) -> Self {
        Self { kind, position }
    }

    pub fn offset(&self) -> u64 {
        self.position.offset
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// The syntax error, if this is one.
    pub fn as_syntax(&self) -> Option<&SyntaxError> {
        match self {
            Error::Syntax(e) => Some(e),
            Error::Io(_) => None,
        }
    }
}
