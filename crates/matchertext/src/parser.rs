//! Recursive-descent matchertext recognizer.
//!
//! The parser never recurses on its own. When [`Parser::read_text`] meets an
//! opener it pushes the byte back and hands control to [`Handler::open`],
//! which decides how the delimited region is read, usually by calling
//! [`Parser::read_pair`] with itself or with a different handler.

use std::io::{self, BufRead};
use std::ops::ControlFlow;

use crate::error::{Error, Position, SyntaxError, SyntaxErrorKind};
use crate::matcher::{closer_for, is_closer, is_opener};

/// Returned by [`Handler::byte`] to keep reading or to end the current
/// [`Parser::read_text`] call.
pub type Flow = ControlFlow<()>;

/// Keep reading.
pub const CONTINUE: Flow = ControlFlow::Continue(());

/// End the current `read_text` call.
pub const BREAK: Flow = ControlFlow::Break(());

/// Inspects syntax errors before they are returned. Returning `None`
/// clears the error and the parser recovers as best it can.
pub type ErrorHook = dyn FnMut(SyntaxError) -> Option<SyntaxError>;

/// Callbacks driven by [`Parser::read_text`].
pub trait Handler<R: BufRead> {
    /// A byte that is not a matcher.
    fn byte(&mut self, p: &mut Parser<R>, b: u8) -> Result<Flow, Error>;

    /// An opener has been seen and pushed back. The handler must consume
    /// the whole pair, normally via [`Parser::read_pair`].
    fn open(&mut self, p: &mut Parser<R>, opener: u8, closer: u8) -> Result<(), Error>;
}

/// Why [`Parser::read_text`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stop {
    /// Clean end of stream.
    Eof,
    /// A closer with no opener at this level. It has not been consumed.
    Closer(u8),
    /// The handler asked to stop.
    Break,
}

pub struct Parser<R> {
    reader: R,
    pushback: Option<u8>,
    /// Position of the next byte the reader will deliver.
    pos: Position,
    /// Position of the byte most recently taken from the reader.
    mark: Position,
    hook: Option<Box<ErrorHook>>,
}

impl<'a> Parser<&'a [u8]> {
    pub fn from_bytes(bytes: &'a [u8]) -> Self {
        Self::new(bytes)
    }
}

impl<R: BufRead> Parser<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            pushback: None,
            pos: Position::START,
            mark: Position::START,
            hook: None,
        }
    }

    /// Start over on a new stream. The error hook is kept.
    pub fn reset(&mut self, reader: R) {
        self.reader = reader;
        self.pushback = None;
        self.pos = Position::START;
        self.mark = Position::START;
    }

    pub fn set_error_hook<F>(&mut self, hook: F)
    where
        F: FnMut(SyntaxError) -> Option<SyntaxError> + 'static,
    {
        self.hook = Some(Box::new(hook));
    }

    pub fn clear_error_hook(&mut self) {
        self.hook = None;
    }

    /// Position of the next unread byte. Pushback does not move it back.
    pub fn position(&self) -> Position {
        self.pos
    }

    /// Position of the last byte read from the stream.
    pub fn last_position(&self) -> Position {
        self.mark
    }

    pub fn next_byte(&mut self) -> Result<Option<u8>, Error> {
        if let Some(b) = self.pushback.take() {
            return Ok(Some(b));
        }
        let b = loop {
            match self.reader.fill_buf() {
                Ok(buf) => break buf.first().copied(),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        };
        if let Some(b) = b {
            self.reader.consume(1);
            self.mark = self.pos;
            self.pos.advance(b);
        }
        Ok(b)
    }

    /// Push back the byte just read. Only one byte of pushback exists.
    pub fn unread(&mut self, b: u8) {
        debug_assert!(self.pushback.is_none(), "pushback slot already full");
        self.pushback = Some(b);
    }

    pub fn peek_byte(&mut self) -> Result<Option<u8>, Error> {
        let b = self.next_byte()?;
        if let Some(b) = b {
            self.unread(b);
        }
        Ok(b)
    }

    /// Report `kind` at the last byte read. Returns `Ok(())` if the error
    /// hook cleared it.
    pub fn raise(&mut self, kind: SyntaxErrorKind) -> Result<(), Error> {
        let at = self.mark;
        self.raise_at(kind, at)
    }

    pub fn raise_at(&mut self, kind: SyntaxErrorKind, position: Position) -> Result<(), Error> {
        let err = SyntaxError::new(kind, position);
        match self.hook.as_mut() {
            Some(hook) => match hook(err) {
                Some(err) => Err(err.into()),
                None => {
                    log::debug!("syntax error cleared by hook at {position}");
                    Ok(())
                }
            },
            None => Err(err.into()),
        }
    }

    /// Read bytes, passing them to `handler`, until end of stream, an
    /// unmatched closer or a handler break.
    pub fn read_text<H>(&mut self, handler: &mut H) -> Result<Stop, Error>
    where
        H: Handler<R> + ?Sized,
    {
        loop {
            let Some(b) = self.next_byte()? else {
                return Ok(Stop::Eof);
            };
            if let Some(closer) = closer_for(b) {
                self.unread(b);
                handler.open(self, b, closer)?;
            } else if is_closer(b) {
                self.unread(b);
                return Ok(Stop::Closer(b));
            } else if handler.byte(self, b)?.is_break() {
                return Ok(Stop::Break);
            }
        }
    }

    /// Consume `opener`, the text it encloses and the matching `closer`.
    pub fn read_pair<H>(&mut self, handler: &mut H, opener: u8, closer: u8) -> Result<(), Error>
    where
        H: Handler<R> + ?Sized,
    {
        debug_assert!(is_opener(opener));
        match self.next_byte()? {
            Some(b) if b == opener => {}
            Some(b) => {
                self.unread(b);
                return self.raise(SyntaxErrorKind::ExpectedOpener(opener));
            }
            None => {
                let at = self.pos;
                return self.raise_at(SyntaxErrorKind::ExpectedOpener(opener), at);
            }
        }
        let start = self.mark;

        loop {
            match self.read_text(handler)? {
                Stop::Break => continue,
                Stop::Eof => {
                    return self.raise_at(SyntaxErrorKind::UnmatchedOpener(opener), start);
                }
                Stop::Closer(c) => {
                    self.next_byte()?;
                    if c != closer {
                        self.raise(SyntaxErrorKind::MismatchedMatchers { opener, closer: c })?;
                    }
                    return Ok(());
                }
            }
        }
    }

    /// Read the whole stream. A closer with no opener is an error.
    pub fn read_all<H>(&mut self, handler: &mut H) -> Result<(), Error>
    where
        H: Handler<R> + ?Sized,
    {
        loop {
            match self.read_text(handler)? {
                Stop::Eof => return Ok(()),
                Stop::Break => continue,
                Stop::Closer(c) => {
                    self.next_byte()?;
                    self.raise(SyntaxErrorKind::UnmatchedCloser(c))?;
                }
            }
        }
    }
}

/// A handler that copies every byte, matchers included, into a buffer.
#[derive(Debug, Default)]
pub struct Collect {
    pub bytes: Vec<u8>,
}

impl<R: BufRead> Handler<R> for Collect {
    fn byte(&mut self, _: &mut Parser<R>, b: u8) -> Result<Flow, Error> {
        self.bytes.push(b);
        Ok(CONTINUE)
    }

    fn open(&mut self, p: &mut Parser<R>, opener: u8, closer: u8) -> Result<(), Error> {
        self.bytes.push(opener);
        p.read_pair(self, opener, closer)?;
        self.bytes.push(closer);
        Ok(())
    }
}

/// Check that `bytes` is matchertext.
pub fn validate(bytes: &[u8]) -> Result<(), Error> {
    Parser::from_bytes(bytes).read_all(&mut Collect::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn syntax_error(input: &str) -> SyntaxError {
        match validate(input.as_bytes()) {
            Err(Error::Syntax(e)) => e,
            other => panic!("expected syntax error for {input:?}, got {other:?}"),
        }
    }

    #[rstest]
    #[case("")]
    #[case("plain text")]
    #[case("()[]{}")]
    #[case("a(b[c{d}e]f)g")]
    #[case("([{([{}])}])")]
    fn accepts_matchertext(#[case] input: &str) {
        assert!(validate(input.as_bytes()).is_ok());
    }

    #[test]
    fn collect_reproduces_input() {
        let input = b"x(y[z]{w})";
        let mut collect = Collect::default();
        Parser::from_bytes(input).read_all(&mut collect).unwrap();
        assert_eq!(collect.bytes, input);
    }

    #[test]
    fn unclosed_opener_reports_opener_position() {
        let err = syntax_error("a(b");
        assert_eq!(err.kind, SyntaxErrorKind::UnmatchedOpener(b'('));
        assert_eq!(err.offset(), 1);
        assert_eq!(err.position.column, 2);
    }

    #[test]
    fn stray_closer_is_unmatched() {
        let err = syntax_error("b)c");
        assert_eq!(err.kind, SyntaxErrorKind::UnmatchedCloser(b')'));
        assert_eq!(err.offset(), 1);
    }

    #[test]
    fn crossed_closer_is_mismatched() {
        let err = syntax_error("a(]b");
        assert_eq!(
            err.kind,
            SyntaxErrorKind::MismatchedMatchers {
                opener: b'(',
                closer: b']'
            }
        );
        assert_eq!(err.offset(), 2);
    }

    #[test]
    fn positions_count_lines() {
        let err = syntax_error("ab\ncd\n  ]");
        assert_eq!(
            err.position,
            Position {
                offset: 8,
                line: 3,
                column: 3
            }
        );
    }

    #[test]
    fn pushback_does_not_rewind_position() {
        let mut p = Parser::from_bytes(b"ab");
        assert_eq!(p.peek_byte().unwrap(), Some(b'a'));
        assert_eq!(p.position().offset, 1);
        assert_eq!(p.next_byte().unwrap(), Some(b'a'));
        assert_eq!(p.position().offset, 1);
        assert_eq!(p.next_byte().unwrap(), Some(b'b'));
        assert_eq!(p.next_byte().unwrap(), None);
        assert_eq!(p.position().offset, 2);
    }

    #[test]
    fn read_text_stops_before_closer() {
        let mut p = Parser::from_bytes(b"ab]c");
        let mut collect = Collect::default();
        assert_eq!(p.read_text(&mut collect).unwrap(), Stop::Closer(b']'));
        assert_eq!(collect.bytes, b"ab");
        assert_eq!(p.next_byte().unwrap(), Some(b']'));
    }

    struct UntilSpace(Vec<u8>);

    impl<R: BufRead> Handler<R> for UntilSpace {
        fn byte(&mut self, _: &mut Parser<R>, b: u8) -> Result<Flow, Error> {
            if b == b' ' {
                return Ok(BREAK);
            }
            self.0.push(b);
            Ok(CONTINUE)
        }

        fn open(&mut self, p: &mut Parser<R>, opener: u8, closer: u8) -> Result<(), Error> {
            p.read_pair(&mut Collect::default(), opener, closer)
        }
    }

    #[test]
    fn handler_can_break_out_of_read_text() {
        let mut p = Parser::from_bytes(b"ab cd");
        let mut h = UntilSpace(Vec::new());
        assert_eq!(p.read_text(&mut h).unwrap(), Stop::Break);
        assert_eq!(h.0, b"ab");
        assert_eq!(p.next_byte().unwrap(), Some(b'c'));
    }

    #[test]
    fn error_hook_can_replace_errors() {
        let mut p = Parser::from_bytes(b"(x");
        p.set_error_hook(|mut err| {
            err.kind = SyntaxErrorKind::Grammar("replaced".into());
            Some(err)
        });
        let err = p.read_all(&mut Collect::default()).unwrap_err();
        assert_eq!(err.to_string(), "replaced at line 1, column 1 (offset 0)");
    }

    #[test]
    fn error_hook_can_clear_errors() {
        let mut p = Parser::from_bytes(b"a)b(c]d(e");
        let seen = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
        let log = seen.clone();
        p.set_error_hook(move |err| {
            log.borrow_mut().push(err.kind);
            None
        });
        let mut collect = Collect::default();
        p.read_all(&mut collect).unwrap();

        assert_eq!(
            *seen.borrow(),
            vec![
                SyntaxErrorKind::UnmatchedCloser(b')'),
                SyntaxErrorKind::MismatchedMatchers {
                    opener: b'(',
                    closer: b']'
                },
                SyntaxErrorKind::UnmatchedOpener(b'('),
            ]
        );
        assert_eq!(collect.bytes, b"ab(c)d(e)");
    }

    #[test]
    fn io_errors_propagate() {
        struct Failing;
        impl io::Read for Failing {
            fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::other("disk on fire"))
            }
        }
        let mut p = Parser::new(io::BufReader::new(Failing));
        let err = p.read_all(&mut Collect::default()).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
        assert!(err.as_syntax().is_none());
    }
}
