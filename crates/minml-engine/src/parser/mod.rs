//! Streaming MinML parser.
//!
//! The parser is layered on [`matchertext::Parser`] and reports what it
//! finds through three client traits:
//!
//! - [`TextHandler`]: text, references and comments
//! - [`MarkupHandler`]: the above plus element starts
//! - [`ElementHandler`]: attributes and content of one element
//!
//! Element starts are pull-based. When `name[` or `name{` is seen the
//! parser calls [`MarkupHandler::element`] and the client reads the rest
//! itself through the [`Cursor`] it was given:
//!
//! ```text
//! element(p, "a")
//!   └─ p.read_element("a", h)
//!        ├─ attribute(p, "href") ─▶ p.read_attribute("href", h)
//!        └─ content(p)           ─▶ p.read_content(h)
//! ```
//!
//! ## Space-sucking
//!
//! A `<` just before `[` or `{` and a `>` just after `]` or `}`, together
//! with the whitespace beside them, are dropped from text. `(` and `)` do
//! not take part.

mod modes;
mod state;

use std::borrow::Cow;
use std::io::BufRead;

pub use matchertext::{Error, Position, SyntaxError, SyntaxErrorKind};
use matchertext::{Parser as Matchertext, Stop};

use crate::syntax::is_space;
use modes::{AttributeMode, ElementFn, MarkupMode, RawMode, ValueMode};
use state::State;

pub const INVALID_ATTRIBUTE_NAME: &str = "invalid attribute name";
pub const ATTRIBUTE_VALUE_EXPECTED: &str = "attribute value expected";
pub const ATTRIBUTE_NAME_EXPECTED: &str = "attribute name expected";
pub const END_OF_VALUE_EXPECTED: &str = "end of attribute value expected";
pub const EXPECTED_END_OF_FILE: &str = "expected end of file";

fn grammar(message: &'static str) -> SyntaxErrorKind {
    SyntaxErrorKind::Grammar(Cow::Borrowed(message))
}

pub trait TextHandler<R: BufRead> {
    /// A run of text. `raw` is set for the content of `+[...]`.
    fn text(&mut self, p: &mut Cursor<'_, R>, text: &[u8], raw: bool) -> Result<(), Error>;

    fn reference(&mut self, p: &mut Cursor<'_, R>, name: &[u8]) -> Result<(), Error>;

    /// The content of `-[...]`. Dropped unless overridden.
    fn comment(&mut self, p: &mut Cursor<'_, R>, text: &[u8]) -> Result<(), Error> {
        let _ = (p, text);
        Ok(())
    }
}

pub trait MarkupHandler<R: BufRead>: TextHandler<R> {
    /// An element called `name` starts. The handler should call
    /// [`Cursor::read_element`].
    fn element(&mut self, p: &mut Cursor<'_, R>, name: &[u8]) -> Result<(), Error>;
}

pub trait ElementHandler<R: BufRead> {
    /// Attribute `name=` has been read. The handler should call
    /// [`Cursor::read_attribute`].
    fn attribute(&mut self, p: &mut Cursor<'_, R>, name: &[u8]) -> Result<(), Error>;

    /// The attributes are done. The handler should call
    /// [`Cursor::read_content`].
    fn content(&mut self, p: &mut Cursor<'_, R>) -> Result<(), Error>;
}

/// A MinML parser over one stream.
pub struct Parser<R> {
    mt: Matchertext<R>,
    state: State,
}

impl<'a> Parser<&'a [u8]> {
    pub fn from_bytes(bytes: &'a [u8]) -> Self {
        Self::new(bytes)
    }
}

impl<R: BufRead> Parser<R> {
    pub fn new(reader: R) -> Self {
        Self {
            mt: Matchertext::new(reader),
            state: State::default(),
        }
    }

    /// Parse a new stream, dropping anything buffered from the old one.
    pub fn reset(&mut self, reader: R) {
        self.mt.reset(reader);
        self.state.reset();
    }

    /// See [`matchertext::Parser::set_error_hook`]. Grammar errors go
    /// through the same hook.
    pub fn set_error_hook<F>(&mut self, hook: F)
    where
        F: FnMut(SyntaxError) -> Option<SyntaxError> + 'static,
    {
        self.mt.set_error_hook(hook);
    }

    pub fn position(&self) -> Position {
        self.mt.position()
    }

    pub fn cursor(&mut self) -> Cursor<'_, R> {
        Cursor {
            mt: &mut self.mt,
            st: &mut self.state,
        }
    }

    pub fn read_all<H: MarkupHandler<R> + ?Sized>(&mut self, h: &mut H) -> Result<(), Error> {
        self.cursor().read_all(h)
    }

    pub fn read_markup<H: MarkupHandler<R> + ?Sized>(
        &mut self,
        h: &mut H,
    ) -> Result<Option<u8>, Error> {
        self.cursor().read_markup(h)
    }

    pub fn read_text<H: TextHandler<R> + ?Sized>(
        &mut self,
        h: &mut H,
    ) -> Result<Option<u8>, Error> {
        self.cursor().read_text(h)
    }
}

/// The parser as seen from inside a callback.
pub struct Cursor<'p, R> {
    mt: &'p mut Matchertext<R>,
    st: &'p mut State,
}

impl<R: BufRead> Cursor<'_, R> {
    pub fn position(&self) -> Position {
        self.mt.position()
    }

    /// Read markup to the end of the stream. A stray closer is an error.
    pub fn read_all<H: MarkupHandler<R> + ?Sized>(&mut self, h: &mut H) -> Result<(), Error> {
        while self.read_markup(h)?.is_some() {
            self.mt.raise(grammar(EXPECTED_END_OF_FILE))?;
            self.mt.next_byte()?;
        }
        Ok(())
    }

    /// Read markup up to end of stream or a closer, which is returned
    /// unconsumed.
    pub fn read_markup<H: MarkupHandler<R> + ?Sized>(
        &mut self,
        h: &mut H,
    ) -> Result<Option<u8>, Error> {
        self.read(h, Some(<H as MarkupHandler<R>>::element))
    }

    /// Like [`Cursor::read_markup`] but with no elements: `name[...]`
    /// stays text.
    pub fn read_text<H: TextHandler<R> + ?Sized>(
        &mut self,
        h: &mut H,
    ) -> Result<Option<u8>, Error> {
        self.read(h, None)
    }

    /// Read the optional `{...}` attributes and then the `[...]` content
    /// of element `name`.
    pub fn read_element<H: ElementHandler<R> + ?Sized>(
        &mut self,
        name: &[u8],
        h: &mut H,
    ) -> Result<(), Error> {
        self.st.buf.clear();
        if self.mt.peek_byte()? == Some(b'{') {
            log::trace!("attributes of {}", String::from_utf8_lossy(name));
            let mut attrs = AttributeMode {
                st: &mut *self.st,
                h: &mut *h,
            };
            self.mt.read_pair(&mut attrs, b'{', b'}')?;
            self.expect_value()?;
        }
        h.content(self)
    }

    /// Read the value of attribute `name`, either `[markup]` or a run of
    /// bytes up to whitespace.
    pub fn read_attribute<H: TextHandler<R> + ?Sized>(
        &mut self,
        name: &[u8],
        h: &mut H,
    ) -> Result<(), Error> {
        log::trace!("value of {}", String::from_utf8_lossy(name));
        if self.mt.peek_byte()? == Some(b'[') {
            self.markup_pair(h, None)?;
            if let Some(b) = self.mt.peek_byte()?
                && b != b'}'
                && !is_space(b)
            {
                self.mt.raise(grammar(END_OF_VALUE_EXPECTED))?;
            }
        } else {
            self.mt.read_text(&mut ValueMode { st: &mut *self.st })?;
        }
        self.flush(h, false)
    }

    /// Read the `[...]` content of the current element.
    pub fn read_content<H: MarkupHandler<R> + ?Sized>(&mut self, h: &mut H) -> Result<(), Error> {
        self.markup_pair(h, Some(<H as MarkupHandler<R>>::element))
    }

    fn read<H: TextHandler<R> + ?Sized>(
        &mut self,
        h: &mut H,
        element: Option<ElementFn<H, R>>,
    ) -> Result<Option<u8>, Error> {
        let mut markup = MarkupMode {
            st: &mut *self.st,
            h: &mut *h,
            element,
        };
        let stop = self.mt.read_text(&mut markup)?;
        self.flush(h, false)?;
        Ok(match stop {
            Stop::Closer(c) => Some(c),
            Stop::Eof | Stop::Break => None,
        })
    }

    fn markup_pair<H: TextHandler<R> + ?Sized>(
        &mut self,
        h: &mut H,
        element: Option<ElementFn<H, R>>,
    ) -> Result<(), Error> {
        self.st.saw_matcher(b'[');
        let mut markup = MarkupMode {
            st: &mut *self.st,
            h: &mut *h,
            element,
        };
        self.mt.read_pair(&mut markup, b'[', b']')?;
        self.flush(h, true)?;
        self.st.saw_matcher(b']');
        Ok(())
    }

    fn raw_text<H: TextHandler<R> + ?Sized>(&mut self, h: &mut H) -> Result<(), Error> {
        self.mt.read_pair(
            &mut RawMode {
                buf: &mut self.st.buf,
            },
            b'[',
            b']',
        )?;
        let n = self.st.buf.len();
        self.handle_text(h, n, true)?;
        self.st.saw_matcher(b']');
        Ok(())
    }

    fn comment<H: TextHandler<R> + ?Sized>(&mut self, h: &mut H) -> Result<(), Error> {
        self.mt.read_pair(
            &mut RawMode {
                buf: &mut self.st.buf,
            },
            b'[',
            b']',
        )?;
        let text = self.st.take();
        if !text.is_empty() {
            h.comment(self, &text)?;
        }
        self.st.saw_matcher(b']');
        Ok(())
    }

    fn flush<H: TextHandler<R> + ?Sized>(&mut self, h: &mut H, at_end: bool) -> Result<(), Error> {
        self.st.suck_space(at_end);
        let n = self.st.buf.len();
        self.handle_text(h, n, false)
    }

    /// Deliver the first `n` buffered bytes as text.
    fn handle_text<H: TextHandler<R> + ?Sized>(
        &mut self,
        h: &mut H,
        n: usize,
        raw: bool,
    ) -> Result<(), Error> {
        if n == 0 {
            return Ok(());
        }
        let text = self.st.consume(n);
        h.text(self, &text, raw)
    }

    /// A buffered attribute name with no `=` after it.
    fn expect_value(&mut self) -> Result<(), Error> {
        if !self.st.buf.is_empty() {
            self.mt.raise(grammar(ATTRIBUTE_VALUE_EXPECTED))?;
            self.st.buf.clear();
        }
        Ok(())
    }
}
