//! The matchertext handlers behind each MinML reading mode.
//!
//! Every re-entrant read builds a fresh mode value on the stack that
//! borrows the shared [`State`] and the client handler currently in
//! charge. Returning from the read drops it, which puts the caller's mode
//! back in control.

use std::io::BufRead;

use matchertext::{BREAK, CONTINUE, Error, Flow, Handler, Parser as Matchertext, is_opener};

use super::state::State;
use super::{
    ATTRIBUTE_NAME_EXPECTED, Cursor, ElementHandler, INVALID_ATTRIBUTE_NAME, TextHandler, grammar,
};
use crate::syntax::{
    is_name, is_reference, is_space, is_sucking_closer, is_sucking_opener, scan_starter,
};

pub(crate) type ElementFn<H, R> = fn(&mut H, &mut Cursor<'_, R>, &[u8]) -> Result<(), Error>;

/// Markup: text, references and, when `element` is set, elements.
pub(crate) struct MarkupMode<'a, R, H: ?Sized> {
    pub(crate) st: &'a mut State,
    pub(crate) h: &'a mut H,
    pub(crate) element: Option<ElementFn<H, R>>,
}

impl<R: BufRead, H: TextHandler<R> + ?Sized> MarkupMode<'_, R, H> {
    /// A pair that did not start an element. It stays literal text unless
    /// it turns out to be a `[reference]`.
    fn literal_pair(&mut self, mt: &mut Matchertext<R>, o: u8, c: u8) -> Result<(), Error> {
        self.st.suck_space(is_sucking_opener(o));
        let start = self.st.buf.len();
        let flushes = self.st.flushes();
        self.st.buf.push(o);
        self.st.saw_matcher(o);

        mt.read_pair(self, o, c)?;

        // Only a `[` with nothing nested and nothing sucked since.
        let mut maybe_ref = o == b'[' && self.st.last_matcher() == Some(b'[');
        maybe_ref = !self.st.suck_space(is_sucking_closer(c)) && maybe_ref;
        self.st.buf.push(c);
        self.st.saw_matcher(c);
        if self.st.flushes() != flushes {
            // Something nested was delivered, taking the opener with it.
            return Ok(());
        }

        let pair = &self.st.buf[start..];
        if pair.len() == 5
            && pair[0] == b'['
            && is_opener(pair[1])
            && matches!(pair[2], b'<' | b'>')
        {
            // Matcher escapes such as `[(<)]`.
            maybe_ref = true;
        }
        if !maybe_ref {
            return Ok(());
        }
        let name = &pair[1..pair.len() - 1];
        if matches!(name, [b'<' | b'>']) || !is_reference(name) {
            return Ok(());
        }
        let name = name.to_vec();

        let mut p = Cursor {
            mt,
            st: &mut *self.st,
        };
        p.handle_text(self.h, start, false)?;
        p.st.buf.clear();
        p.st.saw_matcher(c);
        log::trace!("reference [{}]", String::from_utf8_lossy(&name));
        self.h.reference(&mut p, &name)
    }
}

impl<R: BufRead, H: TextHandler<R> + ?Sized> Handler<R> for MarkupMode<'_, R, H> {
    fn byte(&mut self, _: &mut Matchertext<R>, b: u8) -> Result<Flow, Error> {
        self.st.buf.push(b);
        Ok(CONTINUE)
    }

    fn open(&mut self, mt: &mut Matchertext<R>, o: u8, c: u8) -> Result<(), Error> {
        if o != b'('
            && let Some(element) = self.element
            && let Some(at) = scan_starter(&self.st.buf)
        {
            let name = self.st.buf.split_off(at);
            self.st.suck_space(true);
            let mut p = Cursor {
                mt,
                st: &mut *self.st,
            };
            let pending = p.st.buf.len();
            p.handle_text(self.h, pending, false)?;
            return match name.as_slice() {
                b"+" => p.raw_text(self.h),
                b"-" => p.comment(self.h),
                _ => {
                    log::trace!("element {}", String::from_utf8_lossy(&name));
                    element(self.h, &mut p, &name)
                }
            };
        }
        self.literal_pair(mt, o, c)
    }
}

/// Inside `{...}`: attribute names, each ended by `=`.
pub(crate) struct AttributeMode<'a, H: ?Sized> {
    pub(crate) st: &'a mut State,
    pub(crate) h: &'a mut H,
}

impl<R: BufRead, H: ElementHandler<R> + ?Sized> Handler<R> for AttributeMode<'_, H> {
    fn byte(&mut self, mt: &mut Matchertext<R>, b: u8) -> Result<Flow, Error> {
        if is_space(b) {
            Cursor {
                mt,
                st: &mut *self.st,
            }
            .expect_value()?;
        } else if b != b'=' {
            self.st.buf.push(b);
        } else {
            let name = self.st.take();
            if !is_name(&name) {
                mt.raise(grammar(INVALID_ATTRIBUTE_NAME))?;
            }
            let mut p = Cursor {
                mt,
                st: &mut *self.st,
            };
            self.h.attribute(&mut p, &name)?;
        }
        Ok(CONTINUE)
    }

    fn open(&mut self, mt: &mut Matchertext<R>, o: u8, c: u8) -> Result<(), Error> {
        mt.raise(grammar(ATTRIBUTE_NAME_EXPECTED))?;
        mt.read_pair(&mut RawMode { buf: &mut Vec::new() }, o, c)
    }
}

/// An unquoted attribute value, ended by whitespace.
pub(crate) struct ValueMode<'a> {
    pub(crate) st: &'a mut State,
}

impl<R: BufRead> Handler<R> for ValueMode<'_> {
    fn byte(&mut self, _: &mut Matchertext<R>, b: u8) -> Result<Flow, Error> {
        if is_space(b) {
            return Ok(BREAK);
        }
        self.st.buf.push(b);
        Ok(CONTINUE)
    }

    fn open(&mut self, mt: &mut Matchertext<R>, o: u8, c: u8) -> Result<(), Error> {
        RawMode {
            buf: &mut self.st.buf,
        }
        .open(mt, o, c)
    }
}

/// Copies bytes and nested pairs verbatim.
pub(crate) struct RawMode<'a> {
    pub(crate) buf: &'a mut Vec<u8>,
}

impl<R: BufRead> Handler<R> for RawMode<'_> {
    fn byte(&mut self, _: &mut Matchertext<R>, b: u8) -> Result<Flow, Error> {
        self.buf.push(b);
        Ok(CONTINUE)
    }

    fn open(&mut self, mt: &mut Matchertext<R>, o: u8, c: u8) -> Result<(), Error> {
        self.buf.push(o);
        mt.read_pair(self, o, c)?;
        self.buf.push(c);
        Ok(())
    }
}
