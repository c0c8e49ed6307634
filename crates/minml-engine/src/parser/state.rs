use crate::syntax::{is_sucking_closer, is_sucking_opener, scan_post_space, scan_pre_space};

/// Bytes read but not yet delivered, shared by every nested read.
#[derive(Debug, Default)]
pub(crate) struct State {
    pub(crate) buf: Vec<u8>,
    /// The last `[ ] { }` seen, if nothing has been sucked since.
    last: Option<u8>,
    /// Length of `buf` when `last` was seen.
    last_at: usize,
    /// Number of times buffered text has been handed out.
    flushes: usize,
}

impl State {
    pub(crate) fn reset(&mut self) {
        self.buf.clear();
        self.last = None;
        self.last_at = 0;
        self.flushes = 0;
    }

    pub(crate) fn saw_matcher(&mut self, b: u8) {
        if is_sucking_opener(b) || is_sucking_closer(b) {
            self.last = Some(b);
            self.last_at = self.buf.len();
        }
    }

    pub(crate) fn last_matcher(&self) -> Option<u8> {
        self.last
    }

    pub(crate) fn flushes(&self) -> usize {
        self.flushes
    }

    /// Remove the first `n` bytes and return them.
    pub(crate) fn consume(&mut self, n: usize) -> Vec<u8> {
        self.flushes += 1;
        let rest = self.buf.split_off(n);
        std::mem::replace(&mut self.buf, rest)
    }

    pub(crate) fn take(&mut self) -> Vec<u8> {
        self.flushes += 1;
        std::mem::take(&mut self.buf)
    }

    /// Elide `> ` after the last matcher and, when `at_end`, ` <` at the
    /// end of the buffer. Returns whether anything was removed.
    pub(crate) fn suck_space(&mut self, at_end: bool) -> bool {
        let mut sucked = false;
        if self.last.take().is_some() {
            let at = self.last_at;
            let after = &self.buf[at..];
            let n = scan_post_space(after);
            if n > 0 && at_end && n == after.len() - 1 && after[n] == b'<' {
                // `> <` between two constructs vanishes entirely.
                self.buf.truncate(at);
                sucked = true;
            } else if n > 0 {
                self.buf.drain(at..at + n);
                sucked = true;
            }
        }
        if at_end {
            let len = scan_pre_space(&self.buf);
            if len < self.buf.len() {
                self.buf.truncate(len);
                sucked = true;
            }
        }
        sucked
    }
}
