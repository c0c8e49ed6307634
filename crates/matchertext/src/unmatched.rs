//! Finding matchers that break nesting.
//!
//! [`unmatched_offsets`] reports every matcher in a stream that has no
//! partner at its nesting level. Escaping exactly those bytes turns any
//! text into matchertext:
//!
//! ```text
//! a[b{c}d)e      offsets [1, 7]
//!  ^     ^
//! ```
//!
//! An opener whose nested scan ends at end of stream or at the wrong
//! closer is unmatched; the closer that ended the scan is left for the
//! enclosing level to judge.

use std::io::{self, BufRead};

use crate::matcher::{is_closer, is_matched, is_opener};

/// Byte offsets of unmatched matchers, in discovery order until sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Offsets(Vec<i64>);

impl Offsets {
    pub fn sort(&mut self) {
        self.0.sort_unstable();
    }

    pub fn sorted(mut self) -> Self {
        self.sort();
        self
    }

    pub fn as_slice(&self) -> &[i64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_vec(self) -> Vec<i64> {
        self.0
    }
}

impl IntoIterator for Offsets {
    type Item = i64;
    type IntoIter = std::vec::IntoIter<i64>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Scan `reader` and return the offsets of its unmatched matchers.
pub fn unmatched_offsets<R: BufRead>(reader: R) -> io::Result<Offsets> {
    let mut scan = Scan {
        reader,
        offset: 0,
        pending: None,
        found: Vec::new(),
    };
    loop {
        match scan.level()? {
            None => break,
            Some(at) => {
                scan.next()?;
                scan.found.push(at);
            }
        }
    }
    log::trace!("found {} unmatched matchers", scan.found.len());
    Ok(Offsets(scan.found))
}

struct Scan<R> {
    reader: R,
    offset: i64,
    pending: Option<(u8, i64)>,
    found: Vec<i64>,
}

impl<R: BufRead> Scan<R> {
    fn next(&mut self) -> io::Result<Option<(u8, i64)>> {
        if let Some(pending) = self.pending.take() {
            return Ok(Some(pending));
        }
        let b = loop {
            match self.reader.fill_buf() {
                Ok(buf) => break buf.first().copied(),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        };
        Ok(b.map(|b| {
            self.reader.consume(1);
            let at = self.offset;
            self.offset += 1;
            (b, at)
        }))
    }

    /// Scan one nesting level. Returns the offset of the closer that ended
    /// it, left pending, or `None` at end of stream.
    fn level(&mut self) -> io::Result<Option<i64>> {
        while let Some((b, at)) = self.next()? {
            if is_opener(b) {
                match self.level()? {
                    Some(_) if self.pending.is_some_and(|(c, _)| is_matched(b, c)) => {
                        self.pending = None;
                    }
                    _ => self.found.push(at),
                }
            } else if is_closer(b) {
                self.pending = Some((b, at));
                return Ok(Some(at));
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn scan(input: &str) -> Vec<i64> {
        unmatched_offsets(input.as_bytes())
            .unwrap()
            .sorted()
            .into_vec()
    }

    #[rstest]
    #[case("")]
    #[case("()[]{}")]
    #[case("([{}])")]
    #[case("a(b[c{d}e]f)g")]
    #[case("([{([{}])}])")]
    fn balanced_text_has_no_unmatched(#[case] input: &str) {
        assert_eq!(scan(input), Vec::<i64>::new());
    }

    #[rstest]
    #[case("(")]
    #[case(")")]
    #[case("[")]
    #[case("]")]
    #[case("{")]
    #[case("}")]
    fn lone_matcher_is_unmatched(#[case] input: &str) {
        assert_eq!(scan(input), vec![0]);
    }

    #[rstest]
    #[case("[{})", vec![0, 3])]
    #[case("a[b{c}d)e", vec![1, 7])]
    #[case(")}]({[", vec![0, 1, 2, 3, 4, 5])]
    #[case("[{}({}[())])", vec![6, 11])]
    #[case("([{)}}]])", vec![1, 2, 4, 5, 6, 7, 8])]
    fn reports_unmatched_offsets(#[case] input: &str, #[case] expected: Vec<i64>) {
        assert_eq!(scan(input), expected);
    }

    #[test]
    fn offsets_are_unsorted_until_sorted() {
        let offsets = unmatched_offsets(&b"(["[..]).unwrap();
        assert_eq!(offsets.as_slice(), &[1, 0]);
        assert_eq!(offsets.sorted().as_slice(), &[0, 1]);
    }
}
