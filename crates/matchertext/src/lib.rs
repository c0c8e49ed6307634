//! # matchertext
//!
//! Streaming recognition of *matchertext*: text in which the three ASCII
//! matcher pairs, parentheses, square brackets and curly braces, always
//! nest correctly, even inside content that is otherwise literal.
//!
//! ## Why matchertext?
//!
//! A language embedded in matchertext never needs to escape its own
//! delimiters. Finding the end of `[ ... ]` only requires counting
//! matchers, so markup built on top can be parsed in one pass, without
//! backtracking.
//!
//! ```text
//! accepted:  a(b[c{d}e]f)g      ([{}])
//! rejected:  a(b                b)c        a(]b
//!             ^ unmatched opener ^ closer    ^ mismatched
//! ```
//!
//! ## Architecture Overview
//!
//! The [`Parser`] is a byte-at-a-time recursive-descent recognizer with a
//! single byte of pushback. It does not build anything: it drives a
//! [`Handler`] and lets the handler decide what each region means.
//!
//! ```text
//! read_text ──byte──▶ Handler::byte
//!     │
//!     └──opener──▶ Handler::open ──▶ read_pair ──▶ read_text ...
//! ```
//!
//! [`Parser::read_text`] never recurses by itself. On an opener it pushes
//! the byte back and calls [`Handler::open`], which normally calls
//! [`Parser::read_pair`]. This gives layered grammars such as MinML a
//! chance to look at what came before the opener and pick a different
//! handler for the region.
//!
//! The [`unmatched`] scanner is independent of the parser and finds the
//! matchers that would have to be escaped to make arbitrary text valid.
//!
//! ## Module Structure
//!
//! ```text
//! matchertext/
//! ├── lib.rs        # This file - public API
//! ├── matcher.rs    # Byte classification
//! ├── error.rs      # Position, SyntaxError, Error
//! ├── parser.rs     # Parser, Handler, Stop
//! └── unmatched.rs  # Unmatched-matcher scanner
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use matchertext::{SyntaxErrorKind, validate};
//!
//! assert!(validate(b"a(b[c]d)e").is_ok());
//!
//! let err = validate(b"a(b").unwrap_err();
//! let err = err.as_syntax().unwrap();
//! assert_eq!(err.kind, SyntaxErrorKind::UnmatchedOpener(b'('));
//! assert_eq!(err.offset(), 1);
//! ```
//!
//! ## Errors
//!
//! Syntax errors carry the [`Position`] at which they were detected; an
//! unclosed opener reports the opener itself. They end the current parse
//! unless an error hook installed with [`Parser::set_error_hook`] clears
//! them.

pub mod error;
pub mod matcher;
pub mod parser;
pub mod unmatched;

pub use error::{Error, Position, SyntaxError, SyntaxErrorKind};
pub use matcher::{closer_for, is_closer, is_matched, is_matcher, is_opener, opener_for};
pub use parser::{BREAK, CONTINUE, Collect, ErrorHook, Flow, Handler, Parser, Stop, validate};
pub use unmatched::{Offsets, unmatched_offsets};
