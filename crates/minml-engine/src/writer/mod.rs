//! Serialising an AST as MinML, XML or HTML.

pub mod html;
pub mod minml;
pub mod xml;

use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("invalid element name {0:?}")]
    InvalidElementName(String),
    #[error("invalid attribute name {0:?}")]
    InvalidAttributeName(String),
    #[error("attribute {0:?} has a value that is not text or references")]
    InvalidAttributeValue(String),
    #[error("attribute {0:?} found outside an element")]
    AttributeOutsideElement(String),
}

/// Write `text` to `w`, replacing the second dash of every `--`.
fn write_comment_text<W: io::Write>(w: &mut W, text: &str) -> io::Result<()> {
    let bytes = text.as_bytes();
    let mut from = 0;
    let mut i = 0;
    while i + 1 < bytes.len() {
        if bytes[i] == b'-' && bytes[i + 1] == b'-' {
            w.write_all(&bytes[from..=i])?;
            w.write_all(b"&#45;")?;
            i += 2;
            from = i;
        } else {
            i += 1;
        }
    }
    w.write_all(&bytes[from..])
}
