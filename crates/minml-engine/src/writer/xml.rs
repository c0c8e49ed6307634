//! The XML tree writer, which the HTML writer shares.

use std::io::Write;

use html_escape::{encode_double_quoted_attribute, encode_text};

use super::{Error, write_comment_text};
use crate::ast::{Element, Node};

/// Write `nodes` as XML.
pub fn write<W: Write>(nodes: &[Node], sink: &mut W) -> Result<(), Error> {
    MarkupWriter::new(sink, Dialect::Xml).write(nodes)
}

pub fn to_string(nodes: &[Node]) -> Result<String, Error> {
    let mut out = Vec::new();
    write(nodes, &mut out)?;
    Ok(String::from_utf8_lossy(&out).into_owned())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Dialect {
    Xml,
    Html,
}

const CDATA_TERMINATOR_SPLIT: &str = "]]]]><![CDATA[>";

/// HTML elements that may be written self-closing.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

pub(super) struct MarkupWriter<'w, W> {
    out: &'w mut W,
    dialect: Dialect,
}

impl<'w, W: Write> MarkupWriter<'w, W> {
    pub(super) fn new(out: &'w mut W, dialect: Dialect) -> Self {
        Self { out, dialect }
    }

    pub(super) fn write(mut self, nodes: &[Node]) -> Result<(), Error> {
        self.nodes(nodes)?;
        self.out.flush()?;
        Ok(())
    }

    fn nodes(&mut self, nodes: &[Node]) -> Result<(), Error> {
        for node in nodes {
            match node {
                Node::Text { content, raw: true } if self.dialect == Dialect::Xml => {
                    self.cdata(content)?
                }
                Node::Text { content, .. } => self.out.write_all(encode_text(content).as_bytes())?,
                Node::Reference { name } => self.reference(name)?,
                Node::Element(element) => self.element(element)?,
                Node::Comment { text } => {
                    self.out.write_all(b"<!--")?;
                    write_comment_text(self.out, text)?;
                    self.out.write_all(b"-->")?;
                }
                Node::Attribute(attr) => {
                    return Err(Error::AttributeOutsideElement(attr.name.clone()));
                }
            }
        }
        Ok(())
    }

    fn cdata(&mut self, text: &str) -> Result<(), Error> {
        if text.is_empty() {
            return Ok(());
        }
        self.out.write_all(b"<![CDATA[")?;
        let mut parts = text.split("]]>");
        if let Some(first) = parts.next() {
            self.out.write_all(first.as_bytes())?;
        }
        for part in parts {
            self.out.write_all(CDATA_TERMINATOR_SPLIT.as_bytes())?;
            self.out.write_all(part.as_bytes())?;
        }
        self.out.write_all(b"]]>")?;
        Ok(())
    }

    fn reference(&mut self, name: &str) -> Result<(), Error> {
        write!(self.out, "&{name};")?;
        Ok(())
    }

    fn element(&mut self, element: &Element) -> Result<(), Error> {
        let name = &element.name;
        write!(self.out, "<{name}")?;
        for attr in &element.attributes {
            write!(self.out, " {}=\"", attr.name)?;
            for node in &attr.value {
                match node {
                    Node::Text { content, .. } => self
                        .out
                        .write_all(encode_double_quoted_attribute(content).as_bytes())?,
                    Node::Reference { name } => self.reference(name)?,
                    _ => return Err(Error::InvalidAttributeValue(attr.name.clone())),
                }
            }
            self.out.write_all(b"\"")?;
        }

        if element.content.is_empty() && self.self_closing(name) {
            self.out.write_all(b"/>")?;
            return Ok(());
        }
        self.out.write_all(b">")?;
        self.nodes(&element.content)?;
        write!(self.out, "</{name}>")?;
        Ok(())
    }

    fn self_closing(&self, name: &str) -> bool {
        match self.dialect {
            Dialect::Xml => true,
            Dialect::Html => VOID_ELEMENTS.contains(&name),
        }
    }
}
