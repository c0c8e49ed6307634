//! The MinML tree writer.
//!
//! Text must already be valid matchertext: every literal matcher has to
//! pair up within its own sibling list. [`MatcherTransformer`] can be run
//! first when that is not known to hold.
//!
//! [`MatcherTransformer`]: crate::transform::MatcherTransformer

use std::io::Write;

use super::Error;
use crate::ast::{Attribute, Element, Node};
use crate::syntax::{is_name, is_name_byte, is_space, is_sucking_closer, is_sucking_opener};

/// Write `nodes` as MinML.
pub fn write<W: Write>(nodes: &[Node], sink: &mut W) -> Result<(), Error> {
    let mut w = MinmlWriter::new(sink);
    w.nodes(nodes)?;
    w.out.flush()?;
    Ok(())
}

/// Write `nodes` as MinML into a string.
pub fn to_string(nodes: &[Node]) -> Result<String, Error> {
    let mut out = Vec::new();
    write(nodes, &mut out)?;
    Ok(String::from_utf8_lossy(&out).into_owned())
}

struct MinmlWriter<'w, W> {
    out: &'w mut W,
    /// The last byte written.
    last: u8,
    /// The byte before `last`.
    before: u8,
    /// Whether the output ends in `[` followed by name bytes, which a
    /// closing `]` would turn into a reference.
    pref: bool,
    /// Whether the last byte was a `[ ] { }` after which the reader drops
    /// a leading `> `.
    armed: bool,
}

impl<'w, W: Write> MinmlWriter<'w, W> {
    fn new(out: &'w mut W) -> Self {
        // As if the document sat inside a bracket pair.
        Self {
            out,
            last: b'[',
            before: b'[',
            pref: false,
            armed: false,
        }
    }

    fn nodes(&mut self, nodes: &[Node]) -> Result<(), Error> {
        for node in nodes {
            match node {
                Node::Text { content, raw: true } => {
                    self.open(b"+", &[b"[", content.as_bytes(), b"]"])?
                }
                Node::Text { content, raw: false } => self.text(content, true)?,
                Node::Reference { name } => self.reference(name)?,
                Node::Element(element) => self.element(element)?,
                Node::Comment { text } => self.open(b"-", &[b"[", text.as_bytes(), b"]"])?,
                Node::Attribute(attr) => {
                    return Err(Error::AttributeOutsideElement(attr.name.clone()));
                }
            }
        }
        Ok(())
    }

    /// Literal text. A `]` that would close a reference is separated with
    /// ` <`, and so is a `[` or `{` that would start an element when
    /// `in_markup` is set.
    ///
    /// The reader drops `> ` after a `[ ] { }` and ` <` before one, so text
    /// that would lose either gets a spare copy for the reader to drop.
    fn text(&mut self, text: &str, in_markup: bool) -> Result<(), Error> {
        for &b in text.as_bytes() {
            if self.armed && b == b'>' {
                self.bytes(b"> ")?;
            }
            let false_element = in_markup && is_sucking_opener(b) && is_name_byte(self.last);
            let false_reference = b == b']' && self.pref && is_name_byte(self.last);
            let lost_space =
                (is_sucking_opener(b) || is_sucking_closer(b)) && self.ends_in_sucker();
            if false_element || false_reference || lost_space {
                self.bytes(b" <")?;
            }
            self.byte(b)?;
        }
        Ok(())
    }

    /// Whether the output ends in whitespace and `<`.
    fn ends_in_sucker(&self) -> bool {
        is_space(self.before) && self.last == b'<'
    }

    /// The `]` ending element content or an attribute value.
    fn close(&mut self) -> Result<(), Error> {
        if self.ends_in_sucker() {
            self.bytes(b" <")?;
        }
        self.byte(b']')
    }

    fn reference(&mut self, name: &str) -> Result<(), Error> {
        if is_name_byte(self.last) {
            self.bytes(b" <")?;
        }
        self.bytes(b"[")?;
        self.bytes(name.as_bytes())?;
        self.bytes(b"]")
    }

    /// Write `name` and then `rest`, separating the name from preceding
    /// name bytes.
    fn open(&mut self, name: &[u8], rest: &[&[u8]]) -> Result<(), Error> {
        if is_name_byte(self.last) {
            self.bytes(b" <")?;
        }
        self.bytes(name)?;
        for part in rest {
            self.bytes(part)?;
        }
        Ok(())
    }

    fn element(&mut self, element: &Element) -> Result<(), Error> {
        let name = &element.name;
        let valid = !name.is_empty()
            && name.bytes().all(is_name_byte)
            && name != "+"
            && name != "-";
        // A leading `<` is only kept after another `<`, and that pair
        // takes any whitespace before it along.
        let sucker = name.starts_with('<');
        if !valid || (sucker && is_space(self.last)) {
            return Err(Error::InvalidElementName(name.clone()));
        }
        if sucker {
            self.bytes(b" <")?;
            self.bytes(name.as_bytes())?;
        } else {
            self.open(name.as_bytes(), &[])?;
        }

        if !element.attributes.is_empty() {
            self.byte(b'{')?;
            for (i, attr) in element.attributes.iter().enumerate() {
                if i > 0 {
                    self.byte(b' ')?;
                }
                self.attribute(attr)?;
            }
            self.byte(b'}')?;
        }

        self.byte(b'[')?;
        self.nodes(&element.content)?;
        self.close()
    }

    fn attribute(&mut self, attr: &Attribute) -> Result<(), Error> {
        if !is_name(attr.name.as_bytes()) {
            return Err(Error::InvalidAttributeName(attr.name.clone()));
        }
        self.bytes(attr.name.as_bytes())?;
        self.bytes(b"=[")?;
        for node in &attr.value {
            match node {
                Node::Text { content, .. } => self.text(content, false)?,
                Node::Reference { name } => self.reference(name)?,
                _ => return Err(Error::InvalidAttributeValue(attr.name.clone())),
            }
        }
        self.close()
    }

    fn bytes(&mut self, bytes: &[u8]) -> Result<(), Error> {
        for &b in bytes {
            self.byte(b)?;
        }
        Ok(())
    }

    fn byte(&mut self, b: u8) -> Result<(), Error> {
        self.before = self.last;
        self.last = b;
        self.pref = b == b'[' || (self.pref && is_name_byte(b));
        self.armed = is_sucking_opener(b) || is_sucking_closer(b);
        self.out.write_all(&[b])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::parse;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(vec![Node::text("a"), Node::reference("x")], "a <[x]")]
    #[case(vec![Node::text("a"), Node::raw_text("b")], "a <+[b]")]
    #[case(vec![Node::text("a"), Node::comment("c")], "a <-[c]")]
    #[case(vec![Node::text("a "), Node::reference("x")], "a [x]")]
    #[case(vec![Node::reference("x"), Node::text("[y]")], "[x][y <]")]
    fn pads_ambiguous_adjacency(#[case] nodes: Vec<Node>, #[case] expected: &str) {
        assert_eq!(to_string(&nodes).unwrap(), expected);
    }

    #[rstest]
    #[case(vec![Node::text("a"), Node::reference("x")])]
    #[case(vec![Node::text("x <"), Node::element("p", vec![])])]
    #[case(vec![Node::text("x<"), Node::element("p", vec![])])]
    #[case(vec![Node::element("a", vec![Node::text("[b]c{d}")])])]
    #[case(vec![Node::element("a", vec![Node::text("{> x}[<]")])])]
    #[case(vec![Node::element("p", vec![]), Node::text("> <"), Node::element("q", vec![])])]
    #[case(vec![Node::element("<p", vec![])])]
    #[case(vec![Node::text("x"), Node::element("<", vec![Node::text("> y")])])]
    fn padding_reads_back(#[case] nodes: Vec<Node>) {
        let written = to_string(&nodes).unwrap();
        assert_eq!(parse(written.as_bytes()).unwrap(), nodes, "via {written:?}");
    }

    #[rstest]
    #[case(vec![Node::element("p", vec![]), Node::text("> x")], "p[]> > x")]
    #[case(vec![Node::element("p", vec![Node::text("x <")])], "p[x < <]")]
    #[case(vec![Node::text("[>]")], "[> >]")]
    #[case(vec![Node::text("[ <]")], "[ < <]")]
    #[case(vec![Node::reference("x"), Node::text("> y")], "[x]> > y")]
    #[case(vec![Node::text("[amp]> x")], "[amp <]> > x")]
    #[case(vec![Node::text("> x")], "> x")]
    fn keeps_space_the_reader_would_drop(#[case] nodes: Vec<Node>, #[case] expected: &str) {
        let written = to_string(&nodes).unwrap();
        assert_eq!(written, expected);
        assert_eq!(parse(written.as_bytes()).unwrap(), nodes);
    }

    #[rstest]
    #[case(vec![Node::text("x <")])]
    #[case(vec![Node::text("> x")])]
    #[case(vec![Node::text("a <[b]")])]
    #[case(vec![Node::reference("amp"), Node::text(">")])]
    fn attribute_values_keep_their_space(#[case] value: Vec<Node>) {
        let nodes = vec![Node::element("p", vec![Node::attribute("a", value)])];
        let written = to_string(&nodes).unwrap();
        assert_eq!(parse(written.as_bytes()).unwrap(), nodes, "via {written:?}");
    }

    #[rstest]
    #[case("")]
    #[case("+")]
    #[case("-")]
    #[case("a b")]
    #[case("a[")]
    fn rejects_bad_element_names(#[case] name: &str) {
        let err = to_string(&[Node::element(name, vec![])]).unwrap_err();
        assert!(matches!(err, Error::InvalidElementName(n) if n == name));
    }

    #[test]
    fn rejects_sucker_names_after_whitespace() {
        let nodes = [Node::text("x "), Node::element("<p", vec![])];
        assert!(matches!(
            to_string(&nodes),
            Err(Error::InvalidElementName(name)) if name == "<p"
        ));
    }

    #[test]
    fn rejects_elements_in_attribute_values() {
        let nodes = [Node::element(
            "p",
            vec![Node::attribute("a", vec![Node::element("b", vec![])])],
        )];
        assert!(matches!(
            to_string(&nodes),
            Err(Error::InvalidAttributeValue(name)) if name == "a"
        ));
    }

    #[test]
    fn rejects_bad_attribute_names() {
        let nodes = [Node::element("p", vec![Node::attribute("1x", vec![])])];
        assert!(matches!(
            to_string(&nodes),
            Err(Error::InvalidAttributeName(name)) if name == "1x"
        ));
    }

    #[test]
    fn rejects_stray_attributes() {
        assert!(matches!(
            to_string(&[Node::attribute("a", vec![])]),
            Err(Error::AttributeOutsideElement(name)) if name == "a"
        ));
    }
}
