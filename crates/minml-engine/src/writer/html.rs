//! The HTML tree writer.
//!
//! HTML has no CDATA sections, so raw text is escaped like any other
//! text. Only void elements are written self-closing.

use std::io::Write;

use super::Error;
use super::xml::{Dialect, MarkupWriter};
use crate::ast::Node;

/// Write `nodes` as HTML.
pub fn write<W: Write>(nodes: &[Node], sink: &mut W) -> Result<(), Error> {
    MarkupWriter::new(sink, Dialect::Html).write(nodes)
}

pub fn to_string(nodes: &[Node]) -> Result<String, Error> {
    let mut out = Vec::new();
    write(nodes, &mut out)?;
    Ok(String::from_utf8_lossy(&out).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;

    #[test]
    fn raw_text_is_escaped() {
        let nodes = [
            Node::raw_text("&foo;"),
            Node::raw_text("<mark></up>"),
            Node::raw_text("]]>"),
        ];
        assert_snapshot!(to_string(&nodes).unwrap(), @"&amp;foo;&lt;mark&gt;&lt;/up&gt;]]&gt;");
    }

    #[test]
    fn only_void_elements_self_close() {
        let nodes = [
            Node::element("p", vec![]),
            Node::element("hr", vec![Node::attribute("width", vec![Node::text("100%")])]),
            Node::element(
                "x",
                vec![Node::attribute("y", vec![Node::text("&<>\"'")])],
            ),
        ];
        assert_snapshot!(
            to_string(&nodes).unwrap(),
            @r#"<p></p><hr width="100%"/><x y="&amp;&lt;&gt;&quot;'"></x>"#
        );
    }

    #[test]
    fn void_element_with_content_is_closed() {
        let nodes = [Node::element("br", vec![Node::text("x")])];
        assert_snapshot!(to_string(&nodes).unwrap(), @"<br>x</br>");
    }

    #[test]
    fn links() {
        let nodes = [Node::element(
            "a",
            vec![
                Node::attribute("href", vec![Node::text("foo")]),
                Node::text("link"),
            ],
        )];
        assert_snapshot!(to_string(&nodes).unwrap(), @r#"<a href="foo">link</a>"#);
    }
}
