//! Parsing MinML into an AST.

use std::io::BufRead;
use std::mem;

use crate::ast::{Attribute, Element, Node};
use crate::parser::{Cursor, ElementHandler, Error, MarkupHandler, Parser, TextHandler};
use crate::transform::{self, Transformer};

/// Parses a stream into a node list, running transformers bottom-up as
/// each list completes.
pub struct TreeParser<R> {
    parser: Parser<R>,
    transformers: Vec<Box<dyn Transformer>>,
}

impl<'a> TreeParser<&'a [u8]> {
    pub fn from_bytes(bytes: &'a [u8]) -> Self {
        Self::new(bytes)
    }
}

impl<R: BufRead> TreeParser<R> {
    pub fn new(reader: R) -> Self {
        Self {
            parser: Parser::new(reader),
            transformers: Vec::new(),
        }
    }

    /// Add a transformer. Transformers run in the order they were added.
    pub fn with_transformer(mut self, transformer: impl Transformer + 'static) -> Self {
        self.transformers.push(Box::new(transformer));
        self
    }

    pub fn with_transformers(mut self, transformers: Vec<Box<dyn Transformer>>) -> Self {
        self.transformers.extend(transformers);
        self
    }

    /// Access to the underlying parser, e.g. to install an error hook.
    pub fn parser_mut(&mut self) -> &mut Parser<R> {
        &mut self.parser
    }

    pub fn reset(&mut self, reader: R) {
        self.parser.reset(reader);
    }

    pub fn parse(&mut self) -> Result<Vec<Node>, Error> {
        let mut builder = Builder {
            nodes: Vec::new(),
            attributes: Vec::new(),
            transformers: &self.transformers,
        };
        self.parser.read_all(&mut builder)?;
        Ok(transform::apply(&self.transformers, builder.nodes))
    }
}

/// Parse `bytes` with no transformers.
pub fn parse(bytes: &[u8]) -> Result<Vec<Node>, Error> {
    TreeParser::from_bytes(bytes).parse()
}

struct Builder<'t> {
    nodes: Vec<Node>,
    attributes: Vec<Node>,
    transformers: &'t [Box<dyn Transformer>],
}

impl Builder<'_> {
    fn transform(&self, nodes: Vec<Node>) -> Vec<Node> {
        transform::apply(self.transformers, nodes)
    }
}

fn string(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

impl<R: BufRead> TextHandler<R> for Builder<'_> {
    fn text(&mut self, _: &mut Cursor<'_, R>, text: &[u8], raw: bool) -> Result<(), Error> {
        self.nodes.push(Node::Text {
            content: string(text),
            raw,
        });
        Ok(())
    }

    fn reference(&mut self, _: &mut Cursor<'_, R>, name: &[u8]) -> Result<(), Error> {
        self.nodes.push(Node::reference(string(name)));
        Ok(())
    }

    fn comment(&mut self, _: &mut Cursor<'_, R>, text: &[u8]) -> Result<(), Error> {
        self.nodes.push(Node::comment(string(text)));
        Ok(())
    }
}

impl<R: BufRead> MarkupHandler<R> for Builder<'_> {
    fn element(&mut self, p: &mut Cursor<'_, R>, name: &[u8]) -> Result<(), Error> {
        let outer_nodes = mem::take(&mut self.nodes);
        let outer_attributes = mem::take(&mut self.attributes);
        let result = p.read_element(name, self);
        let content = mem::replace(&mut self.nodes, outer_nodes);
        let attributes = mem::replace(&mut self.attributes, outer_attributes);
        result?;

        let attributes = self
            .transform(attributes)
            .into_iter()
            .map(|node| match node {
                Node::Attribute(attr) => attr,
                other => panic!("transformed attribute into non-attribute: {other:?}"),
            })
            .collect::<Vec<Attribute>>();
        let content = self.transform(content);
        self.nodes.push(Node::Element(Element {
            name: string(name),
            attributes,
            content,
        }));
        Ok(())
    }
}

impl<R: BufRead> ElementHandler<R> for Builder<'_> {
    fn attribute(&mut self, p: &mut Cursor<'_, R>, name: &[u8]) -> Result<(), Error> {
        let outer_nodes = mem::take(&mut self.nodes);
        let result = p.read_attribute(name, self);
        let value = mem::replace(&mut self.nodes, outer_nodes);
        result?;

        let value = self.transform(value);
        self.attributes.push(Node::attribute(string(name), value));
        Ok(())
    }

    fn content(&mut self, p: &mut Cursor<'_, R>) -> Result<(), Error> {
        p.read_content(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn transformers_see_children_first() {
        let seen = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
        let log = seen.clone();
        let record = move |nodes: Vec<Node>| -> Vec<Node> {
            log.borrow_mut().push(nodes.len());
            nodes
        };
        TreeParser::from_bytes(b"a[b[c[]] d]")
            .with_transformer(record)
            .parse()
            .unwrap();
        // Attributes then content of c, b and a, then the document.
        assert_eq!(*seen.borrow(), vec![0, 0, 0, 1, 0, 2, 1]);
    }

    #[test]
    fn transformers_run_in_order() {
        let first = |mut nodes: Vec<Node>| -> Vec<Node> {
            nodes.push(Node::text("1"));
            nodes
        };
        let second = |mut nodes: Vec<Node>| -> Vec<Node> {
            nodes.push(Node::text("2"));
            nodes
        };
        let nodes = TreeParser::from_bytes(b"")
            .with_transformer(first)
            .with_transformer(second)
            .parse()
            .unwrap();
        assert_eq!(nodes, vec![Node::text("1"), Node::text("2")]);
    }

    #[test]
    fn attribute_values_are_transformed() {
        let upper = |nodes: Vec<Node>| -> Vec<Node> {
            nodes
                .into_iter()
                .map(|n| match n {
                    Node::Text { content, raw } => Node::Text {
                        content: content.to_uppercase(),
                        raw,
                    },
                    other => other,
                })
                .collect()
        };
        let nodes = TreeParser::from_bytes(b"p{a=x}[]")
            .with_transformer(upper)
            .parse()
            .unwrap();
        assert_eq!(
            nodes,
            vec![Node::element(
                "p",
                vec![Node::attribute("a", vec![Node::text("X")])]
            )]
        );
    }

    #[test]
    #[should_panic(expected = "transformed attribute into non-attribute")]
    fn attribute_contract_is_enforced() {
        let flatten = |nodes: Vec<Node>| -> Vec<Node> {
            nodes
                .into_iter()
                .map(|n| match n {
                    Node::Attribute(_) => Node::text("oops"),
                    other => other,
                })
                .collect()
        };
        let _ = TreeParser::from_bytes(b"p{a=x}[]")
            .with_transformer(flatten)
            .parse();
    }

    #[test]
    fn reset_parses_a_new_stream() {
        let mut parser = TreeParser::from_bytes(b"a");
        assert_eq!(parser.parse().unwrap(), vec![Node::text("a")]);
        parser.reset(&b"b[]"[..]);
        assert_eq!(parser.parse().unwrap(), vec![Node::element("b", vec![])]);
    }
}
