use super::Transformer;
use crate::ast::{Element, Node};

/// Turns `'[...]` and `"[...]` elements into curly-quoted text.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuoteTransformer;

impl Transformer for QuoteTransformer {
    fn transform(&self, nodes: Vec<Node>) -> Vec<Node> {
        let mut out = Vec::with_capacity(nodes.len());
        for node in nodes {
            match node {
                Node::Element(Element { name, content, .. }) if name == "'" || name == "\"" => {
                    let (open, close) = if name == "'" {
                        ("\u{2018}", "\u{2019}")
                    } else {
                        ("\u{201C}", "\u{201D}")
                    };
                    out.push(Node::text(open));
                    out.extend(content);
                    out.push(Node::text(close));
                }
                other => out.push(other),
            }
        }
        out
    }
}
