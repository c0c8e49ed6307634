use std::io::{self, BufRead, Read};

use matchertext::unmatched_offsets;

use super::Transformer;
use crate::ast::Node;

/// Names the reference that replaces an unmatched matcher byte.
pub type Escaper = fn(u8) -> String;

/// `(` becomes `[#40]` and so on.
pub fn numeric_escaper(b: u8) -> String {
    format!("#{b}")
}

/// `(` becomes `[(<)]`, `)` becomes `[(>)]` and so on.
pub fn minml_escaper(b: u8) -> String {
    match b {
        b'(' => "(<)",
        b')' => "(>)",
        b'[' => "[<]",
        b']' => "[>]",
        b'{' => "{<}",
        b'}' => "{>}",
        _ => return numeric_escaper(b),
    }
    .to_string()
}

/// Replaces unmatched matchers in text with references so that the
/// result can be written as matchertext.
///
/// Matching is done across the whole sibling list: `a(` and `)b`
/// separated by an element still pair up.
#[derive(Debug, Clone, Copy)]
pub struct MatcherTransformer {
    escaper: Escaper,
}

impl MatcherTransformer {
    pub fn new(escaper: Escaper) -> Self {
        Self { escaper }
    }

    pub fn minml() -> Self {
        Self::new(minml_escaper)
    }
}

impl Default for MatcherTransformer {
    fn default() -> Self {
        Self::new(numeric_escaper)
    }
}

impl Transformer for MatcherTransformer {
    fn transform(&self, nodes: Vec<Node>) -> Vec<Node> {
        // Reading from memory cannot fail.
        let Ok(offsets) = unmatched_offsets(TextReader::new(&nodes)) else {
            return nodes;
        };
        if offsets.is_empty() {
            return nodes;
        }
        log::debug!("escaping {} unmatched matchers", offsets.len());

        let mut offsets = offsets.sorted().into_iter().peekable();
        let mut out = Vec::with_capacity(nodes.len() + 2 * offsets.len());
        let mut base = 0i64;
        for node in nodes {
            let Node::Text { content, raw } = node else {
                out.push(node);
                continue;
            };
            let end = base + content.len() as i64;
            let mut start = 0;
            while let Some(&at) = offsets.peek()
                && at < end
            {
                offsets.next();
                let i = (at - base) as usize;
                if i > start {
                    out.push(Node::Text {
                        content: content[start..i].to_string(),
                        raw,
                    });
                }
                out.push(Node::reference((self.escaper)(content.as_bytes()[i])));
                start = i + 1;
            }
            if start == 0 {
                out.push(Node::Text { content, raw });
            } else if start < content.len() {
                out.push(Node::Text {
                    content: content[start..].to_string(),
                    raw,
                });
            }
            base = end;
        }
        out
    }
}

/// Reads the text nodes of a sibling list back to back.
struct TextReader<'a> {
    texts: Vec<&'a [u8]>,
    index: usize,
    pos: usize,
}

impl<'a> TextReader<'a> {
    fn new(nodes: &'a [Node]) -> Self {
        let texts = nodes
            .iter()
            .filter_map(|node| match node {
                Node::Text { content, .. } => Some(content.as_bytes()),
                _ => None,
            })
            .collect();
        Self {
            texts,
            index: 0,
            pos: 0,
        }
    }
}

impl Read for TextReader<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let available = self.fill_buf()?;
        let n = available.len().min(buf.len());
        buf[..n].copy_from_slice(&available[..n]);
        self.consume(n);
        Ok(n)
    }
}

impl BufRead for TextReader<'_> {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        while let Some(text) = self.texts.get(self.index)
            && self.pos >= text.len()
        {
            self.index += 1;
            self.pos = 0;
        }
        Ok(self
            .texts
            .get(self.index)
            .map_or(&[][..], |text| &text[self.pos..]))
    }

    fn consume(&mut self, amt: usize) {
        self.pos += amt;
    }
}
