//! The MinML abstract syntax tree.
//!
//! Nodes are plain owned values. They compare by structure and carry no
//! identity, so cloning a node yields an independent copy that can be
//! extended or truncated without touching the original.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Literal text. `raw` marks text from a `+[...]` section.
    Text { content: String, raw: bool },
    /// A character reference, without its brackets.
    Reference { name: String },
    Element(Element),
    Attribute(Attribute),
    Comment { text: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<Attribute>,
    pub content: Vec<Node>,
}

/// An attribute. Its value holds only text and references.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Attribute {
    pub name: String,
    pub value: Vec<Node>,
}

impl Node {
    pub fn text(content: impl Into<String>) -> Self {
        Node::Text {
            content: content.into(),
            raw: false,
        }
    }

    pub fn raw_text(content: impl Into<String>) -> Self {
        Node::Text {
            content: content.into(),
            raw: true,
        }
    }

    pub fn reference(name: impl Into<String>) -> Self {
        Node::Reference { name: name.into() }
    }

    pub fn comment(text: impl Into<String>) -> Self {
        Node::Comment { text: text.into() }
    }

    pub fn attribute(name: impl Into<String>, value: Vec<Node>) -> Self {
        Node::Attribute(Attribute {
            name: name.into(),
            value,
        })
    }

    /// Build an element from a flat node list: leading attribute nodes
    /// become its attributes and the rest its content.
    pub fn element(name: impl Into<String>, nodes: Vec<Node>) -> Self {
        let mut nodes = nodes.into_iter().peekable();
        let mut attributes = Vec::new();
        while let Some(Node::Attribute(_)) = nodes.peek() {
            if let Some(Node::Attribute(attr)) = nodes.next() {
                attributes.push(attr);
            }
        }
        Node::Element(Element {
            name: name.into(),
            attributes,
            content: nodes.collect(),
        })
    }

    pub fn is_attribute(&self) -> bool {
        matches!(self, Node::Attribute(_))
    }

    /// The content of a non-raw text node.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Node::Text {
                content,
                raw: false,
            } => Some(content),
            _ => None,
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl From<Attribute> for Node {
    fn from(attr: Attribute) -> Self {
        Node::Attribute(attr)
    }
}

/// Deep structural equality of two node sequences.
pub fn equal(a: &[Node], b: &[Node]) -> bool {
    a == b
}
