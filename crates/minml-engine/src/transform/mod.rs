//! AST rewriting applied while a tree is being built.
//!
//! A [`Transformer`] gets every sibling list as soon as it is complete:
//! each attribute value, each element's attributes, each element's
//! content and finally the document itself. Children are always
//! transformed before their parent.

mod entity;
mod matcher;
mod quote;

pub use entity::EntityTransformer;
pub use matcher::{Escaper, MatcherTransformer, minml_escaper, numeric_escaper};
pub use quote::QuoteTransformer;

use crate::ast::Node;

pub trait Transformer {
    fn transform(&self, nodes: Vec<Node>) -> Vec<Node>;
}

impl<F> Transformer for F
where
    F: Fn(Vec<Node>) -> Vec<Node>,
{
    fn transform(&self, nodes: Vec<Node>) -> Vec<Node> {
        self(nodes)
    }
}

/// Run `transformers` over `nodes` in order.
pub fn apply(transformers: &[Box<dyn Transformer>], nodes: Vec<Node>) -> Vec<Node> {
    transformers
        .iter()
        .fold(nodes, |nodes, t| t.transform(nodes))
}
