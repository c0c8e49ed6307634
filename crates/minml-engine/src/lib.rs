//! # minml-engine
//!
//! Parsing, transforming and writing MinML, a minimalist markup language
//! built on matchertext.
//!
//! ## Why MinML?
//!
//! MinML keeps the structure of XML and HTML but drops the angle-bracket
//! tags. An element is a name directly followed by a bracketed body, and
//! everything else is text:
//!
//! ```text
//! p[Some i[italic] text with a{href=[https://example.org]}[a link].]
//! ```
//!
//! Because brackets always match, an element's end is found by counting
//! brackets, and arbitrary code or markup can be embedded without escaping.
//!
//! ## Architecture Overview
//!
//! ```text
//! bytes ──▶ parser::Parser ──callbacks──▶ tree::TreeParser ──▶ Vec<Node>
//!                                               │
//!                                   transform::Transformer (bottom-up)
//!
//! Vec<Node> ──▶ writer::{minml, xml, html}::write ──▶ bytes
//! ```
//!
//! - **[`parser`]**: streaming, callback-based, layered on the
//!   `matchertext` crate. Nothing is built unless a handler builds it.
//! - **[`tree`]**: a handler that builds [`ast::Node`]s and runs the
//!   transformer pipeline on every sibling list as it completes.
//! - **[`transform`]**: entity expansion, curly quotes and escaping of
//!   unmatched matchers.
//! - **[`writer`]**: MinML (round-trips with the parser), XML and HTML.
//!
//! ## Module Structure
//!
//! ```text
//! minml-engine/
//! ├── lib.rs         # This file - public API
//! ├── ast.rs         # Node, Element, Attribute
//! ├── syntax.rs      # Byte classes, names, space-sucking scanners
//! ├── parser/        # Streaming parser and reading modes
//! ├── tree.rs        # TreeParser
//! ├── transform/     # Transformer trait and the built-in transformers
//! ├── entities.rs    # HTML5 and MinML named references
//! ├── writer/        # MinML, XML and HTML writers
//! └── io.rs          # Reading source files
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use minml_engine::ast::Node;
//! use minml_engine::transform::EntityTransformer;
//! use minml_engine::tree::TreeParser;
//! use minml_engine::writer::html;
//!
//! let nodes = TreeParser::new(&b"p[fish [amp] chips]"[..])
//!     .with_transformer(EntityTransformer)
//!     .parse()
//!     .unwrap();
//! assert_eq!(
//!     nodes,
//!     vec![Node::element("p", vec![
//!         Node::text("fish "),
//!         Node::text("&"),
//!         Node::text(" chips"),
//!     ])]
//! );
//! assert_eq!(html::to_string(&nodes).unwrap(), "<p>fish &amp; chips</p>");
//! ```

pub mod ast;
pub mod entities;
pub mod io;
pub mod parser;
pub mod syntax;
pub mod transform;
pub mod tree;
pub mod writer;

pub use ast::{Attribute, Element, Node};
pub use parser::{Error, Position, SyntaxError, SyntaxErrorKind};
pub use tree::{TreeParser, parse};
