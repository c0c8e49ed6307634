use super::Transformer;
use crate::ast::Node;
use crate::entities::{html_entity, minml_entity};

/// Expands references with a known name into text. HTML5 names win over
/// MinML symbols.
#[derive(Debug, Clone, Copy, Default)]
pub struct EntityTransformer;

impl EntityTransformer {
    fn expand(name: &str) -> Option<String> {
        html_entity(name).or_else(|| minml_entity(name).map(str::to_string))
    }
}

impl Transformer for EntityTransformer {
    fn transform(&self, nodes: Vec<Node>) -> Vec<Node> {
        nodes
            .into_iter()
            .map(|node| match node {
                Node::Reference { name } => match Self::expand(&name) {
                    Some(text) => Node::text(text),
                    None => Node::Reference { name },
                },
                other => other,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::TreeParser;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn parse(input: &str) -> Vec<Node> {
        TreeParser::new(input.as_bytes())
            .with_transformer(EntityTransformer)
            .parse()
            .unwrap()
    }

    #[rstest]
    #[case("[star][cir][larr]", &["\u{2606}", "\u{25CB}", "\u{2190}"])]
    #[case("[--][+-][-->]", &["\u{2013}", "\u{00B1}", "\u{2192}"])]
    #[case("[(<)] [(>)]", &["(", " ", ")"])]
    fn expands_known_names(#[case] input: &str, #[case] texts: &[&str]) {
        let expected: Vec<Node> = texts.iter().map(|t| Node::text(*t)).collect();
        assert_eq!(parse(input), expected);
    }

    #[test]
    fn leaves_unknown_names() {
        assert_eq!(
            parse("[nosuch][#123]"),
            vec![Node::reference("nosuch"), Node::reference("#123")]
        );
    }

    #[test]
    fn expands_inside_elements_and_attributes() {
        assert_eq!(
            parse("p{title=[[amp]]}[[lt]]"),
            vec![Node::element(
                "p",
                vec![
                    Node::attribute("title", vec![Node::text("&")]),
                    Node::text("<"),
                ]
            )]
        );
    }
}
