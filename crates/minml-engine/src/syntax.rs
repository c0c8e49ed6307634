//! Byte-level MinML syntax: names, whitespace and space-sucking.

use std::sync::LazyLock;

use matchertext::is_matcher;
use regex::Regex;

const NAME_START: &str = r":A-Z_a-z\u{C0}-\u{D6}\u{D8}-\u{F6}\u{F8}-\u{2FF}\u{370}-\u{37D}\u{37F}-\u{1FFF}\u{200C}-\u{200D}\u{2070}-\u{218F}\u{2C00}-\u{2FEF}\u{3001}-\u{D7FF}\u{F900}-\u{FDCF}\u{FDF0}-\u{FFFD}\u{10000}-\u{EFFFF}";
const NAME_REST: &str = r"\-.0-9\u{B7}\u{300}-\u{36F}\u{203F}-\u{2040}";

/// XML 1.0 `Name`.
static XML_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("^[{NAME_START}][{NAME_START}{NAME_REST}]*$"))
        .expect("XML name pattern is valid")
});

/// XML whitespace.
pub fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\r' | b'\n')
}

/// Any byte that may appear in an element name.
pub fn is_name_byte(b: u8) -> bool {
    !is_space(b) && !is_matcher(b)
}

/// Matchers that take part in space-sucking.
pub fn is_sucking_opener(b: u8) -> bool {
    b == b'[' || b == b'{'
}

pub fn is_sucking_closer(b: u8) -> bool {
    b == b']' || b == b'}'
}

/// Strict XML `Name`, used for attribute names.
pub fn is_name(name: &[u8]) -> bool {
    std::str::from_utf8(name).is_ok_and(|s| XML_NAME.is_match(s))
}

/// Content of `[...]` that is read as a reference: anything non-empty
/// without whitespace.
pub fn is_reference(name: &[u8]) -> bool {
    !name.is_empty() && !name.iter().copied().any(is_space)
}

/// An XML Name or a numeric reference (`#123`, `#x1F`).
pub fn is_strict_reference(name: &[u8]) -> bool {
    match name {
        [b'#', b'x', hex @ ..] if !hex.is_empty() => hex.iter().all(u8::is_ascii_hexdigit),
        [b'#', dec @ ..] => !dec.is_empty() && dec.iter().all(u8::is_ascii_digit),
        _ => is_name(name),
    }
}

/// Start of the element name that ends `buf`, if there is one.
///
/// A leading `<` is a space-sucker rather than part of the name, unless
/// it is the whole run.
pub fn scan_starter(buf: &[u8]) -> Option<usize> {
    let start = buf.iter().rposition(|&b| !is_name_byte(b)).map_or(0, |i| i + 1);
    if start == buf.len() {
        return None;
    }
    if buf[start] == b'<' {
        return (start + 1 < buf.len()).then_some(start + 1);
    }
    Some(start)
}

/// Length of `buf` once a trailing `<` and the whitespace before it are
/// removed.
pub fn scan_pre_space(buf: &[u8]) -> usize {
    match buf {
        [rest @ .., b, b'<'] if is_space(*b) => {
            rest.iter().rposition(|&b| !is_space(b)).map_or(0, |i| i + 1)
        }
        _ => buf.len(),
    }
}

/// Number of leading bytes taken up by a `>` and the whitespace after it.
pub fn scan_post_space(buf: &[u8]) -> usize {
    match buf {
        [b'>', b, rest @ ..] if is_space(*b) => {
            2 + rest.iter().position(|&b| !is_space(b)).unwrap_or(rest.len())
        }
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("p", Some(0))]
    #[case("x p", Some(2))]
    #[case("x <p", Some(3))]
    #[case("x<p", Some(0))]
    #[case(" <<", Some(2))]
    #[case(" <", None)]
    #[case("x ", None)]
    #[case("", None)]
    #[case("a(b)c", Some(4))]
    fn starter(#[case] buf: &str, #[case] expected: Option<usize>) {
        assert_eq!(scan_starter(buf.as_bytes()), expected);
    }

    #[rstest]
    #[case("x <", 1)]
    #[case("x \t\n <", 1)]
    #[case(" <", 0)]
    #[case("x<", 2)]
    #[case("<", 1)]
    #[case("x", 1)]
    fn pre_space(#[case] buf: &str, #[case] expected: usize) {
        assert_eq!(scan_pre_space(buf.as_bytes()), expected);
    }

    #[rstest]
    #[case("> x", 2)]
    #[case(">\t\n x", 4)]
    #[case("> ", 2)]
    #[case(">x", 0)]
    #[case(">", 0)]
    #[case("x", 0)]
    fn post_space(#[case] buf: &str, #[case] expected: usize) {
        assert_eq!(scan_post_space(buf.as_bytes()), expected);
    }

    #[rstest]
    #[case("a", true)]
    #[case("xml:lang", true)]
    #[case("data-x.y", true)]
    #[case("_x1", true)]
    #[case("é", true)]
    #[case("1a", false)]
    #[case("-a", false)]
    #[case(">", false)]
    #[case("", false)]
    #[case("a b", false)]
    fn xml_names(#[case] name: &str, #[case] expected: bool) {
        assert_eq!(is_name(name.as_bytes()), expected);
    }

    #[rstest]
    #[case("amp", true)]
    #[case("#123", true)]
    #[case("#x12ab", true)]
    #[case("#", false)]
    #[case("#x", false)]
    #[case("#xg", false)]
    #[case("#a", false)]
    #[case("--", false)]
    fn strict_references(#[case] name: &str, #[case] expected: bool) {
        assert_eq!(is_strict_reference(name.as_bytes()), expected);
    }

    #[test]
    fn liberal_references_only_exclude_whitespace() {
        assert!(is_reference(b"--"));
        assert!(is_reference(b"#xg"));
        assert!(!is_reference(b""));
        assert!(!is_reference(b"a b"));
    }
}
