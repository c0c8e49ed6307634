//! Matcher classification.
//!
//! The six ASCII matchers pair up as `(`↔`)`, `[`↔`]` and `{`↔`}`.
//! Classification is a pure function of the byte and never depends on
//! where the byte appears.

/// Returns true for any of the six matcher bytes.
pub fn is_matcher(b: u8) -> bool {
    is_opener(b) || is_closer(b)
}

pub fn is_opener(b: u8) -> bool {
    matches!(b, b'(' | b'[' | b'{')
}

pub fn is_closer(b: u8) -> bool {
    matches!(b, b')' | b']' | b'}')
}

/// The closer that pairs with `opener`, if it is one.
pub fn closer_for(opener: u8) -> Option<u8> {
    match opener {
        b'(' => Some(b')'),
        b'[' => Some(b']'),
        b'{' => Some(b'}'),
        _ => None,
    }
}

/// The opener that pairs with `closer`, if it is one.
pub fn opener_for(closer: u8) -> Option<u8> {
    match closer {
        b')' => Some(b'('),
        b']' => Some(b'['),
        b'}' => Some(b'{'),
        _ => None,
    }
}

/// True if `opener` and `closer` form one of the three matcher pairs.
pub fn is_matched(opener: u8, closer: u8) -> bool {
    closer_for(opener) == Some(closer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(b'(', b')')]
    #[case(b'[', b']')]
    #[case(b'{', b'}')]
    fn pairs_are_symmetric(#[case] opener: u8, #[case] closer: u8) {
        assert!(is_opener(opener));
        assert!(is_closer(closer));
        assert!(is_matched(opener, closer));
        assert_eq!(closer_for(opener), Some(closer));
        assert_eq!(opener_for(closer), Some(opener));
    }

    #[test]
    fn crossed_pairs_do_not_match() {
        assert!(!is_matched(b'(', b']'));
        assert!(!is_matched(b'[', b'}'));
        assert!(!is_matched(b'{', b')'));
        assert!(!is_matched(b')', b'('));
    }

    #[test]
    fn only_six_bytes_are_matchers() {
        let count = (0..=u8::MAX).filter(|&b| is_matcher(b)).count();
        assert_eq!(count, 6);
        assert!(!is_matcher(b'<'));
        assert!(!is_matcher(b'>'));
    }
}
