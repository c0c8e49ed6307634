//! Named character references.
//!
//! HTML5 names come from `html-escape`. MinML adds symbolic names built
//! from ASCII punctuation, such as `[-->]` for →.

/// Expansion of an HTML5 named character reference.
pub fn html_entity(name: &str) -> Option<String> {
    if name.is_empty() || !name.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return None;
    }
    let encoded = format!("&{name};");
    let decoded = html_escape::decode_html_entities(&encoded);
    // A longer result means only a legacy prefix such as `&amp` was decoded.
    if decoded == encoded || decoded.chars().count() > 2 {
        return None;
    }
    Some(decoded.into_owned())
}

/// Expansion of a MinML symbolic reference.
pub fn minml_entity(name: &str) -> Option<&'static str> {
    let symbol = match name {
        // Matcher escapes
        "(<)" => "(",
        "(>)" => ")",
        "[<]" => "[",
        "[>]" => "]",
        "{<}" => "{",
        "{>}" => "}",

        // Punctuation and arithmetic
        "--" => "\u{2013}",
        "---" => "\u{2014}",
        "+-" => "\u{00B1}",
        "-+" => "\u{2213}",
        "x" => "\u{00D7}",
        "d" => "\u{00F7}",
        "." => "\u{22C5}",
        ":" => "\u{2236}",
        "::" => "\u{2237}",
        "2rt" => "\u{221A}",
        "3rt" => "\u{221B}",
        "4rt" => "\u{221C}",

        // Comparisons
        "<=" => "\u{2264}",
        ">=" => "\u{2265}",
        "<>" => "\u{2276}",
        "><" => "\u{2277}",
        "<<" => "\u{226A}",
        ">>" => "\u{226B}",
        "<<<" => "\u{22D8}",
        ">>>" => "\u{22D9}",
        "~~" => "\u{2248}",
        "~~=" => "\u{224A}",
        "def=" => "\u{225D}",

        // Negated comparisons
        "/=" => "\u{2260}",
        "/<" => "\u{226E}",
        "/>" => "\u{226F}",
        "/<=" => "\u{2270}",
        "/>=" => "\u{2271}",
        "/<>" => "\u{2278}",
        "/><" => "\u{2279}",
        "/~~" => "\u{2249}",

        // Arrows
        "<--" => "\u{2190}",
        "-->" => "\u{2192}",
        "<->" => "\u{2194}",
        "<==" => "\u{21D0}",
        "==>" => "\u{21D2}",
        "<=>" => "\u{21D4}",
        "<---" => "\u{27F5}",
        "--->" => "\u{27F6}",
        "<-->" => "\u{2194}",
        "<===" => "\u{27F8}",
        "===>" => "\u{27F9}",
        "<==>" => "\u{27FA}",

        // Arrows with stroke
        "/<--" => "\u{219A}",
        "/-->" => "\u{219B}",
        "/<->" => "\u{21AE}",
        "/<==" => "\u{21CD}",
        "/==>" => "\u{21CF}",
        "/<=>" => "\u{21CE}",

        // Tacks and turnstiles
        "|--" => "\u{22A2}",
        "--|" => "\u{22A3}",
        "~|~" => "\u{22A4}",
        "_|_" => "\u{22A5}",
        "|-" => "\u{22A6}",
        "|=" => "\u{22A7}",
        "|==" => "\u{22A8}",
        "||-" => "\u{22A9}",
        "||=" => "\u{22AB}",
        "/|--" => "\u{22AC}",
        "/|==" => "\u{22AD}",
        "/||-" => "\u{22AE}",
        "/||=" => "\u{22AF}",

        // Logic
        "-." => "\u{00AC}",
        "^" => "\u{2227}",
        "v" => "\u{2228}",
        "v-" => "\u{22BB}",
        "-^" => "\u{22BC}",
        "-v" => "\u{22BD}",

        // Fractions
        "1/4" => "\u{00BC}",
        "1/2" => "\u{00BD}",
        "3/4" => "\u{00BE}",
        "1/7" => "\u{2150}",
        "1/9" => "\u{2151}",
        "1/10" => "\u{2152}",
        "1/3" => "\u{2153}",
        "2/3" => "\u{2154}",
        "1/5" => "\u{2155}",
        "2/5" => "\u{2156}",
        "3/5" => "\u{2157}",
        "4/5" => "\u{2158}",
        "1/6" => "\u{2159}",
        "5/6" => "\u{215A}",
        "1/8" => "\u{215B}",
        "3/8" => "\u{215C}",
        "5/8" => "\u{215D}",
        "7/8" => "\u{215E}",

        _ => return None,
    };
    Some(symbol)
}
