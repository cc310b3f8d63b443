//! Property-based tests for INSDC location parsing
//!
//! Generates location expressions from a small grammar and checks that
//! parsing is deterministic, survives a render/reparse cycle, ignores
//! whitespace, and treats `complement` as an involution.

use ferro_insdc::{parse_location, InsdcParser, Location, Strand};
use proptest::prelude::*;
use proptest::test_runner::Config as ProptestConfig;

// =============================================================================
// Base strategies
// =============================================================================

/// Generate small positive positions
fn position() -> impl Strategy<Value = u64> {
    1..100_000u64
}

/// Generate an optional `<` or `>` marker
fn marker() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just(""), Just(""), Just("<"), Just(">")]
}

/// Generate an accession with an optional version, including the separator
fn accession_prefix() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => Just(String::new()),
        1 => "[A-Z]{1,2}[0-9]{5,6}(\\.[0-9])?".prop_map(|acc| format!("{}:", acc)),
    ]
}

/// Generate a leaf: point, range or between-bases site
fn leaf() -> impl Strategy<Value = String> {
    (
        accession_prefix(),
        marker(),
        position(),
        prop_oneof![Just(""), Just(".."), Just("..."), Just("^")],
        marker(),
        position(),
    )
        .prop_map(|(acc, m1, start, op, m2, end)| {
            if op.is_empty() {
                format!("{}{}{}", acc, m1, start)
            } else {
                format!("{}{}{}{}{}{}", acc, m1, start, op, m2, end)
            }
        })
}

/// Generate a group keyword
fn keyword() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("join"),
        Just("order"),
        Just("bond"),
        Just("one-of"),
        Just("group"),
        Just("complement"),
    ]
}

/// Generate a nested location expression
fn expression() -> impl Strategy<Value = String> {
    leaf().prop_recursive(4, 24, 4, |inner| {
        (keyword(), prop::collection::vec(inner, 1..4))
            .prop_map(|(kw, members)| format!("{}({})", kw, members.join(",")))
    })
}

/// Expression whose top level yields exactly one location
fn single_location() -> impl Strategy<Value = String> {
    expression().prop_filter("complement at top level may splice several members", |e| {
        parse_location(e).is_ok()
    })
}

/// Sprinkle spaces and newlines after every delimiter
fn with_whitespace(expr: &str, pad: &str) -> String {
    let mut out = String::new();
    for c in expr.chars() {
        out.push(c);
        if matches!(c, '(' | ',' | ')') {
            out.push_str(pad);
        }
    }
    format!("{}{}", pad, out)
}

fn all_strands(location: &Location) -> Vec<Strand> {
    location.leaves().iter().map(|leaf| leaf.strand).collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Every generated leaf parses on its own
    #[test]
    fn test_leaf_parses(input in leaf()) {
        let parsed = parse_location(&input);
        prop_assert!(parsed.is_ok(), "Failed to parse: {}", input);
        prop_assert!(!parsed.unwrap().is_complex());
    }

    /// Parsing the same text twice gives equal values
    #[test]
    fn test_parse_is_deterministic(input in expression()) {
        let parser = InsdcParser::default();
        prop_assert_eq!(parser.parse(&input), parser.parse(&input));
    }

    /// Rendered output parses back to the same value
    #[test]
    fn test_render_roundtrip(input in single_location()) {
        let parsed = parse_location(&input).unwrap();
        let rendered = parsed.to_string();
        let reparsed = parse_location(&rendered);
        prop_assert!(reparsed.is_ok(), "Failed to reparse: {} (from {})", rendered, input);
        prop_assert_eq!(reparsed.unwrap(), parsed);
    }

    /// Whitespace around delimiters does not change the result
    #[test]
    fn test_whitespace_insensitive(
        input in single_location(),
        pad in prop_oneof![Just(" "), Just("\n"), Just(" \t ")],
    ) {
        let padded = with_whitespace(&input, pad);
        prop_assert_eq!(parse_location(&padded), parse_location(&input));
    }

    /// Complement flips every leaf; applying it twice restores the original
    #[test]
    fn test_complement_involution(input in single_location()) {
        let original = parse_location(&input).unwrap();
        let wrapped = format!("join({})", input);
        let once = parse_location(&format!("join(complement({}))", input)).unwrap();
        let twice = parse_location(&format!("join(complement(complement({})))", input)).unwrap();

        let flipped: Vec<Strand> = all_strands(&original).into_iter().map(Strand::reverse).collect();
        prop_assert_eq!(all_strands(&once), flipped);
        prop_assert_eq!(twice, parse_location(&wrapped).unwrap());
    }

    /// Arbitrary text never panics the parser
    #[test]
    fn test_arbitrary_input_never_panics(input in "\\PC{0,40}") {
        let _ = parse_location(&input);
    }
}
