//! Parser tests using rstest parameterized tests
//!
//! Test categories:
//! - Fixture cases: valid and invalid expressions with expected renderings
//! - Feature table examples: location forms found in real GenBank/ENA records
//! - Queries: strand, bounds and accession lookups on parsed trees

use ferro_insdc::{
    parse_location, DataSource, InsdcParser, JoinType, Location, Strand, Uncertainty,
};
use rstest::rstest;
use serde::Deserialize;
use std::fs;

// =============================================================================
// Fixture-based tests
// =============================================================================

#[derive(Debug, Deserialize)]
struct ParsingFixtures {
    parsing: Vec<ParsingTestCase>,
}

#[derive(Debug, Deserialize)]
struct ParsingTestCase {
    input: String,
    valid: bool,
    rendered: Option<String>,
    leaves: Option<usize>,
    error_code: Option<String>,
    description: String,
}

fn load_parsing_fixtures() -> ParsingFixtures {
    let content = fs::read_to_string("tests/fixtures/locations.json")
        .expect("Failed to read location fixtures");
    serde_json::from_str(&content).expect("Failed to parse fixtures JSON")
}

#[test]
fn test_parsing_from_fixtures() {
    let fixtures = load_parsing_fixtures();
    assert!(!fixtures.parsing.is_empty());

    for case in fixtures.parsing {
        let result = parse_location(&case.input);

        if case.valid {
            let location = result.unwrap_or_else(|e| {
                panic!(
                    "Expected '{}' to parse ({}), got: {}",
                    case.input, case.description, e
                )
            });
            if let Some(rendered) = &case.rendered {
                assert_eq!(&location.to_string(), rendered, "{}", case.description);
            }
            if let Some(leaves) = case.leaves {
                assert_eq!(location.leaves().len(), leaves, "{}", case.description);
            }
        } else {
            let err = match result {
                Ok(location) => panic!(
                    "Expected '{}' to fail ({}), parsed as {}",
                    case.input, case.description, location
                ),
                Err(e) => e,
            };
            if let Some(code) = &case.error_code {
                assert_eq!(&err.code().as_str(), code, "{}", case.description);
            }
        }
    }
}

// =============================================================================
// Feature table examples
// =============================================================================

#[rstest]
// Simple leaves
#[case("1")]
#[case("1..1000")]
#[case("<1..1000")]
#[case("1..>1000")]
#[case("<1..>1000")]
#[case("123^124")]
#[case("AL121804.2:41..610")]
#[case("NC_000913.3:190..255")]
// Groups
#[case("complement(3300..4037)")]
#[case("join(1..567,789..1023)")]
#[case("complement(join(3950..4065,4170..4258))")]
#[case("join(AY123456.1:1..100,complement(AY123457.1:1..200))")]
#[case("order(100..200,300..400,500..600)")]
#[case("join(<1..88,203..>421)")]
#[case("join(complement(AL121804.2:41..610),complement(AL121804.2:672..1487))")]
fn test_feature_table_locations_parse(#[case] input: &str) {
    let location = parse_location(input);
    assert!(location.is_ok(), "Failed to parse {}: {:?}", input, location.err());
}

#[rstest]
#[case("join(1..4,5..8)", JoinType::Join)]
#[case("order(1..4,5..8)", JoinType::Order)]
#[case("bond(1,8)", JoinType::Bond)]
#[case("one-of(1,8)", JoinType::OneOf)]
#[case("group(1,8)", JoinType::Group)]
#[case("merge(1,8)", JoinType::Other("merge".to_string()))]
fn test_join_type_from_keyword(#[case] input: &str, #[case] expected: JoinType) {
    let location = parse_location(input).unwrap();
    assert_eq!(location.as_composite().unwrap().join_type, expected);
}

#[rstest]
#[case("<5", Uncertainty::Before, Uncertainty::Before)]
#[case(">5", Uncertainty::After, Uncertainty::After)]
#[case("<5..9", Uncertainty::Before, Uncertainty::Certain)]
#[case("5..>9", Uncertainty::Certain, Uncertainty::After)]
#[case(">5..<9", Uncertainty::After, Uncertainty::Before)]
fn test_uncertainty_markers(
    #[case] input: &str,
    #[case] start: Uncertainty,
    #[case] end: Uncertainty,
) {
    let location = parse_location(input).unwrap();
    let leaf = location.as_leaf().unwrap();
    assert_eq!(leaf.start.uncertainty, start);
    assert_eq!(leaf.end.uncertainty, end);
    assert!(!leaf.start.is_unknown());
}

// =============================================================================
// Queries
// =============================================================================

#[test]
fn test_bounds_of_composite() {
    let location = parse_location("join(<50..60,10..20,complement(70..>90))").unwrap();
    assert_eq!(location.start().unwrap().position, 10);
    let end = location.end().unwrap();
    assert_eq!(end.position, 90);
    assert_eq!(end.uncertainty, Uncertainty::After);
}

#[test]
fn test_mixed_strand_is_none() {
    let location = parse_location("join(1..4,complement(6..9))").unwrap();
    assert_eq!(location.strand(), None);

    let location = parse_location("complement(join(1..4,6..9))").unwrap();
    assert_eq!(location.strand(), Some(Strand::Reverse));
}

#[test]
fn test_accession_carries_data_source() {
    let parser = InsdcParser::new(DataSource::Ddbj);
    let location = parser.parse("join(AB000001.1:1..4,AB000001.1:8..12)").unwrap();
    for leaf in location.leaves() {
        let accession = leaf.accession.as_ref().unwrap();
        assert_eq!(accession.id, "AB000001.1");
        assert_eq!(accession.source, DataSource::Ddbj);
    }
}

#[test]
fn test_default_source_is_ena() {
    let location = parse_location("X56734.1:5..9").unwrap();
    assert_eq!(location.accession().unwrap().source, DataSource::Ena);
}

#[test]
fn test_parse_reader_matches_parse() {
    let input = "complement(join(2691..4571,\n    4918..5163))";
    let parser = InsdcParser::default();
    let from_reader = parser.parse_reader(input.as_bytes()).unwrap();
    assert_eq!(from_reader, parser.parse(input).unwrap());
}

#[test]
fn test_location_json_shape() {
    let location = parse_location("join(1..4,complement(<6))").unwrap();
    let value = serde_json::to_value(&location).unwrap();
    assert_eq!(value["type"], "composite");
    assert_eq!(value["join_type"], "join");
    assert_eq!(value["sub_locations"][1]["type"], "leaf");
    assert_eq!(value["sub_locations"][1]["strand"], "reverse");

    let back: Location = serde_json::from_value(value).unwrap();
    assert_eq!(back, location);
}

#[rstest]
#[case("AB123 : 1 .. 4", "AB123:1..4")]
#[case(" join( 1..4 ,\n\t6..9 ) ", "join(1..4,6..9)")]
#[case("complement ( 5..8 )", "complement(5..8)")]
fn test_whitespace_is_ignored(#[case] spaced: &str, #[case] compact: &str) {
    assert_eq!(parse_location(spaced).unwrap(), parse_location(compact).unwrap());
}
