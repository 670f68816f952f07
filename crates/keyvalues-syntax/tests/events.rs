//! End-to-end event parsing over realistic documents.

use keyvalues_syntax::{CollectingLogger, EventParser, Limits, NullLogger, Pair, PairCollector};
use pretty_assertions::assert_eq;
use rstest::rstest;

const MAP_CONFIG: &str = r#"// map rotation
"maps"
{
	"de_dust"
	{
		"rounds"	"30"
		"bots"		"4" // per team
	}
	"cs_office"
	{
		"rounds"	"20"
	}
}
"#;

fn collect(input: &str) -> (Vec<Pair>, CollectingLogger) {
    let mut collector = PairCollector::default();
    let mut logger = CollectingLogger::new();
    EventParser::default()
        .parse_str("test.kv", input, &mut collector, &mut logger)
        .unwrap();
    (collector.pairs, logger)
}

#[test]
fn nested_document() {
    let (pairs, logger) = collect(MAP_CONFIG);
    assert_eq!(
        pairs,
        vec![
            Pair::new("maps", None, 0),
            Pair::new("de_dust", None, 1),
            Pair::new("rounds", Some("30"), 2),
            Pair::new("bots", Some("4"), 2),
            Pair::new("cs_office", None, 1),
            Pair::new("rounds", Some("20"), 2),
        ]
    );
    assert!(logger.is_empty());
}

#[rstest]
#[case::crlf("\"a\" \"1\"\r\n\"b\" \"2\"\r\n")]
#[case::spaces_instead_of_tabs("   \"a\"   \"1\"\n \"b\" \"2\"")]
#[case::stray_characters("\"a\" = \"1\";\n\"b\" : \"2\"")]
fn formatting_variants_yield_the_same_pairs(#[case] input: &str) {
    let (pairs, _) = collect(input);
    assert_eq!(
        pairs,
        vec![Pair::new("a", Some("1"), 0), Pair::new("b", Some("2"), 0)]
    );
}

#[test]
fn overlong_line_is_lexed_in_pieces() {
    let parser = EventParser::new(Limits {
        max_line_length: 8,
        ..Limits::default()
    });
    let mut collector = PairCollector::default();
    let mut logger = CollectingLogger::new();
    // the first segment holds `"k" "va`, so the value loses its closing quote
    parser
        .parse_str("long", "\"k\" \"value\"", &mut collector, &mut logger)
        .unwrap();
    assert_eq!(collector.pairs[0], Pair::new("k", None, 0));
    assert_eq!(logger.diagnostics[0].message, "unterminated string");
}

#[test]
fn trailing_content_after_the_outer_block_is_ignored() {
    let (pairs, _) = collect("\"a\" { \"b\" \"1\" }\n\"c\" \"2\"");
    assert_eq!(
        pairs,
        vec![Pair::new("a", None, 0), Pair::new("b", Some("1"), 1)]
    );
}

#[test]
fn empty_document() {
    let mut collector = PairCollector::default();
    let summary = EventParser::default()
        .parse_str("empty", "", &mut collector, &mut NullLogger)
        .unwrap();
    assert_eq!(summary.pairs, 0);
    assert!(collector.pairs.is_empty());
}
