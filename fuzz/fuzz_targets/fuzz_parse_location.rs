//! Fuzz target for the location parser entry points
//!
//! Feeds arbitrary bytes to both the string and the reader entry point.

#![no_main]

use ferro_insdc::InsdcParser;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Don't fuzz extremely long inputs - diminishing returns
    if data.len() > 4096 {
        return;
    }

    let parser = InsdcParser::default();

    // Invalid UTF-8 must surface as an error, never a panic
    let from_reader = parser.parse_reader(data);

    if let Ok(input) = std::str::from_utf8(data) {
        let from_str = parser.parse(input);
        assert_eq!(from_str.is_ok(), from_reader.is_ok());

        // A parsed location renders to text that parses back to itself
        if let Ok(location) = from_str {
            let reparsed = parser.parse(&location.to_string());
            assert_eq!(reparsed.as_ref(), Ok(&location));
        }
    }
});
