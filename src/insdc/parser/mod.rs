//! INSDC location parser
//!
//! Parses the location strings used in the feature tables of GenBank, ENA
//! and DDBJ records:
//!
//! | Expression | Meaning |
//! |------------|---------|
//! | `467` | single base |
//! | `340..565` | contiguous range |
//! | `<345..500` | range whose start lies at or before 345 |
//! | `102^103` | site between two adjacent bases |
//! | `J00194.1:100..202` | range on another record |
//! | `complement(34..126)` | range on the reverse strand |
//! | `join(12..78,134..202)` | ranges joined end to end |
//!
//! Groups nest freely, e.g. `complement(join(2691..4571,4918..5163))`.
//!
//! # Example
//!
//! ```
//! use ferro_insdc::{DataSource, InsdcParser, Strand};
//!
//! let parser = InsdcParser::new(DataSource::Genbank);
//! let location = parser.parse("complement(join(1..4,6..10))").unwrap();
//! assert_eq!(location.strand(), Some(Strand::Reverse));
//! assert_eq!(location.to_string(), "join(complement(1..4),complement(6..10))");
//! ```

mod leaf;
mod scanner;
pub mod stream;

use crate::config::ParserConfig;
use crate::error::{Diagnostic, ErrorCode, InsdcError, SourceSpan};
use crate::insdc::{CompositeBuilder, DataSource, Location, StandardBuilder, Strand};
use log::debug;
use scanner::Scanner;
use std::io::{self, BufReader, Read};
use stream::ReaderChars;

/// Parser for INSDC location expressions
///
/// Holds no per-parse state, so one instance can be reused for any number of
/// sequential parses.
#[derive(Debug, Clone)]
pub struct InsdcParser<B = StandardBuilder> {
    config: ParserConfig,
    builder: B,
}

impl InsdcParser<StandardBuilder> {
    /// Parser qualifying accessions with `data_source`
    pub fn new(data_source: DataSource) -> Self {
        Self::with_config(ParserConfig::new(data_source))
    }

    /// Parser using the [`StandardBuilder`] in the configured join-type mode
    pub fn with_config(config: ParserConfig) -> Self {
        let builder = StandardBuilder::new(config.join_types);
        Self { config, builder }
    }
}

impl Default for InsdcParser<StandardBuilder> {
    fn default() -> Self {
        Self::with_config(ParserConfig::default())
    }
}

impl<B: CompositeBuilder> InsdcParser<B> {
    /// Parser delegating group construction to a custom builder
    pub fn with_builder(config: ParserConfig, builder: B) -> Self {
        Self { config, builder }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Source attached to every accession this parser produces
    pub fn data_source(&self) -> DataSource {
        self.config.data_source
    }

    pub fn builder(&self) -> &B {
        &self.builder
    }

    /// Parse a complete expression into exactly one location
    ///
    /// # Errors
    ///
    /// [`InsdcError::Cardinality`] when the expression is empty or is a bare
    /// comma-separated list, plus any error from the scanner.
    pub fn parse(&self, input: &str) -> Result<Location, InsdcError> {
        self.parse_chars(input.chars().map(Ok))
    }

    /// Parse an expression read from `reader`, which must hold nothing else
    ///
    /// Read failures and invalid UTF-8 surface as [`InsdcError::Stream`]
    /// carrying the text read before the failure.
    pub fn parse_reader<R: Read>(&self, reader: R) -> Result<Location, InsdcError> {
        self.parse_chars(ReaderChars::new(BufReader::new(reader)))
    }

    fn parse_chars<I>(&self, chars: I) -> Result<Location, InsdcError>
    where
        I: Iterator<Item = io::Result<char>>,
    {
        let mut scanner = Scanner::new(chars, self);
        let mut locations = scanner.scan(Strand::Forward, 0)?;
        let input = scanner.into_consumed();
        debug!("parsed {} top-level location(s) from '{}'", locations.len(), input);

        match locations.pop() {
            Some(location) if locations.is_empty() => Ok(location),
            popped => Err(InsdcError::Cardinality {
                count: locations.len() + usize::from(popped.is_some()),
                input,
            }),
        }
    }

    /// Parse every top-level location of `input` on `strand`
    ///
    /// Unlike [`parse`](Self::parse) this accepts any number of
    /// comma-separated locations, including none.
    pub fn parse_locations(&self, input: &str, strand: Strand) -> Result<Vec<Location>, InsdcError> {
        Scanner::new(input.chars().map(Ok), self).scan(strand, 0)
    }

    /// Parse one delimiter-free segment as a single or range location
    ///
    /// Whitespace is ignored as it is by the scanner.
    pub fn parse_leaf(&self, segment: &str, strand: Strand) -> Result<Location, InsdcError> {
        let text: String = segment.chars().filter(|c| !c.is_whitespace()).collect();
        leaf::match_leaf(&text, strand, self.data_source())
            .map(Location::Leaf)
            .map_err(|failure| {
                let diagnostic = Diagnostic::new()
                    .with_code(ErrorCode::MalformedLeaf)
                    .with_span(SourceSpan::new(0, text.chars().count()))
                    .with_source(text.clone())
                    .with_hint(failure.hint(&text));
                InsdcError::malformed_with_diagnostic(text, 0, diagnostic)
            })
    }
}

/// Parse a location with a default parser (ENA accessions, lenient keywords)
///
/// # Example
///
/// ```
/// use ferro_insdc::parse_location;
///
/// let location = parse_location("AB12345:3^4").unwrap();
/// let leaf = location.as_leaf().unwrap();
/// assert!(leaf.between_bases);
/// assert_eq!(leaf.accession.as_ref().unwrap().id, "AB12345");
/// ```
pub fn parse_location(input: &str) -> Result<Location, InsdcError> {
    InsdcParser::default().parse(input)
}
