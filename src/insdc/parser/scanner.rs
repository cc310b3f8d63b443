//! Structural scanner
//!
//! Reads the expression one character at a time, splitting it into
//! comma-separated segments and recursing on every `(`. The text gathered
//! before a `(` is the group keyword: `complement` reverses the strand for
//! the group, any other keyword is handed to the parser's
//! [`CompositeBuilder`]. A `)` ends the current recursion level.

use super::leaf::match_leaf;
use super::InsdcParser;
use crate::error::{Diagnostic, ErrorCode, InsdcError, SourceSpan};
use crate::insdc::{CompositeBuilder, Location, Strand, COMPLEMENT};
use log::trace;
use std::io;

/// Text accumulated since the last delimiter, whitespace removed
#[derive(Debug, Default)]
struct Segment {
    text: String,
    /// Character offset of the first kept character
    start: usize,
    /// Character offset just past the last kept character
    end: usize,
}

impl Segment {
    fn push(&mut self, c: char, pos: usize) {
        if self.text.is_empty() {
            self.start = pos;
        }
        self.text.push(c);
        self.end = pos + 1;
    }

    fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

fn is_keyword_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

pub(crate) struct Scanner<'p, I, B> {
    chars: I,
    parser: &'p InsdcParser<B>,
    consumed: String,
    pos: usize,
}

impl<'p, I, B> Scanner<'p, I, B>
where
    I: Iterator<Item = io::Result<char>>,
    B: CompositeBuilder,
{
    pub(crate) fn new(chars: I, parser: &'p InsdcParser<B>) -> Self {
        Self {
            chars,
            parser,
            consumed: String::new(),
            pos: 0,
        }
    }

    /// Everything read so far
    pub(crate) fn into_consumed(self) -> String {
        self.consumed
    }

    fn next_char(&mut self) -> Result<Option<char>, InsdcError> {
        match self.chars.next() {
            None => Ok(None),
            Some(Ok(c)) => {
                self.consumed.push(c);
                self.pos += 1;
                Ok(Some(c))
            }
            Some(Err(e)) => Err(InsdcError::Stream {
                consumed: self.consumed.clone(),
                msg: e.to_string(),
            }),
        }
    }

    fn structural(&self, pos: usize, msg: impl Into<String>) -> InsdcError {
        InsdcError::StructuralMismatch {
            pos,
            msg: msg.into(),
            consumed: self.consumed.clone(),
        }
    }

    /// Scan until the stream ends or this level's `)` is read
    ///
    /// `depth` is the number of groups currently open; 0 is the top level.
    pub(crate) fn scan(&mut self, strand: Strand, depth: usize) -> Result<Vec<Location>, InsdcError> {
        let mut segment = Segment::default();
        let mut locations = Vec::new();

        while let Some(c) = self.next_char()? {
            let pos = self.pos - 1;
            match c {
                '(' => {
                    let keyword = std::mem::take(&mut segment);
                    self.open_group(&keyword.text, pos, strand, depth, &mut locations)?;
                }
                ',' | ')' => {
                    self.flush(&mut segment, strand, &mut locations)?;
                    if c == ')' {
                        if depth == 0 {
                            return Err(self.structural(pos, "unmatched ')'"));
                        }
                        return Ok(locations);
                    }
                }
                c if c.is_whitespace() => {}
                c => segment.push(c, pos),
            }
        }

        if depth > 0 {
            return Err(self.structural(self.pos, "unclosed '('"));
        }
        self.flush(&mut segment, strand, &mut locations)?;
        Ok(locations)
    }

    fn open_group(
        &mut self,
        keyword: &str,
        pos: usize,
        strand: Strand,
        depth: usize,
        locations: &mut Vec<Location>,
    ) -> Result<(), InsdcError> {
        if keyword.is_empty() {
            return Err(self.structural(pos, "'(' must follow a group keyword"));
        }
        if !keyword.chars().all(is_keyword_char) {
            return Err(self.structural(pos, format!("'{}' is not a group keyword", keyword)));
        }
        let limit = self.parser.config().max_depth;
        if depth >= limit {
            return Err(InsdcError::NestingTooDeep {
                limit,
                pos,
                consumed: self.consumed.clone(),
            });
        }

        let is_complement = keyword == COMPLEMENT;
        let group_strand = if is_complement { strand.reverse() } else { strand };
        trace!("entering '{}' group at {} on strand {}", keyword, pos, group_strand);

        let group = self.scan(group_strand, depth + 1)?;
        if group.is_empty() {
            return Err(self.structural(pos, format!("empty '{}' group", keyword)));
        }

        if is_complement {
            locations.extend(group);
        } else {
            locations.push(self.parser.builder().build(group, keyword)?);
        }
        Ok(())
    }

    fn flush(
        &self,
        segment: &mut Segment,
        strand: Strand,
        locations: &mut Vec<Location>,
    ) -> Result<(), InsdcError> {
        if segment.is_empty() {
            return Ok(());
        }
        let segment = std::mem::take(segment);
        trace!("leaf segment '{}' at {}", segment.text, segment.start);

        match match_leaf(&segment.text, strand, self.parser.data_source()) {
            Ok(leaf) => {
                locations.push(Location::Leaf(leaf));
                Ok(())
            }
            Err(failure) => {
                let diagnostic = Diagnostic::new()
                    .with_code(ErrorCode::MalformedLeaf)
                    .with_span(SourceSpan::new(segment.start, segment.end))
                    .with_source(self.consumed.clone())
                    .with_hint(failure.hint(&segment.text));
                Err(InsdcError::malformed_with_diagnostic(
                    segment.text,
                    segment.start,
                    diagnostic,
                ))
            }
        }
    }
}
