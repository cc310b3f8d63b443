//! Leaf grammar
//!
//! Parses delimiter-free segments such as `AB12345:<1..>40` or `3^4`:
//!
//! ```text
//! single: [accession][:][<|>]digits
//! range:  [accession][:][<|>]digits ( .+ | ^ ) [<|>]digits
//! ```
//!
//! The accession is the shortest prefix of `[A-Za-z0-9._]` characters after
//! which the remainder matches the coordinate part, so `AB12345` alone reads
//! as accession `AB`, point `12345`. The range grammar is tried first.

use crate::insdc::{AccessionId, DataSource, LeafLocation, Point, Strand, Uncertainty};
use nom::{
    branch::alt,
    bytes::complete::take_while1,
    character::complete::{char, digit1, one_of},
    combinator::{all_consuming, map, opt, value},
    IResult, Parser,
};

/// Why a segment was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum LeafFailure {
    /// Neither grammar matches
    NoMatch,
    /// The grammar matched but a coordinate does not fit in a u64
    Overflow { digits: String },
}

impl LeafFailure {
    /// Hint for the diagnostic attached to a malformed-leaf error
    pub(crate) fn hint(&self, segment: &str) -> String {
        match self {
            LeafFailure::Overflow { digits } => {
                format!("coordinate {} is out of range", digits)
            }
            LeafFailure::NoMatch => match segment.chars().find(|c| !is_leaf_char(*c)) {
                Some(c) => format!("unexpected character '{}'", c),
                None => "expected [accession:][<|>]N or [accession:][<|>]N..[<|>]M".to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RangeOperator {
    /// One or more dots
    Span,
    /// `^`
    BetweenBases,
}

#[derive(Debug, Clone, Copy)]
struct Endpoint<'a> {
    uncertainty: Uncertainty,
    digits: &'a str,
}

impl Endpoint<'_> {
    fn to_point(self) -> Result<Point, LeafFailure> {
        let position = self
            .digits
            .parse::<u64>()
            .map_err(|_| LeafFailure::Overflow {
                digits: self.digits.to_string(),
            })?;
        Ok(Point::with_uncertainty(position, self.uncertainty))
    }
}

fn is_accession_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '.' || c == '_'
}

fn is_leaf_char(c: char) -> bool {
    is_accession_char(c) || matches!(c, ':' | '<' | '>' | '^')
}

fn marker(input: &str) -> IResult<&str, Uncertainty> {
    map(opt(one_of("<>")), |m| {
        m.and_then(Uncertainty::from_marker).unwrap_or_default()
    })
    .parse(input)
}

fn endpoint(input: &str) -> IResult<&str, Endpoint<'_>> {
    map((marker, digit1), |(uncertainty, digits)| Endpoint {
        uncertainty,
        digits,
    })
    .parse(input)
}

fn operator(input: &str) -> IResult<&str, RangeOperator> {
    alt((
        value(RangeOperator::BetweenBases, char('^')),
        value(RangeOperator::Span, take_while1(|c: char| c == '.')),
    ))
    .parse(input)
}

#[allow(clippy::type_complexity)]
fn range_tail(input: &str) -> IResult<&str, (Endpoint<'_>, RangeOperator, Endpoint<'_>)> {
    all_consuming((endpoint, operator, endpoint)).parse(input)
}

fn point_tail(input: &str) -> IResult<&str, Endpoint<'_>> {
    all_consuming(endpoint).parse(input)
}

/// Find the shortest accession prefix for which `tail` matches the rest
///
/// An optional `:` between accession and coordinates is skipped.
fn split_accession<'a, T, F>(segment: &'a str, tail: F) -> Option<(&'a str, T)>
where
    F: Fn(&'a str) -> IResult<&'a str, T>,
{
    let mut split = 0;
    loop {
        let (accession, rest) = segment.split_at(split);
        let rest = rest.strip_prefix(':').unwrap_or(rest);
        if let Ok((_, parsed)) = tail(rest) {
            return Some((accession, parsed));
        }
        match segment[split..].chars().next() {
            Some(c) if is_accession_char(c) => split += c.len_utf8(),
            _ => return None,
        }
    }
}

fn attach_accession(leaf: LeafLocation, accession: &str, source: DataSource) -> LeafLocation {
    if accession.is_empty() {
        leaf
    } else {
        leaf.with_accession(AccessionId::new(accession, source))
    }
}

/// Match one segment against the range grammar, then the single-point grammar
pub(crate) fn match_leaf(
    segment: &str,
    strand: Strand,
    source: DataSource,
) -> Result<LeafLocation, LeafFailure> {
    if let Some((accession, (start, op, end))) = split_accession(segment, range_tail) {
        let leaf = LeafLocation::new(start.to_point()?, end.to_point()?, strand)
            .with_between_bases(op == RangeOperator::BetweenBases);
        return Ok(attach_accession(leaf, accession, source));
    }

    if let Some((accession, endpoint)) = split_accession(segment, point_tail) {
        let p = endpoint.to_point()?;
        return Ok(attach_accession(
            LeafLocation::new(p, p, strand),
            accession,
            source,
        ));
    }

    Err(LeafFailure::NoMatch)
}
