//! Location value types
//!
//! A parsed expression is a tree: leaves are single points or contiguous
//! ranges, inner nodes are keyword groups such as `join(...)` or `order(...)`.
//! `complement(...)` does not produce a node of its own; it flips the strand
//! of every leaf inside it.

use super::accession::AccessionId;
use super::join::JoinType;
use super::point::Point;
use super::strand::Strand;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single point or contiguous range on one sequence
///
/// A single point uses the same [`Point`] for `start` and `end`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LeafLocation {
    pub start: Point,
    pub end: Point,
    pub strand: Strand,
    /// Record the coordinates refer to, when not the current one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accession: Option<AccessionId>,
    /// True for `^` sites: an insertion point between two adjacent bases
    #[serde(default)]
    pub between_bases: bool,
}

impl LeafLocation {
    pub fn new(start: Point, end: Point, strand: Strand) -> Self {
        Self {
            start,
            end,
            strand,
            accession: None,
            between_bases: false,
        }
    }

    /// A certain single-point location
    pub fn point(position: u64, strand: Strand) -> Self {
        let p = Point::new(position);
        Self::new(p, p, strand)
    }

    /// A certain range location
    pub fn range(start: u64, end: u64, strand: Strand) -> Self {
        Self::new(Point::new(start), Point::new(end), strand)
    }

    pub fn with_accession(mut self, accession: AccessionId) -> Self {
        self.accession = Some(accession);
        self
    }

    pub fn with_between_bases(mut self, between_bases: bool) -> Self {
        self.between_bases = between_bases;
        self
    }

    /// True when start and end are the same point and this is not a `^` site
    pub fn is_single_point(&self) -> bool {
        self.start == self.end && !self.between_bases
    }

    fn fmt_body(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(accession) = &self.accession {
            write!(f, "{}:", accession)?;
        }
        if self.is_single_point() {
            write!(f, "{}", self.start)
        } else if self.between_bases {
            write!(f, "{}^{}", self.start, self.end)
        } else {
            write!(f, "{}..{}", self.start, self.end)
        }
    }
}

impl fmt::Display for LeafLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.strand {
            Strand::Forward => self.fmt_body(f),
            Strand::Reverse => {
                write!(f, "complement(")?;
                self.fmt_body(f)?;
                write!(f, ")")
            }
        }
    }
}

/// An ordered group of sub-locations under a keyword
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CompositeLocation {
    pub join_type: JoinType,
    pub sub_locations: Vec<Location>,
}

impl CompositeLocation {
    pub fn new(join_type: JoinType, sub_locations: Vec<Location>) -> Self {
        Self {
            join_type,
            sub_locations,
        }
    }
}

impl fmt::Display for CompositeLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.join_type)?;
        for (i, sub) in self.sub_locations.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", sub)?;
        }
        write!(f, ")")
    }
}

/// A parsed INSDC location
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Location {
    Leaf(LeafLocation),
    Composite(CompositeLocation),
}

impl Location {
    pub fn as_leaf(&self) -> Option<&LeafLocation> {
        match self {
            Location::Leaf(leaf) => Some(leaf),
            Location::Composite(_) => None,
        }
    }

    pub fn as_composite(&self) -> Option<&CompositeLocation> {
        match self {
            Location::Composite(composite) => Some(composite),
            Location::Leaf(_) => None,
        }
    }

    /// True for keyword groups
    pub fn is_complex(&self) -> bool {
        matches!(self, Location::Composite(_))
    }

    /// Direct children of a composite; empty for a leaf
    pub fn sub_locations(&self) -> &[Location] {
        match self {
            Location::Leaf(_) => &[],
            Location::Composite(composite) => &composite.sub_locations,
        }
    }

    /// All leaves in source order, descending through nested groups
    pub fn leaves(&self) -> Vec<&LeafLocation> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a LeafLocation>) {
        match self {
            Location::Leaf(leaf) => out.push(leaf),
            Location::Composite(composite) => {
                for sub in &composite.sub_locations {
                    sub.collect_leaves(out);
                }
            }
        }
    }

    /// Start of a leaf, or the lowest start over all leaves of a composite
    pub fn start(&self) -> Option<&Point> {
        match self {
            Location::Leaf(leaf) => Some(&leaf.start),
            Location::Composite(_) => self
                .leaves()
                .into_iter()
                .map(|leaf| &leaf.start)
                .min_by_key(|p| p.position),
        }
    }

    /// End of a leaf, or the highest end over all leaves of a composite
    pub fn end(&self) -> Option<&Point> {
        match self {
            Location::Leaf(leaf) => Some(&leaf.end),
            Location::Composite(_) => self
                .leaves()
                .into_iter()
                .map(|leaf| &leaf.end)
                .max_by_key(|p| p.position),
        }
    }

    /// Strand of a leaf; a composite only reports one when all leaves agree
    pub fn strand(&self) -> Option<Strand> {
        match self {
            Location::Leaf(leaf) => Some(leaf.strand),
            Location::Composite(_) => {
                let mut strands = self.leaves().into_iter().map(|leaf| leaf.strand);
                let first = strands.next()?;
                strands.all(|s| s == first).then_some(first)
            }
        }
    }

    /// Accession of a leaf; composites carry none of their own
    pub fn accession(&self) -> Option<&AccessionId> {
        self.as_leaf().and_then(|leaf| leaf.accession.as_ref())
    }
}

impl From<LeafLocation> for Location {
    fn from(leaf: LeafLocation) -> Self {
        Location::Leaf(leaf)
    }
}

impl From<CompositeLocation> for Location {
    fn from(composite: CompositeLocation) -> Self {
        Location::Composite(composite)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Leaf(leaf) => write!(f, "{}", leaf),
            Location::Composite(composite) => write!(f, "{}", composite),
        }
    }
}
