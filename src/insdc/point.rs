//! Coordinates and their uncertainty
//!
//! INSDC marks an inexact coordinate with a leading `<` (the true position is
//! at or before the stated value) or `>` (at or after it). For example,
//! `<3..>9` is a range whose start and end are both uncertain.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which uncertainty marker, if any, preceded a coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Uncertainty {
    /// No marker
    #[default]
    Certain,
    /// `<`: at or before the stated coordinate
    Before,
    /// `>`: at or after the stated coordinate
    After,
}

impl Uncertainty {
    /// Map a marker character to its uncertainty
    pub fn from_marker(marker: char) -> Option<Self> {
        match marker {
            '<' => Some(Uncertainty::Before),
            '>' => Some(Uncertainty::After),
            _ => None,
        }
    }

    /// The marker character, if any
    pub fn marker(self) -> Option<char> {
        match self {
            Uncertainty::Certain => None,
            Uncertainty::Before => Some('<'),
            Uncertainty::After => Some('>'),
        }
    }

    pub fn is_certain(self) -> bool {
        matches!(self, Uncertainty::Certain)
    }
}

/// A single coordinate on a sequence
///
/// `unknown` marks a coordinate that is entirely unspecified. The INSDC
/// grammar has no syntax for it, so parsed points always have it unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub position: u64,
    #[serde(default)]
    pub uncertainty: Uncertainty,
    #[serde(default)]
    pub unknown: bool,
}

impl Point {
    /// A certain point
    pub fn new(position: u64) -> Self {
        Self {
            position,
            uncertainty: Uncertainty::Certain,
            unknown: false,
        }
    }

    /// A point with the given uncertainty marker
    pub fn with_uncertainty(position: u64, uncertainty: Uncertainty) -> Self {
        Self {
            position,
            uncertainty,
            unknown: false,
        }
    }

    /// A point whose coordinate is not known
    pub fn unknown(position: u64) -> Self {
        Self {
            position,
            uncertainty: Uncertainty::Certain,
            unknown: true,
        }
    }

    /// True when the source marked the coordinate with `<` or `>`
    pub fn is_uncertain(&self) -> bool {
        !self.uncertainty.is_certain()
    }

    pub fn is_unknown(&self) -> bool {
        self.unknown
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(marker) = self.uncertainty.marker() {
            write!(f, "{}", marker)?;
        }
        write!(f, "{}", self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_certain_point() {
        let p = Point::new(42);
        assert_eq!(p.position, 42);
        assert!(!p.is_uncertain());
        assert!(!p.is_unknown());
    }

    #[test]
    fn test_uncertain_point() {
        let before = Point::with_uncertainty(3, Uncertainty::Before);
        let after = Point::with_uncertainty(9, Uncertainty::After);
        assert!(before.is_uncertain());
        assert!(after.is_uncertain());
        assert_ne!(before, Point::with_uncertainty(3, Uncertainty::After));
    }

    #[test]
    fn test_marker_roundtrip() {
        for marker in ['<', '>'] {
            let uncertainty = Uncertainty::from_marker(marker).unwrap();
            assert_eq!(uncertainty.marker(), Some(marker));
        }
        assert_eq!(Uncertainty::from_marker('='), None);
        assert_eq!(Uncertainty::Certain.marker(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Point::new(100).to_string(), "100");
        assert_eq!(Point::with_uncertainty(3, Uncertainty::Before).to_string(), "<3");
        assert_eq!(Point::with_uncertainty(9, Uncertainty::After).to_string(), ">9");
    }

    #[test]
    fn test_unknown_point() {
        let p = Point::unknown(0);
        assert!(p.is_unknown());
        assert!(!p.is_uncertain());
    }
}
