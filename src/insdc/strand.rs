//! Strand orientation

use serde::{Deserialize, Serialize};
use std::fmt;

/// Orientation of a location relative to the reference sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strand {
    /// Same orientation as the reference (`+`)
    #[default]
    Forward,
    /// Reverse complement of the reference (`-`)
    Reverse,
}

impl Strand {
    /// The opposite orientation
    ///
    /// `s.reverse().reverse() == s` for every strand.
    pub fn reverse(self) -> Self {
        match self {
            Strand::Forward => Strand::Reverse,
            Strand::Reverse => Strand::Forward,
        }
    }

    pub fn is_forward(self) -> bool {
        matches!(self, Strand::Forward)
    }

    pub fn is_reverse(self) -> bool {
        matches!(self, Strand::Reverse)
    }
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strand::Forward => write!(f, "+"),
            Strand::Reverse => write!(f, "-"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reverse_is_involutive() {
        for strand in [Strand::Forward, Strand::Reverse] {
            assert_ne!(strand.reverse(), strand);
            assert_eq!(strand.reverse().reverse(), strand);
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(Strand::Forward.to_string(), "+");
        assert_eq!(Strand::Reverse.to_string(), "-");
    }

    #[test]
    fn test_default_is_forward() {
        assert!(Strand::default().is_forward());
    }
}
