//! Group keywords and composite location construction
//!
//! The scanner hands every parenthesized, non-`complement` group to a
//! [`CompositeBuilder`] together with the literal keyword that preceded the
//! `(`. The builder decides how the group is represented and whether the
//! keyword is acceptable.

use super::location::{CompositeLocation, Location};
use crate::error::InsdcError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The keyword that reverses the strand of its group instead of building a composite
pub const COMPLEMENT: &str = "complement";

/// Keyword naming how the members of a composite location relate
///
/// Unrecognised keywords are kept verbatim in [`JoinType::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum JoinType {
    /// `join`: members are joined end to end into one contiguous sequence
    Join,
    /// `order`: members occur in this order, joining is not implied
    Order,
    /// `bond`: members are linked by a chemical bond (protein features)
    Bond,
    /// `one-of`: exactly one of the members applies
    OneOf,
    /// `group`: members belong together
    Group,
    Other(String),
}

impl JoinType {
    pub fn from_keyword(keyword: &str) -> Self {
        match keyword {
            "join" => JoinType::Join,
            "order" => JoinType::Order,
            "bond" => JoinType::Bond,
            "one-of" => JoinType::OneOf,
            "group" => JoinType::Group,
            other => JoinType::Other(other.to_string()),
        }
    }

    /// The literal keyword
    pub fn as_str(&self) -> &str {
        match self {
            JoinType::Join => "join",
            JoinType::Order => "order",
            JoinType::Bond => "bond",
            JoinType::OneOf => "one-of",
            JoinType::Group => "group",
            JoinType::Other(keyword) => keyword,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, JoinType::Other(_))
    }
}

impl From<String> for JoinType {
    fn from(keyword: String) -> Self {
        JoinType::from_keyword(&keyword)
    }
}

impl From<JoinType> for String {
    fn from(join_type: JoinType) -> Self {
        join_type.as_str().to_string()
    }
}

impl fmt::Display for JoinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How strictly group keywords are checked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JoinTypeMode {
    /// Any identifier-like keyword is accepted and kept verbatim
    #[default]
    Lenient,
    /// Only `join`, `order`, `bond`, `one-of` and `group` are accepted
    Strict,
}

impl JoinTypeMode {
    pub fn is_strict(&self) -> bool {
        matches!(self, JoinTypeMode::Strict)
    }
}

impl fmt::Display for JoinTypeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JoinTypeMode::Lenient => write!(f, "lenient"),
            JoinTypeMode::Strict => write!(f, "strict"),
        }
    }
}

impl FromStr for JoinTypeMode {
    type Err = InsdcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "lenient" => Ok(JoinTypeMode::Lenient),
            "strict" => Ok(JoinTypeMode::Strict),
            other => Err(InsdcError::Config {
                msg: format!("unknown join-types mode '{}' (expected lenient or strict)", other),
            }),
        }
    }
}

/// Builds the location for one parenthesized group
///
/// `sub_locations` is exactly the ordered list the scanner collected inside
/// the group and `keyword` is the literal text before the `(`.
pub trait CompositeBuilder {
    fn build(&self, sub_locations: Vec<Location>, keyword: &str) -> Result<Location, InsdcError>;
}

/// Default builder: one [`CompositeLocation`] per group
///
/// Single-member groups are kept as composites so the keyword is never lost.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StandardBuilder {
    mode: JoinTypeMode,
}

impl StandardBuilder {
    pub fn new(mode: JoinTypeMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> JoinTypeMode {
        self.mode
    }
}

impl CompositeBuilder for StandardBuilder {
    fn build(&self, sub_locations: Vec<Location>, keyword: &str) -> Result<Location, InsdcError> {
        let join_type = JoinType::from_keyword(keyword);
        if self.mode.is_strict() && !join_type.is_known() {
            return Err(InsdcError::UnknownJoinType {
                keyword: keyword.to_string(),
            });
        }
        Ok(Location::Composite(CompositeLocation::new(
            join_type,
            sub_locations,
        )))
    }
}

impl<B: CompositeBuilder + ?Sized> CompositeBuilder for &B {
    fn build(&self, sub_locations: Vec<Location>, keyword: &str) -> Result<Location, InsdcError> {
        (**self).build(sub_locations, keyword)
    }
}
