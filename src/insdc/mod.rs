//! INSDC location types and parser
//!
//! This module contains the value types describing feature locations as they
//! appear in ENA, GenBank and DDBJ records, and a streaming parser for the
//! location expression syntax.

pub mod accession;
pub mod join;
pub mod location;
pub mod parser;
pub mod point;
pub mod strand;

// Re-export commonly used types
pub use accession::{AccessionId, DataSource};
pub use join::{CompositeBuilder, JoinType, JoinTypeMode, StandardBuilder, COMPLEMENT};
pub use location::{CompositeLocation, LeafLocation, Location};
pub use parser::{parse_location, InsdcParser};
pub use point::{Point, Uncertainty};
pub use strand::Strand;
