// Copyright (c) 2024-2025 Fulcrum Genomics LLC
// SPDX-License-Identifier: MIT

//! ferro-insdc: INSDC feature location parser
//!
//! Part of the ferro bioinformatics toolkit.
//!
//! # Example
//!
//! ```
//! use ferro_insdc::{parse_location, JoinType, Strand};
//!
//! // Parse a GenBank/ENA location string
//! let location = parse_location("join(J00194.1:100..202,complement(<1..>240))").unwrap();
//!
//! let composite = location.as_composite().unwrap();
//! assert_eq!(composite.join_type, JoinType::Join);
//! assert_eq!(composite.sub_locations.len(), 2);
//! assert_eq!(composite.sub_locations[1].strand(), Some(Strand::Reverse));
//! println!("Parsed: {}", location);
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod insdc;

// Re-export commonly used types
pub use config::{FileConfig, ParserConfig};
pub use error::{Diagnostic, ErrorCode, InsdcError, SourceSpan};
pub use insdc::{
    parse_location, AccessionId, CompositeBuilder, CompositeLocation, DataSource, InsdcParser,
    JoinType, JoinTypeMode, LeafLocation, Location, Point, StandardBuilder, Strand, Uncertainty,
};

/// Result type alias for ferro-insdc operations
pub type Result<T> = std::result::Result<T, InsdcError>;
