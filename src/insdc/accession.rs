//! Accession identifiers and the databases they belong to

use crate::error::InsdcError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Database namespace an accession is resolved against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DataSource {
    /// European Nucleotide Archive
    #[default]
    Ena,
    /// NCBI GenBank
    Genbank,
    /// DNA Data Bank of Japan
    Ddbj,
    Ncbi,
    Refseq,
    Ensembl,
    Uniprot,
    Pdb,
    Genedb,
}

impl DataSource {
    pub const ALL: [DataSource; 9] = [
        DataSource::Ena,
        DataSource::Genbank,
        DataSource::Ddbj,
        DataSource::Ncbi,
        DataSource::Refseq,
        DataSource::Ensembl,
        DataSource::Uniprot,
        DataSource::Pdb,
        DataSource::Genedb,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DataSource::Ena => "ENA",
            DataSource::Genbank => "GENBANK",
            DataSource::Ddbj => "DDBJ",
            DataSource::Ncbi => "NCBI",
            DataSource::Refseq => "REFSEQ",
            DataSource::Ensembl => "ENSEMBL",
            DataSource::Uniprot => "UNIPROT",
            DataSource::Pdb => "PDB",
            DataSource::Genedb => "GENEDB",
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DataSource {
    type Err = InsdcError;

    /// Case-insensitive
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        DataSource::ALL
            .iter()
            .copied()
            .find(|source| source.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| InsdcError::Config {
                msg: format!(
                    "unknown data source '{}' (expected one of: {})",
                    trimmed,
                    DataSource::ALL
                        .iter()
                        .map(|s| s.as_str().to_lowercase())
                        .collect::<Vec<_>>()
                        .join(", ")
                ),
            })
    }
}

/// A reference to another sequence record, e.g. `J00194.1` in `J00194.1:100..202`
///
/// Two accessions are equal only when both the identifier and the data source match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccessionId {
    pub id: String,
    pub source: DataSource,
}

impl AccessionId {
    pub fn new(id: impl Into<String>, source: DataSource) -> Self {
        Self {
            id: id.into(),
            source,
        }
    }
}

impl fmt::Display for AccessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}
