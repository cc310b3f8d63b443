//! Parser configuration and `.ferro-insdc.toml` support.
//!
//! # Example Configuration
//!
//! ```toml
//! [parser]
//! data-source = "genbank"
//! max-depth = 64
//! join-types = "strict"
//! ```
//!
//! # Config File Locations
//!
//! Configuration is searched in this order (first found wins):
//! 1. `.ferro-insdc.toml` in current directory
//! 2. `~/.config/ferro/insdc.toml`
//!
//! CLI flags take precedence over config file settings.

use crate::error::InsdcError;
use crate::insdc::{DataSource, JoinTypeMode};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Groups nested deeper than this are rejected unless configured otherwise
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Largest `max-depth` accepted from a config file or the command line
pub const MAX_DEPTH_CEILING: usize = 1024;

/// Settings for one [`InsdcParser`](crate::InsdcParser)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Source attached to every parsed accession
    pub data_source: DataSource,
    /// Maximum number of simultaneously open groups
    pub max_depth: usize,
    pub join_types: JoinTypeMode,
}

impl ParserConfig {
    pub fn new(data_source: DataSource) -> Self {
        Self {
            data_source,
            max_depth: DEFAULT_MAX_DEPTH,
            join_types: JoinTypeMode::default(),
        }
    }

    pub fn with_data_source(mut self, data_source: DataSource) -> Self {
        self.data_source = data_source;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_join_types(mut self, join_types: JoinTypeMode) -> Self {
        self.join_types = join_types;
        self
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self::new(DataSource::default())
    }
}

/// Parsed contents of a config file
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub parser: ParserSection,
}

/// `[parser]` table; every key is optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ParserSection {
    pub data_source: Option<String>,
    pub max_depth: Option<usize>,
    pub join_types: Option<String>,
}

impl FileConfig {
    /// Load configuration from the default locations.
    ///
    /// Searches for config in:
    /// 1. `.ferro-insdc.toml` in current directory
    /// 2. `~/.config/ferro/insdc.toml`
    ///
    /// A file that exists but cannot be read or parsed is an error.
    pub fn load() -> Result<Option<Self>, InsdcError> {
        let cwd_config = PathBuf::from(".ferro-insdc.toml");
        if cwd_config.exists() {
            return Self::load_from_path(&cwd_config).map(Some);
        }

        if let Some(home) = dirs_home() {
            let home_config = home.join(".config").join("ferro").join("insdc.toml");
            if home_config.exists() {
                return Self::load_from_path(&home_config).map(Some);
            }
        }

        Ok(None)
    }

    /// Load configuration from a specific path.
    pub fn load_from_path(path: &Path) -> Result<Self, InsdcError> {
        let content = fs::read_to_string(path).map_err(|e| InsdcError::Config {
            msg: format!("failed to read {}: {}", path.display(), e),
        })?;
        let config = Self::parse(&content)?;
        log::debug!("loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Parse configuration from TOML content.
    pub fn parse(content: &str) -> Result<Self, InsdcError> {
        Ok(toml::from_str(content)?)
    }

    /// Resolve into a parser configuration, validating every value.
    pub fn to_parser_config(&self) -> Result<ParserConfig, InsdcError> {
        let mut config = ParserConfig::default();
        if let Some(source) = &self.parser.data_source {
            config.data_source = source.parse()?;
        }
        if let Some(depth) = self.parser.max_depth {
            config.max_depth = checked_max_depth(depth)?;
        }
        if let Some(mode) = &self.parser.join_types {
            config.join_types = mode.parse()?;
        }
        Ok(config)
    }

    /// Merge this config with CLI arguments.
    /// CLI arguments take precedence.
    pub fn merge_with_cli(
        &self,
        cli_source: Option<&str>,
        cli_max_depth: Option<usize>,
        cli_strict_join_types: bool,
    ) -> Result<ParserConfig, InsdcError> {
        let mut config = self.to_parser_config()?;
        if let Some(source) = cli_source {
            config.data_source = source.parse()?;
        }
        if let Some(depth) = cli_max_depth {
            config.max_depth = checked_max_depth(depth)?;
        }
        if cli_strict_join_types {
            config.join_types = JoinTypeMode::Strict;
        }
        Ok(config)
    }
}

fn checked_max_depth(depth: usize) -> Result<usize, InsdcError> {
    if depth > MAX_DEPTH_CEILING {
        return Err(InsdcError::Config {
            msg: format!(
                "max-depth {} exceeds the limit of {}",
                depth, MAX_DEPTH_CEILING
            ),
        });
    }
    Ok(depth)
}

/// Get the user's home directory.
fn dirs_home() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}
