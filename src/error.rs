//! Error types for ferro-insdc
//!
//! This module provides error handling with:
//! - Error codes for categorization
//! - Source span tracking for error location
//! - Helpful diagnostic messages
//! - "Did you mean?" suggestions for misspelled group keywords

use std::fmt;
use thiserror::Error;

/// Error codes for categorizing errors
///
/// These codes can be used for programmatic error handling
/// and are listed by `ferro-insdc explain`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum ErrorCode {
    // Parse errors (E1xxx)
    /// Segment matches neither the single-point nor the range grammar
    MalformedLeaf = 1001,
    /// Parentheses or group keywords are inconsistent
    StructuralMismatch = 1002,
    /// Top level did not produce exactly one location
    Cardinality = 1003,
    /// Group nesting exceeds the configured limit
    NestingTooDeep = 1004,
    /// Group keyword outside the known join types (strict mode)
    UnknownJoinType = 1005,

    // IO errors (E9xxx)
    /// Character stream failed while reading
    StreamError = 9001,
    /// Configuration file could not be read or parsed
    ConfigError = 9002,
    /// File IO error
    IoError = 9003,
}

impl ErrorCode {
    /// All codes, in numeric order
    pub const ALL: [ErrorCode; 8] = [
        ErrorCode::MalformedLeaf,
        ErrorCode::StructuralMismatch,
        ErrorCode::Cardinality,
        ErrorCode::NestingTooDeep,
        ErrorCode::UnknownJoinType,
        ErrorCode::StreamError,
        ErrorCode::ConfigError,
        ErrorCode::IoError,
    ];

    /// Get the error code as a string (e.g., "E1001")
    pub fn as_str(&self) -> String {
        format!("E{:04}", *self as u16)
    }

    /// Get a brief description of this error code
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::MalformedLeaf => "malformed single or range location",
            ErrorCode::StructuralMismatch => "unbalanced or misplaced parentheses",
            ErrorCode::Cardinality => "expected exactly one top-level location",
            ErrorCode::NestingTooDeep => "group nesting too deep",
            ErrorCode::UnknownJoinType => "unknown join type keyword",
            ErrorCode::StreamError => "character stream read failure",
            ErrorCode::ConfigError => "invalid configuration",
            ErrorCode::IoError => "file I/O error",
        }
    }

    /// Longer explanation, shown by `ferro-insdc explain`
    pub fn explanation(&self) -> &'static str {
        match self {
            ErrorCode::MalformedLeaf => {
                "A segment between delimiters must be either `[acc:][<>]N` or \
                 `[acc:][<>]N(..|^)[<>]M`. Coordinates must be non-negative integers \
                 and the range operator must be a run of dots or a single caret."
            }
            ErrorCode::StructuralMismatch => {
                "Every `(` must follow a group keyword such as `join` or `complement`, \
                 every group must be closed by `)` and must contain at least one location."
            }
            ErrorCode::Cardinality => {
                "A location expression must describe exactly one location. Wrap bare \
                 comma-separated lists in a keyword such as `join(...)` or `order(...)`."
            }
            ErrorCode::NestingTooDeep => {
                "The expression nests groups deeper than the configured `max-depth`."
            }
            ErrorCode::UnknownJoinType => {
                "Strict join-type checking only accepts join, order, bond, one-of and group."
            }
            ErrorCode::StreamError => "The underlying reader failed or produced invalid UTF-8.",
            ErrorCode::ConfigError => "A configuration file or value could not be understood.",
            ErrorCode::IoError => "An input or output file could not be read or written.",
        }
    }

    /// Look up a code from its string form (e.g., "E1001")
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(code))
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A span in the source input indicating error location
///
/// Offsets count characters, not bytes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SourceSpan {
    /// Starting offset (0-indexed)
    pub start: usize,
    /// Ending offset (exclusive)
    pub end: usize,
}

impl SourceSpan {
    /// Create a new source span
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Create a span for a single position
    pub fn point(pos: usize) -> Self {
        Self {
            start: pos,
            end: pos + 1,
        }
    }

    /// Format the source with the error highlighted
    ///
    /// Returns a string like:
    /// ```text
    /// join(1..4,6#10)
    ///           ^~~~
    /// ```
    pub fn highlight(&self, source: &str) -> String {
        if source.is_empty() {
            return String::new();
        }

        let len = source.chars().count();
        let safe_start = self.start.min(len);
        let safe_end = self.end.min(len).max(safe_start);

        let mut pointer = " ".repeat(safe_start);
        pointer.push('^');
        for _ in (safe_start + 1)..safe_end {
            pointer.push('~');
        }

        format!("{}\n{}", source, pointer)
    }
}

/// Diagnostic information for an error
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Diagnostic {
    /// Error code
    pub code: Option<ErrorCode>,
    /// Source span for highlighting
    pub span: Option<SourceSpan>,
    /// The input consumed so far (for error display)
    pub source: Option<String>,
    /// Helpful hint
    pub hint: Option<String>,
    /// "Did you mean?" suggestion
    pub suggestion: Option<String>,
}

impl Diagnostic {
    /// Create a new empty diagnostic
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an error code
    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Add a source span
    pub fn with_span(mut self, span: SourceSpan) -> Self {
        self.span = Some(span);
        self
    }

    /// Add the original source
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Add a hint
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Add a suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Format the diagnostic as a detailed error message
    pub fn format(&self, primary_message: &str) -> String {
        let mut result = String::new();

        if let Some(code) = &self.code {
            result.push_str(&format!("[{}] ", code));
        }

        result.push_str(primary_message);

        if let (Some(span), Some(source)) = (&self.span, &self.source) {
            result.push_str("\n\n");
            result.push_str(&span.highlight(source));
        }

        if let Some(hint) = &self.hint {
            result.push_str("\n\nHint: ");
            result.push_str(hint);
        }

        if let Some(suggestion) = &self.suggestion {
            result.push_str("\n\nDid you mean: ");
            result.push_str(suggestion);
        }

        result
    }
}

/// Main error type for ferro-insdc operations
///
/// Every parse failure is terminal and carries the offending text.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InsdcError {
    /// A delimiter-free segment matched neither leaf grammar
    #[error("Malformed location '{segment}' at position {pos}: does not match a single or range location")]
    MalformedLeaf {
        segment: String,
        pos: usize,
        /// Optional diagnostic with additional context
        diagnostic: Option<Box<Diagnostic>>,
    },

    /// Parentheses or group keywords are inconsistent
    #[error("Structural error at position {pos}: {msg} in '{consumed}'")]
    StructuralMismatch {
        pos: usize,
        msg: String,
        /// Input consumed up to and including the offending character
        consumed: String,
    },

    /// The top level produced zero or several locations
    #[error("Expected exactly one location but parsed {count} from '{input}'")]
    Cardinality { count: usize, input: String },

    /// Groups nest deeper than the configured limit
    #[error("Nesting depth exceeds limit of {limit} at position {pos} in '{consumed}'")]
    NestingTooDeep {
        limit: usize,
        pos: usize,
        consumed: String,
    },

    /// Group keyword rejected by strict join-type checking
    #[error("Unknown join type '{keyword}'")]
    UnknownJoinType { keyword: String },

    /// The character source failed during read
    #[error("Stream error after reading '{consumed}': {msg}")]
    Stream { consumed: String, msg: String },

    /// Invalid configuration value or file
    #[error("Configuration error: {msg}")]
    Config { msg: String },

    /// IO error (for file operations)
    #[error("IO error: {msg}")]
    Io { msg: String },
}

impl InsdcError {
    /// Create a malformed-leaf error without diagnostic
    pub fn malformed(segment: impl Into<String>, pos: usize) -> Self {
        InsdcError::MalformedLeaf {
            segment: segment.into(),
            pos,
            diagnostic: None,
        }
    }

    /// Create a malformed-leaf error with diagnostic information
    pub fn malformed_with_diagnostic(
        segment: impl Into<String>,
        pos: usize,
        diagnostic: Diagnostic,
    ) -> Self {
        InsdcError::MalformedLeaf {
            segment: segment.into(),
            pos,
            diagnostic: Some(Box::new(diagnostic)),
        }
    }

    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            InsdcError::MalformedLeaf { .. } => ErrorCode::MalformedLeaf,
            InsdcError::StructuralMismatch { .. } => ErrorCode::StructuralMismatch,
            InsdcError::Cardinality { .. } => ErrorCode::Cardinality,
            InsdcError::NestingTooDeep { .. } => ErrorCode::NestingTooDeep,
            InsdcError::UnknownJoinType { .. } => ErrorCode::UnknownJoinType,
            InsdcError::Stream { .. } => ErrorCode::StreamError,
            InsdcError::Config { .. } => ErrorCode::ConfigError,
            InsdcError::Io { .. } => ErrorCode::IoError,
        }
    }

    /// The offending text carried by this error, if any
    pub fn offending_text(&self) -> Option<&str> {
        match self {
            InsdcError::MalformedLeaf { segment, .. } => Some(segment),
            InsdcError::StructuralMismatch { consumed, .. }
            | InsdcError::NestingTooDeep { consumed, .. }
            | InsdcError::Stream { consumed, .. } => Some(consumed),
            InsdcError::Cardinality { input, .. } => Some(input),
            InsdcError::UnknownJoinType { keyword } => Some(keyword),
            InsdcError::Config { .. } | InsdcError::Io { .. } => None,
        }
    }

    /// Get a formatted error with full diagnostic output
    pub fn detailed_message(&self) -> String {
        let diagnostic = match self {
            InsdcError::MalformedLeaf {
                diagnostic: Some(d),
                ..
            } => (**d).clone(),
            InsdcError::StructuralMismatch { pos, consumed, .. }
            | InsdcError::NestingTooDeep { pos, consumed, .. } => Diagnostic::new()
                .with_code(self.code())
                .with_span(SourceSpan::point(*pos))
                .with_source(consumed.clone()),
            InsdcError::UnknownJoinType { keyword } => {
                let diagnostic = Diagnostic::new().with_code(self.code());
                match suggest_join_type(keyword) {
                    Some(s) => diagnostic.with_suggestion(s),
                    None => diagnostic,
                }
            }
            _ => Diagnostic::new().with_code(self.code()),
        };
        diagnostic.format(&self.to_string())
    }
}

/// Known join types, used for suggestions
///
/// `complement` is absent: it reverses the strand instead of joining.
const JOIN_KEYWORDS: [&str; 5] = ["join", "order", "bond", "one-of", "group"];

/// Suggest a known group keyword for a misspelled one
///
/// Matches on a shared prefix of at least three characters, ignoring case.
pub fn suggest_join_type(found: &str) -> Option<&'static str> {
    let found_lower = found.to_lowercase();
    let prefix: String = found_lower.chars().take(3).collect();
    if prefix.chars().count() < 3 {
        return None;
    }
    JOIN_KEYWORDS.iter().copied().find(|keyword| {
        found_lower != *keyword
            && (keyword.starts_with(&prefix) || found_lower.starts_with(keyword))
    })
}

impl From<std::io::Error> for InsdcError {
    fn from(err: std::io::Error) -> Self {
        InsdcError::Io {
            msg: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for InsdcError {
    fn from(err: serde_json::Error) -> Self {
        InsdcError::Io {
            msg: format!("JSON error: {}", err),
        }
    }
}

impl From<toml::de::Error> for InsdcError {
    fn from(err: toml::de::Error) -> Self {
        InsdcError::Config {
            msg: err.to_string(),
        }
    }
}
