//! CLI utilities for ferro-insdc
//!
//! This module provides testable functions used by the CLI binary.
//! Input handling and output formatting live here so they can be unit tested
//! against in-memory buffers.

pub mod format;

// Re-export commonly used items
pub use format::{output_error, output_error_with_context, output_result, OutputFormat};

/// UTF-8 BOM (Byte Order Mark) constant
const UTF8_BOM: &str = "\u{feff}";

/// Strip UTF-8 BOM from the beginning of a string if present.
///
/// This is common when files are exported from Windows applications or Excel.
///
/// # Examples
///
/// ```
/// use ferro_insdc::cli::strip_bom;
///
/// assert_eq!(strip_bom("\u{feff}join(1..4,6..9)"), "join(1..4,6..9)");
/// assert_eq!(strip_bom("join(1..4,6..9)"), "join(1..4,6..9)");
/// ```
pub fn strip_bom(s: &str) -> &str {
    s.strip_prefix(UTF8_BOM).unwrap_or(s)
}

/// Strip inline comments from a location line.
///
/// Comments start with `#` and extend to the end of the line.
/// Leading/trailing whitespace is also trimmed.
///
/// # Examples
///
/// ```
/// use ferro_insdc::cli::strip_inline_comment;
///
/// assert_eq!(strip_inline_comment("complement(3..9)  # CDS"), "complement(3..9)");
/// assert_eq!(strip_inline_comment("complement(3..9)"), "complement(3..9)");
/// assert_eq!(strip_inline_comment("# full line comment"), "");
/// ```
pub fn strip_inline_comment(s: &str) -> &str {
    match s.find('#') {
        Some(pos) => s[..pos].trim(),
        None => s.trim(),
    }
}

/// Process an input line: trim whitespace, strip BOM (for first line), and strip inline comments.
///
/// Returns None if the line is empty or a comment-only line.
///
/// # Arguments
///
/// * `line` - The input line to process
/// * `is_first_line` - Whether this is the first line of input. A UTF-8 BOM
///   only appears at the start of a file, so it is only stripped here.
///
/// # Examples
///
/// ```
/// use ferro_insdc::cli::process_input_line;
///
/// assert_eq!(process_input_line("1..4", false), Some("1..4"));
/// assert_eq!(process_input_line("1..4  # note", false), Some("1..4"));
/// assert_eq!(process_input_line("\u{feff}1..4", true), Some("1..4"));
/// assert_eq!(process_input_line("", false), None);
/// assert_eq!(process_input_line("# comment", false), None);
/// ```
pub fn process_input_line(line: &str, is_first_line: bool) -> Option<&str> {
    let line = line.trim();
    let line = if is_first_line { strip_bom(line) } else { line };
    let line = strip_inline_comment(line);

    if line.is_empty() {
        None
    } else {
        Some(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_bom() {
        assert_eq!(strip_bom("\u{feff}5"), "5");
        assert_eq!(strip_bom("5"), "5");
        assert_eq!(strip_bom("\u{feff}"), "");
        assert_eq!(strip_bom(""), "");
    }

    #[test]
    fn test_strip_inline_comment() {
        assert_eq!(strip_inline_comment("1..4  # comment"), "1..4");
        assert_eq!(strip_inline_comment("1..4#comment"), "1..4");
        assert_eq!(strip_inline_comment("# full comment"), "");
        assert_eq!(strip_inline_comment("  join(1,2)  "), "join(1,2)");
    }

    #[test]
    fn test_process_input_line() {
        assert_eq!(process_input_line("1..4", false), Some("1..4"));
        assert_eq!(process_input_line("1..4  # comment", false), Some("1..4"));

        assert_eq!(process_input_line("\u{feff}1..4", true), Some("1..4"));
        // Not whitespace, so a BOM past the first line survives trimming
        assert_eq!(
            process_input_line("\u{feff}1..4", false),
            Some("\u{feff}1..4")
        );

        assert_eq!(process_input_line("", false), None);
        assert_eq!(process_input_line("   ", false), None);
        assert_eq!(process_input_line("# comment", false), None);
    }
}
