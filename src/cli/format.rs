//! Output formatting utilities for CLI operations

use crate::error::InsdcError;
use crate::insdc::Location;
use serde_json::json;
use std::io::{self, Write};
use std::str::FromStr;

/// Output format for CLI results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Plain text format (default)
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

impl FromStr for OutputFormat {
    type Err = std::convert::Infallible;

    /// Parse an output format from a string
    ///
    /// # Examples
    ///
    /// ```
    /// use ferro_insdc::cli::OutputFormat;
    /// use std::str::FromStr;
    ///
    /// assert!(matches!(OutputFormat::from_str("json").unwrap(), OutputFormat::Json));
    /// assert!(matches!(OutputFormat::from_str("text").unwrap(), OutputFormat::Text));
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "json" => OutputFormat::Json,
            _ => OutputFormat::Text,
        })
    }
}

/// Write a successfully parsed location to the output
///
/// Text output is the canonical rendering, prefixed by the input when the two differ.
///
/// # Examples
///
/// ```
/// use ferro_insdc::cli::{output_result, OutputFormat};
/// use ferro_insdc::parse_location;
/// use std::io::Cursor;
///
/// let location = parse_location("complement(join(1..4,6..9))").unwrap();
/// let mut buffer = Cursor::new(Vec::new());
/// output_result(&mut buffer, "complement(join(1..4,6..9))", &location, OutputFormat::Text).unwrap();
/// let result = String::from_utf8(buffer.into_inner()).unwrap();
/// assert!(result.contains("-> join(complement(1..4),complement(6..9))"));
/// ```
pub fn output_result<W: Write + ?Sized>(
    writer: &mut W,
    input: &str,
    location: &Location,
    format: OutputFormat,
) -> io::Result<()> {
    let rendered = location.to_string();
    match format {
        OutputFormat::Json => {
            let record = json!({
                "input": input,
                "output": rendered,
                "location": location,
                "status": "ok",
            });
            writeln!(writer, "{}", record)
        }
        OutputFormat::Text => {
            if input == rendered {
                writeln!(writer, "{}", rendered)
            } else {
                writeln!(writer, "{} -> {}", input, rendered)
            }
        }
    }
}

/// Write an error to the output
///
/// # Examples
///
/// ```
/// use ferro_insdc::cli::{output_error, OutputFormat};
/// use ferro_insdc::InsdcError;
/// use std::io::Cursor;
///
/// let mut buffer = Cursor::new(Vec::new());
/// let error = InsdcError::malformed("1#4", 0);
/// output_error(&mut buffer, "1#4", &error, OutputFormat::Text).unwrap();
/// let result = String::from_utf8(buffer.into_inner()).unwrap();
/// assert!(result.contains("ERROR: 1#4"));
/// ```
pub fn output_error<W: Write + ?Sized>(
    writer: &mut W,
    input: &str,
    error: &InsdcError,
    format: OutputFormat,
) -> io::Result<()> {
    output_error_with_context(writer, input, error, format, None)
}

/// Write an error to the output with optional line number context
///
/// # Examples
///
/// ```
/// use ferro_insdc::cli::{output_error_with_context, OutputFormat};
/// use ferro_insdc::InsdcError;
/// use std::io::Cursor;
///
/// let mut buffer = Cursor::new(Vec::new());
/// let error = InsdcError::malformed("1#4", 0);
/// output_error_with_context(&mut buffer, "1#4", &error, OutputFormat::Text, Some(42)).unwrap();
/// let result = String::from_utf8(buffer.into_inner()).unwrap();
/// assert!(result.contains("line 42"));
/// ```
pub fn output_error_with_context<W: Write + ?Sized>(
    writer: &mut W,
    input: &str,
    error: &InsdcError,
    format: OutputFormat,
    line_number: Option<usize>,
) -> io::Result<()> {
    match format {
        OutputFormat::Json => {
            let mut record = json!({
                "input": input,
                "error": error.to_string(),
                "code": error.code().as_str(),
                "status": "error",
            });
            if let Some(line) = line_number {
                record["line"] = json!(line);
            }
            writeln!(writer, "{}", record)
        }
        OutputFormat::Text => {
            if let Some(line) = line_number {
                writeln!(writer, "ERROR (line {}): {} - {}", line, input, error)
            } else {
                writeln!(writer, "ERROR: {} - {}", input, error)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_location;
    use serde_json::Value;
    use std::io::Cursor;

    fn written<F>(f: F) -> String
    where
        F: FnOnce(&mut Cursor<Vec<u8>>) -> io::Result<()>,
    {
        let mut buffer = Cursor::new(Vec::new());
        f(&mut buffer).unwrap();
        String::from_utf8(buffer.into_inner()).unwrap()
    }

    // ===== OutputFormat Tests =====

    #[test]
    fn test_output_format_from_str() {
        assert_eq!(OutputFormat::from_str("json").unwrap(), OutputFormat::Json);
        assert_eq!(OutputFormat::from_str("JSON").unwrap(), OutputFormat::Json);
        assert_eq!(OutputFormat::from_str("text").unwrap(), OutputFormat::Text);
        assert_eq!(OutputFormat::from_str("").unwrap(), OutputFormat::Text);
        assert_eq!(OutputFormat::default(), OutputFormat::Text);
    }

    // ===== output_result Tests =====

    #[test]
    fn test_output_result_text_changed() {
        let location = parse_location("1...4").unwrap();
        let result = written(|w| output_result(w, "1...4", &location, OutputFormat::Text));
        assert_eq!(result, "1...4 -> 1..4\n");
    }

    #[test]
    fn test_output_result_text_unchanged() {
        let location = parse_location("join(1..4,6..9)").unwrap();
        let result = written(|w| output_result(w, "join(1..4,6..9)", &location, OutputFormat::Text));
        assert_eq!(result, "join(1..4,6..9)\n");
    }

    #[test]
    fn test_output_result_json() {
        let location = parse_location("complement(5)").unwrap();
        let result = written(|w| output_result(w, "complement(5)", &location, OutputFormat::Json));
        let value: Value = serde_json::from_str(&result).unwrap();
        assert_eq!(value["status"], "ok");
        assert_eq!(value["output"], "complement(5)");
        assert_eq!(value["location"]["type"], "leaf");
        assert_eq!(value["location"]["strand"], "reverse");
    }

    #[test]
    fn test_output_result_json_escaping() {
        let location = parse_location("5").unwrap();
        let result = written(|w| output_result(w, "with\"quote", &location, OutputFormat::Json));
        let value: Value = serde_json::from_str(&result).unwrap();
        assert_eq!(value["input"], "with\"quote");
    }

    #[test]
    fn test_output_through_trait_object() {
        let location = parse_location("join(1..4,6..9)").unwrap();
        let error = parse_location("1..4)").unwrap_err();
        let mut buffer = Vec::new();
        {
            let writer: &mut dyn Write = &mut buffer;
            output_result(writer, "join(1..4,6..9)", &location, OutputFormat::Text).unwrap();
            output_error(writer, "1..4)", &error, OutputFormat::Text).unwrap();
            output_error_with_context(writer, "1..4)", &error, OutputFormat::Json, Some(3))
                .unwrap();
        }
        let result = String::from_utf8(buffer).unwrap();
        assert_eq!(result.lines().count(), 3);
        assert!(result.starts_with("join(1..4,6..9)\n"));
    }

    // ===== output_error Tests =====

    #[test]
    fn test_output_error_text() {
        let error = parse_location("join(1..4,6#10)").unwrap_err();
        let result = written(|w| output_error(w, "join(1..4,6#10)", &error, OutputFormat::Text));
        assert!(result.starts_with("ERROR: join(1..4,6#10)"));
        assert!(result.contains("6#10"));
    }

    #[test]
    fn test_output_error_json_with_line() {
        let error = parse_location("join(").unwrap_err();
        let result =
            written(|w| output_error_with_context(w, "join(", &error, OutputFormat::Json, Some(7)));
        let value: Value = serde_json::from_str(&result).unwrap();
        assert_eq!(value["status"], "error");
        assert_eq!(value["code"], "E1002");
        assert_eq!(value["line"], 7);
    }
}
