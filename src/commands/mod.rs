//! Batch commands for parsing INSDC locations.
//!
//! This module provides batch processing functionality for the ferro-insdc
//! CLI, including progress reporting and timing output.

use crate::cli::process_input_line;
use crate::insdc::{CompositeBuilder, InsdcParser, Location};
use crate::InsdcError;
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::time::{Duration, Instant};

/// Result of parsing a single location line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationResult {
    /// Input location string
    pub input: String,

    /// 1-based line number in the input file
    pub line: usize,

    /// Whether parsing succeeded
    pub success: bool,

    /// Canonical rendering if successful
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,

    /// Parsed location if successful
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,

    /// Error message if failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Error code (e.g. `E1001`) if failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl LocationResult {
    fn new(input: &str, line: usize, outcome: Result<Location, InsdcError>) -> Self {
        match outcome {
            Ok(location) => Self {
                input: input.to_string(),
                line,
                success: true,
                output: Some(location.to_string()),
                location: Some(location),
                error: None,
                code: None,
            },
            Err(e) => Self {
                input: input.to_string(),
                line,
                success: false,
                output: None,
                location: None,
                error: Some(e.to_string()),
                code: Some(e.code().as_str().to_string()),
            },
        }
    }
}

/// Timing information for a batch operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimingInfo {
    /// Total locations processed
    pub total: usize,

    /// Successfully parsed
    pub successful: usize,

    /// Failed
    pub failed: usize,

    /// Total elapsed time in seconds
    pub elapsed_seconds: f64,

    /// Throughput (locations per second)
    pub locations_per_second: f64,
}

impl TimingInfo {
    /// Create timing info from measurements.
    pub fn new(total: usize, successful: usize, elapsed: Duration) -> Self {
        let elapsed_secs = elapsed.as_secs_f64();
        let throughput = if elapsed_secs > f64::EPSILON {
            total as f64 / elapsed_secs
        } else {
            0.0
        };

        Self {
            total,
            successful,
            failed: total - successful,
            elapsed_seconds: elapsed_secs,
            locations_per_second: throughput,
        }
    }
}

/// Results from a batch operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchResults {
    /// All results
    pub results: Vec<LocationResult>,

    /// Timing information
    pub timing: TimingInfo,
}

/// Parse locations from a file, one per line.
///
/// Blank lines and `#` comments are skipped; line numbers in the results
/// refer to the original file.
pub fn parse_batch<P, B>(
    input: P,
    parser: &InsdcParser<B>,
    show_progress: bool,
) -> Result<BatchResults, InsdcError>
where
    P: AsRef<Path>,
    B: CompositeBuilder,
{
    let input = input.as_ref();
    let lines = read_locations(input)?;

    if lines.is_empty() {
        return Ok(BatchResults {
            results: Vec::new(),
            timing: TimingInfo::new(0, 0, Duration::ZERO),
        });
    }

    let pb = if show_progress {
        let pb = ProgressBar::new(lines.len() as u64);
        pb.set_style(
            ProgressStyle::with_template(
                "[{elapsed_precise}] {bar:40.cyan/blue} {pos:>7}/{len:7} {msg}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("##-"),
        );
        Some(pb)
    } else {
        None
    };

    let start = Instant::now();

    let results: Vec<LocationResult> = lines
        .iter()
        .map(|(line, text)| {
            if let Some(ref pb) = pb {
                pb.inc(1);
            }
            LocationResult::new(text, *line, parser.parse(text))
        })
        .collect();

    let elapsed = start.elapsed();

    if let Some(pb) = pb {
        pb.finish_with_message(format!(
            "Parsed {} locations in {:.2}s",
            lines.len(),
            elapsed.as_secs_f64()
        ));
    }

    let successful = results.iter().filter(|r| r.success).count();
    let timing = TimingInfo::new(lines.len(), successful, elapsed);
    info!(
        "parsed {} locations from {} ({} failed)",
        timing.total,
        input.display(),
        timing.failed
    );

    Ok(BatchResults { results, timing })
}

/// Read non-empty, non-comment lines with their 1-based line numbers.
fn read_locations(path: &Path) -> Result<Vec<(usize, String)>, InsdcError> {
    let file = File::open(path).map_err(|e| InsdcError::Io {
        msg: format!("Failed to open {}: {}", path.display(), e),
    })?;

    let mut locations = Vec::new();
    for (idx, line) in BufReader::new(file).lines().enumerate() {
        let line = line?;
        if let Some(text) = process_input_line(&line, idx == 0) {
            locations.push((idx + 1, text.to_string()));
        }
    }
    Ok(locations)
}

fn create_output(path: &Path) -> Result<BufWriter<File>, InsdcError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| InsdcError::Io {
            msg: format!("Failed to create directory {}: {}", parent.display(), e),
        })?;
    }

    let file = File::create(path).map_err(|e| InsdcError::Io {
        msg: format!("Failed to create {}: {}", path.display(), e),
    })?;
    Ok(BufWriter::new(file))
}

/// Write batch results to a JSON file.
pub fn write_results<P: AsRef<Path>>(results: &BatchResults, path: P) -> Result<(), InsdcError> {
    let writer = create_output(path.as_ref())?;
    serde_json::to_writer_pretty(writer, results)?;
    Ok(())
}

/// Write timing info to a JSON file.
pub fn write_timing<P: AsRef<Path>>(timing: &TimingInfo, path: P) -> Result<(), InsdcError> {
    let writer = create_output(path.as_ref())?;
    serde_json::to_writer_pretty(writer, timing)?;
    Ok(())
}

/// Write results in text format (one result per line).
pub fn write_results_text<W: Write>(
    results: &BatchResults,
    mut writer: W,
) -> Result<(), InsdcError> {
    for result in &results.results {
        if result.success {
            if let Some(ref output) = result.output {
                writeln!(writer, "{}", output)?;
            }
        } else {
            let error = result.error.as_deref().unwrap_or("unknown error");
            writeln!(
                writer,
                "ERROR (line {}): {} - {}",
                result.line, result.input, error
            )?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn input_file(dir: &TempDir, lines: &[&str]) -> std::path::PathBuf {
        let input = dir.path().join("input.txt");
        let mut f = File::create(&input).unwrap();
        for line in lines {
            writeln!(f, "{}", line).unwrap();
        }
        input
    }

    #[test]
    fn test_parse_batch_empty() {
        let dir = TempDir::new().unwrap();
        let input = input_file(&dir, &[]);

        let result = parse_batch(&input, &InsdcParser::default(), false).unwrap();
        assert!(result.results.is_empty());
        assert_eq!(result.timing.total, 0);
    }

    #[test]
    fn test_parse_batch_valid() {
        let dir = TempDir::new().unwrap();
        let input = input_file(
            &dir,
            &["# header", "complement(34..126)", "", "join(12..78,134..202)"],
        );

        let result = parse_batch(&input, &InsdcParser::default(), false).unwrap();
        assert_eq!(result.results.len(), 2);
        assert_eq!(result.timing.total, 2);
        assert_eq!(result.results[0].line, 2);
        assert_eq!(result.results[1].line, 4);
        assert!(result.results.iter().all(|r| r.success));
        assert_eq!(
            result.results[1].output.as_deref(),
            Some("join(12..78,134..202)")
        );
    }

    #[test]
    fn test_parse_batch_invalid() {
        let dir = TempDir::new().unwrap();
        let input = input_file(&dir, &["join(1..4"]);

        let result = parse_batch(&input, &InsdcParser::default(), false).unwrap();
        assert_eq!(result.results.len(), 1);
        assert!(!result.results[0].success);
        assert_eq!(result.results[0].code.as_deref(), Some("E1002"));
        assert_eq!(result.timing.failed, 1);
    }

    #[test]
    fn test_parse_batch_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = parse_batch(dir.path().join("absent.txt"), &InsdcParser::default(), false)
            .unwrap_err();
        assert!(matches!(err, InsdcError::Io { .. }));
    }

    #[test]
    fn test_write_results_round_trip() {
        let dir = TempDir::new().unwrap();
        let input = input_file(&dir, &["complement(5)", "5<"]);
        let results = parse_batch(&input, &InsdcParser::default(), false).unwrap();

        let out = dir.path().join("nested").join("results.json");
        write_results(&results, &out).unwrap();
        let loaded: BatchResults =
            serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(loaded.results.len(), 2);
        assert_eq!(loaded.results[0].location, results.results[0].location);
        assert_eq!(loaded.results[1].code.as_deref(), Some("E1001"));
    }

    #[test]
    fn test_write_results_text() {
        let dir = TempDir::new().unwrap();
        let input = input_file(&dir, &["1...4", "1-4"]);
        let results = parse_batch(&input, &InsdcParser::default(), false).unwrap();

        let mut buffer = Vec::new();
        write_results_text(&results, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.starts_with("1..4\n"));
        assert!(text.contains("ERROR (line 2): 1-4 - "));
    }

    #[test]
    fn test_timing_info() {
        let timing = TimingInfo::new(100, 90, Duration::from_secs(2));
        assert_eq!(timing.total, 100);
        assert_eq!(timing.successful, 90);
        assert_eq!(timing.failed, 10);
        assert!((timing.elapsed_seconds - 2.0).abs() < 0.001);
        assert!((timing.locations_per_second - 50.0).abs() < 0.001);
    }
}
