// Copyright (c) 2024-2025 Fulcrum Genomics LLC
// SPDX-License-Identifier: MIT

//! ferro-insdc CLI
//!
//! Command-line interface for parsing INSDC feature locations.

use clap::{Parser, Subcommand};
use ferro_insdc::cli::{
    output_error_with_context as cli_output_error_with_context, output_result, process_input_line,
    OutputFormat,
};
use ferro_insdc::commands::{parse_batch, write_results, write_results_text, write_timing, TimingInfo};
use ferro_insdc::config::FileConfig;
use ferro_insdc::{ErrorCode, InsdcError, InsdcParser, ParserConfig};
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "ferro-insdc")]
#[command(author, version, about = "INSDC feature location parser")]
#[command(
    long_about = "Parse GenBank, ENA and DDBJ feature location strings.

Examples:
  ferro-insdc parse 'complement(join(2691..4571,4918..5163))'
  ferro-insdc parse -i locations.txt -f json
  echo 'J00194.1:100..202' | ferro-insdc parse --source genbank
  ferro-insdc batch -i locations.txt -o results.json --progress
  ferro-insdc explain E1001"
)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

/// Parser settings shared by `parse` and `batch`
#[derive(clap::Args)]
struct ParserArgs {
    /// Data source attached to parsed accessions (ENA, GENBANK, DDBJ, ...)
    #[arg(long)]
    source: Option<String>,

    /// Maximum group nesting depth
    #[arg(long)]
    max_depth: Option<usize>,

    /// Reject group keywords other than join, order, bond, one-of and group
    #[arg(long)]
    strict_join_types: bool,
}

impl ParserArgs {
    /// Combine config file settings with these flags; flags win
    fn resolve(&self) -> Result<ParserConfig, InsdcError> {
        let file = FileConfig::load()?.unwrap_or_default();
        let config = file.merge_with_cli(
            self.source.as_deref(),
            self.max_depth,
            self.strict_join_types,
        )?;
        debug!("parser configuration: {:?}", config);
        Ok(config)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Parse locations and print their canonical form
    Parse {
        /// Location string (reads from stdin or --input if omitted)
        location: Option<String>,

        /// Input file (one location per line)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short = 'f', long, default_value = "text", value_parser = ["text", "json"])]
        format: String,

        #[command(flatten)]
        parser: ParserArgs,

        /// Write timing information to this JSON file
        #[arg(short, long)]
        timing: Option<PathBuf>,
    },

    /// Parse a file of locations and write a JSON report
    Batch {
        /// Input file (one location per line)
        #[arg(short, long)]
        input: PathBuf,

        /// Output JSON file (default: text results on stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Show a progress bar
        #[arg(long)]
        progress: bool,

        #[command(flatten)]
        parser: ParserArgs,
    },

    /// Explain an error code
    Explain {
        /// Error code (e.g. E1001)
        code: Option<String>,

        /// List all error codes
        #[arg(long)]
        list: bool,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level)?;

    match cli.command {
        Commands::Parse {
            location,
            input,
            output,
            format,
            parser,
            timing,
        } => run_parse(
            location.as_deref(),
            input.as_ref(),
            output.as_ref(),
            format.parse().unwrap_or_default(),
            &parser,
            timing.as_ref(),
        ),
        Commands::Batch {
            input,
            output,
            progress,
            parser,
        } => run_batch(&input, output.as_ref(), progress, &parser),
        Commands::Explain { code, list } => run_explain(code.as_deref(), list),
    }
}

fn run_parse(
    location: Option<&str>,
    input: Option<&PathBuf>,
    output: Option<&PathBuf>,
    format: OutputFormat,
    parser_args: &ParserArgs,
    timing: Option<&PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let parser = InsdcParser::with_config(parser_args.resolve()?);

    let mut writer: Box<dyn Write> = match output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(io::stdout()),
    };
    let mut error_count = 0usize;
    let mut total_count = 0usize;
    let start = Instant::now();

    let mut process = |text: &str, line: Option<usize>, writer: &mut dyn Write| -> io::Result<()> {
        total_count += 1;
        match parser.parse(text) {
            Ok(parsed) => output_result(writer, text, &parsed, format),
            Err(e) => {
                error_count += 1;
                output_error(text, &e, format, line)
            }
        }
    };

    if let Some(text) = location {
        process(text, None, &mut writer)?;
    } else {
        let reader: Box<dyn BufRead> = match input {
            Some(path) => Box::new(BufReader::new(File::open(path)?)),
            None => Box::new(io::stdin().lock()),
        };
        for (line_num, line) in reader.lines().enumerate() {
            let line = line?;
            if let Some(text) = process_input_line(&line, line_num == 0) {
                process(text, Some(line_num + 1), &mut writer)?;
            }
        }
    }
    writer.flush()?;

    let elapsed = start.elapsed();
    info!(
        "parsed {} location(s) in {:.3}s",
        total_count,
        elapsed.as_secs_f64()
    );

    if let Some(timing_path) = timing {
        let timing_info = TimingInfo::new(total_count, total_count - error_count, elapsed);
        write_timing(&timing_info, timing_path)?;
    }

    if error_count > 0 {
        Err(format!("{} location(s) failed to parse", error_count).into())
    } else {
        Ok(())
    }
}

fn run_batch(
    input: &Path,
    output: Option<&PathBuf>,
    progress: bool,
    parser_args: &ParserArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let parser = InsdcParser::with_config(parser_args.resolve()?);
    let results = parse_batch(input, &parser, progress)?;

    match output {
        Some(path) => write_results(&results, path)?,
        None => write_results_text(&results, io::stdout().lock())?,
    }

    let timing = &results.timing;
    eprintln!(
        "Parsed {} locations: {} ok, {} failed ({:.0} locations/s)",
        timing.total, timing.successful, timing.failed, timing.locations_per_second
    );

    if timing.failed > 0 {
        Err(format!("{} location(s) failed to parse", timing.failed).into())
    } else {
        Ok(())
    }
}

fn run_explain(code: Option<&str>, list: bool) -> Result<(), Box<dyn std::error::Error>> {
    if list {
        println!("{:<8} Summary", "Code");
        println!("{}", "-".repeat(60));
        for code in ErrorCode::ALL {
            println!("{:<8} {}", code.as_str(), code.description());
        }
        println!();
        println!("Run 'ferro-insdc explain <CODE>' for details.");
    } else if let Some(code_str) = code {
        match ErrorCode::from_code(code_str) {
            Some(code) => {
                println!("{}: {}", code.as_str(), code.description());
                println!();
                println!("{}", code.explanation());
            }
            None => {
                return Err(format!(
                    "Unknown code: {}. Use 'ferro-insdc explain --list' to see all codes.",
                    code_str
                )
                .into());
            }
        }
    } else {
        return Err("Please provide a code to explain or use --list to see all codes.".into());
    }

    Ok(())
}

fn output_error(
    input: &str,
    error: &InsdcError,
    format: OutputFormat,
    line_number: Option<usize>,
) -> io::Result<()> {
    let stderr = io::stderr();
    let mut handle = stderr.lock();
    cli_output_error_with_context(&mut handle, input, error, format, line_number)?;
    if format == OutputFormat::Text {
        // Source highlight, hint and suggestion follow the one-line summary
        let detail = error.detailed_message();
        if let Some((_, rest)) = detail.split_once("\n\n") {
            writeln!(handle, "{}\n", rest)?;
        }
    }
    Ok(())
}

/// Install a stderr subscriber; library `log` records are forwarded to it.
fn init_tracing(level: &str) -> Result<(), Box<dyn std::error::Error>> {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter =
        EnvFilter::try_new(level).map_err(|e| format!("Invalid log level '{}': {}", level, e))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr))
        .init();

    Ok(())
}
