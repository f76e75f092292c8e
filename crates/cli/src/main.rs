//! CLI tool for analyzing pitch decks.

mod upload;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use pitch_core::{AnalysisReport, ReportComposer};
use pitch_extract::Extractor;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use upload::UploadPolicy;

const PREVIEW_CHARS: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Full report as JSON
    Json,
    /// Plain-text summary
    Summary,
}

impl OutputFormat {
    fn extension(self) -> &'static str {
        match self {
            Self::Json => "analysis.json",
            Self::Summary => "analysis.txt",
        }
    }
}

/// Score pitch decks for investor readiness.
#[derive(Parser, Debug)]
#[command(name = "pitch-analyze")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input pitch deck file(s) (.pdf, .pptx, .docx or .txt)
    #[arg(required = true)]
    input: Vec<PathBuf>,

    /// Output directory (default: same as input file)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print output to stdout instead of writing to file
    #[arg(short, long)]
    print: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    /// Number of keywords to report
    #[arg(short, long, default_value = "15")]
    keywords: usize,

    /// Largest accepted input, in megabytes
    #[arg(long, default_value_t = upload::DEFAULT_MAX_MB)]
    max_size_mb: u64,

    /// Format tag overriding the file extension (pdf, pptx, docx, txt)
    #[arg(short = 't', long = "type")]
    format_tag: Option<String>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    let policy = UploadPolicy::new().with_max_bytes(args.max_size_mb.saturating_mul(1024 * 1024));
    log::debug!("Upload ceiling: {} bytes", policy.max_bytes());
    let extractor = Extractor::new();
    let composer = ReportComposer::new().with_keyword_limit(args.keywords);

    for input_path in &args.input {
        if args.verbose {
            eprintln!("Processing: {}", input_path.display());
        }

        match process_file(input_path, &args, &policy, &extractor, &composer) {
            Ok(output) => {
                if args.print {
                    println!("{}", output);
                } else {
                    let output_path =
                        get_output_path(input_path, args.output.as_ref(), args.format)?;
                    write_output(&output_path, &output)?;
                    if args.verbose {
                        eprintln!("Written to: {}", output_path.display());
                    }
                }
            }
            Err(e) => {
                eprintln!("Error processing {}: {:#}", input_path.display(), e);
            }
        }
    }

    Ok(())
}

/// Analyze a single file and render the report.
fn process_file(
    input_path: &Path,
    args: &Args,
    policy: &UploadPolicy,
    extractor: &Extractor,
    composer: &ReportComposer,
) -> Result<String> {
    let size = std::fs::metadata(input_path)
        .with_context(|| format!("Failed to open {}", input_path.display()))?
        .len();

    let format = match &args.format_tag {
        Some(tag) => policy.admit_tagged(tag, size)?,
        None => policy.admit(input_path, size)?,
    };
    log::debug!("Admitted {} as {}", input_path.display(), format);

    let bytes = std::fs::read(input_path)
        .with_context(|| format!("Failed to read {}", input_path.display()))?;

    let text = extractor.extract_format(&bytes, format);
    if text.is_empty() {
        eprintln!(
            "Warning: could not extract text from {}",
            input_path.display()
        );
    }

    let report = composer.compose(text.as_str());

    if args.verbose {
        eprintln!(
            "  Score {}/10 ({}), {} keywords",
            report.section_score,
            report.maturity_level,
            report.keywords.len()
        );
        eprintln!("  Preview: {}", report.preview(PREVIEW_CHARS));
    }

    let filename = input_path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("unknown");

    render(&report, filename, args.format, args.pretty)
}

/// Render a report in the requested output format.
fn render(
    report: &AnalysisReport,
    filename: &str,
    format: OutputFormat,
    pretty: bool,
) -> Result<String> {
    let output = match format {
        OutputFormat::Json if pretty => serde_json::to_string_pretty(report)?,
        OutputFormat::Json => serde_json::to_string(report)?,
        OutputFormat::Summary => report.summary(filename),
    };
    Ok(output)
}

/// Determine the output path for a processed file.
fn get_output_path(
    input_path: &Path,
    output_dir: Option<&PathBuf>,
    format: OutputFormat,
) -> Result<PathBuf> {
    let stem = input_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");

    let output_filename = format!("{}.{}", stem, format.extension());

    let output_path = match output_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;
            dir.join(output_filename)
        }
        None => match input_path.parent() {
            Some(parent) => parent.join(output_filename),
            None => PathBuf::from(output_filename),
        },
    };

    Ok(output_path)
}

/// Write output to a file.
fn write_output(path: &Path, content: &str) -> Result<()> {
    let mut file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;

    file.write_all(content.as_bytes())
        .with_context(|| format!("Failed to write to {}", path.display()))?;

    Ok(())
}
