/// Schedule Converter - class-schedule spreadsheets to JSON and back
/// This tool converts schedule spreadsheets into normalized JSON documents
/// and re-exports JSON documents as formatted spreadsheets.
///
/// The main entry point for the converter application. It parses
/// command-line arguments, collects the input files, and coordinates the
/// conversion in both directions.

use anyhow::Result;
use clap::{ArgAction, ArgGroup, Parser, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn, LevelFilter};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::process;
use std::time::Instant;

// Import modules
mod core;
mod utils;

use crate::core::converter::{Profile, ScheduleConverter};
use crate::core::exporter::build_export_grid;
use crate::core::model::ScheduleDocument;
use crate::utils::excel::{self, SheetSpec};
use crate::utils::file_utils::{self, InputKind, DEFAULT_WORKBOOK_NAME};
use crate::utils::output_formatter;

/// Conversion profile selector for the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
enum ProfileArg {
    /// Room comes from the class cell of each row
    General,
    /// Physical education: fixed room, normalized GDTC class names
    PhysEd,
}

impl From<ProfileArg> for Profile {
    fn from(arg: ProfileArg) -> Self {
        match arg {
            ProfileArg::General => Profile::General,
            ProfileArg::PhysEd => Profile::PhysEd,
        }
    }
}

/// Command line argument structure
#[derive(Parser, Debug)]
#[command(
    name = "schedule_converter",
    version = "0.1.0",
    about = "A batch converter between class-schedule spreadsheets and JSON",
    long_about = "This tool converts class-schedule files in both directions:
- .xlsx/.xls inputs are parsed (day labels, period ranges, class/room cells)
  and written as normalized JSON documents
- .json inputs are grouped into consecutive-period ranges and collected
  into a single formatted spreadsheet, one sheet per file

Both kinds of input may be mixed in one invocation."
)]
#[command(group(
    ArgGroup::new("input")
        .required(true)
        .args(["file_paths", "dir"]),
))]
struct Args {
    /// Path(s) to the file(s) to convert
    #[arg(name = "file_paths")]
    file_paths: Vec<String>,

    /// Convert all supported files in directory (recursively)
    #[arg(long = "dir")]
    dir: Option<String>,

    /// Exclude file pattern (glob syntax, can be used multiple times)
    #[arg(long = "exclude", action = ArgAction::Append)]
    exclude: Option<Vec<String>>,

    /// Maximum number of files to process (default: 1000)
    #[arg(long = "max-files", default_value = "1000")]
    max_files: usize,

    /// Conversion profile for spreadsheet inputs
    #[arg(long = "profile", value_enum, default_value = "general")]
    profile: ProfileArg,

    /// Path of the combined export workbook for JSON inputs
    #[arg(long = "output")]
    output: Option<String>,

    /// Directory to store all output files
    #[arg(long = "output-dir")]
    output_dir: Option<String>,

    /// Path to configuration file
    #[arg(long = "config")]
    config: Option<String>,

    /// Suppress terminal output
    #[arg(long = "quiet", action = ArgAction::SetTrue)]
    quiet: bool,

    /// Set logging level (default: INFO)
    #[arg(long = "log-level", default_value = "info")]
    log_level: LevelFilter,

    /// Log file path (default: schedule_converter.log)
    #[arg(long = "log-file", default_value = "schedule_converter.log")]
    log_file: String,
}

/// What one run produced, for the closing report.
struct RunOutcome {
    /// Converted spreadsheets as (path, document) pairs
    converted: Vec<(String, ScheduleDocument)>,
    files_processed: usize,
    failures: usize,
    exported_sheets: usize,
    workbook_path: Option<PathBuf>,
}

/// Main entry point function
fn main() -> Result<()> {
    // Record the start time
    let start_time = Instant::now();

    // Parse command line arguments
    let args = Args::parse();

    // Set up logging
    let _ = setup_logging(&args);

    // Load configuration
    let config = load_config(&args.config)?;

    // Collect input files
    let inputs = collect_inputs(&args)?;

    if inputs.is_empty() {
        eprintln!(
            "{}",
            "Error: No spreadsheet or JSON files specified or found".red()
        );
        eprintln!("Run with --help for usage information");
        process::exit(1);
    }

    // Convert everything, best-effort per file
    let outcome = process_inputs(&inputs, &config, &args)?;

    // Print results to console if not in quiet mode
    if !args.quiet {
        for (file_path, doc) in &outcome.converted {
            println!("\n{}", "=".repeat(80).bold());
            println!("{} {}", "Results for:".cyan(), file_path);
            println!("{}", "=".repeat(80).bold());
            println!("{}", output_formatter::format_conversion_report(doc));
        }

        if let Some(workbook) = &outcome.workbook_path {
            println!(
                "{} {} ({} sheets)",
                "Export workbook:".cyan(),
                workbook.display(),
                outcome.exported_sheets
            );
        }

        let total_classes: usize = outcome
            .converted
            .iter()
            .map(|(_, doc)| doc.classes.len())
            .sum();

        let elapsed_time = start_time.elapsed();
        print!(
            "{}",
            output_formatter::create_summary(
                outcome.files_processed,
                total_classes,
                outcome.failures,
                elapsed_time.as_secs_f64()
            )
        );
    }

    Ok(())
}

/// Set up logging with file and console output
fn setup_logging(args: &Args) -> Result<()> {
    // Configure logging
    let mut builder = env_logger::Builder::new();

    // Set log level from arguments
    builder.filter_level(args.log_level);

    // Set format
    builder.format(|buf, record| {
        use chrono::Local;
        use std::io::Write;
        writeln!(
            buf,
            "{} - {} - {} - {}",
            Local::now().format("%Y-%m-%d %H:%M:%S"),
            record.level(),
            record.target(),
            record.args()
        )
    });

    // Add file output
    if let Ok(file) = File::create(&args.log_file) {
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    // Initialize logger
    builder.init();

    Ok(())
}

/// Load configuration from file if provided
fn load_config(config_path: &Option<String>) -> Result<serde_json::Value> {
    let config = match config_path {
        Some(path) => {
            let path = Path::new(path);
            if !path.exists() {
                error!("Configuration file not found: {}", path.display());
                serde_json::Value::Object(serde_json::Map::new())
            } else {
                let config_str = std::fs::read_to_string(path)?;
                match serde_json::from_str(&config_str) {
                    Ok(config) => {
                        info!("Loaded configuration from {}", path.display());
                        config
                    }
                    Err(e) => {
                        error!("Invalid JSON in configuration file: {}", e);
                        serde_json::Value::Object(serde_json::Map::new())
                    }
                }
            }
        }
        None => serde_json::Value::Object(serde_json::Map::new()),
    };

    Ok(config)
}

/// Collect input files based on command line arguments
fn collect_inputs(args: &Args) -> Result<Vec<(PathBuf, InputKind)>> {
    let mut inputs = Vec::new();
    let max_files = args.max_files;

    // Process individual files
    for file_path in &args.file_paths {
        let path = PathBuf::from(file_path);
        if !path.exists() {
            error!("File not found: {}", path.display());
            continue;
        }
        if !path.is_file() {
            warn!("Skipping {}: not a file", path.display());
            continue;
        }
        match file_utils::classify_input(&path) {
            Some(kind) => inputs.push((path, kind)),
            None => warn!(
                "Skipping {}: not a spreadsheet or JSON file",
                path.display()
            ),
        }
    }

    // Process directory recursively
    if let Some(dir_path) = &args.dir {
        let dir_path = PathBuf::from(dir_path);
        if !dir_path.exists() || !dir_path.is_dir() {
            error!("Directory not found: {}", dir_path.display());
        } else {
            let exclude_patterns = args.exclude.clone().unwrap_or_default();

            use walkdir::WalkDir;
            for entry in WalkDir::new(&dir_path)
                .follow_links(false)
                .into_iter()
                .filter_map(|e| e.ok())
            {
                // Check if we've reached the maximum number of files
                if inputs.len() >= max_files {
                    warn!("Reached maximum file limit ({})", max_files);
                    break;
                }

                let file_path = entry.path();
                if !file_path.is_file() {
                    continue;
                }

                let Some(kind) = file_utils::classify_input(file_path) else {
                    continue;
                };

                let file_name = file_path.to_string_lossy();
                let exclude_match = exclude_patterns
                    .iter()
                    .any(|pattern| glob_match(&file_name, pattern));

                if !exclude_match {
                    inputs.push((file_path.to_path_buf(), kind));
                }
            }
        }
    }

    Ok(inputs)
}

/// Simple glob pattern matching for --exclude
fn glob_match(text: &str, pattern: &str) -> bool {
    let pattern = regex::escape(pattern)
        .replace(r"\*", ".*")
        .replace(r"\?", ".");
    match regex::Regex::new(&format!("^{}$", pattern)) {
        Ok(re) => re.is_match(text),
        Err(_) => false,
    }
}

/// Process all inputs sequentially, logging and skipping failures
fn process_inputs(
    inputs: &[(PathBuf, InputKind)],
    config: &serde_json::Value,
    args: &Args,
) -> Result<RunOutcome> {
    // Create output directory if specified
    if let Some(output_dir) = &args.output_dir {
        std::fs::create_dir_all(output_dir)?;
    }

    let converter = ScheduleConverter::new(args.profile.into(), config);
    let output_dir = args.output_dir.as_ref().map(PathBuf::from);

    if !args.quiet {
        println!(
            "\n{} {} file(s)...",
            "Converting".bold(),
            inputs.len()
        );
    }

    // Set up progress bar if not in quiet mode
    let progress_bar = if !args.quiet && inputs.len() > 1 {
        let pb = ProgressBar::new(inputs.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({eta})")
                .unwrap()
                .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    let mut converted = Vec::new();
    let mut sheets = Vec::new();
    let mut failures = 0usize;

    for (path, kind) in inputs {
        match kind {
            InputKind::Spreadsheet => {
                match convert_spreadsheet(path, &converter, output_dir.as_deref()) {
                    Ok(doc) => converted.push((path.display().to_string(), doc)),
                    Err(e) => {
                        error!("Error converting {}: {}", path.display(), e);
                        failures += 1;
                    }
                }
            }
            InputKind::Json => match file_utils::read_schedule_document(path) {
                Ok(doc) => {
                    let grid = build_export_grid(&doc);
                    sheets.push(SheetSpec {
                        name: file_utils::sheet_name_for(path),
                        grid,
                    });
                }
                Err(e) => {
                    error!("Error reading {}: {}", path.display(), e);
                    failures += 1;
                }
            },
        }

        // Update progress bar
        if let Some(pb) = &progress_bar {
            pb.inc(1);
        }
    }

    // Finish progress bar
    if let Some(pb) = progress_bar {
        pb.finish_with_message("Conversion complete");
    }

    // Write all collected JSON inputs into one workbook
    let exported_sheets = sheets.len();
    let mut workbook_path = None;
    if !sheets.is_empty() {
        let path = workbook_output_path(args, config);
        match excel::write_workbook(&sheets, &path) {
            Ok(()) => {
                info!(
                    "Wrote export workbook {} ({} sheets)",
                    path.display(),
                    exported_sheets
                );
                workbook_path = Some(path);
            }
            Err(e) => {
                error!("Error writing workbook {}: {}", path.display(), e);
                failures += 1;
            }
        }
    }

    Ok(RunOutcome {
        converted,
        files_processed: inputs.len(),
        failures,
        exported_sheets,
        workbook_path,
    })
}

/// Convert one spreadsheet to JSON and write it out
fn convert_spreadsheet(
    path: &Path,
    converter: &ScheduleConverter,
    output_dir: Option<&Path>,
) -> Result<ScheduleDocument> {
    info!("Converting spreadsheet: {}", path.display());

    let rows = excel::read_workbook_rows(path)?;
    let doc = converter.convert_rows(&rows);

    let output_path = file_utils::converted_json_path(path, output_dir);
    file_utils::write_schedule_document(&doc, &output_path)?;

    Ok(doc)
}

/// Resolve the export workbook path from arguments and configuration
fn workbook_output_path(args: &Args, config: &serde_json::Value) -> PathBuf {
    let name = args
        .output
        .clone()
        .or_else(|| {
            config
                .get("output_file")
                .and_then(|value| value.as_str())
                .map(String::from)
        })
        .unwrap_or_else(|| DEFAULT_WORKBOOK_NAME.to_string());

    match &args.output_dir {
        Some(dir) if Path::new(&name).is_relative() => PathBuf::from(dir).join(name),
        _ => PathBuf::from(name),
    }
}
