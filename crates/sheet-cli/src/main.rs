//! Spreadsheet cleaner CLI
//!
//! Command-line tool for converting numeric, currency and date columns of
//! exported spreadsheets (as CSV) into clean values.

mod logging;

use clap::{Parser, Subcommand};
use logging::{init_logging, LogConfig, LogFormat};
use sheet_core::numeric::parse_numeric_str;
use sheet_core::{
    convert_numeric_text, converted_file_name, normalize_column_name, parse_csv, plan_conversion,
    process_table, scan_directory, write_csv, CellValue, ProcessedTable, ProcessingProfile,
};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "sheet-cli")]
#[command(about = "Clean numeric, currency and date columns in spreadsheet exports", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase log verbosity (default info, -v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Pretty, global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Clean a single CSV file
    Convert {
        /// Input CSV file
        #[arg(short, long)]
        input: PathBuf,

        /// Output CSV file (defaults to convertido_<input> next to the input)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write the display format plan (JSON) to this path
        #[arg(long)]
        plan: Option<PathBuf>,

        /// Processing profile (JSON)
        #[arg(long)]
        profile: Option<PathBuf>,
    },

    /// Clean every CSV file found under one or more directories
    ConvertDir {
        /// Root directories to scan
        #[arg(short, long, required = true)]
        root: Vec<PathBuf>,

        /// Output directory for cleaned files
        #[arg(long)]
        output_dir: PathBuf,

        /// Processing profile (JSON)
        #[arg(long)]
        profile: Option<PathBuf>,
    },

    /// Show how each column of a CSV file would be treated
    Inspect {
        /// Input CSV file
        #[arg(short, long)]
        input: PathBuf,

        /// Processing profile (JSON)
        #[arg(long)]
        profile: Option<PathBuf>,
    },

    /// Show how a single value is read as a number
    ParseValue {
        /// Raw cell text
        value: String,
    },

    /// Create a profile file with the default keyword sets
    CreateProfile {
        /// Output path for the profile file
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(&LogConfig::from_verbosity(cli.verbose, cli.log_format));

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(command: Commands) -> sheet_core::Result<()> {
    match command {
        Commands::Convert {
            input,
            output,
            plan,
            profile,
        } => cmd_convert(&input, output, plan.as_deref(), profile.as_deref()),
        Commands::ConvertDir {
            root,
            output_dir,
            profile,
        } => cmd_convert_dir(&root, &output_dir, profile.as_deref()),
        Commands::Inspect { input, profile } => cmd_inspect(&input, profile.as_deref()),
        Commands::ParseValue { value } => cmd_parse_value(&value),
        Commands::CreateProfile { output } => cmd_create_profile(&output),
    }
}

fn load_profile(path: Option<&Path>) -> sheet_core::Result<ProcessingProfile> {
    match path {
        Some(path) => {
            info!(path = %path.display(), "loading profile");
            ProcessingProfile::load(path)
        }
        None => Ok(ProcessingProfile::default()),
    }
}

fn cmd_convert(
    input: &Path,
    output: Option<PathBuf>,
    plan_path: Option<&Path>,
    profile_path: Option<&Path>,
) -> sheet_core::Result<()> {
    let profile = load_profile(profile_path)?;
    let output = output.unwrap_or_else(|| converted_file_name(input));

    let processed = clean_file(input, &output, &profile)?;

    if let Some(plan_path) = plan_path {
        let json = serde_json::to_string_pretty(&processed.format_plan)?;
        fs::write(plan_path, json)?;
        println!("Format plan: {}", plan_path.display());
    }

    print_report(&processed);
    println!("Written: {}", output.display());

    Ok(())
}

fn cmd_convert_dir(
    roots: &[PathBuf],
    output_dir: &Path,
    profile_path: Option<&Path>,
) -> sheet_core::Result<()> {
    let profile = load_profile(profile_path)?;
    let scan = scan_directory(roots)?;

    println!(
        "Found {} file(s) in {} root(s)",
        scan.files.len(),
        scan.roots.len()
    );
    if scan.skipped_outputs > 0 {
        println!("Skipped {} earlier output file(s)", scan.skipped_outputs);
    }
    if scan.skipped_entries > 0 {
        println!("Skipped {} unreadable path(s)", scan.skipped_entries);
    }

    fs::create_dir_all(output_dir)?;

    let mut cleaned = 0;
    let mut errors = Vec::new();

    for input in &scan.files {
        let output = output_dir.join(
            converted_file_name(input)
                .file_name()
                .map(PathBuf::from)
                .unwrap_or_default(),
        );

        match clean_file(input, &output, &profile) {
            Ok(processed) => {
                cleaned += 1;
                println!(
                    "  {} -> {} ({} column(s) converted)",
                    input.display(),
                    output.display(),
                    processed.converted_columns.len()
                );
            }
            Err(e) => {
                warn!(path = %input.display(), error = %e, "file skipped");
                errors.push((input.clone(), e.to_string()));
            }
        }
    }

    println!();
    println!("Cleaned {} file(s) into {}", cleaned, output_dir.display());

    if !errors.is_empty() {
        println!("\nErrors ({}):", errors.len());
        for (path, err) in &errors {
            println!("  {}: {}", path.display(), err);
        }
    }

    Ok(())
}

fn clean_file(
    input: &Path,
    output: &Path,
    profile: &ProcessingProfile,
) -> sheet_core::Result<ProcessedTable> {
    let table = parse_csv(input)?;
    info!(
        path = %input.display(),
        rows = table.row_count(),
        columns = table.column_count(),
        "table loaded"
    );

    let processed = process_table(table, profile);
    write_csv(&processed.table, output)?;
    Ok(processed)
}

fn print_report(processed: &ProcessedTable) {
    println!("Rows: {}", processed.table.row_count());

    if processed.converted_columns.is_empty() {
        println!("Converted columns: none");
    } else {
        println!("Converted columns:");
        for name in &processed.converted_columns {
            println!("  {}", name);
        }
    }

    if !processed.date_columns.is_empty() {
        println!("Date columns:");
        for name in &processed.date_columns {
            println!("  {}", name);
        }
        if processed.blanked_dates > 0 {
            println!("  ({} unreadable date(s) left empty)", processed.blanked_dates);
        }
    }

    if let Some(summary) = &processed.summary {
        println!("Totals for '{}':", summary.column);
        println!("  total:    {:.2}", summary.total);
        println!("  positive: {:.2}", summary.positive);
        println!("  negative: {:.2}", summary.negative);
    }
}

fn cmd_inspect(input: &Path, profile_path: Option<&Path>) -> sheet_core::Result<()> {
    let profile = load_profile(profile_path)?;
    let classifier = profile.classifier();
    let table = parse_csv(input)?;

    println!("File: {}", input.display());
    println!("Columns: {}", table.column_count());
    println!("Rows: {}", table.row_count());
    println!();

    println!(
        "{:<4}{:<36}{:<10}{:<14}{}",
        "#", "column (normalized)", "type", "role", "decision"
    );
    println!("{}", "-".repeat(80));

    for plan in plan_conversion(&table, &classifier) {
        println!(
            "{:<4}{:<36}{:<10}{:<14}{:?}",
            plan.index,
            normalize_column_name(&plan.name),
            format!("{:?}", plan.column_type),
            format!("{:?}", classifier.role(&plan.name)),
            plan.decision
        );
    }

    Ok(())
}

fn cmd_parse_value(value: &str) -> sheet_core::Result<()> {
    let cell = CellValue::String(value.to_string());

    println!("Input: {:?}", value);
    match parse_numeric_str(value.trim()) {
        Some(parsed) => {
            println!("Cleaned: {}", parsed.digits);
            println!("Negative: {}", parsed.negative);
        }
        None => println!("Cleaned: (not numeric)"),
    }
    match convert_numeric_text(&cell) {
        Some(number) => println!("Value: {}", number),
        None => println!("Value: (empty)"),
    }

    Ok(())
}

fn cmd_create_profile(output: &Path) -> sheet_core::Result<()> {
    ProcessingProfile::default().save(output)?;
    println!("Created profile file: {}", output.display());
    println!();
    println!("Edit the keyword lists, then run:");
    println!(
        "  sheet-cli convert --input <file> --profile {}",
        output.display()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_convert_with_defaults() {
        let cli = Cli::try_parse_from(["sheet-cli", "-vv", "convert", "-i", "ventas.csv"]).unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Convert { input, output, plan, profile } => {
                assert_eq!(input, PathBuf::from("ventas.csv"));
                assert!(output.is_none() && plan.is_none() && profile.is_none());
            }
            _ => panic!("expected convert"),
        }
    }

    #[test]
    fn test_cli_requires_roots_for_convert_dir() {
        assert!(Cli::try_parse_from(["sheet-cli", "convert-dir", "--output-dir", "out"]).is_err());
    }

    #[test]
    fn test_convert_writes_output_and_plan() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path();
        let input = dir.join("ventas.csv");
        let plan = dir.join("plan.json");
        fs::write(&input, "Operacion ID,Monto\n000123,\"1.234,56\"\n").unwrap();

        cmd_convert(&input, None, Some(&plan), None).unwrap();

        let written = fs::read_to_string(dir.join("convertido_ventas.csv")).unwrap();
        let plan_json = fs::read_to_string(&plan).unwrap();

        assert_eq!(written, "Operacion ID,Monto\n123,1234.56\n");
        assert!(plan_json.contains("\"Identifier\""));
    }
}
