mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::EnvFilter;

use commands::fields::FieldsArgs;
use commands::generate::GenerateArgs;
use commands::preview::PreviewArgs;
use commands::record::{FormArgs, SetArgs, ValidateArgs};

/// Build, validate and preview loan SOP documents
#[derive(Parser)]
#[command(
    name = "sop",
    version,
    about = "Build, validate and preview loan SOP documents",
    long_about = "A CLI for working with Standard Operating Procedure records for \
                  loan files. Records are JSON (or YAML) documents that can be \
                  edited field by field, checked against the form's required \
                  fields, rendered as a preview document and exported."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log debug detail to stderr (RUST_LOG overrides)
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print an empty SOP record
    Template,
    /// List the form fields, optionally for one section
    Fields(FieldsArgs),
    /// Apply field edits to a record
    Set(SetArgs),
    /// Check a record against the form's rules
    Validate(ValidateArgs),
    /// Render the form view for a record
    Form(FormArgs),
    /// Render the preview document for a record
    Preview(PreviewArgs),
    /// Run the full flow and write the SOP document
    Generate(GenerateArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let validating = matches!(cli.command, Commands::Validate(_));

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Template => commands::template::run_template(),
        Commands::Fields(args) => commands::fields::run_fields(args),
        Commands::Set(args) => commands::record::run_set(args),
        Commands::Validate(args) => commands::record::run_validate(args),
        Commands::Form(args) => commands::record::run_form(args),
        Commands::Preview(args) => commands::preview::run_preview(args),
        Commands::Generate(args) => commands::generate::run_generate(args),
        Commands::Version => {
            println!("sop {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            let invalid = validating && commands::record::validation_failed(&value);
            process::exit(if invalid { 1 } else { 0 });
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
