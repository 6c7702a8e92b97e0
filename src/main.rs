//! Binary entry point for datarec.
//!
//! This binary provides the CLI interface for the record keeper.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(missing_docs)]
// Allow print_stderr in main binary for CLI output
#![allow(clippy::print_stderr)]
#![allow(clippy::print_stdout)]
// Allow needless_pass_by_value for command functions
#![allow(clippy::needless_pass_by_value)]
// Allow multiple crate versions from transitive dependencies
#![allow(clippy::multiple_crate_versions)]

mod commands;

use clap::{Parser, Subcommand};
use commands::{cmd_add, cmd_convert, cmd_display, cmd_download, cmd_search, cmd_upload};
use datarec::config::RecorderConfig;
use datarec::observability::{self, InitOptions};
use std::path::PathBuf;
use std::process::ExitCode;

/// Datarec - a personal record keeper for employee records.
#[derive(Parser)]
#[command(name = "datarec")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Path to the record store (overrides configuration).
    #[arg(short, long, global = true)]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
enum Commands {
    /// Manually add a record.
    Add {
        /// Numeric id.
        #[arg(long)]
        id: String,

        /// Name.
        #[arg(long)]
        name: String,

        /// Address.
        #[arg(long, default_value = "")]
        address: String,

        /// Phone number.
        #[arg(long, default_value = "")]
        phone: String,
    },

    /// Upload records from a JSON, CSV, YAML or XML file.
    Upload {
        /// Source file.
        file: PathBuf,

        /// Format (default: from the file extension).
        #[arg(short, long)]
        format: Option<String>,

        /// Validate without writing the store.
        #[arg(long)]
        dry_run: bool,
    },

    /// Download all records into a JSON, CSV, YAML or XML file.
    Download {
        /// Destination file.
        file: PathBuf,

        /// Format (default: from the file extension).
        #[arg(short, long)]
        format: Option<String>,
    },

    /// Convert a file from one format to another without touching the store.
    Convert {
        /// Source file.
        source: PathBuf,

        /// Destination file.
        target: PathBuf,

        /// Source format (default: from the source extension).
        #[arg(long)]
        from: Option<String>,

        /// Target format (default: from the target extension).
        #[arg(long)]
        to: Option<String>,
    },

    /// Search records by field.
    Search {
        /// Field to search: id, name, address or phone.
        #[arg(short, long)]
        field: String,

        /// Substring to look for (case-insensitive).
        value: String,
    },

    /// Display all records.
    Display,
}

/// Main entry point.
fn main() -> ExitCode {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        },
    };

    if let Err(e) =
        observability::init_from_config(&config.logging, InitOptions { verbose: cli.verbose })
    {
        eprintln!("Failed to initialize logging: {e}");
        return ExitCode::FAILURE;
    }

    match run_command(cli.command, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.is_warning() => {
            eprintln!("Warning: {e}");
            ExitCode::SUCCESS
        },
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        },
    }
}

/// Runs the selected command.
fn run_command(command: Commands, config: &RecorderConfig) -> datarec::Result<()> {
    match command {
        Commands::Add {
            id,
            name,
            address,
            phone,
        } => cmd_add(config, id, name, address, phone),

        Commands::Upload {
            file,
            format,
            dry_run,
        } => cmd_upload(config, &file, format.as_deref(), dry_run),

        Commands::Download { file, format } => cmd_download(config, &file, format.as_deref()),

        Commands::Convert {
            source,
            target,
            from,
            to,
        } => cmd_convert(&source, &target, from.as_deref(), to.as_deref()),

        Commands::Search { field, value } => cmd_search(config, &field, &value),

        Commands::Display => cmd_display(config),
    }
}

/// Loads configuration, applying the `--store` override last.
fn load_config(cli: &Cli) -> datarec::Result<RecorderConfig> {
    let config = RecorderConfig::load(cli.config.as_deref())?;
    Ok(match &cli.store {
        Some(store) => config.with_store_path(store),
        None => config,
    })
}
