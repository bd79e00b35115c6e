//! CLI commands for data export
//!
//! Writes every expense as CSV, JSON or YAML, either to a timestamped file in
//! the reports directory or to a path of the user's choosing.

use std::path::PathBuf;

use clap::Subcommand;

use crate::error::LedgerResult;
use crate::export::{export_to_dir, ExportFormat};
use crate::storage::{write_atomic, Storage};

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Export expenses to CSV
    Csv {
        /// Output file path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Export expenses to JSON
    Json {
        /// Output file path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Export expenses to YAML
    Yaml {
        /// Output file path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Handle export commands
pub fn handle_export_command(storage: &Storage, cmd: ExportCommands) -> LedgerResult<()> {
    let (format, output) = match cmd {
        ExportCommands::Csv { output } => (ExportFormat::Csv, output),
        ExportCommands::Json { output } => (ExportFormat::Json, output),
        ExportCommands::Yaml { output } => (ExportFormat::Yaml, output),
    };

    let expenses = storage.expenses.all();
    if expenses.is_empty() {
        println!("No expenses to export.");
        return Ok(());
    }

    let path = match output {
        Some(path) => {
            write_atomic(&path, |writer| format.write(expenses, writer))?;
            path
        }
        None => export_to_dir(expenses, format, &storage.paths().reports_dir())?,
    };

    println!(
        "Exported {} expenses as {} to {}",
        expenses.len(),
        format,
        path.display()
    );
    Ok(())
}
