//! Export of the expense table
//!
//! - CSV: the stored columns, for spreadsheets
//! - JSON: machine-readable records with decimal amounts
//! - YAML: the same records, human-readable
//!
//! Each format writes to any `Write`, or to a timestamped file in the
//! reports directory via `export_to_dir`.

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::export_expenses_csv;
pub use self::json::export_expenses_json;
pub use self::yaml::export_expenses_yaml;

use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::Local;

use crate::error::{LedgerError, LedgerResult};
use crate::models::Expense;
use crate::storage::write_atomic;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
    Yaml,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Yaml => "yaml",
        }
    }

    /// Write `expenses` in this format
    pub fn write<W: Write + ?Sized>(&self, expenses: &[Expense], writer: &mut W) -> LedgerResult<()> {
        match self {
            ExportFormat::Csv => export_expenses_csv(expenses, writer),
            ExportFormat::Json => export_expenses_json(expenses, writer),
            ExportFormat::Yaml => export_expenses_yaml(expenses, writer),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            "yaml" | "yml" => Ok(ExportFormat::Yaml),
            other => Err(LedgerError::Validation(format!(
                "Unknown export format '{}'. Expected csv, json or yaml",
                other
            ))),
        }
    }
}

/// Write `expenses` to `dir/expenses_export_YYYYMMDD_HHMMSS.<ext>`
pub fn export_to_dir(expenses: &[Expense], format: ExportFormat, dir: &Path) -> LedgerResult<PathBuf> {
    let filename = format!(
        "expenses_export_{}.{}",
        Local::now().format("%Y%m%d_%H%M%S"),
        format.extension()
    );
    let path = dir.join(filename);

    write_atomic(&path, |writer| format.write(expenses, writer))?;
    log::info!("Exported {} expenses to {}", expenses.len(), path.display());
    Ok(path)
}


#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_format_parse() {
        assert_eq!("CSV".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert_eq!("yml".parse::<ExportFormat>().unwrap(), ExportFormat::Yaml);
        assert!("xlsx".parse::<ExportFormat>().unwrap_err().is_validation());
    }

    #[test]
    fn test_export_to_dir() {
        let temp_dir = TempDir::new().unwrap();
        let path = export_to_dir(
            &test_support::sample_expenses(),
            ExportFormat::Json,
            temp_dir.path(),
        )
        .unwrap();

        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("expenses_export_"));
        assert!(name.ends_with(".json"));

        let back: Vec<Expense> =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(back.len(), 2);
    }
}
