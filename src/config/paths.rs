//! Path management for the expense ledger
//!
//! Provides XDG-compliant path resolution for configuration, data, backups
//! and generated reports.
//!
//! ## Path Resolution Order
//!
//! 1. `EXPENSE_LEDGER_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/expense-ledger` or `~/.config/expense-ledger`
//! 3. Windows: `%APPDATA%\expense-ledger`

use std::path::PathBuf;

use crate::error::LedgerError;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "EXPENSE_LEDGER_DIR";

/// Manages all paths used by the ledger
#[derive(Debug, Clone)]
pub struct LedgerPaths {
    /// Base directory for all ledger data
    base_dir: PathBuf,
}

impl LedgerPaths {
    /// Create a new LedgerPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, LedgerError> {
        let base_dir = if let Ok(custom) = std::env::var(DATA_DIR_ENV) {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create LedgerPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (`<base>/data/`)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the backup directory (`<base>/backups/`)
    pub fn backup_dir(&self) -> PathBuf {
        self.base_dir.join("backups")
    }

    /// Get the reports directory (`<base>/reports/`)
    pub fn reports_dir(&self) -> PathBuf {
        self.base_dir.join("reports")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.data_dir().join("config.json")
    }

    /// Get the path to the expense table
    pub fn expenses_file(&self) -> PathBuf {
        self.data_dir().join("expenses.csv")
    }

    /// Get the path to the persisted ID high-water mark
    pub fn sequence_file(&self) -> PathBuf {
        self.data_dir().join("sequence.json")
    }

    /// Get the path to the change history log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Get the path of the summary report CSV
    pub fn summary_report_file(&self) -> PathBuf {
        self.reports_dir().join("summary_report.csv")
    }

    /// Ensure all required directories exist
    pub fn ensure_directories(&self) -> Result<(), LedgerError> {
        for (label, dir) in [
            ("base", self.base_dir.clone()),
            ("data", self.data_dir()),
            ("backup", self.backup_dir()),
            ("reports", self.reports_dir()),
        ] {
            std::fs::create_dir_all(&dir).map_err(|e| {
                LedgerError::Io(format!("Failed to create {} directory: {}", label, e))
            })?;
        }

        Ok(())
    }

    /// Check if the ledger has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

/// Resolve the default data directory path based on platform
#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, LedgerError> {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return Ok(PathBuf::from(xdg).join("expense-ledger"));
    }

    let home = std::env::var("HOME")
        .map_err(|_| LedgerError::Config("Could not determine HOME directory".into()))?;
    Ok(PathBuf::from(home).join(".config").join("expense-ledger"))
}

/// Resolve the default data directory path based on platform
#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, LedgerError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| LedgerError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("expense-ledger"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.data_dir(), temp_dir.path().join("data"));
        assert_eq!(paths.backup_dir(), temp_dir.path().join("backups"));
        assert_eq!(paths.reports_dir(), temp_dir.path().join("reports"));
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());

        paths.ensure_directories().unwrap();

        assert!(paths.data_dir().exists());
        assert!(paths.backup_dir().exists());
        assert!(paths.reports_dir().exists());
        assert!(!paths.is_initialized());
    }

    #[test]
    fn test_file_paths() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(
            paths.expenses_file(),
            temp_dir.path().join("data").join("expenses.csv")
        );
        assert_eq!(
            paths.settings_file(),
            temp_dir.path().join("data").join("config.json")
        );
        assert_eq!(paths.audit_log(), temp_dir.path().join("audit.log"));
    }
}
