//! User settings for the expense ledger
//!
//! Manages the currency symbol, the monthly budget, the user-facing date
//! format and the large-amount advisory threshold. Settings are read once at
//! startup and rewritten whenever the budget changes.

use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::paths::LedgerPaths;
use crate::error::{LedgerError, LedgerResult};
use crate::models::Money;
use crate::storage::file_io::write_json_atomic;

/// Number of table backups kept by default
pub const DEFAULT_BACKUP_RETENTION: usize = 5;

/// User settings for the ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used for display
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Monthly budget; null (or zero) disables budget tracking
    #[serde(default)]
    pub monthly_budget: Option<Money>,

    /// Date format for input and display (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Amounts above this are flagged for confirmation
    #[serde(default = "default_large_amount_threshold")]
    pub large_amount_threshold: Money,

    /// Number of table backups to keep
    #[serde(default = "default_backup_retention")]
    pub backup_retention: usize,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "₹".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_large_amount_threshold() -> Money {
    Money::from_major_minor(1_000_000, 0)
}

fn default_backup_retention() -> usize {
    DEFAULT_BACKUP_RETENTION
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            monthly_budget: None,
            date_format: default_date_format(),
            large_amount_threshold: default_large_amount_threshold(),
            backup_retention: default_backup_retention(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &LedgerPaths) -> LedgerResult<Self> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Don't save yet - let caller decide when to persist
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| LedgerError::Io(format!("Failed to read settings file: {}", e)))?;

        let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
            LedgerError::Config(format!("Failed to parse settings file: {}", e))
        })?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &LedgerPaths) -> LedgerResult<()> {
        paths.ensure_directories()?;
        write_json_atomic(paths.settings_file(), self).map_err(|e| {
            LedgerError::Config(format!("Failed to write settings file: {}", e))
        })
    }

    /// Reject settings the rest of the ledger cannot work with
    pub fn validate(&self) -> LedgerResult<()> {
        let bad_format = self.date_format.trim().is_empty()
            || StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error));
        if bad_format {
            return Err(LedgerError::Config(format!(
                "Invalid date format '{}'",
                self.date_format
            )));
        }

        if self.backup_retention == 0 {
            return Err(LedgerError::Config(
                "backup_retention must be at least 1".into(),
            ));
        }

        if !self.large_amount_threshold.is_positive() {
            return Err(LedgerError::Config(
                "large_amount_threshold must be positive".into(),
            ));
        }

        Ok(())
    }

    /// The active monthly budget, if budget tracking is enabled
    pub fn budget(&self) -> Option<Money> {
        self.monthly_budget.filter(|b| b.is_positive())
    }

    /// Set or clear the monthly budget; zero disables tracking
    pub fn set_monthly_budget(&mut self, budget: Option<Money>) -> LedgerResult<()> {
        match budget {
            Some(amount) if amount.is_negative() => Err(LedgerError::Validation(format!(
                "Budget cannot be negative, got {}",
                amount
            ))),
            Some(amount) if amount.is_zero() => {
                self.monthly_budget = None;
                Ok(())
            }
            other => {
                self.monthly_budget = other;
                Ok(())
            }
        }
    }

    /// Whether an amount is large enough to ask for confirmation
    pub fn is_large_amount(&self, amount: Money) -> bool {
        amount > self.large_amount_threshold
    }

    /// Format an amount with the configured currency symbol
    pub fn format_money(&self, amount: Money) -> String {
        amount.format_with_symbol(&self.currency_symbol)
    }

    /// Format a date with the configured date format
    pub fn format_date(&self, date: NaiveDate) -> String {
        date.format(&self.date_format).to_string()
    }

    /// Parse a user-entered amount, accepting the configured currency symbol
    pub fn parse_money(&self, input: &str) -> LedgerResult<Money> {
        Money::parse_with_symbol(input, &self.currency_symbol)
            .map_err(|e| LedgerError::Validation(e.to_string()))
    }

    /// Parse a user-entered date with the configured format; blank means today
    pub fn parse_date(&self, input: &str) -> LedgerResult<NaiveDate> {
        let input = input.trim();
        if input.is_empty() {
            return Ok(chrono::Local::now().date_naive());
        }

        NaiveDate::parse_from_str(input, &self.date_format).map_err(|_| {
            LedgerError::Validation(format!(
                "Invalid date '{}'. Please use {}",
                input, self.date_format
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.currency_symbol, "₹");
        assert_eq!(settings.monthly_budget, None);
        assert_eq!(settings.date_format, "%Y-%m-%d");
        assert_eq!(settings.backup_retention, 5);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.currency_symbol = "$".into();
        settings
            .set_monthly_budget(Some(Money::from_major_minor(20000, 0)))
            .unwrap();

        settings.save(&paths).unwrap();
        assert!(paths.is_initialized());

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded, settings);
        assert_eq!(loaded.budget(), Some(Money::from_cents(2_000_000)));
    }

    #[test]
    fn test_missing_keys_use_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        paths.ensure_directories().unwrap();

        std::fs::write(
            paths.settings_file(),
            r#"{"currency_symbol": "€", "monthly_budget": 1500.5}"#,
        )
        .unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.currency_symbol, "€");
        assert_eq!(loaded.monthly_budget, Some(Money::from_cents(150050)));
        assert_eq!(loaded.date_format, "%Y-%m-%d");
        assert_eq!(loaded.backup_retention, 5);
    }

    #[test]
    fn test_null_budget_disables_tracking() {
        let settings: Settings = serde_json::from_str(r#"{"monthly_budget": null}"#).unwrap();
        assert_eq!(settings.budget(), None);

        let settings: Settings = serde_json::from_str(r#"{"monthly_budget": 0}"#).unwrap();
        assert_eq!(settings.budget(), None);
    }

    #[test]
    fn test_set_budget_rules() {
        let mut settings = Settings::default();
        assert!(settings.set_monthly_budget(Some(Money::from_cents(-1))).is_err());

        settings.set_monthly_budget(Some(Money::from_cents(5000))).unwrap();
        assert_eq!(settings.budget(), Some(Money::from_cents(5000)));

        settings.set_monthly_budget(Some(Money::zero())).unwrap();
        assert_eq!(settings.monthly_budget, None);
    }

    #[test]
    fn test_invalid_date_format_rejected() {
        let settings = Settings {
            date_format: "%Y-%Q".into(),
            ..Settings::default()
        };
        assert!(matches!(settings.validate(), Err(LedgerError::Config(_))));
    }

    #[test]
    fn test_parse_date_uses_format() {
        let settings = Settings {
            date_format: "%d/%m/%Y".into(),
            ..Settings::default()
        };
        assert_eq!(
            settings.parse_date("15/01/2025").unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
        );
        assert!(settings.parse_date("2025-01-15").unwrap_err().is_validation());
        assert_eq!(
            settings.format_date(NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()),
            "15/01/2025"
        );
    }

    #[test]
    fn test_parse_money_with_configured_symbol() {
        let settings = Settings {
            currency_symbol: "CHF ".into(),
            ..Settings::default()
        };
        assert_eq!(settings.parse_money("CHF 12.50").unwrap().cents(), 1250);
        assert_eq!(settings.parse_money("CHF -3").unwrap().cents(), -300);
        assert_eq!(settings.parse_money("$4").unwrap().cents(), 400);
        assert!(settings.parse_money("EUR 4").unwrap_err().is_validation());
    }

    #[test]
    fn test_large_amount_flag() {
        let settings = Settings::default();
        assert!(!settings.is_large_amount(Money::from_major_minor(1_000_000, 0)));
        assert!(settings.is_large_amount(Money::from_major_minor(1_000_000, 1)));
    }
}
