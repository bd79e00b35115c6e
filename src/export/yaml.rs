//! YAML export for human-readable copies of the ledger

use std::io::Write;

use crate::error::{LedgerError, LedgerResult};
use crate::models::Expense;

/// Export expenses to YAML, preceded by a comment header
pub fn export_expenses_yaml<W: Write + ?Sized>(
    expenses: &[Expense],
    writer: &mut W,
) -> LedgerResult<()> {
    let export_failed = |e: std::io::Error| LedgerError::Export(e.to_string());

    writeln!(writer, "# Expense ledger export").map_err(export_failed)?;
    writeln!(writer, "# Generated: {}", chrono::Utc::now().to_rfc3339()).map_err(export_failed)?;
    writeln!(writer, "# Expenses: {}", expenses.len()).map_err(export_failed)?;

    serde_yaml::to_writer(&mut *writer, expenses)
        .map_err(|e| LedgerError::Export(e.to_string()))
}
