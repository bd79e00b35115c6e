//! JSON export
//!
//! An array of `{id, date, description, category, amount}` objects with
//! decimal amounts.

use std::io::Write;

use crate::error::{LedgerError, LedgerResult};
use crate::models::Expense;

/// Export expenses to pretty-printed JSON
pub fn export_expenses_json<W: Write + ?Sized>(
    expenses: &[Expense],
    writer: &mut W,
) -> LedgerResult<()> {
    serde_json::to_writer_pretty(&mut *writer, expenses)
        .map_err(|e| LedgerError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| LedgerError::Export(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::test_support::sample_expenses;

    #[test]
    fn test_export_json() {
        let mut buffer = Vec::new();
        export_expenses_json(&sample_expenses(), &mut buffer).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        let rows = value.as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["id"], "EXP001");
        assert_eq!(rows[0]["date"], "2025-01-05");
        assert_eq!(rows[0]["category"], "Food & Dining");
        assert_eq!(rows[1]["amount"], 180.0);
    }

    #[test]
    fn test_json_reads_back() {
        let mut buffer = Vec::new();
        export_expenses_json(&sample_expenses(), &mut buffer).unwrap();

        let back: Vec<Expense> = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(back, sample_expenses());
    }
}
