//! CSV export, with the same columns as the stored table

use std::io::Write;

use crate::error::{LedgerError, LedgerResult};
use crate::models::Expense;
use crate::storage::{TABLE_DATE_FORMAT, TABLE_HEADER};

/// Export expenses to CSV
pub fn export_expenses_csv<W: Write + ?Sized>(
    expenses: &[Expense],
    writer: &mut W,
) -> LedgerResult<()> {
    let export_failed = |e: csv::Error| LedgerError::Export(e.to_string());
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer.write_record(TABLE_HEADER).map_err(export_failed)?;
    for expense in expenses {
        csv_writer
            .write_record([
                expense.id.to_string(),
                expense.date.format(TABLE_DATE_FORMAT).to_string(),
                expense.description.clone(),
                expense.category.name().to_string(),
                expense.amount.to_string(),
            ])
            .map_err(export_failed)?;
    }

    csv_writer
        .flush()
        .map_err(|e| LedgerError::Export(e.to_string()))
}
