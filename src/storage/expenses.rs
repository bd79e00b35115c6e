//! Expense table storage
//!
//! Owns the in-memory expense collection and keeps `expenses.csv` in step
//! with it. Every mutation rotates backups, records the ID high-water mark
//! and rewrites the table atomically; if any of those steps fails the
//! mutation is undone in memory and a persistence error is returned.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::backup::BackupManager;
use crate::config::paths::LedgerPaths;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{
    Category, Expense, ExpenseChanges, ExpenseDraft, ExpenseId, Money, UnknownCategory,
};

use super::file_io::{read_json, write_atomic, write_json_atomic};

/// Column order of the stored table
pub const TABLE_HEADER: [&str; 5] = ["id", "date", "description", "category", "amount"];

/// Date format of the stored table
pub const TABLE_DATE_FORMAT: &str = "%Y-%m-%d";

/// One row of `expenses.csv`, as text
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ExpenseRow {
    id: String,
    date: String,
    description: String,
    category: String,
    amount: String,
}

impl From<&Expense> for ExpenseRow {
    fn from(expense: &Expense) -> Self {
        Self {
            id: expense.id.to_string(),
            date: expense.date.format(TABLE_DATE_FORMAT).to_string(),
            description: expense.description.clone(),
            category: expense.category.name().to_string(),
            amount: expense.amount.to_string(),
        }
    }
}

impl ExpenseRow {
    /// Convert to a typed expense, rejecting anything that fails the schema
    fn into_expense(self) -> Result<Expense, String> {
        let id = ExpenseId::parse(&self.id).map_err(|e| e.to_string())?;

        let date = NaiveDate::parse_from_str(self.date.trim(), TABLE_DATE_FORMAT)
            .map_err(|_| format!("invalid date '{}'", self.date))?;

        let category: Category = self
            .category
            .parse()
            .map_err(|e: UnknownCategory| e.to_string())?;
        if category.name() != self.category.trim() {
            return Err(format!("unknown category '{}'", self.category));
        }

        let amount = Money::parse_decimal(&self.amount).map_err(|e| e.to_string())?;

        let expense = Expense {
            id,
            date,
            description: self.description.trim().to_string(),
            category,
            amount,
        };
        expense.validate().map_err(|e| e.to_string())?;
        Ok(expense)
    }
}

/// Persisted ID high-water mark
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
struct SequenceData {
    last_issued: u32,
}

/// Durable owner of the expense collection
#[derive(Debug)]
pub struct ExpenseStore {
    table_path: PathBuf,
    sequence_path: PathBuf,
    backups: BackupManager,
    expenses: Vec<Expense>,
    last_issued: u32,
}

impl ExpenseStore {
    /// Open the store under the ledger paths and load the table
    pub fn open(paths: &LedgerPaths, backup_retention: usize) -> LedgerResult<Self> {
        paths.ensure_directories()?;

        let mut store = Self::new(
            paths.expenses_file(),
            paths.sequence_file(),
            BackupManager::new(paths, backup_retention),
        );
        store.load()?;
        Ok(store)
    }

    /// Create an empty, unloaded store over explicit files
    pub fn new(table_path: PathBuf, sequence_path: PathBuf, backups: BackupManager) -> Self {
        Self {
            table_path,
            sequence_path,
            backups,
            expenses: Vec::new(),
            last_issued: 0,
        }
    }

    /// Read the table and sequence from disk, replacing the in-memory state
    pub fn load(&mut self) -> LedgerResult<()> {
        let expenses = read_table(&self.table_path)?;
        let sequence: SequenceData = read_json(&self.sequence_path)?;

        let highest_in_table = expenses
            .iter()
            .map(|e| e.id.sequence())
            .max()
            .unwrap_or(0);

        self.last_issued = sequence.last_issued.max(highest_in_table);
        self.expenses = expenses;

        log::info!(
            "Loaded {} expenses from {} (last issued ID sequence {})",
            self.expenses.len(),
            self.table_path.display(),
            self.last_issued
        );
        Ok(())
    }

    /// All expenses in insertion order
    pub fn all(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn get(&self, id: ExpenseId) -> Option<&Expense> {
        self.expenses.iter().find(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    /// The ID the next `add` will assign
    pub fn next_id(&self) -> LedgerResult<ExpenseId> {
        self.last_issued
            .checked_add(1)
            .and_then(ExpenseId::from_sequence)
            .ok_or_else(|| {
                LedgerError::Persistence(format!(
                    "Expense ID sequence is exhausted (last issued {})",
                    self.last_issued
                ))
            })
    }

    pub fn backups(&self) -> &BackupManager {
        &self.backups
    }

    /// Validate a draft, assign the next ID, append and persist
    pub fn add(&mut self, draft: ExpenseDraft) -> LedgerResult<Expense> {
        draft
            .validate()
            .map_err(|e| LedgerError::Validation(e.to_string()))?;

        let id = self.next_id()?;
        let expense = Expense::from_draft(id, draft);

        let previous_sequence = self.last_issued;
        self.last_issued = id.sequence();
        self.expenses.push(expense.clone());

        if let Err(e) = self.persist() {
            log::warn!("Rolling back add of {}: {}", id, e);
            self.expenses.pop();
            self.last_issued = previous_sequence;
            return Err(e);
        }

        log::debug!("Added {}", expense);
        Ok(expense)
    }

    /// Apply field changes to an existing expense and persist
    pub fn edit(&mut self, id: ExpenseId, changes: &ExpenseChanges) -> LedgerResult<Expense> {
        let index = self
            .position(id)
            .ok_or_else(|| LedgerError::expense_not_found(id.to_string()))?;

        changes
            .validate()
            .map_err(|e| LedgerError::Validation(e.to_string()))?;

        let before = self.expenses[index].clone();
        self.expenses[index].apply(changes);

        if let Err(e) = self.persist() {
            log::warn!("Rolling back edit of {}: {}", id, e);
            self.expenses[index] = before;
            return Err(e);
        }

        Ok(self.expenses[index].clone())
    }

    /// Remove an expense and persist, returning what was removed
    pub fn delete(&mut self, id: ExpenseId) -> LedgerResult<Expense> {
        let index = self
            .position(id)
            .ok_or_else(|| LedgerError::expense_not_found(id.to_string()))?;

        let removed = self.expenses.remove(index);

        if let Err(e) = self.persist() {
            log::warn!("Rolling back delete of {}: {}", id, e);
            self.expenses.insert(index, removed);
            return Err(e);
        }

        log::debug!("Deleted {}", removed);
        Ok(removed)
    }

    fn position(&self, id: ExpenseId) -> Option<usize> {
        self.expenses.iter().position(|e| e.id == id)
    }

    /// Rotate backups, then write the sequence and the table atomically
    fn persist(&self) -> LedgerResult<()> {
        let (backup, pruned) = self.backups.create_backup_with_retention()?;
        if let Some(path) = backup {
            log::debug!(
                "Backed up table to {} ({} pruned)",
                path.display(),
                pruned.len()
            );
        }

        write_json_atomic(
            &self.sequence_path,
            &SequenceData {
                last_issued: self.last_issued,
            },
        )?;

        write_table(&self.table_path, &self.expenses)
    }
}

/// Read and schema-check the expense table; a missing file is an empty table
fn read_table(path: &Path) -> LedgerResult<Vec<Expense>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let file = File::open(path).map_err(|e| {
        LedgerError::Persistence(format!("Failed to open {}: {}", path.display(), e))
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(BufReader::new(file));

    let headers = reader
        .headers()
        .map_err(|e| {
            LedgerError::Persistence(format!("Failed to read header of {}: {}", path.display(), e))
        })?
        .clone();

    if headers.is_empty() {
        return Ok(Vec::new());
    }

    let found: Vec<&str> = headers.iter().map(str::trim).collect();
    if found != TABLE_HEADER {
        return Err(LedgerError::Persistence(format!(
            "Unexpected header in {}: expected '{}', found '{}'",
            path.display(),
            TABLE_HEADER.join(","),
            found.join(",")
        )));
    }

    let mut expenses: Vec<Expense> = Vec::new();
    for (index, row) in reader.deserialize::<ExpenseRow>().enumerate() {
        // Header is line 1
        let line = index + 2;

        let row = row.map_err(|e| {
            LedgerError::Persistence(format!("Malformed row {} in {}: {}", line, path.display(), e))
        })?;

        let expense = row.into_expense().map_err(|reason| {
            LedgerError::Persistence(format!(
                "Invalid row {} in {}: {}",
                line,
                path.display(),
                reason
            ))
        })?;

        if expenses.iter().any(|e| e.id == expense.id) {
            return Err(LedgerError::Persistence(format!(
                "Duplicate ID {} at row {} in {}",
                expense.id,
                line,
                path.display()
            )));
        }

        expenses.push(expense);
    }

    Ok(expenses)
}

/// Write the full table atomically
fn write_table(path: &Path, expenses: &[Expense]) -> LedgerResult<()> {
    write_atomic(path, |writer| {
        let mut csv_writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);

        let write_failed = |e: csv::Error| LedgerError::Persistence(format!("Failed to write table: {}", e));

        csv_writer.write_record(TABLE_HEADER).map_err(write_failed)?;
        for expense in expenses {
            csv_writer
                .serialize(ExpenseRow::from(expense))
                .map_err(write_failed)?;
        }
        csv_writer
            .flush()
            .map_err(|e| LedgerError::Persistence(format!("Failed to write table: {}", e)))
    })
}
