//! Expense service
//!
//! Add, edit and delete expenses through the store and record each change
//! in the ledger history.

use crate::audit::AuditEntry;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Expense, ExpenseChanges, ExpenseDraft, ExpenseId};
use crate::storage::Storage;

use super::filter::ExpenseFilter;

/// Service for expense management
pub struct ExpenseService<'a> {
    storage: &'a mut Storage,
}

impl<'a> ExpenseService<'a> {
    pub fn new(storage: &'a mut Storage) -> Self {
        Self { storage }
    }

    /// Record a new expense
    pub fn add(&mut self, draft: ExpenseDraft) -> LedgerResult<Expense> {
        let expense = self.storage.expenses.add(draft)?;

        self.storage.record(AuditEntry::added(&expense));

        Ok(expense)
    }

    /// Look up an expense by its ID string ("EXP003", case-insensitive)
    pub fn find(&self, identifier: &str) -> LedgerResult<Expense> {
        let id = parse_id(identifier)?;
        self.storage
            .expenses
            .get(id)
            .cloned()
            .ok_or_else(|| LedgerError::expense_not_found(id.to_string()))
    }

    pub fn list(&self, filter: &ExpenseFilter) -> LedgerResult<Vec<Expense>> {
        filter.apply(self.storage.expenses.all())
    }

    /// Change fields of an existing expense
    pub fn edit(&mut self, identifier: &str, changes: &ExpenseChanges) -> LedgerResult<Expense> {
        let id = parse_id(identifier)?;
        let before = self
            .storage
            .expenses
            .get(id)
            .cloned()
            .ok_or_else(|| LedgerError::expense_not_found(id.to_string()))?;

        let after = self.storage.expenses.edit(id, changes)?;

        self.storage.record(AuditEntry::edited(&before, &after));

        Ok(after)
    }

    /// Permanently remove an expense; its ID is never issued again
    pub fn delete(&mut self, identifier: &str) -> LedgerResult<Expense> {
        let id = parse_id(identifier)?;
        let removed = self.storage.expenses.delete(id)?;

        self.storage.record(AuditEntry::deleted(&removed));

        Ok(removed)
    }
}

fn parse_id(identifier: &str) -> LedgerResult<ExpenseId> {
    ExpenseId::parse(identifier).map_err(|e| LedgerError::Validation(e.to_string()))
}
