//! Monthly budget service
//!
//! Sets and clears the budget in the settings file and checks spending
//! against it.

use crate::audit::AuditEntry;
use crate::config::Settings;
use crate::error::LedgerResult;
use crate::models::{Money, YearMonth};
use crate::reports::{budget_status, BudgetStatus};
use crate::storage::Storage;

pub struct BudgetService<'a> {
    storage: &'a Storage,
    settings: &'a mut Settings,
}

impl<'a> BudgetService<'a> {
    pub fn new(storage: &'a Storage, settings: &'a mut Settings) -> Self {
        Self { storage, settings }
    }

    /// Set the monthly budget; zero turns tracking off
    pub fn set(&mut self, amount: Money) -> LedgerResult<Option<Money>> {
        self.update(Some(amount))
    }

    /// Turn budget tracking off
    pub fn clear(&mut self) -> LedgerResult<()> {
        self.update(None).map(|_| ())
    }

    fn update(&mut self, budget: Option<Money>) -> LedgerResult<Option<Money>> {
        let before = self.settings.clone();
        self.settings.set_monthly_budget(budget)?;

        if let Err(e) = self.settings.save(self.storage.paths()) {
            *self.settings = before;
            return Err(e);
        }

        self.storage
            .record(AuditEntry::budget_changed(before.budget(), self.settings.budget()));

        log::info!("Monthly budget is now {:?}", self.settings.budget());
        Ok(self.settings.budget())
    }

    /// Budget status for `month`, or `None` when no budget is set
    pub fn status(&self, month: YearMonth) -> LedgerResult<Option<BudgetStatus>> {
        current_status(self.storage, &*self.settings, month)
    }
}

/// Budget status for `month` under the configured budget, if any
pub fn current_status(
    storage: &Storage,
    settings: &Settings,
    month: YearMonth,
) -> LedgerResult<Option<BudgetStatus>> {
    match settings.budget() {
        Some(budget) => budget_status(storage.expenses.all(), budget, month).map(Some),
        None => Ok(None),
    }
}

/// The status for `month`, only when spending has exceeded the budget
pub fn budget_alert(
    storage: &Storage,
    settings: &Settings,
    month: YearMonth,
) -> LedgerResult<Option<BudgetStatus>> {
    Ok(current_status(storage, settings, month)?.filter(|s| s.exceeded))
}
