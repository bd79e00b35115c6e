//! Budget CLI commands
//!
//! Set, show and clear the monthly budget.

use clap::Subcommand;

use crate::config::Settings;
use crate::display::format_budget_status;
use crate::error::{LedgerError, LedgerResult};
use crate::models::YearMonth;
use crate::services::BudgetService;
use crate::storage::Storage;

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Set the monthly budget (0 turns tracking off)
    Set {
        /// Amount (e.g., "20000" or "20,000.00")
        amount: String,
    },

    /// Show this month's spending against the budget
    Show {
        /// Month to check (e.g., "2025-01"), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Turn budget tracking off
    Clear,
}

/// Handle a budget command
pub fn handle_budget_command(
    storage: &Storage,
    settings: &mut Settings,
    cmd: BudgetCommands,
) -> LedgerResult<()> {
    match cmd {
        BudgetCommands::Set { amount } => {
            let amount = settings.parse_money(&amount)?;
            let mut service = BudgetService::new(storage, settings);
            match service.set(amount)? {
                Some(budget) => {
                    println!("Monthly budget set to {}", settings.format_money(budget))
                }
                None => println!("Monthly budget cleared"),
            }
        }

        BudgetCommands::Show { month } => {
            let month = match month {
                Some(m) => YearMonth::parse(&m)
                    .map_err(|e| LedgerError::Validation(e.to_string()))?,
                None => YearMonth::current(),
            };

            let service = BudgetService::new(storage, settings);
            match service.status(month)? {
                Some(status) => print!("{}", format_budget_status(&status, settings)),
                None => {
                    println!("No monthly budget set.");
                    println!("Set one with: ledger budget set <amount>");
                }
            }
        }

        BudgetCommands::Clear => {
            BudgetService::new(storage, settings).clear()?;
            println!("Monthly budget cleared");
        }
    }

    Ok(())
}
