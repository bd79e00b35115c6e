//! Expense CLI commands
//!
//! Add, list, show, edit and delete expenses.

use clap::Subcommand;

use crate::config::Settings;
use crate::display::{format_budget_status, format_expense_details, format_expense_register};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Category, ExpenseChanges, ExpenseDraft, Money, UnknownCategory, YearMonth};
use crate::services::{budget_alert, ExpenseFilter, ExpenseService};
use crate::storage::Storage;

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Record a new expense
    Add {
        /// What the money was spent on
        description: String,
        /// Amount (e.g., "250", "1,250.50")
        amount: String,
        /// Category name or number (1-9)
        #[arg(short, long)]
        category: String,
        /// Expense date, defaults to today
        #[arg(short, long)]
        date: Option<String>,
        /// Confirm an unusually large amount
        #[arg(short, long)]
        yes: bool,
    },
    /// List expenses
    List {
        /// Earliest date to include
        #[arg(long)]
        from: Option<String>,
        /// Latest date to include
        #[arg(long)]
        to: Option<String>,
        /// Only this category (name or number)
        #[arg(short, long)]
        category: Option<String>,
        /// Only descriptions containing this text (case-insensitive)
        #[arg(short, long)]
        search: Option<String>,
        /// Maximum number of expenses to show
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Show one expense
    Show {
        /// Expense ID (e.g., EXP003)
        id: String,
    },
    /// Change fields of an expense
    Edit {
        /// Expense ID (e.g., EXP003)
        id: String,
        /// New description
        #[arg(long)]
        description: Option<String>,
        /// New amount
        #[arg(short, long)]
        amount: Option<String>,
        /// New category name or number
        #[arg(short, long)]
        category: Option<String>,
        /// New date
        #[arg(short, long)]
        date: Option<String>,
        /// Confirm an unusually large amount
        #[arg(short, long)]
        yes: bool,
    },
    /// Delete an expense
    Delete {
        /// Expense ID (e.g., EXP003)
        id: String,
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },
}

/// Handle an expense command
pub fn handle_expense_command(
    storage: &mut Storage,
    settings: &Settings,
    cmd: ExpenseCommands,
) -> LedgerResult<()> {
    match cmd {
        ExpenseCommands::Add {
            description,
            amount,
            category,
            date,
            yes,
        } => {
            let amount = parse_amount(settings, &amount)?;
            confirm_large_amount(settings, amount, yes)?;

            let draft = ExpenseDraft::new(
                settings.parse_date(date.as_deref().unwrap_or(""))?,
                description,
                parse_category(&category)?,
                amount,
            );

            let expense = ExpenseService::new(storage).add(draft)?;
            println!(
                "Added {}: {} ({}) {}",
                expense.id,
                expense.description,
                expense.category,
                settings.format_money(expense.amount)
            );

            if let Some(status) = budget_alert(storage, settings, YearMonth::current())? {
                println!();
                println!("WARNING: You've exceeded your monthly budget!");
                print!("{}", format_budget_status(&status, settings));
            }
        }

        ExpenseCommands::List {
            from,
            to,
            category,
            search,
            limit,
        } => {
            let mut filter = ExpenseFilter::new();

            if let Some(from) = from {
                filter = filter.since(parse_filter_date(settings, &from)?);
            }
            if let Some(to) = to {
                filter = filter.until(parse_filter_date(settings, &to)?);
            }
            if let Some(category) = category {
                filter = filter.category(parse_category(&category)?);
            }
            if let Some(search) = search {
                filter = filter.keyword(search);
            }
            if let Some(limit) = limit {
                filter = filter.limit(limit);
            }

            let expenses = ExpenseService::new(storage).list(&filter)?;
            print!("{}", format_expense_register(&expenses, settings));
        }

        ExpenseCommands::Show { id } => {
            let expense = ExpenseService::new(storage).find(&id)?;
            print!("{}", format_expense_details(&expense, settings));
        }

        ExpenseCommands::Edit {
            id,
            description,
            amount,
            category,
            date,
            yes,
        } => {
            let mut changes = ExpenseChanges::new();

            if let Some(description) = description {
                changes = changes.description(description);
            }
            if let Some(amount) = amount {
                let amount = parse_amount(settings, &amount)?;
                confirm_large_amount(settings, amount, yes)?;
                changes = changes.amount(amount);
            }
            if let Some(category) = category {
                changes = changes.category(parse_category(&category)?);
            }
            if let Some(date) = date {
                changes = changes.date(parse_filter_date(settings, &date)?);
            }

            if changes.is_empty() {
                return Err(LedgerError::Validation(
                    "Nothing to change. Use --description, --amount, --category or --date".into(),
                ));
            }

            let expense = ExpenseService::new(storage).edit(&id, &changes)?;
            println!("Updated {}", expense.id);
            print!("{}", format_expense_details(&expense, settings));
        }

        ExpenseCommands::Delete { id, force } => {
            let mut service = ExpenseService::new(storage);
            let expense = service.find(&id)?;

            if !force {
                println!("About to delete expense:");
                print!("{}", format_expense_details(&expense, settings));
                println!();
                println!("Use --force to confirm deletion");
                return Ok(());
            }

            let deleted = service.delete(&id)?;
            println!(
                "Deleted {} ({} {})",
                deleted.id,
                deleted.description,
                settings.format_money(deleted.amount)
            );
        }
    }

    Ok(())
}

/// Parse a positive amount entered by the user
fn parse_amount(settings: &Settings, input: &str) -> LedgerResult<Money> {
    let amount = settings.parse_money(input)?;
    if !amount.is_positive() {
        return Err(LedgerError::Validation(format!(
            "Amount must be positive, got {}",
            input.trim()
        )));
    }
    Ok(amount)
}

pub(crate) fn parse_category(input: &str) -> LedgerResult<Category> {
    input
        .parse()
        .map_err(|e: UnknownCategory| LedgerError::Validation(e.to_string()))
}

/// Dates given as options must be present; blank does not mean today here
fn parse_filter_date(settings: &Settings, input: &str) -> LedgerResult<chrono::NaiveDate> {
    if input.trim().is_empty() {
        return Err(LedgerError::Validation("Date cannot be empty".into()));
    }
    settings.parse_date(input)
}

fn confirm_large_amount(settings: &Settings, amount: Money, confirmed: bool) -> LedgerResult<()> {
    if settings.is_large_amount(amount) && !confirmed {
        return Err(LedgerError::Validation(format!(
            "{} is above the large-amount threshold of {}. Re-run with --yes to record it",
            settings.format_money(amount),
            settings.format_money(settings.large_amount_threshold)
        )));
    }
    Ok(())
}
