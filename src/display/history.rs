//! Change history formatting

use chrono::Local;

use crate::audit::{Action, AuditEntry, FieldChange};
use crate::config::Settings;
use crate::models::Money;

use super::report::{separator, truncate};

/// One line per change, oldest first, with local timestamps
pub fn format_history(entries: &[AuditEntry], settings: &Settings) -> String {
    if entries.is_empty() {
        return "No changes recorded.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:<16}  {:<8} {:<8} {}\n",
        "When", "Action", "Subject", "Details"
    ));
    output.push_str(&separator(80));
    output.push('\n');

    for entry in entries {
        output.push_str(&format!(
            "{:<16}  {:<8} {:<8} {}\n",
            entry.at.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string(),
            entry.action.to_string(),
            entry.subject.to_string(),
            entry_details(entry, settings)
        ));
    }

    output
}

fn entry_details(entry: &AuditEntry, settings: &Settings) -> String {
    match (entry.action, &entry.expense) {
        (Action::Added | Action::Deleted, Some(expense)) => format!(
            "{}, {}, {}, {}",
            truncate(&expense.description, 30),
            settings.format_money(expense.amount),
            expense.category,
            settings.format_date(expense.date)
        ),
        _ if entry.changes.is_empty() => "no changes".to_string(),
        _ => entry
            .changes
            .iter()
            .map(|change| format_change(change, settings))
            .collect::<Vec<_>>()
            .join("; "),
    }
}

/// "field: old -> new"
pub fn format_change(change: &FieldChange, settings: &Settings) -> String {
    let (from, to) = match change {
        FieldChange::Date { from, to } => (settings.format_date(*from), settings.format_date(*to)),
        FieldChange::Description { from, to } => {
            (format!("\"{}\"", truncate(from, 30)), format!("\"{}\"", truncate(to, 30)))
        }
        FieldChange::Category { from, to } => (from.to_string(), to.to_string()),
        FieldChange::Amount { from, to } => {
            (settings.format_money(*from), settings.format_money(*to))
        }
        FieldChange::MonthlyBudget { from, to } => {
            let show = |budget: &Option<Money>| match budget {
                Some(amount) => settings.format_money(*amount),
                None => "not set".to_string(),
            };
            (show(from), show(to))
        }
    };

    format!("{}: {} -> {}", change.field(), from, to)
}
