//! History CLI command
//!
//! Shows what was added, edited and deleted, and how the budget changed.

use clap::Args;

use crate::audit::Subject;
use crate::config::Settings;
use crate::display::format_history;
use crate::error::{LedgerError, LedgerResult};
use crate::storage::Storage;

#[derive(Args)]
pub struct HistoryArgs {
    /// Only changes to this expense (e.g., "EXP003"), or "budget"
    pub subject: Option<String>,

    /// Show only the newest N changes
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,
}

/// Handle the history command
pub fn handle_history_command(
    storage: &Storage,
    settings: &Settings,
    args: HistoryArgs,
) -> LedgerResult<()> {
    let subject = args
        .subject
        .as_deref()
        .map(str::parse::<Subject>)
        .transpose()
        .map_err(|e| LedgerError::Validation(e.to_string()))?;

    let entries = storage.history(subject, args.limit)?;
    if let Some(subject) = subject {
        println!("History of {}", subject);
        println!();
    }
    print!("{}", format_history(&entries, settings));

    Ok(())
}
