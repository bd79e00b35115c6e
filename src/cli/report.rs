//! CLI commands for reports
//!
//! Summary, category breakdown, monthly trend, largest expenses and chart
//! series. Everything is computed from the current contents of the store.

use std::path::PathBuf;

use chrono::Local;
use clap::Subcommand;

use crate::config::Settings;
use crate::display::{format_breakdown, format_top, format_trend};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Expense, YearMonth};
use crate::reports::{
    category_breakdown, dashboard_series, monthly_trend, top_n, SummaryReport,
    DEFAULT_TREND_MONTHS, SUMMARY_TOP_COUNT,
};
use crate::services::by_date_range;
use crate::storage::{write_json_atomic, Storage};

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Show the full expense summary and save the category CSV
    Summary {
        /// Write the category CSV here instead of the reports directory
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show spending by category
    Breakdown {
        /// Only this month (e.g., "2025-01")
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Show monthly totals
    Trend {
        /// Number of months ending at the latest expense
        #[arg(short, long, default_value_t = DEFAULT_TREND_MONTHS)]
        months: usize,
    },

    /// Show the largest expenses
    Top {
        /// How many to show
        #[arg(short, default_value_t = SUMMARY_TOP_COUNT)]
        n: usize,

        /// Only this month (e.g., "2025-01")
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Write chart series as JSON for an external renderer
    Chart {
        /// Number of months in the trend series
        #[arg(short, long, default_value_t = DEFAULT_TREND_MONTHS)]
        months: usize,

        /// Output file path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Handle report commands
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ReportCommands,
) -> LedgerResult<()> {
    match cmd {
        ReportCommands::Summary { output } => handle_summary(storage, settings, output),
        ReportCommands::Breakdown { month } => {
            let records = records_for_month(storage, month.as_deref())?;
            print!("{}", format_breakdown(&category_breakdown(&records), settings));
            Ok(())
        }
        ReportCommands::Trend { months } => {
            let trend = monthly_trend(storage.expenses.all(), months)?;
            print!("{}", format_trend(&trend, settings));
            Ok(())
        }
        ReportCommands::Top { n, month } => {
            let records = records_for_month(storage, month.as_deref())?;
            print!("{}", format_top(&top_n(&records, n), settings));
            Ok(())
        }
        ReportCommands::Chart { months, output } => handle_chart(storage, settings, months, output),
    }
}

fn handle_summary(
    storage: &Storage,
    settings: &Settings,
    output: Option<PathBuf>,
) -> LedgerResult<()> {
    let report = SummaryReport::generate(
        storage.expenses.all(),
        settings.budget(),
        YearMonth::current(),
    )?;

    if report.is_empty() {
        println!("No expenses recorded yet.");
        return Ok(());
    }

    print!("{}", report.format_terminal(settings));

    let path = output.unwrap_or_else(|| storage.paths().summary_report_file());
    report.save_csv(&path)?;
    println!();
    println!("Category summary saved to {}", path.display());

    Ok(())
}

fn handle_chart(
    storage: &Storage,
    settings: &Settings,
    months: usize,
    output: Option<PathBuf>,
) -> LedgerResult<()> {
    let records = storage.expenses.all();
    if records.is_empty() {
        println!("No expenses to chart.");
        return Ok(());
    }

    let breakdown = category_breakdown(records);
    let trend = monthly_trend(records, months)?;
    let series = dashboard_series(&breakdown, &trend, &settings.currency_symbol);

    let path = output.unwrap_or_else(|| {
        storage.paths().reports_dir().join(format!(
            "expense_charts_{}.json",
            Local::now().format("%Y%m%d")
        ))
    });

    write_json_atomic(&path, &series)
        .map_err(|e| LedgerError::Export(format!("Failed to write chart data: {}", e)))?;

    println!("Wrote {} chart series to {}", series.len(), path.display());
    Ok(())
}

/// All expenses, or only those dated within `month`
fn records_for_month(storage: &Storage, month: Option<&str>) -> LedgerResult<Vec<Expense>> {
    let records = storage.expenses.all();
    match month {
        Some(month) => {
            let month = YearMonth::parse(month)
                .map_err(|e| LedgerError::Validation(e.to_string()))?;
            let bounds = month.first_day().zip(month.last_day());
            let (from, to) = bounds.ok_or_else(|| {
                LedgerError::Validation(format!("Month {} is outside the calendar", month))
            })?;
            by_date_range(records, Some(from), Some(to))
        }
        None => Ok(records.to_vec()),
    }
}
