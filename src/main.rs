use anyhow::Result;
use clap::{Parser, Subcommand};

use expense_ledger::cli::{
    handle_backup_command, handle_budget_command, handle_expense_command, handle_export_command,
    handle_history_command, handle_report_command, BackupCommands, BudgetCommands,
    ExpenseCommands, ExportCommands, HistoryArgs, ReportCommands,
};
use expense_ledger::config::{LedgerPaths, Settings};
use expense_ledger::storage::Storage;

#[derive(Parser)]
#[command(
    name = "ledger",
    version,
    about = "Local expense ledger",
    long_about = "Record personal expenses in a local CSV ledger and see where the \
                  money goes: category breakdowns, monthly trends, the largest \
                  expenses and a monthly budget check."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Expense(ExpenseCommands),

    #[command(flatten)]
    Report(ReportCommands),

    /// Monthly budget commands
    #[command(subcommand)]
    Budget(BudgetCommands),

    /// Export expenses to a file
    #[command(subcommand)]
    Export(ExportCommands),

    /// Backup commands
    #[command(subcommand)]
    Backup(BackupCommands),

    /// Show recorded changes to the ledger or to one expense
    History(HistoryArgs),

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = LedgerPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;
    if !paths.is_initialized() {
        settings.save(&paths)?;
        log::info!("Created settings at {}", paths.settings_file().display());
    }

    let mut storage = Storage::open(paths.clone(), settings.backup_retention)?;

    match cli.command {
        Some(Commands::Expense(cmd)) => {
            handle_expense_command(&mut storage, &settings, cmd)?;
        }
        Some(Commands::Report(cmd)) => {
            handle_report_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Budget(cmd)) => {
            handle_budget_command(&storage, &mut settings, cmd)?;
        }
        Some(Commands::Export(cmd)) => {
            handle_export_command(&storage, cmd)?;
        }
        Some(Commands::Backup(cmd)) => {
            handle_backup_command(&storage, cmd)?;
        }
        Some(Commands::History(args)) => {
            handle_history_command(&storage, &settings, args)?;
        }
        Some(Commands::Config) => {
            println!("Expense Ledger Configuration");
            println!("============================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Expense table:    {}", paths.expenses_file().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Backup directory: {}", paths.backup_dir().display());
            println!("Reports:          {}", paths.reports_dir().display());
            println!("History log:      {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol:  {}", settings.currency_symbol);
            println!("  Date format:      {}", settings.date_format);
            match settings.budget() {
                Some(budget) => {
                    println!("  Monthly budget:   {}", settings.format_money(budget))
                }
                None => println!("  Monthly budget:   not set"),
            }
            println!(
                "  Large amount:     above {}",
                settings.format_money(settings.large_amount_threshold)
            );
            println!("  Backups kept:     {}", settings.backup_retention);
        }
        None => {
            println!("Expense Ledger - {} expenses recorded", storage.expenses.len());
            println!();
            println!("Run 'ledger --help' for usage information.");
            println!("Run 'ledger add <description> <amount> -c <category>' to record one.");
        }
    }

    Ok(())
}
