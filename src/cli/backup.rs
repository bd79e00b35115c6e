//! Backup CLI commands
//!
//! Backups are taken automatically before every change to the expense table;
//! these commands only inspect them.

use clap::Subcommand;

use crate::error::LedgerResult;
use crate::storage::Storage;

/// Backup subcommands
#[derive(Subcommand)]
pub enum BackupCommands {
    /// List retained backups, newest first
    List {
        /// Show detailed information
        #[arg(short, long)]
        verbose: bool,
    },
}

/// Handle a backup command
pub fn handle_backup_command(storage: &Storage, cmd: BackupCommands) -> LedgerResult<()> {
    let manager = storage.expenses.backups();

    match cmd {
        BackupCommands::List { verbose } => {
            let backups = manager.list_backups()?;

            if backups.is_empty() {
                println!("No backups found.");
                println!("A backup is taken before each change to the expense table.");
                return Ok(());
            }

            println!("Available Backups");
            println!("=================");
            println!();

            let now = chrono::Utc::now();
            for (i, backup) in backups.iter().enumerate() {
                let age = format_duration(now.signed_duration_since(backup.created_at));

                if verbose {
                    println!(
                        "{}. {}\n   Created: {}\n   Size: {}\n   Age: {}\n   Path: {}\n",
                        i + 1,
                        backup.filename,
                        backup.created_at.format("%Y-%m-%d %H:%M:%S UTC"),
                        format_size(backup.size_bytes),
                        age,
                        backup.path.display(),
                    );
                } else {
                    println!(
                        "  {}. {} ({} ago, {})",
                        i + 1,
                        backup.filename,
                        age,
                        format_size(backup.size_bytes),
                    );
                }
            }

            println!();
            println!(
                "Total: {} backup(s), keeping the newest {}",
                backups.len(),
                manager.retention()
            );
        }
    }

    Ok(())
}

fn format_duration(duration: chrono::Duration) -> String {
    let total_seconds = duration.num_seconds().max(0);

    if total_seconds < 60 {
        return format!("{}s", total_seconds);
    }

    let minutes = total_seconds / 60;
    if minutes < 60 {
        return format!("{}m", minutes);
    }

    let hours = minutes / 60;
    if hours < 24 {
        return format!("{}h", hours);
    }

    format!("{}d", hours / 24)
}

fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
