//! Backup manager for the expense table
//!
//! Before the table is overwritten, the current on-disk version is copied
//! into the backup directory under a timestamped name. Only the newest
//! `retention` backups are kept.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::Serialize;

use crate::config::paths::LedgerPaths;
use crate::error::{LedgerError, LedgerResult};

const BACKUP_PREFIX: &str = "expenses_backup_";
const BACKUP_EXTENSION: &str = ".csv";

/// Metadata about a backup
#[derive(Debug, Clone, Serialize)]
pub struct BackupInfo {
    /// Backup filename
    pub filename: String,
    /// Full path to backup
    pub path: PathBuf,
    /// When the backup was created (from the filename)
    pub created_at: DateTime<Utc>,
    /// Size in bytes
    pub size_bytes: u64,
}

/// Manages backup creation and retention
#[derive(Debug, Clone)]
pub struct BackupManager {
    /// File being backed up
    source: PathBuf,
    /// Path to backup directory
    backup_dir: PathBuf,
    /// Number of backups to keep
    retention: usize,
}

impl BackupManager {
    /// Create a new BackupManager for the expense table
    pub fn new(paths: &LedgerPaths, retention: usize) -> Self {
        Self::for_file(paths.expenses_file(), paths.backup_dir(), retention)
    }

    /// Create a BackupManager for an arbitrary file
    pub fn for_file(source: PathBuf, backup_dir: PathBuf, retention: usize) -> Self {
        Self {
            source,
            backup_dir,
            retention: retention.max(1),
        }
    }

    /// Copy the current table into the backup directory
    ///
    /// Returns `None` when there is no table on disk yet; an empty or missing
    /// store produces no backup.
    pub fn create_backup(&self) -> LedgerResult<Option<PathBuf>> {
        if !self.source.is_file() {
            log::debug!("No table at {}, skipping backup", self.source.display());
            return Ok(None);
        }

        fs::create_dir_all(&self.backup_dir).map_err(|e| {
            LedgerError::Persistence(format!("Failed to create backup directory: {}", e))
        })?;

        let backup_path = self.next_backup_path(Utc::now());

        fs::copy(&self.source, &backup_path).map_err(|e| {
            LedgerError::Persistence(format!("Failed to write backup file: {}", e))
        })?;

        log::debug!("Created backup {}", backup_path.display());
        Ok(Some(backup_path))
    }

    /// Pick a filename for `now`, stepping forward a microsecond at a time
    /// if a backup with that timestamp already exists
    fn next_backup_path(&self, now: DateTime<Utc>) -> PathBuf {
        let mut stamp = now;
        loop {
            let filename = format!(
                "{}{}{}",
                BACKUP_PREFIX,
                stamp.format("%Y%m%d_%H%M%S_%6f"),
                BACKUP_EXTENSION
            );
            let candidate = self.backup_dir.join(filename);
            if !candidate.exists() {
                return candidate;
            }
            stamp += Duration::microseconds(1);
        }
    }

    /// List all available backups, newest first
    pub fn list_backups(&self) -> LedgerResult<Vec<BackupInfo>> {
        if !self.backup_dir.exists() {
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&self.backup_dir).map_err(|e| {
            LedgerError::Persistence(format!("Failed to read backup directory: {}", e))
        })?;

        let mut backups = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| {
                LedgerError::Persistence(format!("Failed to read directory entry: {}", e))
            })?;
            if let Some(info) = parse_backup_info(&entry.path()) {
                backups.push(info);
            }
        }

        backups.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.filename.cmp(&a.filename))
        });

        Ok(backups)
    }

    /// Delete the oldest backups until only `retention` remain
    pub fn enforce_retention(&self) -> LedgerResult<Vec<PathBuf>> {
        let mut deleted = Vec::new();

        for backup in self.list_backups()?.into_iter().skip(self.retention) {
            fs::remove_file(&backup.path).map_err(|e| {
                LedgerError::Persistence(format!("Failed to delete old backup: {}", e))
            })?;
            log::debug!("Pruned backup {}", backup.filename);
            deleted.push(backup.path);
        }

        Ok(deleted)
    }

    /// Create a backup and then enforce retention policy
    pub fn create_backup_with_retention(&self) -> LedgerResult<(Option<PathBuf>, Vec<PathBuf>)> {
        let backup_path = self.create_backup()?;
        let deleted = self.enforce_retention()?;
        Ok((backup_path, deleted))
    }

    pub fn backup_dir(&self) -> &PathBuf {
        &self.backup_dir
    }

    pub fn retention(&self) -> usize {
        self.retention
    }
}

fn parse_backup_info(path: &Path) -> Option<BackupInfo> {
    let filename = path.file_name()?.to_string_lossy().to_string();
    let stamp = filename
        .strip_prefix(BACKUP_PREFIX)?
        .strip_suffix(BACKUP_EXTENSION)?;
    let created_at = parse_backup_timestamp(stamp)?;
    let size_bytes = fs::metadata(path).ok()?.len();

    Some(BackupInfo {
        filename,
        path: path.to_path_buf(),
        created_at,
        size_bytes,
    })
}

/// Parse a backup timestamp from the filename stamp
///
/// Expected format: YYYYMMDD_HHMMSS or YYYYMMDD_HHMMSS_ffffff (microseconds)
fn parse_backup_timestamp(stamp: &str) -> Option<DateTime<Utc>> {
    let parts: Vec<&str> = stamp.split('_').collect();
    if parts.len() < 2 || parts.len() > 3 {
        return None;
    }

    let date_part = parts[0];
    let time_part = parts[1];
    if date_part.len() != 8 || time_part.len() != 6 {
        return None;
    }

    let micros: u32 = match parts.get(2) {
        Some(fraction) if fraction.len() == 6 => fraction.parse().ok()?,
        Some(_) => return None,
        None => 0,
    };

    let year: i32 = date_part.get(0..4)?.parse().ok()?;
    let month: u32 = date_part.get(4..6)?.parse().ok()?;
    let day: u32 = date_part.get(6..8)?.parse().ok()?;
    let hour: u32 = time_part.get(0..2)?.parse().ok()?;
    let minute: u32 = time_part.get(2..4)?.parse().ok()?;
    let second: u32 = time_part.get(4..6)?.parse().ok()?;

    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    let time = NaiveTime::from_hms_micro_opt(hour, minute, second, micros)?;

    Some(DateTime::from_naive_utc_and_offset(
        NaiveDateTime::new(date, time),
        Utc,
    ))
}
