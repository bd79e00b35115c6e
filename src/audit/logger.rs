//! Append-only JSONL history log

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;

use crate::error::{LedgerError, LedgerResult};

use super::entry::{AuditEntry, Subject};

/// Reads and appends history entries, one JSON object per line
pub struct AuditLogger {
    log_path: PathBuf,
}

impl AuditLogger {
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    /// Append an entry and flush it immediately
    pub fn append(&self, entry: &AuditEntry) -> LedgerResult<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| LedgerError::Io(format!("Failed to open history log: {}", e)))?;

        let json = serde_json::to_string(entry)
            .map_err(|e| LedgerError::Json(format!("Failed to serialize history entry: {}", e)))?;

        writeln!(file, "{}", json)
            .and_then(|_| file.flush())
            .map_err(|e| LedgerError::Io(format!("Failed to write history entry: {}", e)))
    }

    /// Every entry, oldest first
    fn entries(&self) -> LedgerResult<Vec<AuditEntry>> {
        if !self.log_path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.log_path)
            .map_err(|e| LedgerError::Io(format!("Failed to open history log: {}", e)))?;

        let mut entries = Vec::new();
        for (index, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|e| {
                LedgerError::Io(format!("Failed to read history line {}: {}", index + 1, e))
            })?;
            if line.trim().is_empty() {
                continue;
            }

            let entry = serde_json::from_str(&line).map_err(|e| {
                LedgerError::Json(format!(
                    "Unreadable history entry at line {} of {}: {}",
                    index + 1,
                    self.log_path.display(),
                    e
                ))
            })?;
            entries.push(entry);
        }

        Ok(entries)
    }

    /// Entries about `subject` (or all of them), keeping the newest `limit`
    pub fn history(
        &self,
        subject: Option<Subject>,
        limit: Option<usize>,
    ) -> LedgerResult<Vec<AuditEntry>> {
        let mut entries: Vec<AuditEntry> = self
            .entries()?
            .into_iter()
            .filter(|e| subject.map_or(true, |s| e.subject == s))
            .collect();

        if let Some(limit) = limit {
            let start = entries.len().saturating_sub(limit);
            entries.drain(..start);
        }

        Ok(entries)
    }
}
