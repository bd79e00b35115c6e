//! File I/O utilities with atomic writes
//!
//! Provides safe file operations that won't corrupt data on failure. Every
//! write goes to a temporary file in the target's directory and is renamed
//! over the target only once it is completely written and synced.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};
use tempfile::NamedTempFile;

use crate::error::{LedgerError, LedgerResult};

/// Read JSON from a file, returning a default value if file doesn't exist
pub fn read_json<T, P>(path: P) -> LedgerResult<T>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if !path.exists() {
        return Ok(T::default());
    }

    let file = File::open(path).map_err(|e| {
        LedgerError::Persistence(format!("Failed to open {}: {}", path.display(), e))
    })?;

    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|e| {
        LedgerError::Persistence(format!("Failed to parse {}: {}", path.display(), e))
    })
}

/// Write a file atomically (write to temp, then rename)
///
/// `write` receives a buffered writer over the temporary file. If it fails,
/// or any later step fails, the temporary file is removed and `path` is left
/// exactly as it was.
pub fn write_atomic<P, F>(path: P, write: F) -> LedgerResult<()>
where
    P: AsRef<Path>,
    F: FnOnce(&mut dyn Write) -> LedgerResult<()>,
{
    let path = path.as_ref();

    let parent = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    fs::create_dir_all(parent).map_err(|e| {
        LedgerError::Persistence(format!(
            "Failed to create directory {}: {}",
            parent.display(),
            e
        ))
    })?;

    // Temp file must live in the same directory for the rename to be atomic.
    // Dropping it on any early return deletes it.
    let mut temp = NamedTempFile::new_in(parent)
        .map_err(|e| LedgerError::Persistence(format!("Failed to create temp file: {}", e)))?;

    {
        let mut writer = BufWriter::new(temp.as_file_mut());
        write(&mut writer)?;
        writer
            .flush()
            .map_err(|e| LedgerError::Persistence(format!("Failed to flush data: {}", e)))?;
    }

    temp.as_file()
        .sync_all()
        .map_err(|e| LedgerError::Persistence(format!("Failed to sync data: {}", e)))?;

    temp.persist(path).map_err(|e| {
        LedgerError::Persistence(format!(
            "Failed to replace {}: {}",
            path.display(),
            e.error
        ))
    })?;

    Ok(())
}

/// Write JSON to a file atomically
pub fn write_json_atomic<T, P>(path: P, data: &T) -> LedgerResult<()>
where
    T: Serialize,
    P: AsRef<Path>,
{
    write_atomic(path, |writer| {
        serde_json::to_writer_pretty(writer, data)
            .map_err(|e| LedgerError::Persistence(format!("Failed to serialize data: {}", e)))
    })
}
