//! Where the game record lives between invocations.
//!
//! A write names the record it expects to replace. When the stored record has
//! changed since it was read, the write fails with [`StoreError::Conflict`]:
//! somebody else moved first.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use tracing::{debug, info};

use crate::errors::{StoreError, StoreResult};

pub trait GameStore {
    /// Current record, or `None` when no game has been saved.
    fn read_record(&self) -> StoreResult<Option<String>>;

    /// Remove the record, provided it still equals `expected`.
    fn delete_record(&mut self, expected: &str, message: &str) -> StoreResult<()>;

    /// Replace the record, provided the stored one still equals `expected`
    /// (`None` meaning there must be no record).
    fn write_record(&mut self, expected: Option<&str>, record: &str, message: &str) -> StoreResult<()>;
}

/// Record kept in a single file.
#[derive(Debug, Clone)]
pub struct FileGameStore {
    path: PathBuf,
}

impl FileGameStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn ensure_unchanged(&self, expected: Option<&str>) -> StoreResult<()> {
        if self.read_record()?.as_deref() == expected {
            Ok(())
        } else {
            Err(StoreError::Conflict)
        }
    }
}

impl GameStore for FileGameStore {
    fn read_record(&self) -> StoreResult<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(record) => Ok(Some(record)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn delete_record(&mut self, expected: &str, message: &str) -> StoreResult<()> {
        self.ensure_unchanged(Some(expected))?;
        fs::remove_file(&self.path)?;
        info!(path = %self.path.display(), commit = message, "deleted game record");
        Ok(())
    }

    fn write_record(&mut self, expected: Option<&str>, record: &str, message: &str) -> StoreResult<()> {
        self.ensure_unchanged(expected)?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, record)?;
        info!(path = %self.path.display(), commit = message, "wrote game record");
        Ok(())
    }
}

/// In-memory store, also keeping the message of every change.
#[derive(Debug, Clone, Default)]
pub struct MemoryGameStore {
    record: Option<String>,
    pub messages: Vec<String>,
}

impl MemoryGameStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(record: impl Into<String>) -> Self {
        Self {
            record: Some(record.into()),
            messages: Vec::new(),
        }
    }

    pub fn record(&self) -> Option<&str> {
        self.record.as_deref()
    }
}

impl GameStore for MemoryGameStore {
    fn read_record(&self) -> StoreResult<Option<String>> {
        Ok(self.record.clone())
    }

    fn delete_record(&mut self, expected: &str, message: &str) -> StoreResult<()> {
        if self.record.as_deref() != Some(expected) {
            return Err(StoreError::Conflict);
        }
        self.record = None;
        self.messages.push(message.to_owned());
        Ok(())
    }

    fn write_record(&mut self, expected: Option<&str>, record: &str, message: &str) -> StoreResult<()> {
        if self.record.as_deref() != expected {
            debug!(commit = message, "conditional write lost the race");
            return Err(StoreError::Conflict);
        }
        self.record = Some(record.to_owned());
        self.messages.push(message.to_owned());
        Ok(())
    }
}
