//! History persistence backends

use crate::constants::history::HISTORY_FILE_NAME;
use crate::error::{Error, Result};
use std::fs;
use std::path::PathBuf;

const APP_DIR_NAME: &str = "pinpoint";

/// Byte-level persistence for the history blob
pub trait HistoryStorage: Send {
    /// Previously saved bytes, or `None` if nothing was ever saved
    fn load(&self) -> Result<Option<Vec<u8>>>;

    /// Replace the saved bytes
    fn save(&mut self, bytes: &[u8]) -> Result<()>;
}

/// History kept in a file
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Get the data directory path
    pub fn data_dir() -> Result<PathBuf> {
        dirs::data_dir()
            .map(|p| p.join(APP_DIR_NAME))
            .ok_or_else(|| Error::Config("Could not determine data directory".to_string()))
    }

    /// Get the default history file path
    pub fn default_path() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join(HISTORY_FILE_NAME))
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl HistoryStorage for FileStorage {
    fn load(&self) -> Result<Option<Vec<u8>>> {
        if !self.path.exists() {
            return Ok(None);
        }

        fs::read(&self.path)
            .map(Some)
            .map_err(|e| Error::History(format!("Failed to read history file: {}", e)))
    }

    fn save(&mut self, bytes: &[u8]) -> Result<()> {
        // Ensure directory exists
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                Error::History(format!("Failed to create history directory: {}", e))
            })?;
        }

        fs::write(&self.path, bytes)
            .map_err(|e| Error::History(format!("Failed to write history file: {}", e)))
    }
}

/// History kept in memory for the lifetime of the value
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    bytes: Option<Vec<u8>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-filled with a saved blob
    pub fn with_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: Some(bytes.into()),
        }
    }
}

impl HistoryStorage for MemoryStorage {
    fn load(&self) -> Result<Option<Vec<u8>>> {
        Ok(self.bytes.clone())
    }

    fn save(&mut self, bytes: &[u8]) -> Result<()> {
        self.bytes = Some(bytes.to_vec());
        Ok(())
    }
}
