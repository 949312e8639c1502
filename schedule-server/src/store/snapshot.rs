//! JSON snapshot file for the schedule store.

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use super::error::StoreError;
use super::tables::{Tables, TablesSnapshot};

/// Location of the snapshot file.
#[derive(Debug, Clone)]
pub struct SnapshotFile {
    path: PathBuf,
}

impl SnapshotFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the snapshot file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load tables from the file.
    ///
    /// A missing file yields empty tables; an unreadable or malformed file is
    /// an error, so a typo in the data never silently starts from scratch.
    pub(crate) fn load(&self) -> Result<Tables, StoreError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Tables::default()),
            Err(e) => {
                return Err(StoreError::Snapshot {
                    message: format!("failed to read {}: {}", self.path.display(), e),
                });
            }
        };

        let snapshot: TablesSnapshot =
            serde_json::from_str(&contents).map_err(|e| StoreError::Snapshot {
                message: format!("failed to parse {}: {}", self.path.display(), e),
            })?;

        Tables::from_snapshot(snapshot)
    }

    /// Write tables to the file.
    ///
    /// The snapshot goes to a temporary file in the same directory which is
    /// then renamed over the target, so readers only ever see a complete
    /// file. Creates parent directories if they don't exist. Blocking.
    pub(crate) fn save(&self, tables: &Tables) -> Result<(), StoreError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        if !dir.exists() {
            std::fs::create_dir_all(dir).map_err(|e| StoreError::Snapshot {
                message: format!("failed to create snapshot directory: {}", e),
            })?;
        }

        let json = serde_json::to_vec_pretty(&tables.to_snapshot()).map_err(|e| {
            StoreError::Snapshot {
                message: format!("failed to serialize snapshot: {}", e),
            }
        })?;

        let write_failed = |e: std::io::Error| StoreError::Snapshot {
            message: format!("failed to write snapshot file: {}", e),
        };

        let mut staged = NamedTempFile::new_in(dir).map_err(write_failed)?;
        staged.write_all(&json).map_err(write_failed)?;
        staged.as_file().sync_all().map_err(write_failed)?;
        staged
            .persist(&self.path)
            .map_err(|e| write_failed(e.error))?;

        Ok(())
    }
}
