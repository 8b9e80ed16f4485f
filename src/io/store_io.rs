//! Reading and writing the task file.
//!
//! The file is a pretty-printed JSON object mapping category names to arrays
//! of `{description, priority, date, completed}` records. Categories and
//! records are written in store order and read back in document order, so a
//! load after a save reproduces the store exactly.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tempfile::NamedTempFile;

use crate::model::store::TaskStore;

/// Error type for task file I/O
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("could not read {path}: {source}")]
    ReadError { path: PathBuf, source: io::Error },
    #[error("could not write {path}: {source}")]
    WriteError { path: PathBuf, source: io::Error },
    #[error("malformed task file {path}: {source}")]
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("could not serialize tasks: {0}")]
    SerializeError(#[from] serde_json::Error),
}

/// The JSON file a store is persisted to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskFile {
    path: PathBuf,
}

impl TaskFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        TaskFile { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the store. A missing file yields an empty store; anything that
    /// is not a well-formed task document is an error.
    pub fn load(&self) -> Result<TaskStore, StoreError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no task file, starting empty");
                return Ok(TaskStore::new());
            }
            Err(e) => {
                return Err(StoreError::ReadError {
                    path: self.path.clone(),
                    source: e,
                });
            }
        };
        let store = parse_store(&text).map_err(|e| StoreError::Malformed {
            path: self.path.clone(),
            source: e,
        })?;
        tracing::debug!(
            path = %self.path.display(),
            categories = store.len(),
            tasks = store.task_count(),
            "loaded task file"
        );
        Ok(store)
    }

    /// Overwrite the file with the whole store.
    pub fn save(&self, store: &TaskStore) -> Result<(), StoreError> {
        let content = serialize_store(store)?;
        atomic_write(&self.path, content.as_bytes()).map_err(|e| StoreError::WriteError {
            path: self.path.clone(),
            source: e,
        })?;
        tracing::debug!(
            path = %self.path.display(),
            categories = store.len(),
            tasks = store.task_count(),
            "saved task file"
        );
        Ok(())
    }
}

/// Serialize a store as the task file document: 4-space indentation,
/// non-ASCII text written as-is, trailing newline.
pub fn serialize_store(store: &TaskStore) -> Result<String, serde_json::Error> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    store.serialize(&mut ser)?;
    buf.push(b'\n');
    // serde_json only ever emits UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Parse a task file document.
pub fn parse_store(text: &str) -> Result<TaskStore, serde_json::Error> {
    serde_json::from_str(text)
}

/// Write to a temp file in the target's directory, then rename over it.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
