//! Export sinks: where finished artifacts land.

use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use terracut_core::{Error, Result};

/// Upper bound on `-N` suffixes tried before giving up.
const MAX_NAME_ATTEMPTS: u32 = 1000;

/// Destination for exported files.
pub trait ExportSink: Send + Sync {
    /// Store `content` under `filename`, returning where it went.
    /// Must never replace an earlier export.
    fn export(&self, filename: &str, content: &[u8]) -> Result<PathBuf>;

    /// Remove a file this sink returned from `export`.
    fn discard(&self, path: &Path) -> Result<()>;
}

/// `<prefix>_<UTC timestamp>.<extension>`, colon-free.
pub fn export_filename(prefix: &str, timestamp: &DateTime<Utc>, extension: &str) -> String {
    format!(
        "{prefix}_{}.{extension}",
        timestamp.format("%Y%m%dT%H%M%S%.3fZ")
    )
}

/// Insert `-n` before the extension.
fn numbered(filename: &str, n: u32) -> String {
    match filename.rsplit_once('.') {
        Some((stem, ext)) => format!("{stem}-{n}.{ext}"),
        None => format!("{filename}-{n}"),
    }
}

/// Fill a freshly created file, removing it again if the write fails.
fn write_new<W: Write>(mut file: W, path: &Path, content: &[u8]) -> Result<()> {
    let written = file.write_all(content).and_then(|()| file.flush());
    drop(file);
    if let Err(e) = written {
        if let Err(cleanup) = std::fs::remove_file(path) {
            warn!(path = %path.display(), error = %cleanup, "Failed to remove partial export");
        }
        return Err(e.into());
    }
    Ok(())
}

/// Writes each export as a new file inside one directory.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ExportSink for DirectorySink {
    fn export(&self, filename: &str, content: &[u8]) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.dir)?;

        for attempt in 0..MAX_NAME_ATTEMPTS {
            let name = if attempt == 0 {
                filename.to_string()
            } else {
                numbered(filename, attempt)
            };
            let path = self.dir.join(&name);
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(file) => {
                    write_new(file, &path, content)?;
                    info!(path = %path.display(), bytes = content.len(), "Export written");
                    return Ok(path);
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(e.into()),
            }
        }

        Err(Error::internal(format!(
            "no free file name for {filename} in {}",
            self.dir.display()
        )))
    }

    fn discard(&self, path: &Path) -> Result<()> {
        std::fs::remove_file(path)?;
        info!(path = %path.display(), "Export removed");
        Ok(())
    }
}

/// Keeps exports in memory. Used by headless runs and tests.
#[derive(Debug, Default)]
pub struct MemorySink {
    files: Mutex<Vec<(String, Vec<u8>)>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything exported so far, in order.
    pub fn files(&self) -> Vec<(String, Vec<u8>)> {
        self.files
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl ExportSink for MemorySink {
    fn export(&self, filename: &str, content: &[u8]) -> Result<PathBuf> {
        let mut files = self.files.lock().map_err(|e| Error::internal(e.to_string()))?;
        let mut name = filename.to_string();
        let mut n = 0;
        while files.iter().any(|(existing, _)| *existing == name) {
            n += 1;
            name = numbered(filename, n);
        }
        files.push((name.clone(), content.to_vec()));
        Ok(PathBuf::from(name))
    }

    fn discard(&self, path: &Path) -> Result<()> {
        let mut files = self.files.lock().map_err(|e| Error::internal(e.to_string()))?;
        files.retain(|(name, _)| Path::new(name) != path);
        Ok(())
    }
}
