//! Durable byte sinks and sources
//!
//! A [`ByteStore`] holds one blob: write it, later read it back. Handles are
//! opened and released inside each call, whether the call succeeds or not.

use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use surrogate_core::{Error, Result};
use tracing::{debug, warn};

/// Somewhere a single byte blob can be written and read back.
pub trait ByteStore: Send + Sync {
    /// Replace the stored blob with `bytes`.
    fn write_bytes(&self, bytes: &[u8]) -> Result<()>;

    /// Read the stored blob.
    fn read_bytes(&self) -> Result<Vec<u8>>;

    /// Human-readable location, used in logs and errors.
    fn location(&self) -> String;
}

/// A blob stored in one file.
///
/// Writes go to a sibling temp file which is synced and then renamed over
/// the target, so readers never observe a half-written blob.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Store bytes at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Target file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn write_temp(&self, temp_path: &Path, bytes: &[u8]) -> Result<()> {
        let location = temp_path.display().to_string();
        let mut file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(temp_path)
            .map_err(|e| Error::resource("open", location.clone(), e))?;
        file.write_all(bytes)
            .map_err(|e| Error::resource("write", location.clone(), e))?;
        file.sync_all()
            .map_err(|e| Error::resource("sync", location, e))
    }
}

impl ByteStore for FileStore {
    fn write_bytes(&self, bytes: &[u8]) -> Result<()> {
        let temp_path = self.temp_path();

        if let Err(e) = self.write_temp(&temp_path, bytes) {
            warn!(
                target: "surrogate::store",
                temp_path = %temp_path.display(),
                error = %e,
                "Write failed, cleaning up temp file"
            );
            let _ = std::fs::remove_file(&temp_path);
            return Err(e);
        }

        if let Err(e) = std::fs::rename(&temp_path, &self.path) {
            let _ = std::fs::remove_file(&temp_path);
            return Err(Error::resource("rename", self.location(), e));
        }

        debug!(
            target: "surrogate::store",
            path = %self.path.display(),
            bytes = bytes.len(),
            "Wrote blob"
        );
        Ok(())
    }

    fn read_bytes(&self) -> Result<Vec<u8>> {
        let mut file =
            File::open(&self.path).map_err(|e| Error::resource("open", self.location(), e))?;
        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)
            .map_err(|e| Error::resource("read", self.location(), e))?;

        debug!(
            target: "surrogate::store",
            path = %self.path.display(),
            bytes = bytes.len(),
            "Read blob"
        );
        Ok(bytes)
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

/// An in-memory blob, for tests and ephemeral round trips.
#[derive(Debug, Default)]
pub struct MemoryStore {
    bytes: Mutex<Option<Vec<u8>>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

impl ByteStore for MemoryStore {
    fn write_bytes(&self, bytes: &[u8]) -> Result<()> {
        *self.bytes.lock() = Some(bytes.to_vec());
        Ok(())
    }

    fn read_bytes(&self) -> Result<Vec<u8>> {
        self.bytes.lock().clone().ok_or_else(|| {
            Error::resource(
                "read",
                self.location(),
                std::io::Error::new(std::io::ErrorKind::NotFound, "nothing written yet"),
            )
        })
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}
