use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::Utc;
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use super::{AccountStore, StoreError};
use crate::account::Accounts;

/// Account document stored as pretty-printed JSON on the local filesystem.
///
/// - A missing file is created empty on first load.
/// - Empty or whitespace-only content loads as an empty mapping.
/// - Malformed content is copied to `<file>.corrupt-<UTC timestamp>`, then
///   reset to `{}`. Earlier copies are never overwritten.
/// - Saves go through a temp file in the same directory and a rename, so a
///   crash mid-write never leaves a truncated document behind.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn directory(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    fn corrupt_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".corrupt-");
        name.push(Utc::now().format("%Y%m%dT%H%M%S%.9fZ").to_string());
        PathBuf::from(name)
    }

    /// Keep a copy of unreadable content before it is overwritten.
    fn quarantine(&self, raw: &[u8]) {
        let target = self.corrupt_path();
        match fs::write(&target, raw) {
            Ok(()) => warn!(backup = %target.display(), "corrupted account store preserved"),
            Err(e) => warn!(path = %target.display(), error = %e, "could not preserve corrupted account store"),
        }
    }

    fn reset(&self) -> Result<Accounts, StoreError> {
        let accounts = Accounts::new();
        self.save(&accounts)?;
        Ok(accounts)
    }
}

impl AccountStore for JsonFileStore {
    fn load(&self) -> Result<Accounts, StoreError> {
        let raw = match fs::read(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(path = %self.path.display(), "account store missing, creating empty document");
                return self.reset();
            }
            Err(e) => return Err(StoreError::io(&self.path, e)),
        };

        if raw.iter().all(u8::is_ascii_whitespace) {
            return Ok(Accounts::new());
        }

        match serde_json::from_slice::<Accounts>(&raw) {
            Ok(accounts) => Ok(accounts),
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "account store corrupted, resetting to empty"
                );
                self.quarantine(&raw);
                self.reset()
            }
        }
    }

    fn save(&self, accounts: &Accounts) -> Result<(), StoreError> {
        let dir = self.directory();
        fs::create_dir_all(dir).map_err(|e| StoreError::io(dir, e))?;

        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| StoreError::io(dir, e))?;
        serde_json::to_writer_pretty(&mut tmp, accounts)?;
        tmp.write_all(b"\n")
            .and_then(|_| tmp.as_file().sync_all())
            .map_err(|e| StoreError::io(tmp.path(), e))?;
        tmp.persist(&self.path)
            .map_err(|e| StoreError::io(&self.path, e.error))?;

        debug!(path = %self.path.display(), accounts = accounts.len(), "account store saved");
        Ok(())
    }
}
