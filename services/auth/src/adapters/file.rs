//! services/auth/src/adapters/file.rs
//!
//! A file-backed implementation of the `KeyValueStore` port. The whole key/value
//! map is stored as a single JSON object, so the data survives process restarts
//! the way browser-local storage survives page reloads.

use account_core::ports::{KeyValueStore, PortError, PortResult};
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::check_quota;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// Persists entries to a JSON file at `path`.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    quota_bytes: Option<usize>,
}

impl FileStore {
    /// Creates a store over `path`. The file is created on the first write.
    pub fn new(path: impl Into<PathBuf>, quota_bytes: Option<usize>) -> Self {
        Self {
            path: path.into(),
            quota_bytes,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> PortResult<BTreeMap<String, String>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => {
                return Err(PortError::Unavailable(format!(
                    "reading {}: {}",
                    self.path.display(),
                    e
                )))
            }
        };
        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&raw).map_err(|e| {
            PortError::Unavailable(format!("parsing {}: {}", self.path.display(), e))
        })
    }

    /// Writes the full map to a sibling temp file, then renames it into place.
    fn save(&self, entries: &BTreeMap<String, String>) -> PortResult<()> {
        let json =
            serde_json::to_string(entries).map_err(|e| PortError::Unexpected(e.to_string()))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.write_error(e))?;
        }

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, json).map_err(|e| self.write_error(e))?;
        fs::rename(&tmp, &self.path).map_err(|e| {
            let _ = fs::remove_file(&tmp);
            self.write_error(e)
        })
    }

    fn write_error(&self, e: std::io::Error) -> PortError {
        PortError::Unavailable(format!("writing {}: {}", self.path.display(), e))
    }
}

//=========================================================================================
// `KeyValueStore` Trait Implementation
//=========================================================================================

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> PortResult<Option<String>> {
        Ok(self.load()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> PortResult<()> {
        let mut entries = self.load()?;
        check_quota(&entries, key, value, self.quota_bytes)?;
        entries.insert(key.to_string(), value.to_string());
        self.save(&entries)
    }

    fn remove(&self, key: &str) -> PortResult<()> {
        let mut entries = self.load()?;
        if entries.remove(key).is_none() {
            return Ok(());
        }
        self.save(&entries)
    }
}
