//! Persisted file-number bookkeeping.
//!
//! Each (project name, device) pair owns a monotonically assigned file
//! number. The last-used number for every pair is kept in a small JSON
//! store, keyed by `"{name}-{device}"`:
//!
//! ```json
//! { "graphene-1": 41, "MoS2-3": 7 }
//! ```
//!
//! The store path is injected at construction rather than hard-coded, so
//! tests and multi-setup machines can keep independent stores;
//! [`FileCounter::default_store_path`] resolves the conventional location
//! under the user's Documents directory.
//!
//! Every mutation rewrites the whole file. Crash consistency is whole-write
//! only, and concurrent processes sharing one store are not mutually
//! excluded; this tool assumes a single operator and a single session per
//! store.

use crate::error::LabResult;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// File-backed mapping from `"{name}-{device}"` to the last-used file number.
#[derive(Debug)]
pub struct FileCounter {
    path: PathBuf,
    entries: BTreeMap<String, u32>,
}

impl FileCounter {
    /// Opens the counter store at `path`, creating an empty store (and any
    /// missing parent directories) on first use.
    pub fn open(path: impl Into<PathBuf>) -> LabResult<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        let entries = if path.exists() {
            serde_json::from_str(&fs::read_to_string(&path)?)?
        } else {
            let empty = BTreeMap::new();
            fs::write(&path, serde_json::to_string(&empty)?)?;
            empty
        };
        Ok(Self { path, entries })
    }

    /// Opens the counter store at its conventional per-user location.
    pub fn open_default() -> LabResult<Self> {
        Self::open(Self::default_store_path())
    }

    /// Conventional store location: `Documents/labtag/project_counts.json`
    /// under the user's home, falling back to the current directory when no
    /// home directory can be resolved.
    pub fn default_store_path() -> PathBuf {
        dirs::document_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
            .join("labtag")
            .join("project_counts.json")
    }

    /// Path of the backing store file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn key(name: &str, device: &str) -> String {
        format!("{name}-{device}")
    }

    /// Last-used file number for the pair, or `None` if the pair has never
    /// been assigned one. Callers treating `None` as a fresh start should
    /// begin from 0.
    pub fn get(&self, name: &str, device: &str) -> Option<u32> {
        self.entries.get(&Self::key(name, device)).copied()
    }

    /// Upserts the file number for the pair and persists the store.
    pub fn set(&mut self, name: &str, device: &str, value: u32) -> LabResult<()> {
        self.entries.insert(Self::key(name, device), value);
        self.save()
    }

    /// Mints the next file number for the pair: current value plus one,
    /// persisted before returning. An absent pair starts from 0, with a
    /// warning so an operator resuming an existing device series notices.
    pub fn increment(&mut self, name: &str, device: &str) -> LabResult<u32> {
        let current = match self.get(name, device) {
            Some(value) => value,
            None => {
                log::warn!(
                    "fileno for '{}' starting from zero; if files already exist \
                     for this device, set the correct file number first",
                    Self::key(name, device)
                );
                0
            }
        };
        let next = current + 1;
        self.set(name, device, next)?;
        Ok(next)
    }

    fn save(&self) -> LabResult<()> {
        fs::write(&self.path, serde_json::to_string_pretty(&self.entries)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn creates_empty_store_on_first_use() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("counts.json");
        let counter = FileCounter::open(&path).unwrap();
        assert!(path.exists());
        assert_eq!(counter.get("P", "1"), None);
        assert_eq!(fs::read_to_string(&path).unwrap(), "{}");
    }

    #[test]
    fn increment_starts_from_one_for_absent_key() {
        let dir = tempdir().unwrap();
        let mut counter = FileCounter::open(dir.path().join("counts.json")).unwrap();
        assert_eq!(counter.increment("P", "1").unwrap(), 1);
        assert_eq!(counter.increment("P", "1").unwrap(), 2);
        assert_eq!(counter.increment("P", "1").unwrap(), 3);
    }

    #[test]
    fn pairs_are_independent() {
        let dir = tempdir().unwrap();
        let mut counter = FileCounter::open(dir.path().join("counts.json")).unwrap();
        counter.set("P", "1", 10).unwrap();
        assert_eq!(counter.increment("P", "2").unwrap(), 1);
        assert_eq!(counter.get("P", "1"), Some(10));
    }

    #[test]
    fn values_persist_across_instances() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("counts.json");
        {
            let mut counter = FileCounter::open(&path).unwrap();
            counter.set("P", "1", 5).unwrap();
        }
        let reopened = FileCounter::open(&path).unwrap();
        assert_eq!(reopened.get("P", "1"), Some(5));
    }

    #[test]
    fn store_is_plain_json_object() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("counts.json");
        let mut counter = FileCounter::open(&path).unwrap();
        counter.set("graphene", "2", 41).unwrap();
        let raw: BTreeMap<String, u32> =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw.get("graphene-2"), Some(&41));
    }
}
