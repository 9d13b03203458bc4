//! Append-only logbook for measurement notes.
//!
//! Each working folder carries one `logbook.txt`. A note records when it was
//! taken and the current file tag, so its context can be reconstructed
//! later, plus either a free-text line or a set of key/value fields:
//!
//! ```text
//! 2026-08-29 14:02:11	[PROJ-1-4]	Setup change
//! 	note	:	swapped 50x objective
//! ```
//!
//! The file is only ever appended to, never truncated.

use crate::error::LabResult;
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::fs::OpenOptions;
use std::io::Write as _;
use std::path::{Path, PathBuf};

/// Name of the logbook file inside a project folder.
pub const LOGBOOK_FILENAME: &str = "logbook.txt";

/// A note entry: free text or key/value fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Note {
    /// Free text, recorded under the key `note`.
    Text(String),
    /// Named fields, one line per key.
    Fields(BTreeMap<String, String>),
}

impl From<&str> for Note {
    fn from(text: &str) -> Self {
        Note::Text(text.to_string())
    }
}

impl From<BTreeMap<String, String>> for Note {
    fn from(fields: BTreeMap<String, String>) -> Self {
        Note::Fields(fields)
    }
}

/// Append-only notes file in a project folder.
#[derive(Debug, Clone)]
pub struct Logbook {
    path: PathBuf,
}

impl Logbook {
    /// The logbook of the given folder.
    pub fn in_folder(folder: impl AsRef<Path>) -> Self {
        Self {
            path: folder.as_ref().join(LOGBOOK_FILENAME),
        }
    }

    /// Path of the logbook file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one record: timestamp, current tag, optional category, then
    /// one indented `key : value` line per note field.
    pub fn append(&self, tag: &str, note: &Note, category: Option<&str>) -> LabResult<()> {
        let mut record = String::new();
        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
        let _ = write!(record, "\n{timestamp}\t{tag}");
        if let Some(category) = category {
            let _ = write!(record, "\t{category}");
        }
        match note {
            Note::Text(text) => {
                let _ = write!(record, "\n\tnote\t:\t{text}");
            }
            Note::Fields(fields) => {
                for (key, value) in fields {
                    let _ = write!(record, "\n\t{key}\t:\t{value}");
                }
            }
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(record.as_bytes())?;
        Ok(())
    }
}
