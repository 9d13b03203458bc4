//! The bracketed file tag and its codec.
//!
//! Every data file produced by a measurement session carries a compact
//! identity tag at the start of its filename:
//!
//! ```text
//! [NAME-DEVICE-FILENO]
//! ```
//!
//! where `NAME` is the project shorthand (must not contain `-`), `DEVICE`
//! identifies the device under test, and `FILENO` is the per-device file
//! number minted by the [`FileCounter`](crate::counter::FileCounter).
//!
//! `Tag::read` validates and extracts the bracketed text, `Tag::split`
//! decodes it with the soft-failure convention (`None` instead of an error),
//! and `Tag::combine` builds a range tag covering several files of the same
//! series. Encoding is `Tag::format` or the `Display` impl.

use crate::error::{LabError, LabResult};
use std::fmt;
use std::path::Path;

/// Identity tag embedded in a measurement filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    /// Project shorthand. Must not contain `-`.
    pub name: String,
    /// Device-under-test identifier. Commonly numeric, stored as text.
    pub device: String,
    /// File number within the (name, device) series.
    pub fileno: u32,
}

impl Tag {
    /// Creates a tag from its three fields.
    pub fn new(name: impl Into<String>, device: impl Into<String>, fileno: u32) -> Self {
        Self {
            name: name.into(),
            device: device.into(),
            fileno,
        }
    }

    /// Renders a tag string without constructing a `Tag`.
    ///
    /// No escaping is performed; callers must keep `-` out of `name` and
    /// `device` or the result will not decode back to the same fields.
    pub fn format(name: &str, device: &str, fileno: u32) -> String {
        format!("[{name}-{device}-{fileno}]")
    }

    /// Extracts the bracketed tag text from a file path or bare filename.
    ///
    /// Succeeds only if the basename starts with `[`, a `]` follows, and the
    /// bracketed body splits on `-` into exactly three parts. Returns the tag
    /// including its brackets, e.g. `"[PROJ-1-3]"`.
    ///
    /// # Errors
    ///
    /// `TagNotFound` if the brackets are missing, `MalformedTag` if the body
    /// has the wrong number of hyphen-delimited parts.
    pub fn read(path: &str) -> LabResult<String> {
        let filename = basename(path);
        if !filename.starts_with('[') {
            return Err(LabError::TagNotFound(filename.to_string()));
        }
        let Some(end) = filename.find(']') else {
            return Err(LabError::TagNotFound(filename.to_string()));
        };
        let body = &filename[1..end];
        if body.split('-').count() != 3 || body.contains(',') {
            return Err(LabError::MalformedTag(filename.to_string()));
        }
        Ok(format!("[{body}]"))
    }

    /// Decodes the tag of a file path into its `(name, device, fileno)` parts.
    ///
    /// Soft failure: returns `None` when no well-formed tag is present, never
    /// an error. Callers depend on testing for `None`. An unparsable fileno
    /// segment degrades to `0` with a logged warning; this matches the legacy
    /// behavior of the convention and also covers range tags like
    /// `[P-1-3_7]`, whose fileno segment is not a plain integer.
    pub fn split(path: &str) -> Option<(String, String, u32)> {
        let tag = Self::read(path).ok()?;
        let body = &tag[1..tag.len() - 1];
        let mut parts = body.splitn(3, '-');
        let name = parts.next()?;
        let device = parts.next()?;
        let raw = parts.next()?;
        let fileno = match raw.parse() {
            Ok(n) => n,
            Err(_) => {
                log::warn!("cannot determine fileno from '{raw}', set to 0");
                0
            }
        };
        Some((name.to_string(), device.to_string(), fileno))
    }

    /// Builds a range tag covering several files of one series.
    ///
    /// Reads the tag of every path; if any fails, the whole operation yields
    /// `None`. Otherwise returns `[name-device-MIN_MAX]` over the file
    /// numbers, plus the fileno of each input in input order. Name and device
    /// are taken from the last path; inputs are assumed to belong to the same
    /// series and homogeneity is not checked.
    pub fn combine<S: AsRef<str>>(paths: &[S]) -> Option<(String, Vec<u32>)> {
        let mut filenos = Vec::with_capacity(paths.len());
        let mut series: Option<(String, String)> = None;
        for path in paths {
            let (name, device, fileno) = Self::split(path.as_ref())?;
            series = Some((name, device));
            filenos.push(fileno);
        }
        let (name, device) = series?;
        let lo = *filenos.iter().min()?;
        let hi = *filenos.iter().max()?;
        Some((format!("[{name}-{device}-{lo}_{hi}]"), filenos))
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}-{}-{}]", self.name, self.device, self.fileno)
    }
}

/// Returns the filename component of a path, or the whole string if it has
/// no filename component.
pub(crate) fn basename(path: &str) -> &str {
    Path::new(path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(path)
}
