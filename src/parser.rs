//! Parsing structured filenames back into measurement records.
//!
//! A stored data file's name carries everything needed to group it for
//! analysis: the identity tag, the item name, and the comma-separated
//! description written by [`FilenameBuilder`](crate::builder::FilenameBuilder).
//! [`FileInfo::parse`] recovers that record. The description follows a fixed
//! positional schema:
//!
//! ```text
//! [TAG] itemName, lens measurement_type, wavelength exposure roi, light[, comment]
//! ```
//!
//! Any violation of the schema is a typed [`LabError::SchemaMismatch`]; the
//! parser never fills defaults for missing fields. The one exception,
//! inherited from the tag codec, is an unparsable fileno segment inside the
//! tag, which becomes 0 with a logged warning.
//!
//! An optional [`NumberQuery`] extracts a named numeric variable (power,
//! angle, temperature, ...) out of the item name or full filename, for
//! sweeps where the swept value is encoded in the name.

use crate::error::{LabError, LabResult};
use crate::tag::{basename, Tag};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;

/// First signed or unsigned decimal inside a pattern match.
#[allow(clippy::expect_used)]
static NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[-+]?(?:\d*\.?\d+)").expect("numeric pattern is valid"));

/// Request to extract one named numeric variable while parsing.
#[derive(Debug, Clone)]
pub struct NumberQuery<'a> {
    /// Regex searched against the item name (or full filename).
    pub pattern: &'a str,
    /// Key the extracted value is stored under in [`FileInfo::numbers`].
    pub variable: &'a str,
    /// Search the full filename instead of just the item name.
    pub search_full_name: bool,
}

impl<'a> NumberQuery<'a> {
    /// Query for `variable` using `pattern` against the item name.
    pub fn new(pattern: &'a str, variable: &'a str) -> Self {
        Self {
            pattern,
            variable,
            search_full_name: false,
        }
    }

    /// Searches the full filename (tag and extension included) instead of
    /// just the item-name field.
    pub fn search_full_name(mut self) -> Self {
        self.search_full_name = true;
        self
    }
}

/// Parsed identity and acquisition parameters of one measurement file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileInfo {
    /// The bracketed tag text, e.g. `[PROJ-1-3]`.
    pub tag: String,
    /// File number decoded from the tag.
    pub fileno: u32,
    /// Free-form item name (sample or scan name).
    pub name: String,
    /// Objective lens.
    pub lens: String,
    /// Measurement type.
    pub measurement_type: String,
    /// Spectrometer center wavelength, as written (e.g. `532nm`).
    pub wavelength: String,
    /// Exposure time, as written (e.g. `10ms`).
    pub exposure_time: String,
    /// Region-of-interest, as written (e.g. `r1`).
    pub roi: String,
    /// Light-source descriptor.
    pub light: String,
    /// Optional trailing free-text comment.
    pub comment: Option<String>,
    /// Numeric variables extracted via [`NumberQuery`], keyed by variable name.
    pub numbers: HashMap<String, f64>,
}

impl FileInfo {
    /// Parses a structured filename or path.
    ///
    /// # Errors
    ///
    /// `TagNotFound` / `MalformedTag` from the tag codec, `SchemaMismatch`
    /// when the description does not follow the positional schema.
    pub fn parse(path: &str) -> LabResult<Self> {
        let fullname = basename(path);
        let tag = Tag::read(fullname)?;
        let fileno = Tag::split(fullname).map_or(0, |(_, _, fileno)| fileno);

        let stem = Path::new(fullname)
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or(fullname);
        let Some((_, rest)) = stem.split_once("] ") else {
            return Err(LabError::SchemaMismatch(format!(
                "missing '] ' separator after tag in '{fullname}'"
            )));
        };

        let parts: Vec<&str> = rest.split(", ").collect();
        if parts.len() < 4 {
            return Err(LabError::SchemaMismatch(format!(
                "expected at least 4 comma-separated parts, found {} in '{fullname}'",
                parts.len()
            )));
        }

        let optics: Vec<&str> = parts[1].split(' ').collect();
        let [lens, measurement_type] = optics[..] else {
            return Err(LabError::SchemaMismatch(format!(
                "expected 'lens measurement_type', found '{}'",
                parts[1]
            )));
        };
        let spectral: Vec<&str> = parts[2].split(' ').collect();
        let [wavelength, exposure_time, roi] = spectral[..] else {
            return Err(LabError::SchemaMismatch(format!(
                "expected 'wavelength exposure_time roi', found '{}'",
                parts[2]
            )));
        };

        Ok(Self {
            tag,
            fileno,
            name: parts[0].to_string(),
            lens: lens.to_string(),
            measurement_type: measurement_type.to_string(),
            wavelength: wavelength.to_string(),
            exposure_time: exposure_time.to_string(),
            roi: roi.to_string(),
            light: parts[3].to_string(),
            comment: parts.get(4).map(|comment| (*comment).to_string()),
            numbers: HashMap::new(),
        })
    }

    /// Parses a structured filename and extracts one numeric variable.
    ///
    /// # Errors
    ///
    /// Everything [`FileInfo::parse`] can return, plus `Pattern` for an
    /// invalid regex, `PatternNotFound` when the search yields no match, and
    /// `NumberNotFound` when the first match contains no decimal number.
    pub fn parse_with(path: &str, query: &NumberQuery<'_>) -> LabResult<Self> {
        let mut info = Self::parse(path)?;
        let re = Regex::new(query.pattern)?;
        let haystack = if query.search_full_name {
            basename(path)
        } else {
            info.name.as_str()
        };
        let matched = re
            .find(haystack)
            .ok_or_else(|| LabError::PatternNotFound(query.pattern.to_string()))?;
        let number = NUMBER_RE
            .find(matched.as_str())
            .ok_or_else(|| LabError::NumberNotFound(matched.as_str().to_string()))?;
        let value: f64 = number
            .as_str()
            .parse()
            .map_err(|_| LabError::NumberNotFound(matched.as_str().to_string()))?;
        info.numbers.insert(query.variable.to_string(), value);
        Ok(info)
    }
}
