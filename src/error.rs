//! Custom error types for the crate.
//!
//! This module defines the primary error type, `LabError`, used across the
//! filename-convention core. Using the `thiserror` crate, it provides a
//! centralized and consistent way to surface the structural failures the
//! codec and parser can hit, alongside the I/O and serialization errors of
//! the persisted counter store.
//!
//! Two operations deliberately do NOT use these errors: `Tag::split` and
//! `Tag::combine` degrade to `None` on failure, and `FileCounter::get`
//! returns `None` for an uninitialized key. Callers test for `None` rather
//! than matching error variants; that soft-failure convention is part of the
//! contract and is kept as-is.

use thiserror::Error;

/// Convenience alias for results using the crate error type.
pub type LabResult<T> = std::result::Result<T, LabError>;

/// Errors produced by the filename codec, parser, and counter store.
#[derive(Error, Debug)]
pub enum LabError {
    /// The filename does not start with `[` or has no closing `]`.
    #[error("No file tag found in '{0}'")]
    TagNotFound(String),

    /// The bracketed body does not contain exactly two internal hyphens.
    #[error("Incorrect file tag format in '{0}'")]
    MalformedTag(String),

    /// A positional field of the description did not have the expected shape.
    #[error("Filename does not follow the naming convention: {0}")]
    SchemaMismatch(String),

    /// A caller-supplied search pattern matched nothing.
    #[error("Pattern '{0}' not found in filename")]
    PatternNotFound(String),

    /// A pattern match contained no numeric substring.
    #[error("No numeric value found in match '{0}'")]
    NumberNotFound(String),

    /// A caller-supplied search pattern failed to compile.
    #[error("Invalid search pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// Settings file parsing or lookup failed.
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// File or directory I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The counter store file could not be serialized or deserialized.
    #[error("Counter store error: {0}")]
    Store(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_tag_not_found_with_filename() {
        let err = LabError::TagNotFound("spectrum.csv".into());
        assert_eq!(err.to_string(), "No file tag found in 'spectrum.csv'");
    }

    #[test]
    fn converts_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: LabError = io.into();
        assert!(matches!(err, LabError::Io(_)));
    }
}
