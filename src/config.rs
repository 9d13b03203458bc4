//! Configuration management.
//!
//! Settings come from an optional `labtag.toml` (working directory or an
//! explicit path) with `LABTAG_*` environment variables layered on top.
//! Everything has a sensible default, so no configuration file is required.

use crate::counter::FileCounter;
use crate::error::LabResult;
use config::Config;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Tool settings.
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    /// Log level filter, e.g. `info` or `debug`.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Master folder new data files are placed under. Defaults to the
    /// working directory.
    pub data_folder: Option<PathBuf>,
    /// Location of the file-number counter store. Defaults to the per-user
    /// store under Documents.
    pub counter_store: Option<PathBuf>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            data_folder: None,
            counter_store: None,
        }
    }
}

impl Settings {
    /// Loads settings from `path`, or from `labtag.toml` in the working
    /// directory if present, then applies `LABTAG_*` environment overrides.
    pub fn load(path: Option<&Path>) -> LabResult<Self> {
        let builder = match path {
            Some(path) => Config::builder().add_source(config::File::from(path)),
            None => {
                Config::builder().add_source(config::File::with_name("labtag").required(false))
            }
        };
        let settings = builder
            .add_source(config::Environment::with_prefix("LABTAG"))
            .build()?;
        Ok(settings.try_deserialize()?)
    }

    /// Counter store location, falling back to the per-user default.
    pub fn counter_store_path(&self) -> PathBuf {
        self.counter_store
            .clone()
            .unwrap_or_else(FileCounter::default_store_path)
    }

    /// Data folder, falling back to the working directory.
    pub fn data_folder_path(&self) -> PathBuf {
        self.data_folder
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn loads_from_explicit_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("labtag.toml");
        fs::write(
            &path,
            "log_level = \"debug\"\ndata_folder = \"/data/raman\"\n",
        )
        .unwrap();
        let settings = Settings::load(Some(&path)).unwrap();
        assert_eq!(settings.log_level, "debug");
        assert_eq!(settings.data_folder_path(), PathBuf::from("/data/raman"));
    }

    #[test]
    fn defaults_apply_without_file() {
        let settings = Settings::default();
        assert_eq!(settings.data_folder_path(), PathBuf::from("."));
        assert_eq!(
            settings.counter_store_path(),
            FileCounter::default_store_path()
        );
    }
}
