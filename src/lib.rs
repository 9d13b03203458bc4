//! # labtag
//!
//! Filename conventions for laboratory measurement files: a bidirectional
//! codec between filenames and measurement metadata, plus the persisted
//! file-number bookkeeping that keeps those filenames unique.
//!
//! Every data file is named
//!
//! ```text
//! [NAME-DEVICE-FILENO] itemName, lens type, wavelength exposure roi, light[, comment].ext
//! ```
//!
//! A session asks its [`project::Project`] for a new filename (minting the
//! next file number through the persisted [`counter::FileCounter`]); the
//! instrument driver writes the data file under that name; analysis code
//! later runs [`parser::FileInfo::parse`] on stored filenames to recover
//! project identity and acquisition parameters for grouping and plotting.
//!
//! ## Crate Structure
//!
//! - **`tag`**: the bracketed `[name-device-fileno]` tag codec — encode,
//!   read/validate, soft-failure split, and range combination.
//! - **`parser`**: the structured-filename parser producing a flat
//!   [`parser::FileInfo`] record, with optional named numeric extraction.
//! - **`counter`**: the JSON-backed, per-(name, device) file-number store.
//! - **`builder`**: composes new filenames from tag + description (the
//!   inverse of `parser`).
//! - **`describe`**: `MeasurementDescription` and `LightSource` value
//!   objects rendering the description suffix.
//! - **`project`**: ties identity, counter, folder layout, and logbook into
//!   the session-facing workflow object.
//! - **`notes`**: the append-only per-folder logbook.
//! - **`source`**: the `SpectrumSource` capability trait instrument drivers
//!   implement, with a mock for tests.
//! - **`config`**: settings loading (store path, data folder, log level).
//! - **`error`**: the central `LabError` type.

pub mod builder;
pub mod config;
pub mod counter;
pub mod describe;
pub mod error;
pub mod notes;
pub mod parser;
pub mod project;
pub mod source;
pub mod tag;

pub use builder::FilenameBuilder;
pub use counter::FileCounter;
pub use describe::{LightSource, MeasurementDescription, Wavelength};
pub use error::{LabError, LabResult};
pub use notes::{Logbook, Note};
pub use parser::{FileInfo, NumberQuery};
pub use project::Project;
pub use tag::Tag;
