//! Project identity and the measurement-session workflow.
//!
//! A [`Project`] holds the (name, device) identity a measurement session is
//! acquiring under, the current file number resolved from an injected
//! [`FileCounter`], and the output folder layout. It is the sole owner of
//! its fileno: the number only changes through [`Project::set_fileno`],
//! [`Project::next_file_number`] or [`Project::adopt_tag`], each of which
//! goes through the counter so the value survives the process.
//!
//! Reading the current tag never mutates anything; minting a new file
//! number is an explicit, separate call.

use crate::builder::FilenameBuilder;
use crate::counter::FileCounter;
use crate::describe::MeasurementDescription;
use crate::error::LabResult;
use crate::notes::{Logbook, Note};
use crate::tag::Tag;
use std::fs;
use std::path::{Path, PathBuf};

/// Identity and file-number state of one measurement series.
#[derive(Debug)]
pub struct Project {
    name: String,
    device: String,
    fileno: u32,
    /// Base item name used when composing new filenames.
    pub root_name: String,
    folder: PathBuf,
    subfolder: String,
    counter: FileCounter,
}

impl Project {
    /// Opens a project, resolving the current file number from the counter.
    ///
    /// A pair the counter has never seen starts at 0, with a warning so an
    /// operator resuming an existing device series notices. The output
    /// folder is created if missing.
    pub fn open(
        name: impl Into<String>,
        device: impl Into<String>,
        folder: impl Into<PathBuf>,
        counter: FileCounter,
    ) -> LabResult<Self> {
        let name = name.into();
        let device = device.into();
        if name.contains('-') {
            log::warn!("project name '{name}' contains '-', its tags will not decode");
        }
        let fileno = match counter.get(&name, &device) {
            Some(value) => value,
            None => {
                log::warn!(
                    "fileno for '{name}-{device}' starting from zero; if files already \
                     exist for this device, set the correct file number"
                );
                0
            }
        };
        let folder = folder.into();
        if !folder.exists() {
            fs::create_dir_all(&folder)?;
        }
        Ok(Self {
            name,
            device,
            fileno,
            root_name: String::new(),
            folder,
            subfolder: String::new(),
            counter,
        })
    }

    /// Opens a project with an explicit file number, persisting it to the
    /// counter immediately.
    pub fn open_with_fileno(
        name: impl Into<String>,
        device: impl Into<String>,
        fileno: u32,
        folder: impl Into<PathBuf>,
        counter: FileCounter,
    ) -> LabResult<Self> {
        let mut project = Self::open(name, device, folder, counter)?;
        project.set_fileno(fileno)?;
        Ok(project)
    }

    /// Project shorthand name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Device-under-test identifier.
    pub fn device(&self) -> &str {
        &self.device
    }

    /// Current file number. Reading never mutates.
    pub fn fileno(&self) -> u32 {
        self.fileno
    }

    /// Overwrites the file number, persisting through the counter.
    pub fn set_fileno(&mut self, value: u32) -> LabResult<()> {
        self.counter.set(&self.name, &self.device, value)?;
        self.fileno = value;
        Ok(())
    }

    /// Master output folder.
    pub fn folder(&self) -> &Path {
        &self.folder
    }

    /// Sets the subfolder new files go into, creating it if missing.
    pub fn set_subfolder(&mut self, subfolder: impl Into<String>) -> LabResult<()> {
        let subfolder = subfolder.into();
        let full = self.folder.join(&subfolder);
        if !full.exists() {
            fs::create_dir_all(&full)?;
        }
        self.subfolder = subfolder;
        Ok(())
    }

    /// Tag for the current file number. No side effects on read.
    pub fn current_tag(&self) -> Tag {
        Tag::new(self.name.clone(), self.device.clone(), self.fileno)
    }

    /// Mints the next file number through the counter and returns it.
    pub fn next_file_number(&mut self) -> LabResult<u32> {
        self.fileno = self.counter.increment(&self.name, &self.device)?;
        Ok(self.fileno)
    }

    /// Adopts identity from an existing tagged filename.
    ///
    /// Returns `false` (and leaves the project untouched) when the filename
    /// carries no well-formed tag, matching the codec's soft-failure
    /// convention. The adopted file number is persisted.
    pub fn adopt_tag(&mut self, path: &str) -> LabResult<bool> {
        let Some((name, device, fileno)) = Tag::split(path) else {
            return Ok(false);
        };
        self.name = name;
        self.device = device;
        self.set_fileno(fileno)?;
        Ok(true)
    }

    /// Composes the full path for a freshly acquired file: mints the next
    /// file number and decorates `root_name` with the new tag and the given
    /// description.
    pub fn new_file_name(
        &mut self,
        description: Option<&MeasurementDescription>,
    ) -> LabResult<PathBuf> {
        self.next_file_number()?;
        let mut builder =
            FilenameBuilder::new(self.root_name.clone()).prefix_tag(self.current_tag().to_string());
        if let Some(description) = description {
            builder = builder.description(description);
        }
        Ok(self.folder.join(&self.subfolder).join(builder.build()))
    }

    /// Appends a note to the project folder's logbook, stamped with the
    /// current tag.
    pub fn take_note(&self, note: impl Into<Note>, category: Option<&str>) -> LabResult<()> {
        Logbook::in_folder(&self.folder).append(&self.current_tag().to_string(), &note.into(), category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::describe::{LightSource, Wavelength};
    use crate::parser::FileInfo;
    use tempfile::tempdir;

    fn counter_in(dir: &Path) -> FileCounter {
        FileCounter::open(dir.join("counts.json")).unwrap()
    }

    #[test]
    fn fresh_project_starts_at_zero() {
        let dir = tempdir().unwrap();
        let project = Project::open("P", "1", dir.path().join("data"), counter_in(dir.path()))
            .unwrap();
        assert_eq!(project.fileno(), 0);
        assert_eq!(project.current_tag().to_string(), "[P-1-0]");
        assert!(dir.path().join("data").exists());
    }

    #[test]
    fn explicit_fileno_is_persisted() {
        let dir = tempdir().unwrap();
        {
            let _project = Project::open_with_fileno(
                "P",
                "1",
                12,
                dir.path().join("data"),
                counter_in(dir.path()),
            )
            .unwrap();
        }
        let reopened =
            Project::open("P", "1", dir.path().join("data"), counter_in(dir.path())).unwrap();
        assert_eq!(reopened.fileno(), 12);
    }

    #[test]
    fn next_file_number_advances_tag() {
        let dir = tempdir().unwrap();
        let mut project =
            Project::open("P", "1", dir.path().join("data"), counter_in(dir.path())).unwrap();
        assert_eq!(project.next_file_number().unwrap(), 1);
        assert_eq!(project.next_file_number().unwrap(), 2);
        assert_eq!(project.current_tag().to_string(), "[P-1-2]");
    }

    #[test]
    fn adopt_tag_takes_identity_from_filename() {
        let dir = tempdir().unwrap();
        let mut project =
            Project::open("P", "1", dir.path().join("data"), counter_in(dir.path())).unwrap();
        assert!(project
            .adopt_tag("[MoS2-3-41] flake7, 50x PL, 700nm 200ms r2, SuperK.spe")
            .unwrap());
        assert_eq!(project.name(), "MoS2");
        assert_eq!(project.device(), "3");
        assert_eq!(project.fileno(), 41);
    }

    #[test]
    fn adopt_tag_is_soft_on_untagged_filename() {
        let dir = tempdir().unwrap();
        let mut project =
            Project::open("P", "1", dir.path().join("data"), counter_in(dir.path())).unwrap();
        assert!(!project.adopt_tag("plain_scan.csv").unwrap());
        assert_eq!(project.name(), "P");
        assert_eq!(project.fileno(), 0);
    }

    #[test]
    fn new_file_name_parses_back() {
        let dir = tempdir().unwrap();
        let mut project =
            Project::open("PROJ", "1", dir.path().join("data"), counter_in(dir.path())).unwrap();
        project.root_name = "sampleA".to_string();
        project.set_subfolder("raman").unwrap();

        let description = MeasurementDescription::new("50x", "Raman")
            .with_wavelength(Wavelength::Single(532))
            .with_exposure_ms(10.0)
            .with_roi(1)
            .with_light_source(LightSource::new("LaserOn"));
        let path = project.new_file_name(Some(&description)).unwrap();

        assert!(path.starts_with(dir.path().join("data").join("raman")));
        let info = FileInfo::parse(path.to_str().unwrap()).unwrap();
        assert_eq!(info.tag, "[PROJ-1-1]");
        assert_eq!(info.name, "sampleA");
        assert_eq!(info.lens, "50x");
        assert_eq!(info.light, "LaserOn");
    }

    #[test]
    fn take_note_appends_to_logbook() {
        let dir = tempdir().unwrap();
        let project =
            Project::open("P", "1", dir.path().join("data"), counter_in(dir.path())).unwrap();
        project.take_note("aligned the pinhole", None).unwrap();
        let text =
            std::fs::read_to_string(dir.path().join("data").join("logbook.txt")).unwrap();
        assert!(text.contains("[P-1-0]"));
        assert!(text.contains("aligned the pinhole"));
    }
}
