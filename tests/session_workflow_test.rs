//! Simulated measurement session: mint filenames through a project, write
//! data files under them, and recover the series for analysis grouping.

use labtag::describe::{LightSource, MeasurementDescription, Wavelength};
use labtag::source::{MockSpectrumSource, SpectrumSource};
use labtag::{FileCounter, FileInfo, Project, Tag};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn raman_description(power_uw: f64) -> MeasurementDescription {
    MeasurementDescription::new("50x", "Raman")
        .with_wavelength(Wavelength::Single(532))
        .with_exposure_ms(10.0)
        .with_roi(1)
        .with_light_source(LightSource::new("LaserOn").with_power_uw(power_uw))
}

fn write_spectrum(path: &Path, x: &[f64], y: &[f64]) {
    let mut body = String::new();
    for (nm, counts) in x.iter().zip(y) {
        body.push_str(&format!("{nm},{counts}\n"));
    }
    fs::write(path, body).unwrap();
}

#[test]
fn session_mints_sequential_tagged_files() {
    let dir = tempdir().unwrap();
    let counter = FileCounter::open(dir.path().join("counts.json")).unwrap();
    let mut project = Project::open("graphene", "2", dir.path().join("data"), counter).unwrap();
    project.root_name = "flake7".to_string();

    let mut source = MockSpectrumSource {
        center_nm: 532.0,
        ..MockSpectrumSource::default()
    };

    let mut written = Vec::new();
    for power in [1.0, 5.0, 10.0] {
        let description = raman_description(power);
        let mut path = project.new_file_name(Some(&description)).unwrap();
        path.set_extension("csv");
        let (x, y) = source.get_spectrum().unwrap();
        write_spectrum(&path, &x, &y);
        written.push(path);
    }

    // Three files, sequentially numbered, all on disk.
    let names: Vec<String> = written
        .iter()
        .map(|path| path.file_name().unwrap().to_str().unwrap().to_string())
        .collect();
    for (i, name) in names.iter().enumerate() {
        assert!(written[i].exists());
        let info = FileInfo::parse(name).unwrap();
        assert_eq!(info.fileno, i as u32 + 1);
        assert_eq!(info.name, "flake7");
        assert_eq!(info.measurement_type, "Raman");
    }

    // The series combines into a range tag for the whole sweep.
    let (combined, filenos) = Tag::combine(&names).unwrap();
    assert_eq!(combined, "[graphene-2-1_3]");
    assert_eq!(filenos, vec![1, 2, 3]);

    // A fresh session against the same store resumes where this one stopped.
    let counter = FileCounter::open(dir.path().join("counts.json")).unwrap();
    let mut resumed = Project::open("graphene", "2", dir.path().join("data"), counter).unwrap();
    assert_eq!(resumed.fileno(), 3);
    assert_eq!(resumed.next_file_number().unwrap(), 4);
}

#[test]
fn notes_accumulate_next_to_the_data() {
    let dir = tempdir().unwrap();
    let counter = FileCounter::open(dir.path().join("counts.json")).unwrap();
    let project = Project::open("graphene", "2", dir.path().join("data"), counter).unwrap();

    project.take_note("cooled to 4K", Some("Setup change")).unwrap();
    project.take_note("first cooldown spectrum looks clean", None).unwrap();

    let text = fs::read_to_string(dir.path().join("data").join("logbook.txt")).unwrap();
    assert!(text.contains("Setup change"));
    assert!(text.contains("cooled to 4K"));
    assert!(text.contains("first cooldown spectrum looks clean"));
}
