//! CLI entry point for labtag.
//!
//! Thin command-line surface over the library:
//! - mint the next structured filename for a measurement
//! - parse an existing filename back into its metadata record
//! - inspect or correct the file-number counter
//! - append a note to a project folder's logbook
//!
//! # Usage
//!
//! ```bash
//! labtag new-name -p graphene -d 1 -b flake7 --lens 50x --kind Raman \
//!     --wavelength 532 --exposure-ms 10 --roi 1 --light LaserOn
//! labtag info "[graphene-1-4] flake7, 50x Raman, 532nm 10ms r1, LaserOn.spe" --json
//! labtag counter next -p graphene -d 1
//! labtag note -p graphene -d 1 "swapped objective" --category "Setup change"
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use labtag::config::Settings;
use labtag::describe::{LightSource, MeasurementDescription, Wavelength};
use labtag::parser::{FileInfo, NumberQuery};
use labtag::{FileCounter, Project};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "labtag")]
#[command(about = "Filename tagging and bookkeeping for measurement files", long_about = None)]
struct Cli {
    /// Optional settings file (default: labtag.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Mint the next file number and print the new filename
    NewName {
        /// Project shorthand (must not contain '-')
        #[arg(short, long)]
        project: String,
        /// Device-under-test identifier
        #[arg(short, long)]
        device: String,
        /// Base item name (sample or scan name)
        #[arg(short, long)]
        base: String,
        /// Subfolder under the data folder
        #[arg(long)]
        subfolder: Option<String>,
        /// Objective lens, e.g. 50x
        #[arg(long)]
        lens: Option<String>,
        /// Measurement type, e.g. Raman
        #[arg(long)]
        kind: Option<String>,
        /// Center wavelength in nm
        #[arg(long)]
        wavelength: Option<u32>,
        /// Exposure time in ms
        #[arg(long)]
        exposure_ms: Option<f64>,
        /// Region-of-interest index
        #[arg(long)]
        roi: Option<u32>,
        /// Light-source descriptor
        #[arg(long)]
        light: Option<String>,
        /// Free-text comment
        #[arg(long)]
        comment: Option<String>,
    },

    /// Parse a structured filename and print its metadata
    Info {
        /// Filename or path to parse
        path: String,
        /// Regex to extract a numeric variable from the item name
        #[arg(long)]
        pattern: Option<String>,
        /// Name the extracted variable is reported under
        #[arg(long, default_value = "Number")]
        variable: String,
        /// Search the full filename instead of the item name
        #[arg(long)]
        full_name: bool,
        /// Print the record as JSON
        #[arg(long)]
        json: bool,
    },

    /// Inspect or correct the file-number counter
    Counter {
        #[command(subcommand)]
        action: CounterAction,
    },

    /// Append a note to the project folder's logbook
    Note {
        /// Project shorthand
        #[arg(short, long)]
        project: String,
        /// Device-under-test identifier
        #[arg(short, long)]
        device: String,
        /// Note text
        text: String,
        /// Note category, e.g. "Setup change"
        #[arg(long)]
        category: Option<String>,
    },
}

#[derive(Subcommand)]
enum CounterAction {
    /// Print the last-used file number for a (project, device) pair
    Get {
        #[arg(short, long)]
        project: String,
        #[arg(short, long)]
        device: String,
    },
    /// Overwrite the file number for a (project, device) pair
    Set {
        #[arg(short, long)]
        project: String,
        #[arg(short, long)]
        device: String,
        value: u32,
    },
    /// Mint and print the next file number
    Next {
        #[arg(short, long)]
        project: String,
        #[arg(short, long)]
        device: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = Settings::load(cli.config.as_deref())?;
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(&settings.log_level),
    )
    .init();

    match cli.command {
        Commands::NewName {
            project,
            device,
            base,
            subfolder,
            lens,
            kind,
            wavelength,
            exposure_ms,
            roi,
            light,
            comment,
        } => {
            let counter = FileCounter::open(settings.counter_store_path())?;
            let mut proj = Project::open(project, device, settings.data_folder_path(), counter)?;
            proj.root_name = base;
            if let Some(subfolder) = subfolder {
                proj.set_subfolder(subfolder)?;
            }
            let description = match (lens, kind) {
                (Some(lens), Some(kind)) => {
                    let mut description = MeasurementDescription::new(lens, kind);
                    if let Some(nm) = wavelength {
                        description = description.with_wavelength(Wavelength::Single(nm));
                    }
                    if let Some(ms) = exposure_ms {
                        description = description.with_exposure_ms(ms);
                    }
                    if let Some(roi) = roi {
                        description = description.with_roi(roi);
                    }
                    if let Some(light) = light {
                        description = description.with_light_source(LightSource::new(light));
                    }
                    if let Some(comment) = comment {
                        description = description.with_comment(comment);
                    }
                    Some(description)
                }
                _ => None,
            };
            let path = proj.new_file_name(description.as_ref())?;
            println!("{}", path.display());
        }

        Commands::Info {
            path,
            pattern,
            variable,
            full_name,
            json,
        } => {
            let info = match pattern {
                Some(pattern) => {
                    let mut query = NumberQuery::new(&pattern, &variable);
                    if full_name {
                        query = query.search_full_name();
                    }
                    FileInfo::parse_with(&path, &query)?
                }
                None => FileInfo::parse(&path)?,
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("tag              {}", info.tag);
                println!("fileno           {}", info.fileno);
                println!("name             {}", info.name);
                println!("lens             {}", info.lens);
                println!("measurement type {}", info.measurement_type);
                println!("wavelength       {}", info.wavelength);
                println!("exposure time    {}", info.exposure_time);
                println!("roi              {}", info.roi);
                println!("light            {}", info.light);
                if let Some(comment) = &info.comment {
                    println!("comment          {comment}");
                }
                for (variable, value) in &info.numbers {
                    println!("{variable:<16} {value}");
                }
            }
        }

        Commands::Counter { action } => {
            let mut counter = FileCounter::open(settings.counter_store_path())?;
            match action {
                CounterAction::Get { project, device } => match counter.get(&project, &device) {
                    Some(value) => println!("{value}"),
                    None => println!("uninitialized (next increment starts from 1)"),
                },
                CounterAction::Set {
                    project,
                    device,
                    value,
                } => {
                    counter.set(&project, &device, value)?;
                    println!("{project}-{device} = {value}");
                }
                CounterAction::Next { project, device } => {
                    println!("{}", counter.increment(&project, &device)?);
                }
            }
        }

        Commands::Note {
            project,
            device,
            text,
            category,
        } => {
            let counter = FileCounter::open(settings.counter_store_path())?;
            let proj = Project::open(project, device, settings.data_folder_path(), counter)?;
            proj.take_note(text.as_str(), category.as_deref())?;
        }
    }

    Ok(())
}
