//! Composing structured filenames.
//!
//! The inverse of the parser: a new acquisition's filename is the project
//! tag, the base item name, the rendered measurement description, and an
//! optional trailing suffix tag:
//!
//! ```text
//! [PROJ-1-4] sampleA, 50x Raman, 532nm 10ms r1, LaserOn [cal]
//! ```
//!
//! Pure formatting. No character-set validation is performed; `,`, `-`,
//! `[` and `]` inside free-text fields will misparse downstream.

use std::fmt;

/// Assembles a structured filename from its parts.
#[derive(Debug, Default)]
pub struct FilenameBuilder {
    base: String,
    description: Option<String>,
    prefix_tag: Option<String>,
    suffix_tag: Option<String>,
}

impl FilenameBuilder {
    /// Starts a filename from the base item name (the sample or scan name).
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            ..Self::default()
        }
    }

    /// Appends a rendered description, typically a
    /// [`MeasurementDescription`](crate::describe::MeasurementDescription).
    /// An empty rendering is dropped entirely.
    pub fn description(mut self, description: &(impl fmt::Display + ?Sized)) -> Self {
        self.description = Some(description.to_string());
        self
    }

    /// Prepends an identity tag, e.g. `[PROJ-1-4]`.
    pub fn prefix_tag(mut self, tag: impl Into<String>) -> Self {
        self.prefix_tag = Some(tag.into());
        self
    }

    /// Appends a bracketed suffix tag. The brackets are added here; pass the
    /// bare text.
    pub fn suffix_tag(mut self, tag: impl Into<String>) -> Self {
        self.suffix_tag = Some(tag.into());
        self
    }

    /// Renders the filename (without extension).
    pub fn build(self) -> String {
        let mut name = match self.prefix_tag {
            Some(prefix) => format!("{prefix} {}", self.base),
            None => self.base,
        };
        if let Some(description) = self.description {
            if !description.is_empty() {
                name.push_str(", ");
                name.push_str(&description);
            }
        }
        if let Some(suffix) = self.suffix_tag {
            name.push_str(" [");
            name.push_str(&suffix);
            name.push(']');
        }
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::describe::{LightSource, MeasurementDescription, Wavelength};

    #[test]
    fn composes_tag_base_and_description() {
        let description = MeasurementDescription::new("50x", "Raman")
            .with_wavelength(Wavelength::Single(532))
            .with_exposure_ms(10.0)
            .with_roi(1)
            .with_light_source(LightSource::new("LaserOn"));
        let name = FilenameBuilder::new("sampleA")
            .prefix_tag("[PROJ-1-4]")
            .description(&description)
            .build();
        assert_eq!(name, "[PROJ-1-4] sampleA, 50x Raman, 532nm 10ms r1, LaserOn");
    }

    #[test]
    fn bare_base_passes_through() {
        assert_eq!(FilenameBuilder::new("sampleA").build(), "sampleA");
    }

    #[test]
    fn suffix_tag_is_bracketed_last() {
        let name = FilenameBuilder::new("sampleA")
            .prefix_tag("[P-1-2]")
            .description("50x image")
            .suffix_tag("cal")
            .build();
        assert_eq!(name, "[P-1-2] sampleA, 50x image [cal]");
    }

    #[test]
    fn empty_description_is_dropped() {
        let name = FilenameBuilder::new("sampleA").description("").build();
        assert_eq!(name, "sampleA");
    }
}
