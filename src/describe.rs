//! Measurement description value objects.
//!
//! A structured filename ends in a comma-separated description of how the
//! file was acquired: lens and measurement type, spectrometer settings,
//! light source, and an optional free-text comment. These types render that
//! description; [`FileInfo`](crate::parser::FileInfo) parses it back.
//!
//! The rendered form must agree with the parser's positional schema, so a
//! fully populated description round-trips:
//!
//! ```text
//! 50x Raman, 532nm 10ms r1, SuperK 500-600nm 10uW
//! ```
//!
//! Free-text fields must avoid `,`, `-`, `[` and `]`; no escaping is done
//! and a collision will silently misparse downstream.

use std::fmt;

/// Center wavelength or a filter passband.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wavelength {
    /// Single wavelength in nm, rendered `532nm`.
    Single(u32),
    /// Passband in nm, rendered `500-600nm`.
    Range(u32, u32),
}

impl fmt::Display for Wavelength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Wavelength::Single(nm) => write!(f, "{nm}nm"),
            Wavelength::Range(lo, hi) => write!(f, "{lo}-{hi}nm"),
        }
    }
}

/// Description of the illumination used for a measurement.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LightSource {
    /// Source name, e.g. `SuperK` or `LaserOn`.
    pub name: String,
    /// Output wavelength or filter passband.
    pub wavelength: Option<Wavelength>,
    /// Output power in microwatts.
    pub power_uw: Option<f64>,
    /// Aperture diameter in micrometers.
    pub aperture_um: Option<f64>,
    /// Input-side filter description.
    pub input_filter: Option<String>,
    /// Free-text addendum.
    pub info: Option<String>,
}

impl LightSource {
    /// Creates a light source with only a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Sets the wavelength or passband.
    pub fn with_wavelength(mut self, wavelength: Wavelength) -> Self {
        self.wavelength = Some(wavelength);
        self
    }

    /// Sets the output power in microwatts.
    pub fn with_power_uw(mut self, power: f64) -> Self {
        self.power_uw = Some(power);
        self
    }

    /// Sets the aperture diameter in micrometers.
    pub fn with_aperture_um(mut self, aperture: f64) -> Self {
        self.aperture_um = Some(aperture);
        self
    }

    /// Sets the input-side filter description.
    pub fn with_input_filter(mut self, filter: impl Into<String>) -> Self {
        self.input_filter = Some(filter.into());
        self
    }

    /// Sets the free-text addendum.
    pub fn with_info(mut self, info: impl Into<String>) -> Self {
        self.info = Some(info.into());
        self
    }
}

impl fmt::Display for LightSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if let Some(wavelength) = &self.wavelength {
            write!(f, " {wavelength}")?;
        }
        if let Some(power) = self.power_uw {
            write!(f, " {power}uW")?;
        }
        if let Some(aperture) = self.aperture_um {
            write!(f, " {aperture}um")?;
        }
        if let Some(filter) = &self.input_filter {
            write!(f, " {filter}")?;
        }
        if let Some(info) = &self.info {
            write!(f, " {info}")?;
        }
        Ok(())
    }
}

/// Acquisition parameters rendered into the filename's description suffix.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeasurementDescription {
    /// Objective lens, e.g. `50x`.
    pub lens: String,
    /// Measurement type, e.g. `Raman` or `PL`.
    pub measurement_type: String,
    /// Spectrometer center wavelength.
    pub wavelength: Option<Wavelength>,
    /// Exposure time in milliseconds.
    pub exposure_time_ms: Option<f64>,
    /// Spectrometer region-of-interest index, rendered `r{n}`.
    pub roi: Option<u32>,
    /// Illumination description.
    pub light_source: Option<LightSource>,
    /// Free-text comment, appended as the last description part.
    pub comment: Option<String>,
}

impl MeasurementDescription {
    /// Creates a description with the two mandatory fields.
    pub fn new(lens: impl Into<String>, measurement_type: impl Into<String>) -> Self {
        Self {
            lens: lens.into(),
            measurement_type: measurement_type.into(),
            ..Self::default()
        }
    }

    /// Sets the spectrometer center wavelength.
    pub fn with_wavelength(mut self, wavelength: Wavelength) -> Self {
        self.wavelength = Some(wavelength);
        self
    }

    /// Sets the exposure time in milliseconds.
    pub fn with_exposure_ms(mut self, exposure: f64) -> Self {
        self.exposure_time_ms = Some(exposure);
        self
    }

    /// Sets the region-of-interest index.
    pub fn with_roi(mut self, roi: u32) -> Self {
        self.roi = Some(roi);
        self
    }

    /// Sets the illumination description.
    pub fn with_light_source(mut self, light: LightSource) -> Self {
        self.light_source = Some(light);
        self
    }

    /// Sets the free-text comment.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

impl fmt::Display for MeasurementDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.lens, self.measurement_type)?;

        let mut spectral = String::new();
        if let Some(wavelength) = &self.wavelength {
            spectral.push_str(&wavelength.to_string());
        }
        if let Some(exposure) = self.exposure_time_ms {
            if !spectral.is_empty() {
                spectral.push(' ');
            }
            spectral.push_str(&format!("{exposure}ms"));
        }
        if let Some(roi) = self.roi {
            if !spectral.is_empty() {
                spectral.push(' ');
            }
            spectral.push_str(&format!("r{roi}"));
        }
        if !spectral.is_empty() {
            write!(f, ", {spectral}")?;
        }

        if let Some(light) = &self.light_source {
            write!(f, ", {light}")?;
        }
        if let Some(comment) = &self.comment {
            write!(f, ", {comment}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_full_description() {
        let description = MeasurementDescription::new("50x", "Raman")
            .with_wavelength(Wavelength::Single(532))
            .with_exposure_ms(10.0)
            .with_roi(1)
            .with_light_source(LightSource::new("LaserOn"));
        assert_eq!(description.to_string(), "50x Raman, 532nm 10ms r1, LaserOn");
    }

    #[test]
    fn renders_comment_as_last_part() {
        let description = MeasurementDescription::new("100x", "PL")
            .with_wavelength(Wavelength::Single(700))
            .with_exposure_ms(200.0)
            .with_roi(2)
            .with_light_source(LightSource::new("SuperK"))
            .with_comment("before anneal");
        assert_eq!(
            description.to_string(),
            "100x PL, 700nm 200ms r2, SuperK, before anneal"
        );
    }

    #[test]
    fn omits_empty_spectral_block() {
        let description = MeasurementDescription::new("20x", "image");
        assert_eq!(description.to_string(), "20x image");
    }

    #[test]
    fn light_source_composes_optional_fields() {
        let light = LightSource::new("SuperK")
            .with_wavelength(Wavelength::Range(500, 600))
            .with_power_uw(10.0)
            .with_aperture_um(50.0)
            .with_input_filter("LP450");
        assert_eq!(light.to_string(), "SuperK 500-600nm 10uW 50um LP450");
    }
}
