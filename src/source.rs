//! Spectrum-producing collaborators.
//!
//! The naming core never talks to hardware; acquisition code hands it a
//! filename and, for analysis helpers, something that can produce an
//! (x, y) spectrum. That capability is the whole contract, so it is a
//! single-method trait rather than a duck-typed "has `get_spectrum`"
//! object. Instrument drivers implement it; tests use
//! [`MockSpectrumSource`].

use crate::error::LabResult;

/// Anything that can produce one (x, y) spectrum on demand.
pub trait SpectrumSource {
    /// Acquires a spectrum: wavelength (or frequency) axis and intensity,
    /// same length.
    fn get_spectrum(&mut self) -> LabResult<(Vec<f64>, Vec<f64>)>;
}

/// Simulated spectrum source for tests: a single Lorentzian peak on a flat
/// background, over a fixed wavelength window.
#[derive(Debug, Clone)]
pub struct MockSpectrumSource {
    /// Peak center in nm.
    pub center_nm: f64,
    /// Full width at half maximum in nm.
    pub fwhm_nm: f64,
    /// Number of points across the 500-600nm window.
    pub points: usize,
}

impl Default for MockSpectrumSource {
    fn default() -> Self {
        Self {
            center_nm: 550.0,
            fwhm_nm: 5.0,
            points: 1024,
        }
    }
}

impl SpectrumSource for MockSpectrumSource {
    fn get_spectrum(&mut self) -> LabResult<(Vec<f64>, Vec<f64>)> {
        let half = self.fwhm_nm / 2.0;
        let (mut x, mut y) = (Vec::with_capacity(self.points), Vec::with_capacity(self.points));
        for i in 0..self.points {
            let nm = 500.0 + 100.0 * i as f64 / (self.points.max(2) - 1) as f64;
            let detuning = nm - self.center_nm;
            x.push(nm);
            y.push(100.0 + 1000.0 * half * half / (detuning * detuning + half * half));
        }
        Ok((x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axes_have_matching_length() {
        let (x, y) = MockSpectrumSource::default().get_spectrum().unwrap();
        assert_eq!(x.len(), y.len());
        assert_eq!(x.len(), 1024);
    }

    #[test]
    fn peak_sits_at_center() {
        let mut source = MockSpectrumSource {
            center_nm: 532.0,
            ..MockSpectrumSource::default()
        };
        let (x, y) = source.get_spectrum().unwrap();
        let (peak_idx, _) = y
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .unwrap();
        assert!((x[peak_idx] - 532.0).abs() < 0.2);
    }
}
