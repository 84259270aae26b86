//! Input series for the spectral analyses.

use crate::error::SpectralError;

/// Fewest samples any analysis accepts.
const MIN_LEN: usize = 2;

/// A regional-mean series at a unit time step.
///
/// Holds at least two samples, all finite. Missing values have to be
/// resolved (zero-filled or dropped) before a series can be built.
///
/// ```ignore
/// use tellus_spectral::TimeSeries;
///
/// let series = TimeSeries::try_from(vec![0.3, -0.1, 0.4])?;
/// assert_eq!(series.len(), 3);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct TimeSeries {
    samples: Vec<f64>,
}

impl TimeSeries {
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`SpectralError::SeriesTooShort`] | fewer than 2 samples |
    /// | [`SpectralError::NonFiniteData`] | a NaN or infinite sample |
    pub fn new(samples: Vec<f64>) -> Result<Self, SpectralError> {
        if samples.len() < MIN_LEN {
            return Err(SpectralError::SeriesTooShort {
                len: samples.len(),
                min: MIN_LEN,
            });
        }
        if samples.iter().any(|v| !v.is_finite()) {
            return Err(SpectralError::NonFiniteData);
        }
        Ok(Self { samples })
    }

    /// Builds a series from a spatial reduction, telling an empty selection
    /// apart from a partially missing one.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`SpectralError::InsufficientData`] | no samples, or every sample missing |
    /// | [`SpectralError::SeriesTooShort`] | a single sample |
    /// | [`SpectralError::NonFiniteData`] | some samples missing |
    pub fn from_reduced(samples: Vec<f64>) -> Result<Self, SpectralError> {
        let reason = if samples.is_empty() {
            "the selected region and time window contain no samples".to_string()
        } else if samples.iter().all(|v| !v.is_finite()) {
            format!("all {} samples of the regional mean are missing", samples.len())
        } else {
            return Self::new(samples);
        };
        Err(SpectralError::InsufficientData { reason })
    }

    /// Returns the samples as a slice.
    pub fn as_slice(&self) -> &[f64] {
        &self.samples
    }

    /// Returns the number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always `false` for a constructed series.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Consumes the series and returns its samples.
    pub fn into_inner(self) -> Vec<f64> {
        self.samples
    }
}

impl TryFrom<Vec<f64>> for TimeSeries {
    type Error = SpectralError;

    fn try_from(samples: Vec<f64>) -> Result<Self, Self::Error> {
        Self::new(samples)
    }
}

impl AsRef<[f64]> for TimeSeries {
    fn as_ref(&self) -> &[f64] {
        &self.samples
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_finite_samples() {
        let series = TimeSeries::try_from(vec![0.3, -0.1, 0.4]).unwrap();
        assert_eq!(series.len(), 3);
        assert!(!series.is_empty());
        assert_eq!(series.clone().into_inner(), vec![0.3, -0.1, 0.4]);
        let slice: &[f64] = series.as_ref();
        assert_eq!(slice, series.as_slice());
    }

    #[test]
    fn single_sample_too_short() {
        assert_eq!(
            TimeSeries::new(vec![4.2]).unwrap_err(),
            SpectralError::SeriesTooShort { len: 1, min: 2 }
        );
    }

    #[test]
    fn non_finite_rejected() {
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert_eq!(
                TimeSeries::new(vec![0.0, bad, 1.0]).unwrap_err(),
                SpectralError::NonFiniteData
            );
        }
    }

    #[test]
    fn empty_reduction_is_insufficient() {
        let err = TimeSeries::from_reduced(Vec::new()).unwrap_err();
        assert!(err.to_string().contains("contain no samples"));
    }

    #[test]
    fn fully_missing_reduction_is_insufficient() {
        let err = TimeSeries::from_reduced(vec![f64::NAN; 12]).unwrap_err();
        assert!(matches!(err, SpectralError::InsufficientData { .. }));
        assert!(err.to_string().contains("all 12 samples"));
    }

    #[test]
    fn partially_missing_reduction_is_non_finite() {
        let err = TimeSeries::from_reduced(vec![1.0, f64::NAN, 2.0]).unwrap_err();
        assert_eq!(err, SpectralError::NonFiniteData);
    }

    #[test]
    fn single_reduced_sample_too_short() {
        let err = TimeSeries::from_reduced(vec![0.5]).unwrap_err();
        assert_eq!(err, SpectralError::SeriesTooShort { len: 1, min: 2 });
    }
}
