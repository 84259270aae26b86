//! Global chi-squared significance for wavelet power.
//!
//! One threshold is derived for the whole transform: the mean power over
//! every scale and time, scaled by `chi2_ppf(level, dof) / dof`. Each cell's
//! ratio `power / threshold` is then significant when it reaches 1.

use ndarray::Array2;
use statrs::distribution::{ChiSquared, ContinuousCDF};

use crate::cwt::CwtResult;
use crate::error::SpectralError;

/// Configuration for wavelet significance testing.
///
/// # Example
///
/// ```ignore
/// use tellus_spectral::SignificanceConfig;
///
/// let config = SignificanceConfig::new().with_significance_level(0.99);
/// ```
#[derive(Clone, Debug)]
pub struct SignificanceConfig {
    /// Confidence level for the chi-squared test.
    significance_level: f64,
    /// Degrees of freedom (2 for the complex Morlet wavelet).
    dof: f64,
}

impl SignificanceConfig {
    /// Creates a new `SignificanceConfig` with default parameters.
    ///
    /// Defaults: `significance_level = 0.95`, `dof = 2.0`.
    pub fn new() -> Self {
        Self {
            significance_level: 0.95,
            dof: 2.0,
        }
    }

    /// Sets the significance (confidence) level.
    pub fn with_significance_level(mut self, level: f64) -> Self {
        self.significance_level = level;
        self
    }

    /// Sets the degrees of freedom.
    pub fn with_dof(mut self, dof: f64) -> Self {
        self.dof = dof;
        self
    }

    /// Returns the significance level.
    pub fn significance_level(&self) -> f64 {
        self.significance_level
    }

    /// Returns the degrees of freedom.
    pub fn dof(&self) -> f64 {
        self.dof
    }
}

impl Default for SignificanceConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Significance ratio field of a transform.
#[derive(Clone, Debug)]
pub struct GlobalSignificance {
    threshold: f64,
    chi2_quantile: f64,
    ratio: Array2<f64>,
}

impl GlobalSignificance {
    /// Power level a cell must reach to be significant.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Chi-squared quantile at the configured level.
    pub fn chi2_quantile(&self) -> f64 {
        self.chi2_quantile
    }

    /// `power / threshold` per `[scale, time]`.
    pub fn ratio(&self) -> &Array2<f64> {
        &self.ratio
    }

    pub(crate) fn into_ratio(self) -> Array2<f64> {
        self.ratio
    }
}

/// Computes the global significance threshold and per-cell ratio.
///
/// A transform with zero power everywhere has a zero threshold; its ratios
/// are all 0.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`SpectralError::SignificanceFailed`] | level outside (0, 1), non-positive dof, or chi-squared failure |
pub fn global_significance(
    cwt: &CwtResult,
    config: &SignificanceConfig,
) -> Result<GlobalSignificance, SpectralError> {
    let level = config.significance_level();
    if !(level > 0.0 && level < 1.0) {
        return Err(SpectralError::SignificanceFailed(format!(
            "significance level must be in (0, 1), got {level}"
        )));
    }
    if config.dof().is_nan() || config.dof() <= 0.0 {
        return Err(SpectralError::SignificanceFailed(format!(
            "degrees of freedom must be > 0, got {}",
            config.dof()
        )));
    }

    let chi2 = ChiSquared::new(config.dof())
        .map_err(|e| SpectralError::SignificanceFailed(e.to_string()))?;
    let chi2_quantile = chi2.inverse_cdf(level);

    let mut ratio = cwt.power();
    let mean_power = ratio.mean().unwrap_or(0.0);
    let threshold = mean_power * chi2_quantile / config.dof();
    if threshold > 0.0 {
        ratio /= threshold;
    } else {
        ratio.fill(0.0);
    }

    Ok(GlobalSignificance {
        threshold,
        chi2_quantile,
        ratio,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cwt::{CwtConfig, cwt_morlet};
    use crate::series::TimeSeries;
    use approx::assert_relative_eq;

    fn noise_like(n: usize) -> TimeSeries {
        TimeSeries::new(
            (0..n)
                .map(|i| ((i * 7919) % 101) as f64 / 50.0 - 1.0)
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn config_defaults() {
        let config = SignificanceConfig::default();
        assert!((config.significance_level() - 0.95).abs() < f64::EPSILON);
        assert!((config.dof() - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn chi2_quantile_for_two_dof() {
        let cwt = cwt_morlet(&noise_like(64), &CwtConfig::new()).unwrap();
        let sig = global_significance(&cwt, &SignificanceConfig::new()).unwrap();
        // -2 ln(0.05)
        assert_relative_eq!(sig.chi2_quantile(), 5.991_464_547_107_979, epsilon = 1e-6);
    }

    #[test]
    fn mean_ratio_is_dof_over_quantile() {
        let cwt = cwt_morlet(&noise_like(128), &CwtConfig::new()).unwrap();
        let sig = global_significance(&cwt, &SignificanceConfig::new()).unwrap();
        let mean = sig.ratio().mean().unwrap();
        assert_relative_eq!(mean, 2.0 / sig.chi2_quantile(), epsilon = 1e-9);
        assert_eq!(sig.ratio().dim(), cwt.coefficients().dim());
    }

    #[test]
    fn zero_power_gives_zero_ratio() {
        let ts = TimeSeries::new(vec![0.0; 32]).unwrap();
        let cwt = cwt_morlet(&ts, &CwtConfig::new()).unwrap();
        let sig = global_significance(&cwt, &SignificanceConfig::new()).unwrap();
        assert_eq!(sig.threshold(), 0.0);
        assert!(sig.ratio().iter().all(|&r| r == 0.0));
    }

    #[test]
    fn invalid_level_rejected() {
        let cwt = cwt_morlet(&noise_like(32), &CwtConfig::new()).unwrap();
        for level in [0.0, 1.0, 1.5, f64::NAN] {
            let err = global_significance(
                &cwt,
                &SignificanceConfig::new().with_significance_level(level),
            )
            .unwrap_err();
            assert!(matches!(err, SpectralError::SignificanceFailed(_)));
        }
    }

    #[test]
    fn invalid_dof_rejected() {
        let cwt = cwt_morlet(&noise_like(32), &CwtConfig::new()).unwrap();
        let err = global_significance(&cwt, &SignificanceConfig::new().with_dof(0.0)).unwrap_err();
        assert!(matches!(err, SpectralError::SignificanceFailed(_)));
    }
}
