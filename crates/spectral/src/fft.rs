//! Fourier power spectrum and significant-period detection.
//!
//! Frequencies follow the usual `fftfreq(n, 1)` layout: index `i` maps to
//! `i / n` cycles per sample for `i < (n + 1) / 2` and to `(i - n) / n`
//! above that.

use std::fmt;

use num_complex::Complex;
use rustfft::FftPlanner;
use tracing::info;

use crate::error::SpectralError;
use crate::series::TimeSeries;

/// Configuration for [`significant_periods`].
///
/// # Example
///
/// ```ignore
/// use tellus_spectral::FftConfig;
///
/// let config = FftConfig::new().with_n_sigma(3.0);
/// ```
#[derive(Clone, Debug)]
pub struct FftConfig {
    /// Number of standard deviations above the mean power.
    n_sigma: f64,
}

impl FftConfig {
    /// Creates a new `FftConfig` with default parameters.
    ///
    /// Defaults: `n_sigma = 2.0`.
    pub fn new() -> Self {
        Self { n_sigma: 2.0 }
    }

    /// Sets the number of standard deviations above the mean power.
    pub fn with_n_sigma(mut self, n_sigma: f64) -> Self {
        self.n_sigma = n_sigma;
        self
    }

    /// Returns the number of standard deviations above the mean power.
    pub fn n_sigma(&self) -> f64 {
        self.n_sigma
    }
}

impl Default for FftConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Full two-sided power spectrum of a series.
#[derive(Clone, Debug)]
pub struct PowerSpectrum {
    frequencies: Vec<f64>,
    periods: Vec<f64>,
    power: Vec<f64>,
}

impl PowerSpectrum {
    /// Frequencies in cycles per sample, in FFT order.
    pub fn frequencies(&self) -> &[f64] {
        &self.frequencies
    }

    /// `1 / frequency`; infinite at the zero-frequency term.
    pub fn periods(&self) -> &[f64] {
        &self.periods
    }

    /// Squared magnitude of each Fourier coefficient.
    pub fn power(&self) -> &[f64] {
        &self.power
    }

    /// Number of samples (and of spectral terms).
    pub fn len(&self) -> usize {
        self.power.len()
    }

    /// Returns `true` if the spectrum has no terms.
    pub fn is_empty(&self) -> bool {
        self.power.is_empty()
    }
}

/// Periods whose power exceeds `mean + n_sigma * std` of the power spectrum.
///
/// Periods are in samples, in ascending frequency order.
#[derive(Clone, Debug, PartialEq)]
pub struct SignificantPeriods {
    periods: Vec<f64>,
    indices: Vec<usize>,
    power: Vec<f64>,
    threshold: f64,
    n: usize,
}

impl SignificantPeriods {
    /// Significant periods in samples.
    pub fn periods(&self) -> &[f64] {
        &self.periods
    }

    /// FFT indices of the significant terms.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Power of each significant term.
    pub fn power(&self) -> &[f64] {
        &self.power
    }

    /// Power threshold that was applied.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Length of the analysed series.
    pub fn series_len(&self) -> usize {
        self.n
    }

    /// Returns `true` if no period passed the threshold.
    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    /// Returns `true` if a reported period lies within `tolerance` of `period`.
    pub fn contains_near(&self, period: f64, tolerance: f64) -> bool {
        self.periods.iter().any(|p| (p - period).abs() <= tolerance)
    }
}

impl fmt::Display for SignificantPeriods {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, p) in self.periods.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{p:.2}")?;
        }
        f.write_str("]")
    }
}

/// Computes the power spectrum `|X_k|^2` of `series`.
pub fn power_spectrum(series: &TimeSeries) -> PowerSpectrum {
    let data = series.as_slice();
    let n = data.len();

    let mut buffer: Vec<Complex<f64>> = data.iter().map(|&x| Complex::new(x, 0.0)).collect();
    let mut planner = FftPlanner::new();
    planner.plan_fft_forward(n).process(&mut buffer);

    let frequencies: Vec<f64> = (0..n).map(|i| fft_frequency(i, n)).collect();
    let periods = frequencies
        .iter()
        .map(|&f| if f != 0.0 { 1.0 / f } else { f64::INFINITY })
        .collect();
    let power = buffer.iter().map(|c| c.norm_sqr()).collect();

    PowerSpectrum {
        frequencies,
        periods,
        power,
    }
}

/// Frequency of FFT index `i` for `n` samples at unit spacing.
fn fft_frequency(i: usize, n: usize) -> f64 {
    if i < n.div_ceil(2) {
        i as f64 / n as f64
    } else {
        (i as f64 - n as f64) / n as f64
    }
}

/// Detects significant oscillation periods in `series`.
///
/// The threshold is `mean(power) + n_sigma * std(power)` (population
/// standard deviation) over all `n` spectral terms. Candidates are the
/// first `n / 2` terms; a candidate is reported when its period is
/// positive, finite, strictly below `n`, and its power exceeds the
/// threshold.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`SpectralError::InvalidConfig`] | `n_sigma` is negative or not finite |
#[tracing::instrument(skip_all, fields(n = series.len(), n_sigma = config.n_sigma()))]
pub fn significant_periods(
    series: &TimeSeries,
    config: &FftConfig,
) -> Result<SignificantPeriods, SpectralError> {
    if !config.n_sigma.is_finite() || config.n_sigma < 0.0 {
        return Err(SpectralError::InvalidConfig(
            "n_sigma must be finite and >= 0".to_string(),
        ));
    }

    let spectrum = power_spectrum(series);
    let n = spectrum.len();
    let power = spectrum.power();
    let threshold =
        tellus_stats::mean(power) + config.n_sigma * tellus_stats::population_sd(power);

    let mut periods = Vec::new();
    let mut indices = Vec::new();
    let mut kept_power = Vec::new();
    for i in 0..n / 2 {
        let period = spectrum.periods()[i];
        if period > 0.0 && period.is_finite() && period < n as f64 && power[i] > threshold {
            periods.push(period);
            indices.push(i);
            kept_power.push(power[i]);
        }
    }

    let result = SignificantPeriods {
        periods,
        indices,
        power: kept_power,
        threshold,
        n,
    };
    info!(threshold, periods = %result, "significant periods");
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    fn sine(n: usize, period: f64) -> TimeSeries {
        TimeSeries::new(
            (0..n)
                .map(|i| (2.0 * PI * i as f64 / period).sin())
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn config_defaults() {
        let config = FftConfig::new();
        assert!((config.n_sigma() - 2.0).abs() < f64::EPSILON);
        assert!((FftConfig::default().n_sigma() - 2.0).abs() < f64::EPSILON);
        assert!((config.with_n_sigma(3.5).n_sigma() - 3.5).abs() < f64::EPSILON);
    }

    #[test]
    fn frequency_layout_even() {
        let f: Vec<f64> = (0..4).map(|i| fft_frequency(i, 4)).collect();
        assert_eq!(f, vec![0.0, 0.25, -0.5, -0.25]);
    }

    #[test]
    fn frequency_layout_odd() {
        let f: Vec<f64> = (0..5).map(|i| fft_frequency(i, 5)).collect();
        assert_eq!(f, vec![0.0, 0.2, 0.4, -0.4, -0.2]);
    }

    #[test]
    fn zero_frequency_period_is_infinite() {
        let s = power_spectrum(&sine(16, 4.0));
        assert!(s.periods()[0].is_infinite());
        assert_relative_eq!(s.periods()[4], 4.0, epsilon = 1e-12);
    }

    #[test]
    fn parseval_holds() {
        let ts = sine(32, 8.0);
        let s = power_spectrum(&ts);
        let energy: f64 = ts.as_slice().iter().map(|x| x * x).sum();
        let spectral: f64 = s.power().iter().sum::<f64>() / 32.0;
        assert_relative_eq!(energy, spectral, epsilon = 1e-9);
    }

    #[test]
    fn pure_sine_reports_its_period() {
        let result = significant_periods(&sine(64, 8.0), &FftConfig::new()).unwrap();
        assert_eq!(result.indices(), &[8]);
        assert_relative_eq!(result.periods()[0], 8.0, epsilon = 1e-12);
        assert_eq!(result.series_len(), 64);
        assert!(result.contains_near(8.0, 0.5));
    }

    #[test]
    fn threshold_uses_population_sd_over_all_terms() {
        // two bins of (n/2)^2 = 1024, everything else zero
        let result = significant_periods(&sine(64, 8.0), &FftConfig::new()).unwrap();
        let mean = 2048.0 / 64.0;
        let sd = (2.0 * 1024.0_f64.powi(2) / 64.0 - mean * mean).sqrt();
        assert_relative_eq!(result.threshold(), mean + 2.0 * sd, epsilon = 1e-6);
    }

    #[test]
    fn full_length_period_is_excluded() {
        // One cycle over the whole record lands on index 1, period n.
        let result = significant_periods(&sine(40, 40.0), &FftConfig::new()).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn negative_n_sigma_rejected() {
        let err = significant_periods(&sine(16, 4.0), &FftConfig::new().with_n_sigma(-1.0))
            .unwrap_err();
        assert!(matches!(err, SpectralError::InvalidConfig(_)));
    }

    #[test]
    fn display_lists_periods() {
        let result = significant_periods(&sine(64, 8.0), &FftConfig::new()).unwrap();
        assert_eq!(result.to_string(), "[8.00]");
    }
}
