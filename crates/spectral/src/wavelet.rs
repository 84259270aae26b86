//! Wavelet power and significance analysis of a single series.
//!
//! Chains [`cwt_morlet`] with [`global_significance`] and keeps only the
//! scales whose Fourier period lies in `[1, max period]` samples.

use ndarray::{Array1, Array2, Axis};
use num_complex::Complex64;
use tracing::info;

use crate::cwt::{CwtConfig, cwt_morlet};
use crate::error::SpectralError;
use crate::series::TimeSeries;
use crate::significance::{SignificanceConfig, global_significance};

/// Shortest period kept in a [`WaveletResult`], in samples.
const MIN_PERIOD: f64 = 1.0;

/// Wavelet analysis of one series, restricted to the reported period range.
#[derive(Clone, Debug)]
pub struct WaveletResult {
    coefficients: Array2<Complex64>,
    scales: Vec<f64>,
    periods: Vec<f64>,
    coi: Vec<f64>,
    power: Array2<f64>,
    global_power: Array1<f64>,
    significance: Array2<f64>,
    threshold: f64,
}

impl WaveletResult {
    /// Complex coefficients `[period, time]`.
    pub fn coefficients(&self) -> &Array2<Complex64> {
        &self.coefficients
    }

    /// Wavelet scales of the kept rows.
    pub fn scales(&self) -> &[f64] {
        &self.scales
    }

    /// Fourier-equivalent periods in samples, ascending.
    pub fn periods(&self) -> &[f64] {
        &self.periods
    }

    /// Cone of influence per time point, in samples.
    pub fn coi(&self) -> &[f64] {
        &self.coi
    }

    /// Power `|W|^2` per `[period, time]`.
    pub fn power(&self) -> &Array2<f64> {
        &self.power
    }

    /// Time-averaged power per period.
    pub fn global_power(&self) -> &Array1<f64> {
        &self.global_power
    }

    /// `power / threshold` per `[period, time]`; values >= 1 are significant.
    pub fn significance(&self) -> &Array2<f64> {
        &self.significance
    }

    /// Global power threshold.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Number of kept periods.
    pub fn n_periods(&self) -> usize {
        self.periods.len()
    }

    /// Number of time points.
    pub fn n_times(&self) -> usize {
        self.coi.len()
    }

    /// Period with the largest global power, if any period was kept.
    pub fn dominant_period(&self) -> Option<f64> {
        self.global_power
            .iter()
            .zip(&self.periods)
            .filter(|(p, _)| p.is_finite())
            .max_by(|(a, _), (b, _)| a.total_cmp(b))
            .map(|(_, &period)| period)
    }

    /// Returns `true` if the cell at `(period_index, time)` lies outside the
    /// cone of influence.
    pub fn is_reliable(&self, period_index: usize, time: usize) -> bool {
        match (self.periods.get(period_index), self.coi.get(time)) {
            (Some(&period), Some(&coi)) => period <= coi,
            _ => false,
        }
    }
}

/// Runs the Morlet transform and the global significance test on `series`.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`SpectralError::InvalidConfig`] | invalid transform parameters |
/// | [`SpectralError::SeriesTooShort`] | fewer than 4 observations |
/// | [`SpectralError::SignificanceFailed`] | invalid significance level or dof |
#[tracing::instrument(skip_all, fields(n = series.len(), dj = cwt_config.dj()))]
pub fn wavelet_analysis(
    series: &TimeSeries,
    cwt_config: &CwtConfig,
    significance_config: &SignificanceConfig,
) -> Result<WaveletResult, SpectralError> {
    let cwt = cwt_morlet(series, cwt_config)?;
    let significance = global_significance(&cwt, significance_config)?;
    let threshold = significance.threshold();
    let ratio = significance.into_ratio();

    let max_period = cwt
        .periods()
        .iter()
        .copied()
        .fold(f64::NEG_INFINITY, f64::max);
    let keep: Vec<usize> = cwt
        .periods()
        .iter()
        .enumerate()
        .filter(|&(_, &p)| (MIN_PERIOD..=max_period).contains(&p))
        .map(|(j, _)| j)
        .collect();

    let rows = Axis(0);
    let result = WaveletResult {
        coefficients: cwt.coefficients().select(rows, &keep),
        scales: keep.iter().map(|&j| cwt.scales()[j]).collect(),
        periods: keep.iter().map(|&j| cwt.periods()[j]).collect(),
        coi: cwt.coi().to_vec(),
        power: cwt.power().select(rows, &keep),
        global_power: cwt.global_power().select(rows, &keep),
        significance: ratio.select(rows, &keep),
        threshold,
    };

    info!(
        n_periods = result.n_periods(),
        threshold,
        dominant = result.dominant_period(),
        "wavelet analysis"
    );
    Ok(result)
}
