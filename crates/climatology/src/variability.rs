//! Standard-deviation summaries: over time, over the seasonal cycle, and
//! split into low- and high-frequency bands.

use ndarray::{ArrayD, Axis};
use tellus_grid::{AxisKind, AxisResolver, Field, GriddedSeries};
use tellus_stats::nan_population_sd;
use tracing::debug;

use crate::anomaly::AnomalyField;
use crate::climatology::{ClimatologyTable, reduce_leading, time_first};
use crate::error::ClimatologyError;

/// Configuration for [`cycle_variability`].
#[derive(Debug, Clone)]
pub struct BandConfig {
    window: usize,
}

impl BandConfig {
    /// Creates a new `BandConfig` with default values.
    ///
    /// Defaults: `window = 15` samples.
    pub fn new() -> Self {
        Self { window: 15 }
    }

    /// Sets the centred rolling-mean window used as the low-pass filter.
    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window;
        self
    }

    /// Rolling-mean window in samples.
    pub fn window(&self) -> usize {
        self.window
    }
}

impl Default for BandConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-cell standard deviations of a series and its two frequency bands.
#[derive(Debug, Clone, PartialEq)]
pub struct BandVariability {
    total: Field,
    low_pass: Field,
    high_pass: Field,
}

impl BandVariability {
    /// Standard deviation of the unfiltered series.
    pub fn total(&self) -> &Field {
        &self.total
    }

    /// Standard deviation of the rolling-mean (low-pass) series.
    pub fn low_pass(&self) -> &Field {
        &self.low_pass
    }

    /// Standard deviation of the residual (high-pass) series.
    pub fn high_pass(&self) -> &Field {
        &self.high_pass
    }
}

/// Population standard deviation over time of `variable`, per cell.
///
/// # Errors
///
/// Returns [`ClimatologyError::Grid`] if the variable is unknown.
pub fn temporal_std(series: &GriddedSeries, variable: &str) -> Result<Field, ClimatologyError> {
    let var = series.variable(variable)?;
    let (dims, data) = time_first(var, variable, series.time().name())?;
    Ok(std_over_time(&dims, &data))
}

/// Population standard deviation of the climatology over the period axis.
///
/// # Errors
///
/// Returns [`ClimatologyError::MissingClimatology`] if the variable is unknown.
pub fn annual_std(
    climatology: &ClimatologyTable,
    variable: &str,
) -> Result<Field, ClimatologyError> {
    Ok(reduce_leading(climatology.field(variable)?, nan_population_sd))
}

/// Splits the anomalies of `variable` into a centred rolling mean (low
/// pass) and its residual (high pass), and reports the standard deviation
/// of the series and of each band per cell.
///
/// The surface depth level is taken when a depth axis exists, and time
/// steps missing in every cell are dropped first. Rolling-mean positions
/// without a full window are missing and do not contribute.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`ClimatologyError::InvalidWindow`] | window is 0 |
/// | [`ClimatologyError::Grid`] | the variable is unknown |
#[tracing::instrument(skip_all, fields(variable = %variable, window = config.window()))]
pub fn cycle_variability(
    anomalies: &AnomalyField,
    variable: &str,
    config: &BandConfig,
    resolver: &dyn AxisResolver,
) -> Result<BandVariability, ClimatologyError> {
    let window = config.window();
    if window == 0 {
        return Err(ClimatologyError::InvalidWindow { window });
    }

    let series = anomalies.series();
    let mut var = series.variable(variable)?.clone();
    if let Some(depth) = resolver.find_axis(series, AxisKind::Depth) {
        var = var.surface(&depth);
    }
    let (dims, data) = time_first(&var, variable, series.time().name())?;

    let keep: Vec<usize> = (0..data.len_of(Axis(0)))
        .filter(|&t| data.index_axis(Axis(0), t).iter().any(|v| !v.is_nan()))
        .collect();
    let clean = data.select(Axis(0), &keep);

    let mut low = clean.clone();
    for (mut out, lane) in low.lanes_mut(Axis(0)).into_iter().zip(clean.lanes(Axis(0))) {
        let smoothed = tellus_stats::rolling_mean_centered(&lane.to_vec(), window);
        for (o, s) in out.iter_mut().zip(smoothed) {
            *o = s;
        }
    }
    let high = &clean - &low;

    debug!(
        n_kept = keep.len(),
        n_dropped = data.len_of(Axis(0)) - keep.len(),
        "split anomalies into bands"
    );
    Ok(BandVariability {
        total: std_over_time(&dims, &clean),
        low_pass: std_over_time(&dims, &low),
        high_pass: std_over_time(&dims, &high),
    })
}

fn std_over_time(dims: &[String], data: &ArrayD<f64>) -> Field {
    let values = data.map_axis(Axis(0), |lane| nan_population_sd(&lane.to_vec()));
    Field::new(dims[1..].to_vec(), values)
}
