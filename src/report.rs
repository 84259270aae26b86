//! JSON reports written by the subcommands.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use tellus_grid::{Field, SpatialBox};
use tellus_spectral::{SignificantPeriods, WaveletResult};

/// A gridded field flattened in row-major order over `dims`.
///
/// Missing cells serialize as `null`.
#[derive(Debug, Serialize)]
pub struct FieldReport {
    /// Dimension names, outermost first.
    pub dims: Vec<String>,
    /// Length of each dimension.
    pub shape: Vec<usize>,
    /// Cell values, `None` where missing.
    pub values: Vec<Option<f64>>,
}

impl From<&Field> for FieldReport {
    fn from(field: &Field) -> Self {
        Self {
            dims: field.dims().to_vec(),
            shape: field.values().shape().to_vec(),
            values: field
                .values()
                .iter()
                .map(|&v| v.is_finite().then_some(v))
                .collect(),
        }
    }
}

/// Bounds of the selected box, in degrees.
#[derive(Debug, Serialize)]
pub struct RegionReport {
    /// Western bound.
    pub lon_min: f64,
    /// Eastern bound.
    pub lon_max: f64,
    /// Southern bound.
    pub lat_min: f64,
    /// Northern bound.
    pub lat_max: f64,
}

impl From<&SpatialBox> for RegionReport {
    fn from(region: &SpatialBox) -> Self {
        Self {
            lon_min: region.lon_min,
            lon_max: region.lon_max,
            lat_min: region.lat_min,
            lat_max: region.lat_max,
        }
    }
}

/// Annual amplitude of every variable.
#[derive(Debug, Serialize)]
pub struct SummaryReport {
    /// Detected time resolution, e.g. `monthly`.
    pub resolution: String,
    /// Climatological periods in the annual cycle.
    pub n_periods: usize,
    /// Annual amplitude keyed by variable name.
    pub amplitude: BTreeMap<String, FieldReport>,
}

/// Significant Fourier periods of a regional mean.
#[derive(Debug, Serialize)]
pub struct PeriodsReport {
    /// Analysed variable.
    pub variable: String,
    /// Box the series was averaged over.
    pub region: RegionReport,
    /// Whether the detrended anomalies were analysed.
    pub detrended: bool,
    /// Length of the analysed series.
    pub n_samples: usize,
    /// Power threshold `mean + n_sigma * sd`.
    pub threshold: f64,
    /// Significant periods in samples, ascending.
    pub periods: Vec<f64>,
    /// Power at each significant period.
    pub power: Vec<f64>,
}

impl PeriodsReport {
    /// Collects the significant periods found for `variable` over `region`.
    pub fn new(
        variable: &str,
        region: &SpatialBox,
        detrended: bool,
        result: &SignificantPeriods,
    ) -> Self {
        Self {
            variable: variable.to_string(),
            region: region.into(),
            detrended,
            n_samples: result.series_len(),
            threshold: result.threshold(),
            periods: result.periods().to_vec(),
            power: result.power().to_vec(),
        }
    }
}

/// Wavelet power and significance of a regional mean.
#[derive(Debug, Serialize)]
pub struct WaveletReport {
    /// Analysed variable.
    pub variable: String,
    /// Box the series was averaged over.
    pub region: RegionReport,
    /// Whether the detrended anomalies were analysed.
    pub detrended: bool,
    /// Global power threshold.
    pub threshold: f64,
    /// Period with the largest global power.
    pub dominant_period: Option<f64>,
    /// Fourier periods in samples, ascending.
    pub periods: Vec<f64>,
    /// Time-averaged power per period.
    pub global_power: Vec<f64>,
    /// Cone of influence per time point, in samples.
    pub coi: Vec<f64>,
    /// `power / threshold` per `[period][time]`.
    pub significance: Vec<Vec<f64>>,
}

impl WaveletReport {
    /// Flattens a wavelet result for `variable` over `region`.
    pub fn new(variable: &str, region: &SpatialBox, detrended: bool, result: &WaveletResult) -> Self {
        Self {
            variable: variable.to_string(),
            region: region.into(),
            detrended,
            threshold: result.threshold(),
            dominant_period: result.dominant_period(),
            periods: result.periods().to_vec(),
            global_power: result.global_power().to_vec(),
            coi: result.coi().to_vec(),
            significance: result
                .significance()
                .rows()
                .into_iter()
                .map(|row| row.to_vec())
                .collect(),
        }
    }
}

/// Temporal, annual, and band standard deviations of a variable.
#[derive(Debug, Serialize)]
pub struct VariabilityReport {
    /// Analysed variable.
    pub variable: String,
    /// Moving-average window of the band split, in samples.
    pub window: usize,
    /// Standard deviation over the whole time axis.
    pub temporal_std: FieldReport,
    /// Standard deviation of the annual means.
    pub annual_std: FieldReport,
    /// Standard deviation of the unsplit series.
    pub total: FieldReport,
    /// Standard deviation of the low-pass component.
    pub low_pass: FieldReport,
    /// Standard deviation of the high-pass component.
    pub high_pass: FieldReport,
}

/// Writes `report` as pretty JSON to `output`, or to stdout.
pub fn write_report<T: Serialize>(report: &T, output: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("failed to serialize report")?;
    match output {
        Some(path) => std::fs::write(path, json)
            .with_context(|| format!("failed to write report: {}", path.display())),
        None => {
            println!("{json}");
            Ok(())
        }
    }
}
