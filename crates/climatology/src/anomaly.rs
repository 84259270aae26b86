//! Climatology removal and mask-preserving linear detrending.

use std::collections::BTreeMap;

use ndarray::{ArrayD, Axis};
use rayon::prelude::*;
use tellus_grid::{AxisResolver, DataVariable, Field, GridError, GriddedSeries};
use tracing::debug;

use crate::climatology::{ClimatologyTable, time_first};
use crate::error::ClimatologyError;

/// Dataset-level `description` attribute of every anomaly series.
pub const ANOMALY_DESCRIPTION: &str = "Detrended anomalies of all variables.";

/// Detrended anomalies of every variable of a series.
///
/// The wrapped series shares the source axes; every variable has time as
/// its leading dimension followed by the remaining dimensions in source
/// order.
#[derive(Debug, Clone)]
pub struct AnomalyField {
    series: GriddedSeries,
}

impl AnomalyField {
    /// The anomaly series.
    pub fn series(&self) -> &GriddedSeries {
        &self.series
    }

    /// Anomalies of one variable.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::MissingVariable`] if the variable is unknown.
    pub fn variable(&self, name: &str) -> Result<&DataVariable, GridError> {
        self.series.variable(name)
    }

    /// Consumes the field and returns the anomaly series.
    pub fn into_series(self) -> GriddedSeries {
        self.series
    }
}

/// Subtracts the matching-period climatology from every sample and removes
/// the linear trend along time in each cell.
///
/// Missing values are treated as zero while the trend is fitted, then put
/// back, so the output mask equals the mask of `raw - climatology`. Periods
/// whose climatology is `NaN` stay missing for every occurrence.
///
/// Variables carrying a `long_name` attribute get
/// `"Detrended anomaly of <long_name>"`; other attributes are copied.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`ClimatologyError::Grid`] | time resolution cannot be classified |
/// | [`ClimatologyError::ResolutionMismatch`] | `climatology` was built at another resolution |
/// | [`ClimatologyError::MissingPeriod`] | a date maps to a period absent from `climatology` |
/// | [`ClimatologyError::MissingClimatology`] | a variable has no climatology |
#[tracing::instrument(skip_all, fields(n_variables = series.variables().len(), n_times = series.time().len()))]
pub fn compute_anomalies(
    series: &GriddedSeries,
    climatology: &ClimatologyTable,
    resolver: &dyn AxisResolver,
) -> Result<AnomalyField, ClimatologyError> {
    let resolution = resolver.resolve_resolution(series)?;
    if resolution != climatology.resolution() {
        return Err(ClimatologyError::ResolutionMismatch {
            table: climatology.resolution(),
            series: resolution,
        });
    }

    let positions = resolution
        .scheme()
        .period_indices(series.time().dates())
        .into_iter()
        .map(|period| {
            climatology
                .position_of(period)
                .ok_or(ClimatologyError::MissingPeriod { period })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let time_dim = series.time().name();
    let variables = series
        .variables()
        .par_iter()
        .map(|(name, var)| -> Result<(String, DataVariable), ClimatologyError> {
            let clim = climatology.field(name)?;
            let anomaly = anomaly_of(name, var, clim, time_dim, &positions)?;
            Ok((name.clone(), anomaly))
        })
        .collect::<Result<BTreeMap<_, _>, ClimatologyError>>()?;

    let derived = series
        .with_variables(variables)?
        .with_attr("description", ANOMALY_DESCRIPTION);
    debug!(?resolution, "computed detrended anomalies");
    Ok(AnomalyField { series: derived })
}

fn anomaly_of(
    name: &str,
    var: &DataVariable,
    clim: &Field,
    time_dim: &str,
    positions: &[usize],
) -> Result<DataVariable, ClimatologyError> {
    let (dims, mut data) = time_first(var, name, time_dim)?;
    if clim.dims()[1..] != dims[1..] {
        return Err(ClimatologyError::Shape {
            reason: format!(
                "climatology of '{name}' spans {:?}, variable spans {:?}",
                &clim.dims()[1..],
                &dims[1..]
            ),
        });
    }

    for (t, &k) in positions.iter().enumerate() {
        let mut row = data.index_axis_mut(Axis(0), t);
        row -= &clim.values().index_axis(Axis(0), k);
    }
    detrend_preserving_mask(&mut data);

    let mut attrs = var.attrs().clone();
    if let Some(long_name) = var.attr("long_name") {
        attrs.insert(
            "long_name".to_string(),
            format!("Detrended anomaly of {long_name}"),
        );
    }
    Ok(DataVariable::new(&dims, data).with_attrs(attrs))
}

/// Detrends every lane along axis 0 in place.
///
/// `NaN` entries are zero-filled for the fit and left as `NaN` in the output.
pub(crate) fn detrend_preserving_mask(data: &mut ArrayD<f64>) {
    for mut lane in data.lanes_mut(Axis(0)) {
        let filled: Vec<f64> = lane
            .iter()
            .map(|&v| if v.is_nan() { 0.0 } else { v })
            .collect();
        let trend_free = tellus_stats::detrend_linear(&filled);
        for (cell, d) in lane.iter_mut().zip(trend_free) {
            if !cell.is_nan() {
                *cell = d;
            }
        }
    }
}
