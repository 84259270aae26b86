//! Reduction of a gridded variable to one regional-mean time series.

use chrono::NaiveDate;
use ndarray::Axis;
use tracing::debug;

use crate::axis::{AxisKind, AxisResolver};
use crate::error::GridError;
use crate::series::GriddedSeries;

/// A longitude/latitude box with inclusive bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpatialBox {
    /// Western longitude bound.
    pub lon_min: f64,
    /// Eastern longitude bound.
    pub lon_max: f64,
    /// Southern latitude bound.
    pub lat_min: f64,
    /// Northern latitude bound.
    pub lat_max: f64,
}

impl SpatialBox {
    /// Creates a new box.
    pub fn new(lon_min: f64, lon_max: f64, lat_min: f64, lat_max: f64) -> Self {
        Self {
            lon_min,
            lon_max,
            lat_min,
            lat_max,
        }
    }
}

/// An optional inclusive date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimeWindow {
    /// First date kept, if bounded.
    pub start: Option<NaiveDate>,
    /// Last date kept, if bounded.
    pub end: Option<NaiveDate>,
}

impl TimeWindow {
    /// A window that keeps every sample.
    pub fn all() -> Self {
        Self::default()
    }

    /// A window bounded on both sides.
    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    /// Returns `true` if `date` falls inside the window.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.is_none_or(|s| date >= s) && self.end.is_none_or(|e| date <= e)
    }
}

/// A regional-mean time series.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxSeries {
    dates: Vec<NaiveDate>,
    values: Vec<f64>,
}

impl BoxSeries {
    /// Sample dates.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Box-mean values; `NaN` where no cell in the box had data.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Consumes the series and returns its values.
    pub fn into_values(self) -> Vec<f64> {
        self.values
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if no samples remain.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns `true` if every value is missing (or there are none).
    pub fn is_all_missing(&self) -> bool {
        self.values.iter().all(|v| !v.is_finite())
    }
}

/// Averages `variable` over a longitude/latitude box for each time sample.
///
/// Coordinate names are resolved on `series` itself. If the variable has a
/// depth dimension, the surface level (index 0) is taken first. Cells are
/// selected by inclusive coordinate value range; any remaining non-time
/// dimension is averaged in full. Missing cells are skipped, so a time step
/// is `NaN` only when every selected cell is missing.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`GridError::AxisNotFound`] | no latitude or longitude axis |
/// | [`GridError::MissingVariable`] | `variable` is not in `series` |
/// | [`GridError::MissingDimension`] | the variable is not declared over latitude or longitude |
pub fn box_mean(
    series: &GriddedSeries,
    variable: &str,
    region: &SpatialBox,
    window: &TimeWindow,
    resolver: &dyn AxisResolver,
) -> Result<BoxSeries, GridError> {
    let lon_name = resolver.resolve_axis(series, AxisKind::Longitude)?;
    let lat_name = resolver.resolve_axis(series, AxisKind::Latitude)?;

    let mut var = series.variable(variable)?.clone();
    if let Some(depth) = resolver.find_axis(series, AxisKind::Depth) {
        var = var.surface(&depth);
    }

    let axis_of = |dim: &str| {
        var.axis_of(dim).ok_or_else(|| GridError::MissingDimension {
            variable: variable.to_string(),
            dim: dim.to_string(),
        })
    };
    let time_axis = axis_of(series.time().name())?;
    let lon_axis = axis_of(&lon_name)?;
    let lat_axis = axis_of(&lat_name)?;

    let lon_keep = keep_mask(series, &lon_name, region.lon_min, region.lon_max);
    let lat_keep = keep_mask(series, &lat_name, region.lat_min, region.lat_max);

    // Positions after the time axis is removed.
    let shift = |axis: usize| if axis > time_axis { axis - 1 } else { axis };
    let (lon_pos, lat_pos) = (shift(lon_axis), shift(lat_axis));

    let mut dates = Vec::new();
    let mut values = Vec::new();
    for (t, &date) in series.time().dates().iter().enumerate() {
        if !window.contains(date) {
            continue;
        }
        let slice = var.data().index_axis(Axis(time_axis), t);
        let selected: Vec<f64> = slice
            .indexed_iter()
            .filter(|(ix, _)| lon_keep[ix[lon_pos]] && lat_keep[ix[lat_pos]])
            .map(|(_, &v)| v)
            .collect();
        dates.push(date);
        values.push(tellus_stats::nan_mean(&selected));
    }

    debug!(
        variable,
        n_lon = lon_keep.iter().filter(|&&k| k).count(),
        n_lat = lat_keep.iter().filter(|&&k| k).count(),
        n_times = values.len(),
        "reduced box mean"
    );
    Ok(BoxSeries { dates, values })
}

fn keep_mask(series: &GriddedSeries, axis: &str, a: f64, b: f64) -> Vec<bool> {
    let coord = series.coordinate(axis);
    let len = coord.map_or(0, |c| c.len());
    let mut keep = vec![false; len];
    if let Some(c) = coord {
        for i in c.indices_within(a, b) {
            keep[i] = true;
        }
    }
    keep
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_all_contains_everything() {
        let d = NaiveDate::from_ymd_opt(1900, 1, 1).unwrap();
        assert!(TimeWindow::all().contains(d));
    }

    #[test]
    fn window_is_inclusive() {
        let a = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
        let b = NaiveDate::from_ymd_opt(2000, 12, 1).unwrap();
        let w = TimeWindow::between(a, b);
        assert!(w.contains(a));
        assert!(w.contains(b));
        assert!(!w.contains(NaiveDate::from_ymd_opt(2001, 1, 1).unwrap()));
    }

    #[test]
    fn open_ended_window() {
        let a = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
        let w = TimeWindow {
            start: Some(a),
            end: None,
        };
        assert!(w.contains(NaiveDate::from_ymd_opt(2100, 1, 1).unwrap()));
        assert!(!w.contains(NaiveDate::from_ymd_opt(1999, 12, 31).unwrap()));
    }
}
