//! Per-period climatological means.

use std::collections::BTreeMap;

use ndarray::{ArrayD, Axis};
use rayon::prelude::*;
use tellus_calendar::TimeResolution;
use tellus_grid::{AxisResolver, DataVariable, Field, GridError, GriddedSeries};
use tracing::debug;

use crate::error::ClimatologyError;

/// Seasonal means of every variable of a series, one slice per period.
///
/// Each field has the period dimension (`"dayofyear"` or `"month"`) first,
/// followed by the variable's non-time dimensions in their original order.
/// Only periods that occur in the source time axis are present.
#[derive(Debug, Clone, PartialEq)]
pub struct ClimatologyTable {
    resolution: TimeResolution,
    periods: Vec<u16>,
    fields: BTreeMap<String, Field>,
}

impl ClimatologyTable {
    /// Resolution the table was built at.
    pub fn resolution(&self) -> TimeResolution {
        self.resolution
    }

    /// Name of the leading period dimension.
    pub fn period_dim(&self) -> &'static str {
        self.resolution.scheme().dim_name()
    }

    /// Period indices in ascending order, one per slice along the period axis.
    pub fn periods(&self) -> &[u16] {
        &self.periods
    }

    /// Position of `period` along the period axis.
    pub fn position_of(&self, period: u16) -> Option<usize> {
        self.periods.binary_search(&period).ok()
    }

    /// Climatology of one variable.
    ///
    /// # Errors
    ///
    /// Returns [`ClimatologyError::MissingClimatology`] if the variable is unknown.
    pub fn field(&self, variable: &str) -> Result<&Field, ClimatologyError> {
        self.fields
            .get(variable)
            .ok_or_else(|| ClimatologyError::MissingClimatology {
                name: variable.to_string(),
            })
    }

    /// All fields keyed by variable name.
    pub fn fields(&self) -> &BTreeMap<String, Field> {
        &self.fields
    }
}

/// Computes the climatology of every variable in `series`.
///
/// Time samples are grouped by day-of-year (daily data) or month (monthly
/// data) and averaged per cell, skipping missing values. A cell whose
/// samples are all missing for a period is `NaN` for that period.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`ClimatologyError::Grid`] | time resolution cannot be classified |
#[tracing::instrument(skip_all, fields(n_variables = series.variables().len(), n_times = series.time().len()))]
pub fn compute_climatology(
    series: &GriddedSeries,
    resolver: &dyn AxisResolver,
) -> Result<ClimatologyTable, ClimatologyError> {
    let resolution = resolver.resolve_resolution(series)?;
    let scheme = resolution.scheme();
    let dates = series.time().dates();

    let periods = scheme.distinct_periods(dates);
    let mut groups = vec![Vec::new(); periods.len()];
    for (t, &date) in dates.iter().enumerate() {
        if let Ok(k) = periods.binary_search(&scheme.period_of(date)) {
            groups[k].push(t);
        }
    }

    let time_dim = series.time().name();
    let fields = series
        .variables()
        .par_iter()
        .map(|(name, var)| -> Result<(String, Field), ClimatologyError> {
            let field = climatology_of(name, var, time_dim, scheme.dim_name(), &groups)?;
            Ok((name.clone(), field))
        })
        .collect::<Result<BTreeMap<_, _>, ClimatologyError>>()?;

    debug!(?resolution, n_periods = periods.len(), "computed climatology");
    Ok(ClimatologyTable {
        resolution,
        periods,
        fields,
    })
}

fn climatology_of(
    name: &str,
    var: &DataVariable,
    time_dim: &str,
    period_dim: &str,
    groups: &[Vec<usize>],
) -> Result<Field, ClimatologyError> {
    let (dims, data) = time_first(var, name, time_dim)?;
    let means: Vec<ArrayD<f64>> = groups
        .iter()
        .map(|idx| {
            data.select(Axis(0), idx)
                .map_axis(Axis(0), |lane| tellus_stats::nan_mean(&lane.to_vec()))
        })
        .collect();
    let views: Vec<_> = means.iter().map(|m| m.view()).collect();
    let values = ndarray::stack(Axis(0), &views)?;

    let mut field_dims = vec![period_dim.to_string()];
    field_dims.extend(dims.into_iter().skip(1));
    Ok(Field::new(field_dims, values))
}

/// Reorders a variable so time is axis 0, returning the new dimension names
/// and a standard-layout copy of the data.
pub(crate) fn time_first(
    var: &DataVariable,
    name: &str,
    time_dim: &str,
) -> Result<(Vec<String>, ArrayD<f64>), GridError> {
    let axis = var
        .axis_of(time_dim)
        .ok_or_else(|| GridError::MissingDimension {
            variable: name.to_string(),
            dim: time_dim.to_string(),
        })?;
    let mut order: Vec<usize> = (0..var.dims().len()).collect();
    order.remove(axis);
    order.insert(0, axis);

    let dims = order.iter().map(|&i| var.dims()[i].clone()).collect();
    let data = var
        .data()
        .view()
        .permuted_axes(order)
        .as_standard_layout()
        .into_owned();
    Ok((dims, data))
}

/// Reduces the leading axis of a field with `f`, dropping that dimension.
pub(crate) fn reduce_leading(field: &Field, f: impl Fn(&[f64]) -> f64) -> Field {
    let values = field
        .values()
        .map_axis(Axis(0), |lane| f(&lane.to_vec()));
    Field::new(field.dims()[1..].to_vec(), values)
}
