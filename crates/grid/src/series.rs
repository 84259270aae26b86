//! Validated gridded series: shared time axis, coordinates, and variables.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;

use crate::error::GridError;
use crate::variable::DataVariable;

/// A named coordinate axis with one value per grid index.
#[derive(Debug, Clone, PartialEq)]
pub struct Coordinate {
    name: String,
    values: Vec<f64>,
}

impl Coordinate {
    /// Creates a new coordinate axis.
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Axis name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Coordinate values, one per grid index.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of grid indices along this axis.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the axis has no values.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Indices whose coordinate value lies in the closed range spanned by `a` and `b`.
    pub fn indices_within(&self, a: f64, b: f64) -> Vec<usize> {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        self.values
            .iter()
            .enumerate()
            .filter(|&(_, &v)| v >= lo && v <= hi)
            .map(|(i, _)| i)
            .collect()
    }
}

/// The time axis shared by every variable of a series.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeAxis {
    name: String,
    dates: Vec<NaiveDate>,
}

impl TimeAxis {
    /// Creates a new time axis.
    pub fn new(name: impl Into<String>, dates: Vec<NaiveDate>) -> Self {
        Self {
            name: name.into(),
            dates,
        }
    }

    /// Axis name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sample dates in axis order.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Number of time samples.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Returns `true` if the axis has no samples.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

/// An immutable gridded time series.
///
/// Construction validates that every variable is declared over the time
/// axis plus a subset of the coordinates, and that array extents match the
/// axis lengths. Once built, a series is never mutated; derived products
/// are new series sharing the same axes.
#[derive(Debug, Clone)]
pub struct GriddedSeries {
    time: TimeAxis,
    coords: Vec<Coordinate>,
    variables: BTreeMap<String, DataVariable>,
    attrs: BTreeMap<String, String>,
}

impl GriddedSeries {
    /// Creates a new `GriddedSeries` after validating axes and variables.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`GridError::DuplicateAxis`] | two axes share a name |
    /// | [`GridError::UnknownDimension`] | a variable uses a dimension that is not an axis, or repeats one |
    /// | [`GridError::MissingDimension`] | a variable is not declared over the time axis |
    /// | [`GridError::DimensionMismatch`] | an array extent differs from its axis length |
    pub fn new(
        time: TimeAxis,
        coords: Vec<Coordinate>,
        variables: BTreeMap<String, DataVariable>,
    ) -> Result<Self, GridError> {
        let mut names = BTreeSet::new();
        names.insert(time.name().to_string());
        for coord in &coords {
            if !names.insert(coord.name().to_string()) {
                return Err(GridError::DuplicateAxis {
                    name: coord.name().to_string(),
                });
            }
        }

        let series = Self {
            time,
            coords,
            variables: BTreeMap::new(),
            attrs: BTreeMap::new(),
        };
        for (name, var) in &variables {
            series.validate_variable(name, var)?;
        }

        Ok(Self {
            variables,
            ..series
        })
    }

    fn validate_variable(&self, name: &str, var: &DataVariable) -> Result<(), GridError> {
        let dims = var.dims();
        let shape = var.data().shape();
        if dims.len() != shape.len() {
            return Err(GridError::DimensionMismatch {
                name: format!("{name} rank"),
                expected: dims.len(),
                got: shape.len(),
            });
        }

        let mut seen = BTreeSet::new();
        for (dim, &extent) in dims.iter().zip(shape) {
            if !seen.insert(dim.as_str()) {
                return Err(GridError::UnknownDimension {
                    variable: name.to_string(),
                    dim: dim.clone(),
                });
            }
            let expected = self
                .axis_len(dim)
                .ok_or_else(|| GridError::UnknownDimension {
                    variable: name.to_string(),
                    dim: dim.clone(),
                })?;
            if extent != expected {
                return Err(GridError::DimensionMismatch {
                    name: dim.clone(),
                    expected,
                    got: extent,
                });
            }
        }

        if !seen.contains(self.time.name()) {
            return Err(GridError::MissingDimension {
                variable: name.to_string(),
                dim: self.time.name().to_string(),
            });
        }
        Ok(())
    }

    /// Builds a series over the same axes with a new set of variables.
    ///
    /// # Errors
    ///
    /// Same validation failures as [`GriddedSeries::new`].
    pub fn with_variables(
        &self,
        variables: BTreeMap<String, DataVariable>,
    ) -> Result<Self, GridError> {
        Self::new(self.time.clone(), self.coords.clone(), variables)
    }

    /// Returns this series with a dataset-level attribute set.
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }

    /// The shared time axis.
    pub fn time(&self) -> &TimeAxis {
        &self.time
    }

    /// Coordinate axes in declaration order.
    pub fn coords(&self) -> &[Coordinate] {
        &self.coords
    }

    /// Looks up a coordinate axis by name.
    pub fn coordinate(&self, name: &str) -> Option<&Coordinate> {
        self.coords.iter().find(|c| c.name() == name)
    }

    /// All axis names: the time axis first, then coordinates in order.
    pub fn axis_names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.time.name()).chain(self.coords.iter().map(|c| c.name()))
    }

    /// Length of the named axis, if it exists.
    pub fn axis_len(&self, name: &str) -> Option<usize> {
        if name == self.time.name() {
            Some(self.time.len())
        } else {
            self.coordinate(name).map(Coordinate::len)
        }
    }

    /// Looks up a variable by name.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::MissingVariable`] if no variable has that name.
    pub fn variable(&self, name: &str) -> Result<&DataVariable, GridError> {
        self.variables
            .get(name)
            .ok_or_else(|| GridError::MissingVariable {
                name: name.to_string(),
            })
    }

    /// All variables keyed by name.
    pub fn variables(&self) -> &BTreeMap<String, DataVariable> {
        &self.variables
    }

    /// Variable names in ascending order.
    pub fn variable_names(&self) -> impl Iterator<Item = &str> {
        self.variables.keys().map(String::as_str)
    }

    /// Dataset-level attributes.
    pub fn attrs(&self) -> &BTreeMap<String, String> {
        &self.attrs
    }

    /// Looks up a dataset-level attribute.
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{ArrayD, IxDyn};

    fn monthly(n: u32) -> TimeAxis {
        let start = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
        TimeAxis::new(
            "time",
            (0..n).map(|i| start + chrono::Months::new(i)).collect(),
        )
    }

    fn coords() -> Vec<Coordinate> {
        vec![
            Coordinate::new("lat", vec![-1.0, 0.0, 1.0]),
            Coordinate::new("lon", vec![10.0, 20.0]),
        ]
    }

    fn var(dims: &[&str], shape: &[usize]) -> DataVariable {
        DataVariable::new(dims, ArrayD::zeros(IxDyn(shape)))
    }

    #[test]
    fn new_valid_series() {
        let mut vars = BTreeMap::new();
        vars.insert("sst".to_string(), var(&["time", "lat", "lon"], &[4, 3, 2]));
        let s = GriddedSeries::new(monthly(4), coords(), vars).unwrap();
        assert_eq!(s.time().len(), 4);
        assert_eq!(s.axis_len("lon"), Some(2));
        assert_eq!(s.variable_names().collect::<Vec<_>>(), vec!["sst"]);
        assert_eq!(
            s.axis_names().collect::<Vec<_>>(),
            vec!["time", "lat", "lon"]
        );
    }

    #[test]
    fn time_need_not_lead() {
        let mut vars = BTreeMap::new();
        vars.insert("sst".to_string(), var(&["lat", "lon", "time"], &[3, 2, 4]));
        assert!(GriddedSeries::new(monthly(4), coords(), vars).is_ok());
    }

    #[test]
    fn extent_mismatch_rejected() {
        let mut vars = BTreeMap::new();
        vars.insert("sst".to_string(), var(&["time", "lat", "lon"], &[4, 2, 2]));
        let err = GriddedSeries::new(monthly(4), coords(), vars).unwrap_err();
        assert_eq!(
            err,
            GridError::DimensionMismatch {
                name: "lat".into(),
                expected: 3,
                got: 2
            }
        );
    }

    #[test]
    fn unknown_dimension_rejected() {
        let mut vars = BTreeMap::new();
        vars.insert("sst".to_string(), var(&["time", "x"], &[4, 2]));
        let err = GriddedSeries::new(monthly(4), coords(), vars).unwrap_err();
        assert!(matches!(err, GridError::UnknownDimension { .. }));
    }

    #[test]
    fn missing_time_dimension_rejected() {
        let mut vars = BTreeMap::new();
        vars.insert("mask".to_string(), var(&["lat", "lon"], &[3, 2]));
        let err = GriddedSeries::new(monthly(4), coords(), vars).unwrap_err();
        assert!(matches!(err, GridError::MissingDimension { .. }));
    }

    #[test]
    fn duplicate_axis_rejected() {
        let mut c = coords();
        c.push(Coordinate::new("lat", vec![0.0]));
        let err = GriddedSeries::new(monthly(2), c, BTreeMap::new()).unwrap_err();
        assert!(matches!(err, GridError::DuplicateAxis { .. }));
    }

    #[test]
    fn missing_variable_lookup() {
        let s = GriddedSeries::new(monthly(2), coords(), BTreeMap::new()).unwrap();
        assert!(matches!(
            s.variable("sst"),
            Err(GridError::MissingVariable { .. })
        ));
    }

    #[test]
    fn indices_within_is_inclusive_and_order_free() {
        let c = Coordinate::new("lat", vec![10.0, 5.0, 0.0, -5.0, -10.0]);
        assert_eq!(c.indices_within(-5.0, 5.0), vec![1, 2, 3]);
        assert_eq!(c.indices_within(5.0, -5.0), vec![1, 2, 3]);
        assert!(c.indices_within(20.0, 30.0).is_empty());
    }

    #[test]
    fn series_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<GriddedSeries>();
    }
}
