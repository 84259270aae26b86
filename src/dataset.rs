//! JSON dataset format: read into and write from a [`GriddedSeries`].
//!
//! ```json
//! {
//!   "time": { "name": "time", "dates": ["2000-01-01", "2000-02-01"] },
//!   "coords": [{ "name": "lat", "values": [-1.0, 1.0] }],
//!   "variables": {
//!     "sst": { "dims": ["time", "lat"], "values": [1.0, null, 2.0, 3.0], "attrs": {} }
//!   },
//!   "attrs": {}
//! }
//! ```
//!
//! Variable values are flattened in row-major order over `dims`; `null`
//! marks a missing value.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use ndarray::{ArrayD, IxDyn};
use serde::{Deserialize, Serialize};

use tellus_grid::{Coordinate, DataVariable, GriddedSeries, TimeAxis};

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct DatasetFile {
    time: TimeFile,
    #[serde(default)]
    coords: Vec<CoordFile>,
    variables: BTreeMap<String, VariableFile>,
    #[serde(default)]
    attrs: BTreeMap<String, String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct TimeFile {
    #[serde(default = "default_time_name")]
    name: String,
    dates: Vec<NaiveDate>,
}

fn default_time_name() -> String {
    "time".to_string()
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct CoordFile {
    name: String,
    values: Vec<f64>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct VariableFile {
    dims: Vec<String>,
    values: Vec<Option<f64>>,
    #[serde(default)]
    attrs: BTreeMap<String, String>,
}

/// Reads a JSON dataset from `path`.
pub fn read_dataset(path: &Path) -> Result<GriddedSeries> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read dataset: {}", path.display()))?;
    parse_dataset(&json).with_context(|| format!("invalid dataset: {}", path.display()))
}

/// Writes `series` as a JSON dataset to `path`.
pub fn write_dataset(path: &Path, series: &GriddedSeries) -> Result<()> {
    let json = serde_json::to_string_pretty(&to_file(series))
        .context("failed to serialize dataset")?;
    std::fs::write(path, json)
        .with_context(|| format!("failed to write dataset: {}", path.display()))
}

fn parse_dataset(json: &str) -> Result<GriddedSeries> {
    let file: DatasetFile = serde_json::from_str(json).context("failed to parse dataset JSON")?;

    let mut lengths: BTreeMap<&str, usize> = BTreeMap::new();
    lengths.insert(&file.time.name, file.time.dates.len());
    for coord in &file.coords {
        lengths.insert(&coord.name, coord.values.len());
    }

    let mut variables = BTreeMap::new();
    for (name, var) in &file.variables {
        let shape = var
            .dims
            .iter()
            .map(|d| {
                lengths
                    .get(d.as_str())
                    .copied()
                    .with_context(|| format!("variable '{name}' uses unknown dimension '{d}'"))
            })
            .collect::<Result<Vec<_>>>()?;
        let expected: usize = shape.iter().product();
        if var.values.len() != expected {
            bail!(
                "variable '{name}' has {} values, dims {:?} need {expected}",
                var.values.len(),
                var.dims
            );
        }
        let values: Vec<f64> = var.values.iter().map(|v| v.unwrap_or(f64::NAN)).collect();
        let data = ArrayD::from_shape_vec(IxDyn(&shape), values)
            .with_context(|| format!("variable '{name}' has an invalid shape"))?;
        variables.insert(
            name.clone(),
            DataVariable::new(var.dims.as_slice(), data).with_attrs(var.attrs.clone()),
        );
    }

    let coords = file
        .coords
        .into_iter()
        .map(|c| Coordinate::new(c.name, c.values))
        .collect();
    let time = TimeAxis::new(file.time.name, file.time.dates);
    let mut series =
        GriddedSeries::new(time, coords, variables).context("inconsistent dataset")?;
    for (key, value) in file.attrs {
        series = series.with_attr(key, value);
    }
    Ok(series)
}

fn to_file(series: &GriddedSeries) -> DatasetFile {
    DatasetFile {
        time: TimeFile {
            name: series.time().name().to_string(),
            dates: series.time().dates().to_vec(),
        },
        coords: series
            .coords()
            .iter()
            .map(|c| CoordFile {
                name: c.name().to_string(),
                values: c.values().to_vec(),
            })
            .collect(),
        variables: series
            .variables()
            .iter()
            .map(|(name, var)| {
                let file = VariableFile {
                    dims: var.dims().to_vec(),
                    values: var
                        .data()
                        .iter()
                        .map(|&v| if v.is_nan() { None } else { Some(v) })
                        .collect(),
                    attrs: var.attrs().clone(),
                };
                (name.clone(), file)
            })
            .collect(),
        attrs: series.attrs().clone(),
    }
}
