//! # tellus-grid
//!
//! In-memory data model for gridded geophysical time series: a shared time
//! axis, named coordinate axes (latitude, longitude, optional depth), and
//! any number of variables stored as N-dimensional arrays with named
//! dimensions. Missing observations are `NaN`.
//!
//! ## Data Flow
//!
//! ```mermaid
//! graph LR
//!     A["TimeAxis + Coordinates + DataVariables"] -->|"GriddedSeries::new()?"| B["GriddedSeries"]
//!     B -->|"AxisResolver::resolve_axis()"| C["canonical axis name"]
//!     B -->|"AxisResolver::resolve_resolution()"| D["TimeResolution"]
//!     B -->|"box_mean()"| E["BoxSeries (1-D)"]
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use tellus_grid::{AliasTable, AxisKind, AxisResolver, GriddedSeries, SpatialBox, TimeWindow, box_mean};
//!
//! let series = GriddedSeries::new(time, coords, variables)?;
//! let lat = AliasTable::default().resolve_axis(&series, AxisKind::Latitude)?;
//! let region = SpatialBox::new(-170.0, -120.0, -5.0, 5.0);
//! let nino34 = box_mean(&series, "sst", &region, &TimeWindow::all(), &AliasTable::default())?;
//! ```

mod axis;
mod error;
mod region;
mod series;
mod variable;

pub use axis::{AliasTable, AxisKind, AxisResolver};
pub use error::GridError;
pub use region::{BoxSeries, SpatialBox, TimeWindow, box_mean};
pub use series::{Coordinate, GriddedSeries, TimeAxis};
pub use variable::{DataVariable, Field};
