//! # tellus-climatology
//!
//! Seasonal decomposition of gridded series: per-period climatologies,
//! detrended anomalies, annual amplitude, and variability summaries.
//!
//! ## Data Flow
//!
//! ```mermaid
//! graph LR
//!     A["GriddedSeries"] -->|"compute_climatology()?"| B["ClimatologyTable"]
//!     A -->|"compute_anomalies(series, &table)?"| C["AnomalyField"]
//!     B --> C
//!     B -->|"annual_amplitude()"| D["AmplitudeField"]
//!     B -->|"annual_std()?"| E["Field"]
//!     A -->|"temporal_std()?"| E
//!     C -->|"cycle_variability()?"| F["BandVariability"]
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use tellus_climatology::{annual_amplitude, compute_anomalies, compute_climatology};
//! use tellus_grid::AliasTable;
//!
//! let resolver = AliasTable::default();
//! let table = compute_climatology(&series, &resolver)?;
//! let anomalies = compute_anomalies(&series, &table, &resolver)?;
//! let amplitude = annual_amplitude(&table);
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`climatology`] | Group-by-period NaN-skipping means |
//! | [`anomaly`] | Periodic subtraction and mask-preserving detrend |
//! | [`amplitude`] | Half peak-to-trough range of the climatology |
//! | [`variability`] | Temporal, annual, and band-split standard deviations |

pub mod amplitude;
pub mod anomaly;
pub mod climatology;
mod error;
pub mod variability;

pub use amplitude::{AmplitudeField, annual_amplitude};
pub use anomaly::{ANOMALY_DESCRIPTION, AnomalyField, compute_anomalies};
pub use climatology::{ClimatologyTable, compute_climatology};
pub use error::ClimatologyError;
pub use variability::{BandConfig, BandVariability, annual_std, cycle_variability, temporal_std};
