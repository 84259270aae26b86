//! # tellus-analysis
//!
//! A cached analysis session over one gridded series. Dependent artifacts
//! are computed on first request and kept for the session's lifetime;
//! spectral analyses run on demand against a regional mean of the raw data
//! or of the detrended anomalies.
//!
//! ## Artifact Graph
//!
//! ```mermaid
//! graph LR
//!     S["GriddedSeries"] -->|"compute_climatology"| C["Climatology"]
//!     C -->|"compute_anomalies"| A["Anomalies"]
//!     C -->|"annual_amplitude"| M["Amplitude"]
//!     S -->|"box_mean"| R["regional mean"]
//!     A -->|"box_mean"| R
//!     R -->|"significant_periods"| F["SignificantPeriods"]
//!     R -->|"wavelet_analysis"| W["WaveletResult"]
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use tellus_analysis::{AnalysisSession, SeriesSelection};
//! use tellus_grid::SpatialBox;
//! use tellus_spectral::FftConfig;
//!
//! let session = AnalysisSession::new(series);
//! let nino34 = SeriesSelection::new("sst", SpatialBox::new(-170.0, -120.0, -5.0, 5.0));
//! let periods = session.significant_periods(&nino34, &FftConfig::new())?;
//! println!("significant periods: {periods}");
//! ```

mod artifact;
mod error;
mod session;

pub use artifact::Artifact;
pub use error::AnalysisError;
pub use session::{AnalysisSession, SeriesSelection};
