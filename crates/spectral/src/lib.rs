//! # tellus-spectral
//!
//! Dominant-period detection for a single regional-mean series: a Fourier
//! significant-period detector and a Morlet wavelet analyzer with a global
//! chi-squared significance test.
//!
//! ## Analysis Pipeline
//!
//! ```mermaid
//! graph LR
//!     A["TimeSeries::from_reduced(values)?"] -->|"validate"| B["TimeSeries"]
//!     B -->|"significant_periods(&ts, &FftConfig)?"| C["SignificantPeriods"]
//!     B -->|"cwt_morlet(&ts, &CwtConfig)?"| D["CwtResult"]
//!     D -->|"global_significance(&cwt, &SignificanceConfig)?"| E["GlobalSignificance"]
//!     B -->|"wavelet_analysis(&ts, ..)?"| F["WaveletResult"]
//! ```
//!
//! ## Modules
//!
//! | Module | Provides |
//! |--------|----------|
//! | `fft` | [`power_spectrum`], [`significant_periods`] |
//! | `cwt` | [`cwt_morlet`] with Torrence & Compo scales and cone of influence |
//! | `significance` | [`global_significance`] |
//! | `wavelet` | [`wavelet_analysis`], restricted to periods in `[1, max]` |
//!
//! ## Quick Start
//!
//! ```ignore
//! use tellus_spectral::{FftConfig, TimeSeries, significant_periods};
//!
//! let ts = TimeSeries::from_reduced(regional_mean)?;
//! let periods = significant_periods(&ts, &FftConfig::new())?;
//! println!("significant periods: {periods}");
//! ```

mod cwt;
mod error;
mod fft;
mod series;
mod significance;
mod wavelet;

pub use cwt::{CwtConfig, CwtResult, cwt_morlet};
pub use error::SpectralError;
pub use fft::{FftConfig, PowerSpectrum, SignificantPeriods, power_spectrum, significant_periods};
pub use series::TimeSeries;
pub use significance::{GlobalSignificance, SignificanceConfig, global_significance};
pub use wavelet::{WaveletResult, wavelet_analysis};
