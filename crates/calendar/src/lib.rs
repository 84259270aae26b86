//! # tellus-calendar
//!
//! Classifies the sampling of a time axis and maps dates onto the recurring
//! seasonal periods used for climatologies.
//!
//! ## Architecture
//!
//! ```mermaid
//! graph LR
//!     A["&[NaiveDate]"] -->|"TimeResolution::detect()"| B["TimeResolution"]
//!     B -->|".scheme()"| C["PeriodScheme"]
//!     C -->|".period_of(date)"| D["period index"]
//!     C -->|".period_indices(dates)"| E["Vec of period index"]
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use chrono::NaiveDate;
//! use tellus_calendar::TimeResolution;
//!
//! let resolution = TimeResolution::detect(&dates)?;
//! let scheme = resolution.scheme();
//! let month = scheme.period_of(NaiveDate::from_ymd_opt(2000, 3, 15).unwrap()); // 3
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `resolution` | Daily / monthly classification from the mean sample gap |
//! | `period` | Day-of-year and month period schemes, keyed by resolution |
//! | `error` | Error types |

mod error;
mod period;
mod resolution;

pub use error::CalendarError;
pub use period::PeriodScheme;
pub use resolution::{DAILY_MAX_GAP_DAYS, MONTHLY_MAX_GAP_DAYS, TimeResolution, mean_gap_days};
