//! Daily / monthly classification of a time axis.

use chrono::NaiveDate;
use tracing::debug;

use crate::error::CalendarError;
use crate::period::{DAY_OF_YEAR, MONTH, PeriodScheme};

/// Mean gaps strictly below this many days are classified as daily.
pub const DAILY_MAX_GAP_DAYS: f64 = 2.0;

/// Mean gaps strictly below this many days (and at least
/// [`DAILY_MAX_GAP_DAYS`]) are classified as monthly.
pub const MONTHLY_MAX_GAP_DAYS: f64 = 32.0;

/// Sampling resolution of a time axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeResolution {
    /// One sample per day; periods are days of the year (1..=366).
    Daily,
    /// One sample per month; periods are calendar months (1..=12).
    Monthly,
}

impl TimeResolution {
    /// Classifies a time axis from the mean gap between consecutive samples.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`CalendarError::TooFewTimeSteps`] | fewer than 2 dates |
    /// | [`CalendarError::UnsupportedResolution`] | mean gap of 32 days or more |
    pub fn detect(dates: &[NaiveDate]) -> Result<Self, CalendarError> {
        let gap = mean_gap_days(dates)?;
        let resolution = Self::from_mean_gap(gap)?;
        debug!(mean_gap_days = gap, ?resolution, "detected time resolution");
        Ok(resolution)
    }

    /// Classifies a mean sample gap expressed in days.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::UnsupportedResolution`] if `mean_gap_days`
    /// is at least [`MONTHLY_MAX_GAP_DAYS`] or not a number.
    pub fn from_mean_gap(mean_gap_days: f64) -> Result<Self, CalendarError> {
        if mean_gap_days < DAILY_MAX_GAP_DAYS {
            Ok(Self::Daily)
        } else if mean_gap_days < MONTHLY_MAX_GAP_DAYS {
            Ok(Self::Monthly)
        } else {
            Err(CalendarError::UnsupportedResolution { mean_gap_days })
        }
    }

    /// Returns the period scheme used to group samples at this resolution.
    pub fn scheme(self) -> &'static PeriodScheme {
        match self {
            Self::Daily => &DAY_OF_YEAR,
            Self::Monthly => &MONTH,
        }
    }
}

/// Mean gap in whole days between consecutive dates.
///
/// # Errors
///
/// Returns [`CalendarError::TooFewTimeSteps`] if fewer than 2 dates are given.
pub fn mean_gap_days(dates: &[NaiveDate]) -> Result<f64, CalendarError> {
    if dates.len() < 2 {
        return Err(CalendarError::TooFewTimeSteps { len: dates.len() });
    }
    let total: i64 = dates
        .windows(2)
        .map(|w| w[1].signed_duration_since(w[0]).num_days())
        .sum();
    Ok(total as f64 / (dates.len() - 1) as f64)
}
