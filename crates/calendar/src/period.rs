//! Seasonal period schemes keyed by [`TimeResolution`].
//!
//! Each resolution maps to one static [`PeriodScheme`], so grouping and
//! broadcasting code dispatches through the scheme instead of matching on
//! the resolution itself.

use chrono::{Datelike, NaiveDate};

use crate::resolution::TimeResolution;

/// How dates are grouped into recurring periods for one resolution.
#[derive(Debug)]
pub struct PeriodScheme {
    resolution: TimeResolution,
    dim_name: &'static str,
    max_period: u16,
    index: fn(NaiveDate) -> u16,
}

/// Day-of-year grouping (1..=366) for daily data.
pub(crate) static DAY_OF_YEAR: PeriodScheme = PeriodScheme {
    resolution: TimeResolution::Daily,
    dim_name: "dayofyear",
    max_period: 366,
    index: day_of_year,
};

/// Calendar-month grouping (1..=12) for monthly data.
pub(crate) static MONTH: PeriodScheme = PeriodScheme {
    resolution: TimeResolution::Monthly,
    dim_name: "month",
    max_period: 12,
    index: month,
};

fn day_of_year(date: NaiveDate) -> u16 {
    date.ordinal() as u16
}

fn month(date: NaiveDate) -> u16 {
    date.month() as u16
}

impl PeriodScheme {
    /// Returns the resolution this scheme belongs to.
    pub fn resolution(&self) -> TimeResolution {
        self.resolution
    }

    /// Returns the name of the period dimension (`"dayofyear"` or `"month"`).
    pub fn dim_name(&self) -> &'static str {
        self.dim_name
    }

    /// Returns the largest possible period index.
    pub fn max_period(&self) -> u16 {
        self.max_period
    }

    /// Returns the period index of a date.
    pub fn period_of(&self, date: NaiveDate) -> u16 {
        (self.index)(date)
    }

    /// Returns the period index of every date, in order.
    pub fn period_indices(&self, dates: &[NaiveDate]) -> Vec<u16> {
        dates.iter().map(|&d| self.period_of(d)).collect()
    }

    /// Returns the distinct periods present in `dates`, ascending.
    pub fn distinct_periods(&self, dates: &[NaiveDate]) -> Vec<u16> {
        let mut seen = vec![false; self.max_period as usize + 1];
        for &d in dates {
            seen[self.period_of(d) as usize] = true;
        }
        seen.iter()
            .enumerate()
            .filter(|&(_, &s)| s)
            .map(|(p, _)| p as u16)
            .collect()
    }
}
