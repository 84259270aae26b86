//! Error types for the tellus-climatology crate.

use tellus_calendar::TimeResolution;
use tellus_grid::GridError;

/// Error type for all fallible operations in the tellus-climatology crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ClimatologyError {
    /// Returned when a climatology table has no entry for a variable.
    #[error("no climatology for variable '{name}'")]
    MissingClimatology {
        /// Name of the variable.
        name: String,
    },

    /// Returned when a date maps to a period absent from the climatology table.
    #[error("no climatology entry for period {period}")]
    MissingPeriod {
        /// Period index (day-of-year or month).
        period: u16,
    },

    /// Returned when a climatology is applied to a series of another resolution.
    #[error("resolution mismatch: climatology is {table:?}, series is {series:?}")]
    ResolutionMismatch {
        /// Resolution the table was built at.
        table: TimeResolution,
        /// Resolution detected on the series.
        series: TimeResolution,
    },

    /// Returned when the rolling window length is zero.
    #[error("rolling window must be at least 1 sample, got {window}")]
    InvalidWindow {
        /// Requested window length.
        window: usize,
    },

    /// Returned when per-period fields cannot be stacked into a table.
    #[error("invalid climatology shape: {reason}")]
    Shape {
        /// Description of the shape problem.
        reason: String,
    },

    /// Wrapped error from the tellus-grid crate, including calendar failures.
    #[error(transparent)]
    Grid(#[from] GridError),
}

impl From<ndarray::ShapeError> for ClimatologyError {
    fn from(e: ndarray::ShapeError) -> Self {
        ClimatologyError::Shape {
            reason: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tellus_calendar::CalendarError;

    #[test]
    fn display_missing_climatology() {
        let err = ClimatologyError::MissingClimatology { name: "sst".into() };
        assert_eq!(err.to_string(), "no climatology for variable 'sst'");
    }

    #[test]
    fn display_resolution_mismatch() {
        let err = ClimatologyError::ResolutionMismatch {
            table: TimeResolution::Monthly,
            series: TimeResolution::Daily,
        };
        assert_eq!(
            err.to_string(),
            "resolution mismatch: climatology is Monthly, series is Daily"
        );
    }

    #[test]
    fn display_invalid_window() {
        let err = ClimatologyError::InvalidWindow { window: 0 };
        assert_eq!(
            err.to_string(),
            "rolling window must be at least 1 sample, got 0"
        );
    }

    #[test]
    fn calendar_error_arrives_through_grid() {
        let err: ClimatologyError = GridError::from(CalendarError::UnsupportedResolution {
            mean_gap_days: 365.0,
        })
        .into();
        assert!(matches!(
            err,
            ClimatologyError::Grid(GridError::Calendar(_))
        ));
        assert!(err.to_string().contains("365"));
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync + std::error::Error>() {}
        assert_impl::<ClimatologyError>();
    }
}
