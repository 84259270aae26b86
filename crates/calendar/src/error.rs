//! Error types for the tellus-calendar crate.

/// Error type for all fallible operations in the tellus-calendar crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalendarError {
    /// Returned when the mean spacing of the time axis is neither daily nor monthly.
    #[error("unsupported time resolution: mean gap of {mean_gap_days} days (expected < 32)")]
    UnsupportedResolution {
        /// Mean gap between consecutive time samples, in days.
        mean_gap_days: f64,
    },

    /// Returned when the time axis has too few samples to define a gap.
    #[error("time axis too short: got {len} samples, need at least 2")]
    TooFewTimeSteps {
        /// Number of time samples provided.
        len: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_unsupported_resolution() {
        let err = CalendarError::UnsupportedResolution {
            mean_gap_days: 365.0,
        };
        assert_eq!(
            err.to_string(),
            "unsupported time resolution: mean gap of 365 days (expected < 32)"
        );
    }

    #[test]
    fn error_too_few_time_steps() {
        let err = CalendarError::TooFewTimeSteps { len: 1 };
        assert_eq!(
            err.to_string(),
            "time axis too short: got 1 samples, need at least 2"
        );
    }

    #[test]
    fn error_is_std_error() {
        fn assert_impl<T: std::error::Error>() {}
        assert_impl::<CalendarError>();
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<CalendarError>();
    }
}
