//! Error types for the tellus-spectral crate.

/// Error type for all fallible operations in the tellus-spectral crate.
///
/// Covers input validation, configuration problems, and failures while
/// deriving significance thresholds.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SpectralError {
    /// Returned when the input series is shorter than the minimum required length.
    #[error("series too short: got {len} observations, need at least {min}")]
    SeriesTooShort {
        /// Number of observations provided.
        len: usize,
        /// Minimum number of observations required.
        min: usize,
    },

    /// Returned when the input data contains non-finite values (NaN or infinity).
    #[error("input data contains non-finite values")]
    NonFiniteData,

    /// Returned when the reduced series carries no usable observation at all.
    #[error("insufficient data: {reason}")]
    InsufficientData {
        /// Why the series is unusable.
        reason: String,
    },

    /// Returned when a configuration parameter is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Returned when the significance threshold cannot be derived.
    #[error("significance computation failed: {0}")]
    SignificanceFailed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_series_too_short() {
        let err = SpectralError::SeriesTooShort { len: 3, min: 4 };
        assert_eq!(
            err.to_string(),
            "series too short: got 3 observations, need at least 4"
        );
    }

    #[test]
    fn error_non_finite_data() {
        let err = SpectralError::NonFiniteData;
        assert_eq!(err.to_string(), "input data contains non-finite values");
    }

    #[test]
    fn error_insufficient_data() {
        let err = SpectralError::InsufficientData {
            reason: "every sample is missing".into(),
        };
        assert_eq!(
            err.to_string(),
            "insufficient data: every sample is missing"
        );
    }

    #[test]
    fn error_invalid_config() {
        let err = SpectralError::InvalidConfig("dj must be > 0".into());
        assert_eq!(err.to_string(), "invalid configuration: dj must be > 0");
    }

    #[test]
    fn error_significance_failed() {
        let err = SpectralError::SignificanceFailed("bad dof".into());
        assert_eq!(err.to_string(), "significance computation failed: bad dof");
    }

    #[test]
    fn error_is_std_error() {
        fn assert_impl<T: std::error::Error>() {}
        assert_impl::<SpectralError>();
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<SpectralError>();
    }
}
