//! Error types for the tellus-analysis crate.

use tellus_climatology::ClimatologyError;
use tellus_grid::GridError;
use tellus_spectral::SpectralError;

/// Error type for all fallible operations of an [`AnalysisSession`](crate::AnalysisSession).
///
/// `Clone` so a failed artifact can be cached and handed out again.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AnalysisError {
    /// Axis resolution, variable lookup, or regional reduction failed.
    #[error(transparent)]
    Grid(#[from] GridError),

    /// Climatology, anomaly, or variability computation failed.
    #[error(transparent)]
    Climatology(#[from] ClimatologyError),

    /// Spectral analysis of the reduced series failed.
    #[error(transparent)]
    Spectral(#[from] SpectralError),
}
