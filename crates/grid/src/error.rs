//! Error types for the tellus-grid crate.

use tellus_calendar::CalendarError;

use crate::axis::AxisKind;

/// Error type for all fallible operations in the tellus-grid crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GridError {
    /// Returned when no coordinate name matches any alias of the requested axis.
    #[error("{kind} axis not found: no coordinate matches {aliases:?}")]
    AxisNotFound {
        /// Axis that could not be resolved.
        kind: AxisKind,
        /// Aliases that were tried.
        aliases: Vec<String>,
    },

    /// Returned when a variable name is not present in the series.
    #[error("variable '{name}' not found")]
    MissingVariable {
        /// Name of the missing variable.
        name: String,
    },

    /// Returned when a variable is declared over a dimension that is not an axis of the series.
    #[error("variable '{variable}' uses unknown dimension '{dim}'")]
    UnknownDimension {
        /// Name of the variable.
        variable: String,
        /// Name of the unknown dimension.
        dim: String,
    },

    /// Returned when a variable lacks a dimension an operation needs.
    #[error("variable '{variable}' has no '{dim}' dimension")]
    MissingDimension {
        /// Name of the variable.
        variable: String,
        /// Name of the required dimension.
        dim: String,
    },

    /// Returned when an axis name is used twice.
    #[error("duplicate axis name '{name}'")]
    DuplicateAxis {
        /// The repeated name.
        name: String,
    },

    /// Returned when an array or axis has an unexpected length.
    #[error("dimension '{name}' mismatch: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Name of the dimension.
        name: String,
        /// Expected size.
        expected: usize,
        /// Actual size.
        got: usize,
    },

    /// Wrapped error from the tellus-calendar crate.
    #[error(transparent)]
    Calendar(#[from] CalendarError),
}
