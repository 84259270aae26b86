//! Annual amplitude of the climatological cycle.

use std::collections::BTreeMap;

use tellus_grid::Field;
use tracing::debug;

use crate::climatology::{ClimatologyTable, reduce_leading};
use crate::error::ClimatologyError;

/// Half the peak-to-trough range of each variable's climatology, per cell.
#[derive(Debug, Clone, PartialEq)]
pub struct AmplitudeField {
    fields: BTreeMap<String, Field>,
}

impl AmplitudeField {
    /// Amplitude of one variable.
    ///
    /// # Errors
    ///
    /// Returns [`ClimatologyError::MissingClimatology`] if the variable is unknown.
    pub fn field(&self, variable: &str) -> Result<&Field, ClimatologyError> {
        self.fields
            .get(variable)
            .ok_or_else(|| ClimatologyError::MissingClimatology {
                name: variable.to_string(),
            })
    }

    /// All fields keyed by variable name.
    pub fn fields(&self) -> &BTreeMap<String, Field> {
        &self.fields
    }
}

/// Computes `(max - min) / 2` over the period axis for every variable.
///
/// Missing periods are skipped; a cell with no finite period is `NaN`.
pub fn annual_amplitude(climatology: &ClimatologyTable) -> AmplitudeField {
    let fields = climatology
        .fields()
        .iter()
        .map(|(name, field)| (name.clone(), reduce_leading(field, half_range)))
        .collect();
    debug!(n_variables = climatology.fields().len(), "computed annual amplitude");
    AmplitudeField { fields }
}

fn half_range(values: &[f64]) -> f64 {
    (tellus_stats::nan_max(values) - tellus_stats::nan_min(values)) / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn half_range_basic() {
        assert_eq!(half_range(&[1.0, -3.0, 5.0]), 4.0);
        assert_eq!(half_range(&[2.0, f64::NAN, 2.0]), 0.0);
        assert!(half_range(&[f64::NAN]).is_nan());
    }
}
