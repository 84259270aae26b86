//! Canonical axis detection from flexible coordinate names.

use std::fmt;

use tellus_calendar::TimeResolution;

use crate::error::GridError;
use crate::series::GriddedSeries;

/// Kind of axis a coordinate plays in a gridded series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AxisKind {
    /// North-south coordinate.
    Latitude,
    /// East-west coordinate.
    Longitude,
    /// Sampling time.
    Time,
    /// Vertical level; index 0 is the surface.
    Depth,
}

impl fmt::Display for AxisKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Latitude => "latitude",
            Self::Longitude => "longitude",
            Self::Time => "time",
            Self::Depth => "depth",
        };
        f.write_str(name)
    }
}

/// Detects canonical axis names and the time resolution of a series.
///
/// Every stage resolves axes against the series it is handed (raw or
/// derived) rather than caching names from another series.
pub trait AxisResolver {
    /// Returns the name of the first axis of `series` matching `kind`, if any.
    fn find_axis(&self, series: &GriddedSeries, kind: AxisKind) -> Option<String>;

    /// Returns the aliases tried for `kind`.
    fn aliases(&self, kind: AxisKind) -> &[&'static str];

    /// Returns the name of the axis of `series` matching `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::AxisNotFound`] if no axis name matches.
    fn resolve_axis(&self, series: &GriddedSeries, kind: AxisKind) -> Result<String, GridError> {
        self.find_axis(series, kind)
            .ok_or_else(|| GridError::AxisNotFound {
                kind,
                aliases: self.aliases(kind).iter().map(|a| a.to_string()).collect(),
            })
    }

    /// Classifies the time axis of `series` as daily or monthly.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::Calendar`] if the time axis has fewer than two
    /// samples or its mean gap is outside both resolution bands.
    fn resolve_resolution(&self, series: &GriddedSeries) -> Result<TimeResolution, GridError> {
        Ok(TimeResolution::detect(series.time().dates())?)
    }
}

/// Fixed alias table matched by substring against axis names.
///
/// Axis names are searched in order: the time axis first, then the
/// coordinates in declaration order. The first name containing any alias
/// of the requested kind wins.
#[derive(Debug, Clone)]
pub struct AliasTable {
    latitude: &'static [&'static str],
    longitude: &'static [&'static str],
    time: &'static [&'static str],
    depth: &'static [&'static str],
}

impl AliasTable {
    /// Creates the standard alias table.
    ///
    /// | Kind | Aliases |
    /// |------|---------|
    /// | latitude | `lat`, `latitude` |
    /// | longitude | `lon`, `longitude` |
    /// | time | `time` |
    /// | depth | `depth` |
    pub const fn new() -> Self {
        Self {
            latitude: &["lat", "latitude"],
            longitude: &["lon", "longitude"],
            time: &["time"],
            depth: &["depth"],
        }
    }
}

impl Default for AliasTable {
    fn default() -> Self {
        Self::new()
    }
}

impl AxisResolver for AliasTable {
    fn find_axis(&self, series: &GriddedSeries, kind: AxisKind) -> Option<String> {
        let aliases = self.aliases(kind);
        series
            .axis_names()
            .find(|name| aliases.iter().any(|alias| name.contains(*alias)))
            .map(str::to_string)
    }

    fn aliases(&self, kind: AxisKind) -> &[&'static str] {
        match kind {
            AxisKind::Latitude => self.latitude,
            AxisKind::Longitude => self.longitude,
            AxisKind::Time => self.time,
            AxisKind::Depth => self.depth,
        }
    }
}
