//! Compute-once analysis session over one gridded series.

use std::sync::OnceLock;

use tellus_calendar::TimeResolution;
use tellus_climatology::{
    AmplitudeField, AnomalyField, BandConfig, BandVariability, ClimatologyTable, annual_amplitude,
    annual_std, compute_anomalies, compute_climatology, cycle_variability, temporal_std,
};
use tellus_grid::{AliasTable, AxisResolver, BoxSeries, Field, GriddedSeries, SpatialBox, TimeWindow, box_mean};
use tellus_spectral::{
    CwtConfig, FftConfig, SignificanceConfig, SignificantPeriods, TimeSeries, WaveletResult,
};
use tracing::debug;

use crate::artifact::Artifact;
use crate::error::AnalysisError;

type Slot<T> = OnceLock<Result<T, AnalysisError>>;

/// Variable, region, and time window to reduce to a regional-mean series.
///
/// # Example
///
/// ```ignore
/// use tellus_analysis::SeriesSelection;
/// use tellus_grid::{SpatialBox, TimeWindow};
///
/// let selection = SeriesSelection::new("sst", SpatialBox::new(-170.0, -120.0, -5.0, 5.0))
///     .with_window(TimeWindow::between(start, end));
/// ```
#[derive(Clone, Debug)]
pub struct SeriesSelection {
    variable: String,
    region: SpatialBox,
    window: TimeWindow,
    use_detrended: bool,
}

impl SeriesSelection {
    /// Selects `variable` over `region`.
    ///
    /// Defaults: the whole time axis, detrended anomalies.
    pub fn new(variable: impl Into<String>, region: SpatialBox) -> Self {
        Self {
            variable: variable.into(),
            region,
            window: TimeWindow::all(),
            use_detrended: true,
        }
    }

    /// Restricts the selection to `window`.
    pub fn with_window(mut self, window: TimeWindow) -> Self {
        self.window = window;
        self
    }

    /// Chooses between the detrended anomalies (`true`) and the raw series.
    pub fn with_detrended(mut self, use_detrended: bool) -> Self {
        self.use_detrended = use_detrended;
        self
    }

    /// Returns the variable name.
    pub fn variable(&self) -> &str {
        &self.variable
    }

    /// Returns the spatial box.
    pub fn region(&self) -> &SpatialBox {
        &self.region
    }

    /// Returns the time window.
    pub fn window(&self) -> &TimeWindow {
        &self.window
    }

    /// Returns `true` if the detrended anomalies are reduced.
    pub fn use_detrended(&self) -> bool {
        self.use_detrended
    }
}

/// Analysis session over one immutable [`GriddedSeries`].
///
/// Climatology, anomalies, and amplitude are computed on first request and
/// cached for the session's lifetime, failures included. Each slot is
/// written at most once, so the session can be shared across threads.
/// Spectral results are recomputed on every call.
///
/// # Example
///
/// ```ignore
/// use tellus_analysis::AnalysisSession;
///
/// let session = AnalysisSession::new(series);
/// let amplitude = session.amplitude()?;
/// ```
pub struct AnalysisSession {
    series: GriddedSeries,
    resolver: Box<dyn AxisResolver + Send + Sync>,
    climatology: Slot<ClimatologyTable>,
    anomalies: Slot<AnomalyField>,
    amplitude: Slot<AmplitudeField>,
}

impl AnalysisSession {
    /// Creates a session resolving axes with the default [`AliasTable`].
    pub fn new(series: GriddedSeries) -> Self {
        Self::with_resolver(series, AliasTable::new())
    }

    /// Creates a session with a custom axis resolver.
    pub fn with_resolver(
        series: GriddedSeries,
        resolver: impl AxisResolver + Send + Sync + 'static,
    ) -> Self {
        Self {
            series,
            resolver: Box::new(resolver),
            climatology: OnceLock::new(),
            anomalies: OnceLock::new(),
            amplitude: OnceLock::new(),
        }
    }

    /// Returns the input series.
    pub fn series(&self) -> &GriddedSeries {
        &self.series
    }

    /// Returns the axis resolver.
    pub fn resolver(&self) -> &dyn AxisResolver {
        self.resolver.as_ref()
    }

    /// Detects the time resolution of the input series.
    pub fn resolution(&self) -> Result<TimeResolution, AnalysisError> {
        Ok(self.resolver.resolve_resolution(&self.series)?)
    }

    /// Returns the climatology, computing it on first use.
    pub fn climatology(&self) -> Result<&ClimatologyTable, AnalysisError> {
        cached(&self.climatology, Artifact::Climatology, || {
            Ok(compute_climatology(&self.series, self.resolver())?)
        })
    }

    /// Returns the detrended anomalies, computing them (and the climatology)
    /// on first use.
    pub fn anomalies(&self) -> Result<&AnomalyField, AnalysisError> {
        cached(&self.anomalies, Artifact::Anomalies, || {
            let climatology = self.climatology()?;
            Ok(compute_anomalies(&self.series, climatology, self.resolver())?)
        })
    }

    /// Returns the annual amplitude, computing it (and the climatology) on
    /// first use.
    pub fn amplitude(&self) -> Result<&AmplitudeField, AnalysisError> {
        cached(&self.amplitude, Artifact::Amplitude, || {
            Ok(annual_amplitude(self.climatology()?))
        })
    }

    /// Returns `true` if `artifact` has been computed (successfully or not).
    pub fn is_computed(&self, artifact: Artifact) -> bool {
        match artifact {
            Artifact::Climatology => self.climatology.get().is_some(),
            Artifact::Anomalies => self.anomalies.get().is_some(),
            Artifact::Amplitude => self.amplitude.get().is_some(),
        }
    }

    /// Drops `artifact` and every artifact derived from it.
    pub fn invalidate(&mut self, artifact: Artifact) {
        for a in artifact.closure() {
            let dropped = match a {
                Artifact::Climatology => self.climatology.take().is_some(),
                Artifact::Anomalies => self.anomalies.take().is_some(),
                Artifact::Amplitude => self.amplitude.take().is_some(),
            };
            if dropped {
                debug!(artifact = %a, "invalidated artifact");
            }
        }
    }

    /// Reduces the selected variable to its regional mean per time step.
    pub fn box_series(&self, selection: &SeriesSelection) -> Result<BoxSeries, AnalysisError> {
        let source = if selection.use_detrended() {
            self.anomalies()?.series()
        } else {
            &self.series
        };
        Ok(box_mean(
            source,
            selection.variable(),
            selection.region(),
            selection.window(),
            self.resolver(),
        )?)
    }

    /// Regional-mean series of the selection, validated for spectral analysis.
    fn reduced(&self, selection: &SeriesSelection) -> Result<TimeSeries, AnalysisError> {
        let reduced = self.box_series(selection)?;
        Ok(TimeSeries::from_reduced(reduced.into_values())?)
    }

    /// Detects significant Fourier periods of the selection's regional mean.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`AnalysisError::Grid`] | unknown variable, unresolvable axis, or missing dimension |
    /// | [`AnalysisError::Climatology`] | detrended data requested and anomalies fail |
    /// | [`AnalysisError::Spectral`] | empty or partly missing regional mean, invalid config |
    pub fn significant_periods(
        &self,
        selection: &SeriesSelection,
        config: &FftConfig,
    ) -> Result<SignificantPeriods, AnalysisError> {
        let ts = self.reduced(selection)?;
        Ok(tellus_spectral::significant_periods(&ts, config)?)
    }

    /// Wavelet power and significance of the selection's regional mean.
    pub fn wavelet_analysis(
        &self,
        selection: &SeriesSelection,
        cwt: &CwtConfig,
        significance: &SignificanceConfig,
    ) -> Result<WaveletResult, AnalysisError> {
        let ts = self.reduced(selection)?;
        Ok(tellus_spectral::wavelet_analysis(&ts, cwt, significance)?)
    }

    /// Per-cell standard deviation over time of a raw variable.
    pub fn temporal_std(&self, variable: &str) -> Result<Field, AnalysisError> {
        Ok(temporal_std(&self.series, variable)?)
    }

    /// Per-cell standard deviation of a variable's climatology.
    pub fn annual_std(&self, variable: &str) -> Result<Field, AnalysisError> {
        Ok(annual_std(self.climatology()?, variable)?)
    }

    /// Low- and high-pass variability of a variable's detrended anomalies.
    pub fn cycle_variability(
        &self,
        variable: &str,
        config: &BandConfig,
    ) -> Result<BandVariability, AnalysisError> {
        Ok(cycle_variability(
            self.anomalies()?,
            variable,
            config,
            self.resolver(),
        )?)
    }
}

/// Returns the cached value of `slot`, running `compute` on first access.
fn cached<T>(
    slot: &Slot<T>,
    artifact: Artifact,
    compute: impl FnOnce() -> Result<T, AnalysisError>,
) -> Result<&T, AnalysisError> {
    slot.get_or_init(|| {
        debug!(%artifact, "computing artifact");
        compute()
    })
    .as_ref()
    .map_err(Clone::clone)
}
