//! Periods and wavelet commands: spectral analysis of a regional mean.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, info_span};

use tellus_analysis::{AnalysisSession, SeriesSelection};
use tellus_grid::TimeWindow;

use crate::cli::{SpectralArgs, WaveletArgs};
use crate::config::TellusConfig;
use crate::convert;
use crate::dataset::read_dataset;
use crate::report::{PeriodsReport, WaveletReport, write_report};

/// Detect significant Fourier periods.
pub fn run_periods(args: SpectralArgs) -> Result<()> {
    let variable = &args.selection.variable;
    let _cmd = info_span!("periods", variable = %variable).entered();
    let config = TellusConfig::load(args.dataset.config.as_deref())?;

    let region = convert::build_region(&config.region, args.selection.region.as_deref())?;
    let window = convert::build_time_window(&config.time_window)?;
    let fft = convert::build_fft_config(&config.fft, args.n_sigma);
    let detrended =
        convert::build_use_detrended(config.fft.use_detrended, args.selection.use_detrended());

    let session = open_session(&args.dataset.input)?;
    let selection = SeriesSelection::new(variable, region)
        .with_window(window)
        .with_detrended(detrended);
    let result = session
        .significant_periods(&selection, &fft)
        .with_context(|| format!("period detection failed for '{variable}'"))?;
    info!(periods = %result, "significant periods (samples)");

    let report = PeriodsReport::new(variable, &region, detrended, &result);
    write_report(&report, args.dataset.output.as_deref())
}

/// Run a wavelet analysis over the whole time axis.
pub fn run_wavelet(args: WaveletArgs) -> Result<()> {
    let variable = &args.selection.variable;
    let _cmd = info_span!("wavelet", variable = %variable).entered();
    let config = TellusConfig::load(args.dataset.config.as_deref())?;

    let region = convert::build_region(&config.region, args.selection.region.as_deref())?;
    let cwt = convert::build_cwt_config(&config.wavelet);
    let significance = convert::build_significance_config(&config.wavelet);
    let detrended =
        convert::build_use_detrended(config.wavelet.use_detrended, args.selection.use_detrended());

    let session = open_session(&args.dataset.input)?;
    let selection = SeriesSelection::new(variable, region)
        .with_window(TimeWindow::all())
        .with_detrended(detrended);
    let result = session
        .wavelet_analysis(&selection, &cwt, &significance)
        .with_context(|| format!("wavelet analysis failed for '{variable}'"))?;

    let report = WaveletReport::new(variable, &region, detrended, &result);
    write_report(&report, args.dataset.output.as_deref())
}

fn open_session(input: &Path) -> Result<AnalysisSession> {
    info!(path = %input.display(), "reading dataset");
    Ok(AnalysisSession::new(read_dataset(input)?))
}
