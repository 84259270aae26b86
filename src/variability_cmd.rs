//! Variability command: temporal, annual, and band standard deviations.

use anyhow::{Context, Result};
use tracing::{info, info_span};

use tellus_analysis::AnalysisSession;

use crate::cli::VariabilityArgs;
use crate::config::TellusConfig;
use crate::convert;
use crate::dataset::read_dataset;
use crate::report::{FieldReport, VariabilityReport, write_report};

/// Compute the variability summaries of one variable.
pub fn run(args: VariabilityArgs) -> Result<()> {
    let _cmd = info_span!("variability", variable = %args.variable).entered();
    let config = TellusConfig::load(args.dataset.config.as_deref())?;
    let bands = convert::build_band_config(&config.variability, args.window);

    info!(path = %args.dataset.input.display(), "reading dataset");
    let session = AnalysisSession::new(read_dataset(&args.dataset.input)?);
    let name = args.variable.as_str();

    let temporal = session
        .temporal_std(name)
        .with_context(|| format!("temporal variability failed for '{name}'"))?;
    let annual = session
        .annual_std(name)
        .with_context(|| format!("annual variability failed for '{name}'"))?;
    let split = session
        .cycle_variability(name, &bands)
        .with_context(|| format!("band variability failed for '{name}'"))?;

    let report = VariabilityReport {
        variable: args.variable.clone(),
        window: bands.window(),
        temporal_std: FieldReport::from(&temporal),
        annual_std: FieldReport::from(&annual),
        total: FieldReport::from(split.total()),
        low_pass: FieldReport::from(split.low_pass()),
        high_pass: FieldReport::from(split.high_pass()),
    };
    write_report(&report, args.dataset.output.as_deref())
}
