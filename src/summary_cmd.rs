//! Summary command: annual amplitude of every variable.

use anyhow::{Context, Result};
use tracing::{info, info_span};

use tellus_analysis::AnalysisSession;

use crate::cli::SummaryArgs;
use crate::dataset::read_dataset;
use crate::report::{FieldReport, SummaryReport, write_report};

/// Run the amplitude summary.
pub fn run(args: SummaryArgs) -> Result<()> {
    let _cmd = info_span!("summary").entered();

    info!(path = %args.input.display(), "reading dataset");
    let session = AnalysisSession::new(read_dataset(&args.input)?);

    let resolution = session.resolution().context("failed to detect time resolution")?;
    let climatology = session.climatology().context("climatology failed")?;
    let amplitude = session.amplitude().context("annual amplitude failed")?;
    info!(
        resolution = ?resolution,
        n_variables = amplitude.fields().len(),
        "amplitude computed"
    );

    let report = SummaryReport {
        resolution: format!("{resolution:?}").to_lowercase(),
        n_periods: climatology.periods().len(),
        amplitude: amplitude
            .fields()
            .iter()
            .map(|(name, field)| (name.clone(), FieldReport::from(field)))
            .collect(),
    };
    write_report(&report, args.output.as_deref())
}
