//! Anomalies command: write the detrended anomalies as a dataset.

use anyhow::{Context, Result};
use tracing::{info, info_span};

use tellus_analysis::AnalysisSession;

use crate::cli::AnomaliesArgs;
use crate::dataset::{read_dataset, write_dataset};

/// Compute and write the detrended anomalies of every variable.
pub fn run(args: AnomaliesArgs) -> Result<()> {
    let _cmd = info_span!("anomalies").entered();

    info!(path = %args.input.display(), "reading dataset");
    let session = AnalysisSession::new(read_dataset(&args.input)?);
    let anomalies = session.anomalies().context("anomaly computation failed")?;

    write_dataset(&args.output, anomalies.series())?;
    info!(path = %args.output.display(), "anomalies written");
    Ok(())
}
