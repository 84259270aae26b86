use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Tellus gridded time-series analysis.
#[derive(Parser)]
#[command(
    name = "tellus",
    version,
    about = "Climatology, anomalies, and dominant periods of gridded geophysical time series"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Report the annual amplitude of every variable.
    Summary(SummaryArgs),
    /// Write the detrended anomalies of every variable as a dataset.
    Anomalies(AnomaliesArgs),
    /// Detect significant Fourier periods of a regional mean.
    Periods(SpectralArgs),
    /// Run a Morlet wavelet analysis of a regional mean.
    Wavelet(WaveletArgs),
    /// Report temporal, annual, and band variability of a variable.
    Variability(VariabilityArgs),
}

/// Input arguments shared by the analysis subcommands.
#[derive(clap::Args)]
pub struct DatasetArgs {
    /// Path to the input JSON dataset.
    #[arg(short, long)]
    pub input: PathBuf,

    /// Path to a TOML settings file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Path for the JSON report (stdout if omitted).
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the `summary` subcommand.
#[derive(clap::Args)]
pub struct SummaryArgs {
    /// Path to the input JSON dataset.
    #[arg(short, long)]
    pub input: PathBuf,

    /// Path for the JSON report (stdout if omitted).
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the `anomalies` subcommand.
#[derive(clap::Args)]
pub struct AnomaliesArgs {
    /// Path to the input JSON dataset.
    #[arg(short, long)]
    pub input: PathBuf,

    /// Path for the anomaly JSON dataset.
    #[arg(short, long)]
    pub output: PathBuf,
}

/// Variable, region, and data source of a spectral subcommand.
#[derive(clap::Args)]
pub struct SelectionArgs {
    /// Variable to analyse.
    #[arg(long)]
    pub variable: String,

    /// Override the region: `lon_min,lon_max,lat_min,lat_max`.
    #[arg(long, value_delimiter = ',', num_args = 4, allow_hyphen_values = true)]
    pub region: Option<Vec<f64>>,

    /// Analyse the detrended anomalies (the default unless the settings say otherwise).
    #[arg(long, conflicts_with = "raw")]
    pub detrended: bool,

    /// Analyse the raw data instead of the detrended anomalies.
    #[arg(long)]
    pub raw: bool,
}

impl SelectionArgs {
    /// Returns the data source chosen on the command line, if any.
    pub fn use_detrended(&self) -> Option<bool> {
        match (self.detrended, self.raw) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}

/// Arguments for the `periods` subcommand.
#[derive(clap::Args)]
pub struct SpectralArgs {
    #[command(flatten)]
    pub dataset: DatasetArgs,

    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Override the FFT threshold in standard deviations.
    #[arg(long = "n-sigma")]
    pub n_sigma: Option<f64>,
}

/// Arguments for the `wavelet` subcommand.
#[derive(clap::Args)]
pub struct WaveletArgs {
    #[command(flatten)]
    pub dataset: DatasetArgs,

    #[command(flatten)]
    pub selection: SelectionArgs,
}

/// Arguments for the `variability` subcommand.
#[derive(clap::Args)]
pub struct VariabilityArgs {
    #[command(flatten)]
    pub dataset: DatasetArgs,

    /// Variable to analyse.
    #[arg(long)]
    pub variable: String,

    /// Override the rolling-mean window in samples.
    #[arg(long)]
    pub window: Option<usize>,
}
