mod anomalies_cmd;
mod cli;
mod config;
mod convert;
mod dataset;
mod logging;
mod report;
mod spectral_cmd;
mod summary_cmd;
mod variability_cmd;

use std::process;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Summary(args) => summary_cmd::run(args),
        Command::Anomalies(args) => anomalies_cmd::run(args),
        Command::Periods(args) => spectral_cmd::run_periods(args),
        Command::Wavelet(args) => spectral_cmd::run_wavelet(args),
        Command::Variability(args) => variability_cmd::run(args),
    }
}
