use tracing_subscriber::EnvFilter;

/// All workspace crate targets that should receive log output.
const CRATE_TARGETS: &[&str] = &[
    "tellus",
    "tellus_analysis",
    "tellus_calendar",
    "tellus_climatology",
    "tellus_grid",
    "tellus_spectral",
    "tellus_stats",
];

/// Initialize tracing based on CLI verbosity level.
///
/// Logs go to stderr; stdout is reserved for JSON reports.
/// `RUST_LOG` env var overrides the CLI flag if set.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbosity)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Filter directive enabling every workspace crate at the level for `verbosity`.
///
/// | Flag | Level |
/// |------|-------|
/// | (none) | warn |
/// | `-v` | info |
/// | `-vv` | debug |
/// | `-vvv` | trace |
fn default_filter(verbosity: u8) -> String {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    CRATE_TARGETS
        .iter()
        .map(|t| format!("{t}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}
