use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Deserialize;

/// Top-level Tellus settings.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct TellusConfig {
    /// Spatial box used by the spectral commands.
    #[serde(default)]
    pub region: RegionToml,

    /// Optional date range used by the `periods` command.
    #[serde(default)]
    pub time_window: TimeWindowToml,

    /// FFT settings.
    #[serde(default)]
    pub fft: FftToml,

    /// Wavelet settings.
    #[serde(default)]
    pub wavelet: WaveletToml,

    /// Band variability settings.
    #[serde(default)]
    pub variability: VariabilityToml,
}

impl TellusConfig {
    /// Reads settings from `path`, or returns the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let toml_str = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        toml::from_str(&toml_str).context("failed to parse TOML config")
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegionToml {
    #[serde(default = "default_lon_min")]
    pub lon_min: f64,
    #[serde(default = "default_lon_max")]
    pub lon_max: f64,
    #[serde(default = "default_lat_min")]
    pub lat_min: f64,
    #[serde(default = "default_lat_max")]
    pub lat_max: f64,
}

impl Default for RegionToml {
    fn default() -> Self {
        Self {
            lon_min: default_lon_min(),
            lon_max: default_lon_max(),
            lat_min: default_lat_min(),
            lat_max: default_lat_max(),
        }
    }
}

// Covers both -180..180 and 0..360 longitude conventions.
fn default_lon_min() -> f64 {
    -180.0
}
fn default_lon_max() -> f64 {
    360.0
}
fn default_lat_min() -> f64 {
    -90.0
}
fn default_lat_max() -> f64 {
    90.0
}

/// Dates are ISO strings, e.g. `start = "1990-01-01"`.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct TimeWindowToml {
    #[serde(default)]
    pub start: Option<NaiveDate>,
    #[serde(default)]
    pub end: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FftToml {
    #[serde(default = "default_use_detrended")]
    pub use_detrended: bool,
    #[serde(default = "default_n_sigma")]
    pub n_sigma: f64,
}

impl Default for FftToml {
    fn default() -> Self {
        Self {
            use_detrended: default_use_detrended(),
            n_sigma: default_n_sigma(),
        }
    }
}

fn default_use_detrended() -> bool {
    true
}

fn default_n_sigma() -> f64 {
    2.0
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WaveletToml {
    #[serde(default = "default_use_detrended")]
    pub use_detrended: bool,
    #[serde(default = "default_dj")]
    pub dj: f64,
    #[serde(default = "default_significance_level")]
    pub significance_level: f64,
}

impl Default for WaveletToml {
    fn default() -> Self {
        Self {
            use_detrended: default_use_detrended(),
            dj: default_dj(),
            significance_level: default_significance_level(),
        }
    }
}

fn default_dj() -> f64 {
    1.0 / 12.0
}
fn default_significance_level() -> f64 {
    0.95
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VariabilityToml {
    #[serde(default = "default_window")]
    pub window: usize,
}

impl Default for VariabilityToml {
    fn default() -> Self {
        Self {
            window: default_window(),
        }
    }
}

fn default_window() -> usize {
    15
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_gives_defaults() {
        let config: TellusConfig = toml::from_str("").unwrap();
        assert_eq!(config.region.lon_min, -180.0);
        assert_eq!(config.region.lat_max, 90.0);
        assert!(config.time_window.start.is_none());
        assert!(config.fft.use_detrended);
        assert!(config.wavelet.use_detrended);
        assert_eq!(config.fft.n_sigma, 2.0);
        assert!((config.wavelet.dj - 1.0 / 12.0).abs() < f64::EPSILON);
        assert_eq!(config.wavelet.significance_level, 0.95);
        assert_eq!(config.variability.window, 15);
    }

    #[test]
    fn full_toml_parses() {
        let config: TellusConfig = toml::from_str(
            r#"
            [region]
            lon_min = 190.0
            lon_max = 240.0
            lat_min = -5.0
            lat_max = 5.0

            [time_window]
            start = "1990-01-01"
            end = "2009-12-31"

            [fft]
            use_detrended = false
            n_sigma = 3.0

            [wavelet]
            use_detrended = false
            dj = 0.125
            significance_level = 0.99

            [variability]
            window = 25
            "#,
        )
        .unwrap();

        assert_eq!(config.region.lon_max, 240.0);
        assert_eq!(
            config.time_window.start,
            NaiveDate::from_ymd_opt(1990, 1, 1)
        );
        assert_eq!(config.time_window.end, NaiveDate::from_ymd_opt(2009, 12, 31));
        assert!(!config.fft.use_detrended);
        assert!(!config.wavelet.use_detrended);
        assert_eq!(config.fft.n_sigma, 3.0);
        assert_eq!(config.wavelet.dj, 0.125);
        assert_eq!(config.variability.window, 25);
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let config: TellusConfig = toml::from_str("[region]\nlat_min = -10.0\n").unwrap();
        assert_eq!(config.region.lat_min, -10.0);
        assert_eq!(config.region.lat_max, 90.0);
        assert_eq!(config.region.lon_min, -180.0);
    }

    #[test]
    fn unknown_field_rejected() {
        let result: Result<TellusConfig, _> = toml::from_str("[fft]\nsigma = 2.0\n");
        assert!(result.is_err());
    }

    #[test]
    fn unknown_section_rejected() {
        let result: Result<TellusConfig, _> = toml::from_str("[plot]\ncmap = \"RdBu\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn load_without_path_is_default() {
        let config = TellusConfig::load(None).unwrap();
        assert_eq!(config.variability.window, 15);
    }

    #[test]
    fn load_missing_file_has_context() {
        let err = TellusConfig::load(Some(Path::new("/nonexistent/tellus.toml"))).unwrap_err();
        assert!(err.to_string().contains("failed to read config file"));
    }
}
