//! Pure conversion functions: TOML config structs -> crate API config types.

use anyhow::{Result, bail};

use tellus_climatology::BandConfig;
use tellus_grid::{SpatialBox, TimeWindow};
use tellus_spectral::{CwtConfig, FftConfig, SignificanceConfig};

use crate::config::*;

/// Builds the spatial box, letting a CLI `lon_min,lon_max,lat_min,lat_max`
/// override replace the TOML region.
pub fn build_region(region: &RegionToml, cli: Option<&[f64]>) -> Result<SpatialBox> {
    match cli {
        None => Ok(SpatialBox::new(
            region.lon_min,
            region.lon_max,
            region.lat_min,
            region.lat_max,
        )),
        Some(&[lon_min, lon_max, lat_min, lat_max]) => {
            Ok(SpatialBox::new(lon_min, lon_max, lat_min, lat_max))
        }
        Some(other) => bail!("region needs 4 values, got {}", other.len()),
    }
}

/// Builds the time window, rejecting an inverted range.
pub fn build_time_window(window: &TimeWindowToml) -> Result<TimeWindow> {
    if let (Some(start), Some(end)) = (window.start, window.end) {
        if start > end {
            bail!("time window starts after it ends: {start} > {end}");
        }
    }
    Ok(TimeWindow {
        start: window.start,
        end: window.end,
    })
}

/// Builds an [`FftConfig`], letting a CLI `n_sigma` override win.
pub fn build_fft_config(fft: &FftToml, n_sigma: Option<f64>) -> FftConfig {
    FftConfig::new().with_n_sigma(n_sigma.unwrap_or(fft.n_sigma))
}

/// Builds a [`CwtConfig`] from the TOML wavelet section.
pub fn build_cwt_config(wavelet: &WaveletToml) -> CwtConfig {
    CwtConfig::new().with_dj(wavelet.dj)
}

/// Builds a [`SignificanceConfig`] from the TOML wavelet section.
pub fn build_significance_config(wavelet: &WaveletToml) -> SignificanceConfig {
    SignificanceConfig::new().with_significance_level(wavelet.significance_level)
}

/// Data source for a spectral command: the CLI choice, else the settings file.
pub fn build_use_detrended(setting: bool, cli: Option<bool>) -> bool {
    cli.unwrap_or(setting)
}

/// Builds a [`BandConfig`], letting a CLI window override win.
pub fn build_band_config(variability: &VariabilityToml, window: Option<usize>) -> BandConfig {
    BandConfig::new().with_window(window.unwrap_or(variability.window))
}
