//! Morlet continuous wavelet transform.
//!
//! FFT convolution after Torrence & Compo (1998): the series is taken as
//! given (no standardization), zero-padded to the next power of two,
//! multiplied in frequency space by each scaled daughter wavelet and
//! transformed back. Bins follow the `fftfreq` layout, so the Nyquist bin
//! of an even-length transform is a negative frequency.

use std::f64::consts::PI;

use ndarray::{Array1, Array2, Axis};
use num_complex::Complex64;
use rustfft::FftPlanner;
use tracing::debug;

use crate::error::SpectralError;
use crate::series::TimeSeries;

/// Parameters of the Morlet transform.
///
/// # Example
///
/// ```ignore
/// use tellus_spectral::CwtConfig;
///
/// // Eight sub-octaves per octave instead of twelve.
/// let config = CwtConfig::new().with_dj(0.125);
/// ```
#[derive(Clone, Debug)]
pub struct CwtConfig {
    omega0: f64,
    dt: f64,
    dj: f64,
    s0: Option<f64>,
    j_max: Option<usize>,
}

impl CwtConfig {
    /// Morlet transform over unit-spaced samples.
    ///
    /// Defaults: `omega0 = 6.0`, `dt = 1.0`, `dj = 1/12`, `s0` and `j_max`
    /// derived from the series length.
    pub fn new() -> Self {
        Self {
            omega0: 6.0,
            dt: 1.0,
            dj: 1.0 / 12.0,
            s0: None,
            j_max: None,
        }
    }

    /// Sets the non-dimensional frequency of the mother wavelet.
    pub fn with_omega0(mut self, omega0: f64) -> Self {
        self.omega0 = omega0;
        self
    }

    /// Sets the sampling interval.
    pub fn with_dt(mut self, dt: f64) -> Self {
        self.dt = dt;
        self
    }

    /// Sets the scale spacing in octaves.
    pub fn with_dj(mut self, dj: f64) -> Self {
        self.dj = dj;
        self
    }

    /// Fixes the smallest scale.
    pub fn with_s0(mut self, s0: f64) -> Self {
        self.s0 = Some(s0);
        self
    }

    /// Fixes the last scale index; scales run over `j = 0..=j_max`.
    pub fn with_j_max(mut self, j_max: usize) -> Self {
        self.j_max = Some(j_max);
        self
    }

    /// Returns the non-dimensional frequency of the mother wavelet.
    pub fn omega0(&self) -> f64 {
        self.omega0
    }

    /// Returns the sampling interval.
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Returns the scale spacing in octaves.
    pub fn dj(&self) -> f64 {
        self.dj
    }

    /// Explicit smallest scale, if one was set.
    pub fn s0(&self) -> Option<f64> {
        self.s0
    }

    /// Explicit last scale index, if one was set.
    pub fn j_max(&self) -> Option<usize> {
        self.j_max
    }

    /// Fourier period per unit scale of the mother wavelet.
    pub fn fourier_factor(&self) -> f64 {
        fourier_factor(self.omega0)
    }

    /// Smallest scale used: the explicit `s0`, else the scale whose Fourier
    /// period is two samples.
    pub fn effective_s0(&self) -> f64 {
        self.s0.unwrap_or(2.0 * self.dt / self.fourier_factor())
    }

    fn validate(&self) -> Result<(), SpectralError> {
        let problem = if self.omega0.is_nan() || self.omega0 < 5.0 {
            "omega0 must be >= 5.0"
        } else if not_positive(self.dt) {
            "dt must be > 0"
        } else if not_positive(self.dj) {
            "dj must be > 0"
        } else if self.s0.is_some_and(not_positive) {
            "s0 must be > 0"
        } else {
            return Ok(());
        };
        Err(SpectralError::InvalidConfig(problem.to_string()))
    }
}

impl Default for CwtConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Geometric scales `s0 * 2^(j * dj)` and their Fourier periods.
#[derive(Clone, Debug)]
struct ScaleGrid {
    scales: Vec<f64>,
    periods: Vec<f64>,
}

impl ScaleGrid {
    /// With no explicit `j_max`, the last index is
    /// `round(log2(n * dt / s0) / dj)`.
    fn new(n: usize, config: &CwtConfig) -> Self {
        let s0 = config.effective_s0();
        let last = config.j_max.unwrap_or_else(|| {
            let octaves = (n as f64 * config.dt / s0).log2();
            (octaves / config.dj).round().max(0.0) as usize
        });
        let factor = config.fourier_factor();
        let scales: Vec<f64> = (0..=last)
            .map(|j| s0 * (j as f64 * config.dj).exp2())
            .collect();
        let periods = scales.iter().map(|s| s * factor).collect();
        Self { scales, periods }
    }
}

/// Wavelet coefficients of one series.
#[derive(Clone, Debug)]
pub struct CwtResult {
    /// `[scale, time]`.
    coefficients: Array2<Complex64>,
    grid: ScaleGrid,
    coi: Vec<f64>,
    dt: f64,
    dj: f64,
}

impl CwtResult {
    /// Complex coefficients, one row per scale.
    pub fn coefficients(&self) -> &Array2<Complex64> {
        &self.coefficients
    }

    /// Returns the wavelet scales, ascending.
    pub fn scales(&self) -> &[f64] {
        &self.grid.scales
    }

    /// Fourier-equivalent period of each scale, in units of `dt`.
    pub fn periods(&self) -> &[f64] {
        &self.grid.periods
    }

    /// Cone of influence: the longest period free of edge effects at each time.
    pub fn coi(&self) -> &[f64] {
        &self.coi
    }

    /// Returns the sampling interval the transform was run at.
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Returns the scale spacing in octaves.
    pub fn dj(&self) -> f64 {
        self.dj
    }

    /// Returns the number of scales (matrix rows).
    pub fn n_scales(&self) -> usize {
        self.coefficients.nrows()
    }

    /// Returns the number of time points (matrix columns).
    pub fn n_times(&self) -> usize {
        self.coefficients.ncols()
    }

    /// `|W(s, t)|^2` per `[scale, time]`.
    pub fn power(&self) -> Array2<f64> {
        self.coefficients.mapv(|c| c.norm_sqr())
    }

    /// Time-mean power per scale.
    pub fn global_power(&self) -> Array1<f64> {
        self.power()
            .mean_axis(Axis(1))
            .unwrap_or_else(|| Array1::zeros(self.n_scales()))
    }
}

/// Computes the Morlet wavelet transform of `series`.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`SpectralError::InvalidConfig`] | `omega0 < 5`, or non-positive `dt`, `dj`, or `s0` |
/// | [`SpectralError::SeriesTooShort`] | fewer than 4 observations |
#[tracing::instrument(skip_all, fields(n = series.len(), dj = config.dj()))]
pub fn cwt_morlet(series: &TimeSeries, config: &CwtConfig) -> Result<CwtResult, SpectralError> {
    config.validate()?;
    let n = series.len();
    if n < 4 {
        return Err(SpectralError::SeriesTooShort { len: n, min: 4 });
    }

    let npad = padded_len(n);
    let mut planner = FftPlanner::<f64>::new();
    let forward = planner.plan_fft_forward(npad);
    let inverse = planner.plan_fft_inverse(npad);

    let mut spectrum = vec![Complex64::new(0.0, 0.0); npad];
    for (slot, &x) in spectrum.iter_mut().zip(series.as_slice()) {
        slot.re = x;
    }
    forward.process(&mut spectrum);

    let grid = ScaleGrid::new(n, config);
    let wavenumbers = angular_wavenumbers(npad, config.dt);
    let mut coefficients = Array2::<Complex64>::zeros((grid.scales.len(), n));
    let mut buffer = vec![Complex64::new(0.0, 0.0); npad];

    for (mut row, &scale) in coefficients.axis_iter_mut(Axis(0)).zip(&grid.scales) {
        let norm = (2.0 * PI * scale / config.dt).sqrt() * PI.powf(-0.25);
        for ((b, &x), &k) in buffer.iter_mut().zip(&spectrum).zip(&wavenumbers) {
            *b = x * morlet_hat(scale * k, config.omega0) * norm;
        }
        inverse.process(&mut buffer);
        // rustfft leaves the inverse unscaled
        for (w, b) in row.iter_mut().zip(&buffer) {
            *w = *b / npad as f64;
        }
    }

    let coi = cone_of_influence(n, config.dt, config.omega0);
    debug!(npad, n_scales = grid.scales.len(), s0 = config.effective_s0(), "computed CWT");
    Ok(CwtResult {
        coefficients,
        grid,
        coi,
        dt: config.dt,
        dj: config.dj,
    })
}

/// NaN counts as not positive.
fn not_positive(x: f64) -> bool {
    x.is_nan() || x <= 0.0
}

/// `4π / (ω0 + sqrt(2 + ω0²))`.
pub(crate) fn fourier_factor(omega0: f64) -> f64 {
    4.0 * PI / (omega0 + (2.0 + omega0 * omega0).sqrt())
}

/// `2^ceil(log2 n)`.
fn padded_len(n: usize) -> usize {
    n.next_power_of_two()
}

/// Angular frequency of each FFT bin in `fftfreq` order.
fn angular_wavenumbers(npad: usize, dt: f64) -> Vec<f64> {
    let step = 2.0 * PI / (npad as f64 * dt);
    let positive = npad.div_ceil(2);
    (0..npad)
        .map(|i| {
            let signed = if i < positive {
                i as f64
            } else {
                i as f64 - npad as f64
            };
            signed * step
        })
        .collect()
}

/// Unnormalized Morlet Fourier transform at scaled frequency `sk`.
///
/// No Heaviside cutoff: negative frequencies keep their (tiny) Gaussian tail.
fn morlet_hat(sk: f64, omega0: f64) -> f64 {
    (-0.5 * (sk - omega0).powi(2)).exp()
}

/// `fourier_factor / sqrt(2) * dt * (n/2 - |t - (n-1)/2|)` per time index.
fn cone_of_influence(n: usize, dt: f64, omega0: f64) -> Vec<f64> {
    let e_fold = fourier_factor(omega0) / 2.0_f64.sqrt() * dt;
    let centre = (n as f64 - 1.0) / 2.0;
    (0..n)
        .map(|t| (e_fold * (n as f64 / 2.0 - (t as f64 - centre).abs())).max(0.0))
        .collect()
}
