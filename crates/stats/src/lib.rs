//! Statistical helper functions for the tellus analysis crates.
//!
//! Functions prefixed with `nan_` skip non-finite entries and return `NaN`
//! when nothing finite remains, which is how missing observations flow
//! through the climatology and anomaly stages.

/// Arithmetic mean of a slice. Returns 0.0 if empty.
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let sum: f64 = data.iter().sum();
    sum / data.len() as f64
}

/// Population standard deviation (N denominator).
/// Returns 0.0 if empty.
pub fn population_sd(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let m = mean(data);
    let ss: f64 = data.iter().map(|&x| (x - m) * (x - m)).sum();
    (ss / data.len() as f64).sqrt()
}

/// Mean of the finite entries. `NaN` if there are none.
pub fn nan_mean(data: &[f64]) -> f64 {
    let mut sum = 0.0;
    let mut count = 0usize;
    for &x in data.iter().filter(|x| x.is_finite()) {
        sum += x;
        count += 1;
    }
    if count == 0 {
        f64::NAN
    } else {
        sum / count as f64
    }
}

/// Maximum of the finite entries. `NaN` if there are none.
pub fn nan_max(data: &[f64]) -> f64 {
    data.iter()
        .copied()
        .filter(|x| x.is_finite())
        .fold(None, |acc: Option<f64>, x| Some(acc.map_or(x, |a| a.max(x))))
        .unwrap_or(f64::NAN)
}

/// Minimum of the finite entries. `NaN` if there are none.
pub fn nan_min(data: &[f64]) -> f64 {
    data.iter()
        .copied()
        .filter(|x| x.is_finite())
        .fold(None, |acc: Option<f64>, x| Some(acc.map_or(x, |a| a.min(x))))
        .unwrap_or(f64::NAN)
}

/// Population standard deviation of the finite entries. `NaN` if there are none.
pub fn nan_population_sd(data: &[f64]) -> f64 {
    let finite: Vec<f64> = data.iter().copied().filter(|x| x.is_finite()).collect();
    if finite.is_empty() {
        return f64::NAN;
    }
    population_sd(&finite)
}

/// Ordinary least-squares line fitted against the sample index `0..n`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    /// Change per sample.
    pub slope: f64,
    /// Fitted value at index 0.
    pub intercept: f64,
}

impl LinearFit {
    /// Fitted value at sample index `i`.
    pub fn at(&self, i: usize) -> f64 {
        self.intercept + self.slope * i as f64
    }
}

/// Fits `y = intercept + slope * i` by least squares over `i = 0..y.len()`.
///
/// Returns `None` if fewer than 2 samples are given or any sample is non-finite.
pub fn linear_fit(y: &[f64]) -> Option<LinearFit> {
    let n = y.len();
    if n < 2 || !y.iter().all(|v| v.is_finite()) {
        return None;
    }
    let nf = n as f64;
    let x_mean = (nf - 1.0) / 2.0;
    let y_mean = mean(y);

    let mut sxy = 0.0;
    let mut sxx = 0.0;
    for (i, &yi) in y.iter().enumerate() {
        let dx = i as f64 - x_mean;
        sxy += dx * (yi - y_mean);
        sxx += dx * dx;
    }

    let slope = sxy / sxx;
    Some(LinearFit {
        slope,
        intercept: y_mean - slope * x_mean,
    })
}

/// Removes the least-squares linear trend from `y`.
///
/// A single sample detrends to zero. Non-finite input yields an all-`NaN`
/// result; callers that need a fit across gaps fill them first.
pub fn detrend_linear(y: &[f64]) -> Vec<f64> {
    match y.len() {
        0 => Vec::new(),
        1 => vec![if y[0].is_finite() { 0.0 } else { f64::NAN }],
        _ => match linear_fit(y) {
            Some(fit) => y.iter().enumerate().map(|(i, &v)| v - fit.at(i)).collect(),
            None => vec![f64::NAN; y.len()],
        },
    }
}

/// Centred rolling mean over `window` samples.
///
/// The window for position `i` starts at `i - window / 2`. Positions whose
/// window runs past either end, or contains a non-finite value, are `NaN`.
pub fn rolling_mean_centered(data: &[f64], window: usize) -> Vec<f64> {
    let n = data.len();
    if window == 0 {
        return vec![f64::NAN; n];
    }
    let half = window / 2;
    (0..n)
        .map(|i| {
            if i < half || i - half + window > n {
                return f64::NAN;
            }
            let slice = &data[i - half..i - half + window];
            if slice.iter().all(|v| v.is_finite()) {
                mean(slice)
            } else {
                f64::NAN
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_mean() {
        let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(mean(&data), 5.0, epsilon = 1e-12);
    }

    #[test]
    fn test_mean_empty() {
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn test_population_sd() {
        let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(population_sd(&data), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_nan_mean_skips_missing() {
        assert_relative_eq!(nan_mean(&[1.0, f64::NAN, 3.0]), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_nan_mean_all_missing() {
        assert!(nan_mean(&[f64::NAN, f64::NAN]).is_nan());
        assert!(nan_mean(&[]).is_nan());
    }

    #[test]
    fn test_nan_max_min() {
        let data = [3.0, f64::NAN, -1.0, 7.5];
        assert_eq!(nan_max(&data), 7.5);
        assert_eq!(nan_min(&data), -1.0);
        assert!(nan_max(&[f64::NAN]).is_nan());
        assert!(nan_min(&[]).is_nan());
    }

    #[test]
    fn test_nan_population_sd() {
        let data = [2.0, 4.0, f64::NAN, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(nan_population_sd(&data), 2.0, epsilon = 1e-12);
        assert!(nan_population_sd(&[f64::NAN]).is_nan());
    }

    #[test]
    fn test_linear_fit_exact_line() {
        let y: Vec<f64> = (0..5).map(|i| 3.0 + 2.0 * i as f64).collect();
        let fit = linear_fit(&y).unwrap();
        assert_relative_eq!(fit.slope, 2.0, epsilon = 1e-12);
        assert_relative_eq!(fit.intercept, 3.0, epsilon = 1e-12);
        assert_relative_eq!(fit.at(4), 11.0, epsilon = 1e-12);
    }

    #[test]
    fn test_linear_fit_rejects_short_and_nan() {
        assert!(linear_fit(&[1.0]).is_none());
        assert!(linear_fit(&[1.0, f64::NAN, 3.0]).is_none());
    }

    #[test]
    fn test_detrend_removes_line() {
        let y: Vec<f64> = (0..10).map(|i| -4.0 + 0.5 * i as f64).collect();
        for v in detrend_linear(&y) {
            assert!(v.abs() < 1e-12, "residual {v} should be zero");
        }
    }

    #[test]
    fn test_detrend_keeps_oscillation_mean_zero() {
        let y: Vec<f64> = (0..48)
            .map(|i| (2.0 * std::f64::consts::PI * i as f64 / 12.0).sin() + 0.1 * i as f64)
            .collect();
        let d = detrend_linear(&y);
        assert_relative_eq!(mean(&d), 0.0, epsilon = 1e-10);
        let refit = linear_fit(&d).unwrap();
        assert!(refit.slope.abs() < 1e-10);
    }

    #[test]
    fn test_detrend_single_sample() {
        assert_eq!(detrend_linear(&[42.0]), vec![0.0]);
        assert!(detrend_linear(&[]).is_empty());
    }

    #[test]
    fn test_rolling_mean_odd_window() {
        let data = [1.0, 2.0, 3.0, 4.0, 5.0];
        let r = rolling_mean_centered(&data, 3);
        assert!(r[0].is_nan());
        assert_relative_eq!(r[1], 2.0, epsilon = 1e-12);
        assert_relative_eq!(r[2], 3.0, epsilon = 1e-12);
        assert_relative_eq!(r[3], 4.0, epsilon = 1e-12);
        assert!(r[4].is_nan());
    }

    #[test]
    fn test_rolling_mean_even_window() {
        let data = [1.0, 2.0, 3.0, 4.0, 5.0];
        let r = rolling_mean_centered(&data, 2);
        assert!(r[0].is_nan());
        assert_relative_eq!(r[1], 1.5, epsilon = 1e-12);
        assert_relative_eq!(r[4], 4.5, epsilon = 1e-12);
    }

    #[test]
    fn test_rolling_mean_propagates_missing() {
        let data = [1.0, 2.0, f64::NAN, 4.0, 5.0, 6.0];
        let r = rolling_mean_centered(&data, 3);
        assert!(r[1].is_nan());
        assert!(r[3].is_nan());
        assert_relative_eq!(r[4], 5.0, epsilon = 1e-12);
    }

    #[test]
    fn test_rolling_mean_window_longer_than_data() {
        let r = rolling_mean_centered(&[1.0, 2.0], 5);
        assert!(r.iter().all(|v| v.is_nan()));
    }
}
