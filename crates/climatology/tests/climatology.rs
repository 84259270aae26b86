use std::collections::BTreeMap;
use std::f64::consts::PI;

use approx::assert_relative_eq;
use chrono::{Days, Months, NaiveDate};
use ndarray::{ArrayD, IxDyn};
use tellus_calendar::TimeResolution;
use tellus_climatology::{ClimatologyError, annual_amplitude, annual_std, compute_climatology, temporal_std};
use tellus_grid::{AliasTable, Coordinate, DataVariable, GridError, GriddedSeries, TimeAxis};

fn monthly_dates(n: u32) -> Vec<NaiveDate> {
    let start = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
    (0..n).map(|i| start + Months::new(i)).collect()
}

fn grid_series(dates: Vec<NaiveDate>, f: impl Fn(usize, usize, usize) -> f64) -> GriddedSeries {
    let n = dates.len();
    let data = ArrayD::from_shape_fn(IxDyn(&[n, 2, 3]), |ix| f(ix[0], ix[1], ix[2]));
    let mut vars = BTreeMap::new();
    vars.insert(
        "sst".to_string(),
        DataVariable::new(&["time", "lat", "lon"], data),
    );
    GriddedSeries::new(
        TimeAxis::new("time", dates),
        vec![
            Coordinate::new("lat", vec![-1.0, 1.0]),
            Coordinate::new("lon", vec![0.0, 1.0, 2.0]),
        ],
        vars,
    )
    .unwrap()
}

fn seasonal(t: usize) -> f64 {
    2.0 * (2.0 * PI * t as f64 / 12.0).sin()
}

#[test]
fn monthly_climatology_averages_each_month() {
    let s = grid_series(monthly_dates(36), |t, lat, lon| {
        seasonal(t) + 0.1 * t as f64 + (lat * 3 + lon) as f64
    });
    let table = compute_climatology(&s, &AliasTable::new()).unwrap();
    assert_eq!(table.resolution(), TimeResolution::Monthly);
    assert_eq!(table.period_dim(), "month");
    assert_eq!(table.periods(), &(1..=12).collect::<Vec<u16>>()[..]);

    let field = table.field("sst").unwrap();
    assert_eq!(field.dims(), &["month", "lat", "lon"].map(String::from));
    assert_eq!(field.values().shape(), &[12, 2, 3]);
    for m in 0..12 {
        // Years 0..3 contribute trend offsets 0, 1.2, 2.4.
        let expected = seasonal(m) + 0.1 * m as f64 + 1.2 + 4.0;
        assert_relative_eq!(field.values()[[m, 1, 1]], expected, epsilon = 1e-12);
    }
}

#[test]
fn climatology_is_bit_identical_across_calls() {
    let s = grid_series(monthly_dates(30), |t, lat, lon| {
        if (t + lat + lon) % 7 == 0 {
            f64::NAN
        } else {
            (t as f64 * 0.37).sin() * (lon + 1) as f64
        }
    });
    let a = compute_climatology(&s, &AliasTable::new()).unwrap();
    let b = compute_climatology(&s, &AliasTable::new()).unwrap();
    let fa = a.field("sst").unwrap().values();
    let fb = b.field("sst").unwrap().values();
    assert_eq!(fa.shape(), fb.shape());
    for (x, y) in fa.iter().zip(fb.iter()) {
        assert_eq!(x.to_bits(), y.to_bits());
    }
}

#[test]
fn missing_samples_are_skipped_in_period_mean() {
    let s = grid_series(monthly_dates(24), |t, lat, lon| {
        if t == 0 && lat == 0 && lon == 0 {
            f64::NAN
        } else {
            t as f64
        }
    });
    let table = compute_climatology(&s, &AliasTable::new()).unwrap();
    let field = table.field("sst").unwrap();
    // January samples are t = 0 and t = 12.
    assert_eq!(field.values()[[0, 0, 0]], 12.0);
    assert_eq!(field.values()[[0, 1, 1]], 6.0);
}

#[test]
fn all_missing_period_is_nan() {
    let s = grid_series(monthly_dates(24), |t, lat, lon| {
        if t % 12 == 2 && lat == 1 && lon == 2 {
            f64::NAN
        } else {
            1.0
        }
    });
    let table = compute_climatology(&s, &AliasTable::new()).unwrap();
    let field = table.field("sst").unwrap();
    assert!(field.values()[[2, 1, 2]].is_nan());
    assert_eq!(field.values()[[2, 0, 0]], 1.0);
}

#[test]
fn partial_year_keeps_only_observed_months() {
    let s = grid_series(monthly_dates(5), |t, _, _| t as f64);
    let table = compute_climatology(&s, &AliasTable::new()).unwrap();
    assert_eq!(table.periods(), &[1, 2, 3, 4, 5]);
    assert_eq!(table.position_of(3), Some(2));
    assert_eq!(table.position_of(8), None);
}

#[test]
fn daily_climatology_groups_by_day_of_year() {
    // 1999-01-01 .. 2000-12-31: 2000 is a leap year.
    let start = NaiveDate::from_ymd_opt(1999, 1, 1).unwrap();
    let dates: Vec<NaiveDate> = (0..731).map(|i| start + Days::new(i)).collect();
    let s = grid_series(dates, |t, _, _| if t < 365 { 1.0 } else { 3.0 });
    let table = compute_climatology(&s, &AliasTable::new()).unwrap();
    assert_eq!(table.resolution(), TimeResolution::Daily);
    assert_eq!(table.period_dim(), "dayofyear");
    assert_eq!(table.periods().len(), 366);

    let field = table.field("sst").unwrap();
    assert_eq!(field.values()[[0, 0, 0]], 2.0);
    // Day 366 only occurs in 2000.
    assert_eq!(field.values()[[365, 0, 0]], 3.0);
}

#[test]
fn unsupported_resolution_fails() {
    let start = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
    let dates: Vec<NaiveDate> = (0..6).map(|i| start + Months::new(3 * i)).collect();
    let s = grid_series(dates, |_, _, _| 0.0);
    let err = compute_climatology(&s, &AliasTable::new()).unwrap_err();
    assert!(
        matches!(err, ClimatologyError::Grid(GridError::Calendar(_))),
        "unexpected error: {err:?}"
    );
}

#[test]
fn amplitude_of_pure_cycle() {
    let s = grid_series(monthly_dates(36), |t, lat, _| (lat + 1) as f64 * seasonal(t));
    let table = compute_climatology(&s, &AliasTable::new()).unwrap();
    let amp = annual_amplitude(&table);
    let field = amp.field("sst").unwrap();
    assert_eq!(field.dims(), &["lat", "lon"].map(String::from));
    assert_relative_eq!(field.values()[[0, 0]], 2.0, epsilon = 1e-12);
    assert_relative_eq!(field.values()[[1, 2]], 4.0, epsilon = 1e-12);
}

#[test]
fn amplitude_is_half_range_and_non_negative() {
    let s = grid_series(monthly_dates(40), |t, lat, lon| {
        ((t * 7 + lat * 5 + lon * 3) % 11) as f64 - 5.0
    });
    let table = compute_climatology(&s, &AliasTable::new()).unwrap();
    let clim = table.field("sst").unwrap().values();
    let amp = annual_amplitude(&table);
    let field = amp.field("sst").unwrap().values();
    for lat in 0..2 {
        for lon in 0..3 {
            let column: Vec<f64> = (0..12).map(|m| clim[[m, lat, lon]]).collect();
            let max = column.iter().copied().fold(f64::MIN, f64::max);
            let min = column.iter().copied().fold(f64::MAX, f64::min);
            let a = field[[lat, lon]];
            assert!(a >= 0.0, "amplitude {a} at ({lat}, {lon}) is negative");
            assert_relative_eq!(a, (max - min) / 2.0, epsilon = 1e-12);
        }
    }
}

#[test]
fn temporal_and_annual_std() {
    let s = grid_series(monthly_dates(24), |t, _, _| seasonal(t));
    let sd = temporal_std(&s, "sst").unwrap();
    assert_eq!(sd.dims(), &["lat", "lon"].map(String::from));
    // Population std of 2 sin over whole cycles is 2 / sqrt(2).
    assert_relative_eq!(sd.values()[[0, 0]], 2.0_f64.sqrt(), epsilon = 1e-12);

    let table = compute_climatology(&s, &AliasTable::new()).unwrap();
    let annual = annual_std(&table, "sst").unwrap();
    assert_relative_eq!(annual.values()[[1, 2]], 2.0_f64.sqrt(), epsilon = 1e-12);

    assert!(matches!(
        annual_std(&table, "chl"),
        Err(ClimatologyError::MissingClimatology { .. })
    ));
}

#[test]
fn every_variable_gets_a_climatology() {
    let dates = monthly_dates(12);
    let mut vars = BTreeMap::new();
    vars.insert(
        "a".to_string(),
        DataVariable::new(&["time", "lat"], ArrayD::from_elem(IxDyn(&[12, 2]), 1.0)),
    );
    vars.insert(
        "b".to_string(),
        DataVariable::new(&["lat", "time"], ArrayD::from_elem(IxDyn(&[2, 12]), 2.0)),
    );
    let s = GriddedSeries::new(
        TimeAxis::new("time", dates),
        vec![Coordinate::new("lat", vec![0.0, 1.0])],
        vars,
    )
    .unwrap();
    let table = compute_climatology(&s, &AliasTable::new()).unwrap();
    assert_eq!(table.fields().len(), 2);
    let b = table.field("b").unwrap();
    assert_eq!(b.dims(), &["month", "lat"].map(String::from));
    assert_eq!(b.values()[[11, 1]], 2.0);
}
