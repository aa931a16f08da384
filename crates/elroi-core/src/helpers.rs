// File: crates/elroi-core/src/helpers.rs
// Summary: Data helpers: normalize raw series groups into numeric arrays for axis scaling.
// Notes:
// - Every function here is total. Empty or malformed input degrades to a safe
//   default (`false`, `[[0]]`, `[0]`) because axis scaling and grid drawing always
//   need a non-empty domain to compute against.

use crate::options::{SeriesOptions, YBound};
use crate::series::{Point, Series, SeriesType};

/// True when there is at least one series and the first one has point data.
/// Only looks at structure, never at values.
pub fn has_data(all_series: &[Series]) -> bool {
    all_series.first().is_some_and(|s| !s.series.is_empty())
}

/// One numeric sequence per series group, ready for axis scaling.
///
/// Stacked bars produce per-index stack totals; every other type concatenates
/// its layers' values in order. `series_options[i]` types group `i`; a missing
/// entry falls back to the default (line) options.
pub fn get_data_values(all_series: &[Series], series_options: &[SeriesOptions]) -> Vec<Vec<f64>> {
    if !has_data(all_series) {
        return vec![vec![0.0]];
    }

    let fallback = SeriesOptions::default();
    all_series
        .iter()
        .enumerate()
        .map(|(i, series)| {
            let options = series_options.get(i).unwrap_or(&fallback);
            let values = match options.series_type.kind() {
                Some(SeriesType::StackedBar) => stack_totals(&series.series),
                _ => concatenated_values(&series.series),
            };
            if values.is_empty() { vec![0.0] } else { values }
        })
        .collect()
}

fn concatenated_values(layers: &[Vec<Point>]) -> Vec<f64> {
    layers.iter().flatten().filter_map(|p| p.value).collect()
}

fn stack_totals(layers: &[Vec<Point>]) -> Vec<f64> {
    let len = layers.iter().map(Vec::len).max().unwrap_or(0);
    let mut totals = vec![0.0; len];
    for layer in layers {
        for (total, point) in totals.iter_mut().zip(layer) {
            *total += point.value.unwrap_or(0.0);
        }
    }
    totals
}

/// Sum of each sequence. Empty input yields `[0]`.
pub fn sum_series(data_values: &[Vec<f64>]) -> Vec<f64> {
    if data_values.is_empty() {
        return vec![0.0];
    }
    data_values.iter().map(|values| values.iter().sum()).collect()
}

/// True if any point of any layer of any series carries a point flag.
pub fn has_point_flags(all_series: &[Series]) -> bool {
    all_series.iter().any(|s| s.points().any(Point::has_flag))
}

/// Point values with interior gaps filled by linear interpolation.
/// Leading and trailing gaps have no neighbour on one side and stay `None`.
pub fn interpolate_nulls(points: &[Point]) -> Vec<Option<f64>> {
    let mut out: Vec<Option<f64>> = points.iter().map(|p| p.value).collect();
    let mut prev: Option<(usize, f64)> = None;
    for i in 0..out.len() {
        let Some(v) = out[i] else { continue };
        if let Some((j, pv)) = prev {
            let span = (i - j) as f64;
            for k in (j + 1)..i {
                let t = (k - j) as f64 / span;
                out[k] = Some(pv + (v - pv) * t);
            }
        }
        prev = Some((i, v));
    }
    out
}

/// `(min, max)` of a group's values after applying the series' y bounds.
/// A non-finite bound falls back to the data. A collapsed or inverted range is widened to `min + 1`.
pub fn value_range(values: &[f64], options: &SeriesOptions) -> (f64, f64) {
    let data_min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let data_max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let data_min = if data_min.is_finite() { data_min } else { 0.0 };
    let data_max = if data_max.is_finite() { data_max } else { 0.0 };

    let min = match options.min_y_value {
        YBound::Value(v) if v.is_finite() => v,
        _ => data_min,
    };
    let max = match options.max_y_value {
        YBound::Value(v) if v.is_finite() => v,
        _ => data_max,
    };
    if max <= min { (min, min + 1.0) } else { (min, max) }
}

/// Smallest "round" number (1, 2, 2.5, 5 times a power of ten) that is >= `value`.
pub fn nice_ceiling(value: f64) -> f64 {
    if value == 0.0 || !value.is_finite() {
        return value;
    }
    if value < 0.0 {
        return -nice_floor(-value);
    }
    let magnitude = 10f64.powf(value.log10().floor());
    let fraction = value / magnitude;
    let nice = [1.0, 2.0, 2.5, 5.0, 10.0]
        .into_iter()
        .find(|&n| fraction <= n + 1e-9)
        .unwrap_or(10.0);
    nice * magnitude
}

fn nice_floor(value: f64) -> f64 {
    let magnitude = 10f64.powf(value.log10().floor());
    let fraction = value / magnitude;
    let nice = [10.0, 5.0, 2.5, 2.0, 1.0]
        .into_iter()
        .find(|&n| fraction + 1e-9 >= n)
        .unwrap_or(1.0);
    nice * magnitude
}
