// File: crates/elroi-core/tests/helpers.rs
// Purpose: Validate data normalization helpers on the shapes callers actually pass.

use elroi_core::helpers::{interpolate_nulls, nice_ceiling, value_range};
use elroi_core::options::YBound;
use elroi_core::{get_data_values, has_data, has_point_flags, sum_series};
use elroi_core::{Point, Series, SeriesOptions, SeriesTag, SeriesType};

fn options(series_type: SeriesType) -> SeriesOptions {
    SeriesOptions { series_type: SeriesTag::Known(series_type), ..SeriesOptions::default() }
}

fn two_layers(with_flag: bool) -> Vec<Series> {
    let first = (1..=5).map(|v| Point::new(v as f64)).collect();
    let second = (6..=10)
        .map(|v| {
            let p = Point::new(v as f64);
            if with_flag && v == 7 { p.with_flag("Flag!") } else { p }
        })
        .collect();
    vec![Series::new(vec![first, second])]
}

#[test]
fn has_data_checks_structure_only() {
    assert!(!has_data(&[]), "no data at all");
    assert!(!has_data(&[Series::new(vec![])]), "series present but empty");
    assert!(has_data(&[Series::from_values(&[&[10.0], &[20.0], &[30.0]])]), "valid data");
    // values are not inspected: a layer of gaps still counts as data
    assert!(has_data(&[Series::new(vec![vec![Point::null()]])]));
}

#[test]
fn line_values_are_concatenated() {
    let values = get_data_values(&two_layers(true), &[options(SeriesType::Line)]);
    assert_eq!(values, vec![vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0]]);
}

#[test]
fn stacked_bar_values_are_summed_per_index() {
    let values = get_data_values(&two_layers(true), &[options(SeriesType::StackedBar)]);
    assert_eq!(values, vec![vec![7.0, 9.0, 11.0, 13.0, 15.0]]);
}

#[test]
fn empty_input_yields_zero_sentinel() {
    assert_eq!(get_data_values(&[], &[options(SeriesType::StackedBar)]), vec![vec![0.0]]);
    assert_eq!(get_data_values(&[Series::new(vec![])], &[]), vec![vec![0.0]]);
}

#[test]
fn missing_series_options_fall_back_to_line() {
    let values = get_data_values(&two_layers(false), &[]);
    assert_eq!(values[0].len(), 10);
}

#[test]
fn nulls_are_skipped_for_lines_and_zero_for_bars() {
    let series = vec![Series::new(vec![
        vec![Point::new(1.0), Point::null(), Point::new(3.0)],
        vec![Point::new(2.0), Point::new(2.0)],
    ])];
    assert_eq!(get_data_values(&series, &[options(SeriesType::Line)]), vec![vec![1.0, 3.0, 2.0, 2.0]]);
    // ragged layers sum over the longest one
    assert_eq!(get_data_values(&series, &[options(SeriesType::StackedBar)]), vec![vec![3.0, 2.0, 3.0]]);
}

#[test]
fn group_without_values_contributes_zero() {
    let series = vec![
        Series::from_values(&[&[4.0]]),
        Series::new(vec![vec![Point::null()]]),
    ];
    let values = get_data_values(&series, &[options(SeriesType::Line), options(SeriesType::Line)]);
    assert_eq!(values, vec![vec![4.0], vec![0.0]]);
}

#[test]
fn sum_series_reduces_each_sequence() {
    let line = vec![vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0]];
    assert_eq!(sum_series(&line), vec![55.0]);
    assert_eq!(sum_series(&[vec![1.0, 1.0], vec![2.5]]), vec![2.0, 2.5]);
    assert_eq!(sum_series(&[]), vec![0.0]);
}

#[test]
fn point_flags_are_detected_anywhere() {
    assert!(has_point_flags(&two_layers(true)), "has point flags");
    assert!(!has_point_flags(&two_layers(false)), "does not have point flags");
    assert!(!has_point_flags(&[]));
}

#[test]
fn json_series_with_false_flags() {
    let json = r#"[{
        "options": {},
        "series": [
            [{ "value": 1 }, { "value": 2, "pointFlag": false }, { "value": null }],
            [{ "value": 6 }, { "value": 7, "pointFlag": "<div>Flag!</div>" }]
        ]
    }]"#;
    let series = Series::list_from_json(json).expect("parse series");
    assert_eq!(series[0].series.len(), 2);
    assert_eq!(series[0].series[0][2].value, None);
    assert!(!series[0].series[0][1].has_flag());
    assert!(has_point_flags(&series));
}

#[test]
fn json_series_with_truthy_flags() {
    let json = r#"[{
        "series": [[
            { "value": 1, "pointFlag": true },
            { "value": 2, "pointFlag": 1 },
            { "value": 3, "pointFlag": { "html": "<b>x</b>" } },
            { "value": 4, "pointFlag": null }
        ]]
    }]"#;
    let series = Series::list_from_json(json).expect("parse series");
    let points = &series[0].series[0];
    assert!(points[..3].iter().all(Point::has_flag));
    assert!(!points[3].has_flag());
    assert_eq!(points[0].point_flag.as_ref().map(|f| f.content()), Some(""));
    assert_eq!(points[1].point_flag.as_ref().map(|f| f.content()), Some("1"));
    assert_eq!(points[2].point_flag.as_ref().map(|f| f.content()), Some(r#"{"html":"<b>x</b>"}"#));
    assert!(has_point_flags(&series));
}

#[test]
fn json_y_bounds_must_be_finite() {
    for bound in ["\"NaN\"", "\"inf\"", "\"-inf\"", "\"lots\""] {
        let json = format!(r#"[{{ "series": [[{{ "value": 4 }}]], "options": {{ "maxYValue": {bound} }} }}]"#);
        assert!(Series::list_from_json(&json).is_err(), "{bound} should be rejected");
    }

    let json = r#"[{ "series": [[{ "value": 4 }]], "options": { "maxYValue": "12", "minYValue": "auto" } }]"#;
    let series = Series::list_from_json(json).expect("parse series");
    assert_eq!(series[0].options.max_y_value, Some(YBound::Value(12.0)));
    assert_eq!(series[0].options.min_y_value, Some(YBound::Auto));
}

#[test]
fn json_series_type_tags() {
    let json = r#"[
        { "series": [[{ "value": 1 }]], "options": { "type": "stackedBar" } },
        { "series": [[{ "value": 1 }]], "options": { "type": "scatter" } }
    ]"#;
    let series = Series::list_from_json(json).expect("parse series");
    assert_eq!(series[0].options.series_type, Some(SeriesTag::Known(SeriesType::StackedBar)));
    assert_eq!(series[1].options.series_type, Some(SeriesTag::Unknown("scatter".into())));
    assert!("scatter".parse::<SeriesType>().is_err());
}

#[test]
fn interior_nulls_are_interpolated() {
    let points = vec![Point::null(), Point::new(1.0), Point::null(), Point::null(), Point::new(4.0), Point::null()];
    let filled = interpolate_nulls(&points);
    assert_eq!(filled, vec![None, Some(1.0), Some(2.0), Some(3.0), Some(4.0), None]);
}

#[test]
fn value_range_honours_bounds() {
    let values = [3.0, 8.0, 5.0];
    assert_eq!(value_range(&values, &SeriesOptions::default()), (0.0, 8.0));

    let pinned = SeriesOptions { max_y_value: YBound::Value(20.0), min_y_value: YBound::Auto, ..SeriesOptions::default() };
    assert_eq!(value_range(&values, &pinned), (3.0, 20.0));

    // collapsed range is widened
    assert_eq!(value_range(&[0.0], &SeriesOptions::default()), (0.0, 1.0));

    // non-finite bounds fall back to the data
    let broken = SeriesOptions {
        max_y_value: YBound::Value(f64::NAN),
        min_y_value: YBound::Value(f64::NEG_INFINITY),
        ..SeriesOptions::default()
    };
    assert_eq!(value_range(&values, &broken), (3.0, 8.0));
}

#[test]
fn nice_ceiling_rounds_up_to_readable_numbers() {
    assert_eq!(nice_ceiling(0.0), 0.0);
    assert_eq!(nice_ceiling(10.0), 10.0);
    assert_eq!(nice_ceiling(15.0), 20.0);
    assert_eq!(nice_ceiling(2.3), 2.5);
    assert_eq!(nice_ceiling(55.0), 100.0);
    assert_eq!(nice_ceiling(100.0), 100.0);
}
