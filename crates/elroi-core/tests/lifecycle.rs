// File: crates/elroi-core/tests/lifecycle.rs
// Purpose: Construction, draw dispatch, and the clear/update lifecycle against the headless collaborators.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use elroi_core::graph::GraphState;
use elroi_core::options::YBound;
use elroi_core::render::DefaultGridRenderer;
use elroi_core::{
    elroi, DrawingSurface, Elroi, ElroiArgs, ElementKind, GridRenderer, HeadlessHost, Layer, PartialOptions,
    RecordingSurface, Renderers, Series, SeriesRenderer, SeriesType,
};
use elroi_core::types::Size;

struct CountingGrid(Rc<Cell<usize>>);

impl GridRenderer for CountingGrid {
    fn render(&self, state: &GraphState) -> Layer {
        self.0.set(self.0.get() + 1);
        DefaultGridRenderer.render(state)
    }
}

/// Records the group indices it was asked to draw.
struct Recorder(Rc<RefCell<Vec<usize>>>);

impl SeriesRenderer for Recorder {
    fn render(&self, _state: &GraphState, index: usize) -> Layer {
        self.0.borrow_mut().push(index);
        Layer::new()
    }
}

struct Probes {
    grid: Rc<Cell<usize>>,
    line: Rc<RefCell<Vec<usize>>>,
    bars: Rc<RefCell<Vec<usize>>>,
    pie: Rc<RefCell<Vec<usize>>>,
}

fn probed_renderers() -> (Renderers, Probes) {
    let probes = Probes {
        grid: Rc::new(Cell::new(0)),
        line: Rc::default(),
        bars: Rc::default(),
        pie: Rc::default(),
    };
    let renderers = Renderers {
        grid: Box::new(CountingGrid(probes.grid.clone())),
        line: Box::new(Recorder(probes.line.clone())),
        stacked_bar: Box::new(Recorder(probes.bars.clone())),
        pie: Box::new(Recorder(probes.pie.clone())),
    };
    (renderers, probes)
}

fn build(data: Vec<Series>, options: PartialOptions) -> Elroi<HeadlessHost, RecordingSurface> {
    let mut host = HeadlessHost::new();
    let container = host.add_container(Size::new(600.0, 300.0));
    elroi(ElroiArgs::new(container, data).with_options(options), host, RecordingSurface::new)
}

fn monthly() -> Vec<Series> {
    vec![Series::from_values(&[
        &[3.0, 5.0, 4.0, 6.0, 8.0, 7.0],
        &[1.0, 2.0, 2.0, 3.0, 1.0, 2.0],
    ])]
}

fn options(json: &str) -> PartialOptions {
    PartialOptions::from_json(json).expect("parse options")
}

#[test]
fn construction_sets_up_paper_and_hidden_tooltip() {
    let chart = build(monthly(), PartialOptions::default());
    let graph = chart.graph();
    let host = graph.host();

    assert_eq!(host.count(ElementKind::Paper), 1);
    assert_eq!(host.count(ElementKind::Tooltip), 1);
    assert_eq!(graph.surface().primitive_count(), 0, "nothing drawn before draw()");

    let tooltip = host.element(graph.tooltip_element()).expect("tooltip element");
    assert_eq!(tooltip.parent, Some(graph.paper()));
    assert_eq!(tooltip.position.x, -10_000.0);
    assert_eq!(tooltip.width, Some(120.0));
    assert!(host.element(graph.container()).expect("container").listens_pointer_leave);

    assert_eq!(graph.state.layout.width, 600.0);
    assert_eq!(graph.state.layout.height, 300.0);
    assert_eq!(graph.surface().size(), Size::new(600.0, 300.0));
}

#[test]
fn styled_paper_size_wins_per_dimension() {
    let mut host = HeadlessHost::new().with_styled_size(ElementKind::Paper, Size::new(400.0, 0.0));
    let container = host.add_container(Size::new(600.0, 300.0));
    let chart = elroi(ElroiArgs::new(container, monthly()), host, RecordingSurface::new);

    assert_eq!(chart.graph().state.layout.width, 400.0);
    assert_eq!(chart.graph().state.layout.height, 300.0);
}

#[test]
fn clear_then_draw_is_idempotent() {
    let mut chart = build(monthly(), options(r#"{ "seriesDefaults": { "labelPoints": true } }"#));
    chart.draw();
    let primitives = chart.graph().surface().primitives().to_vec();
    let labels = chart.graph().host().count(ElementKind::PointLabel);
    let axes = chart.graph().host().count(ElementKind::AxisLabels);
    assert!(!primitives.is_empty());
    assert_eq!(labels, 12);

    chart.clear();
    chart.draw();
    assert_eq!(chart.graph().surface().primitives(), primitives.as_slice());
    assert_eq!(chart.graph().host().count(ElementKind::PointLabel), labels);
    assert_eq!(chart.graph().host().count(ElementKind::AxisLabels), axes);
}

#[test]
fn clear_keeps_paper_and_tooltip() {
    let mut chart = build(monthly(), options(r#"{ "errorMessage": "Data not available." }"#));
    chart.draw();
    chart.clear();

    let host = chart.graph().host();
    assert_eq!(chart.graph().surface().primitive_count(), 0);
    assert_eq!(host.count(ElementKind::AxisLabels), 0);
    assert_eq!(host.count(ElementKind::AxisLabel), 0);
    assert_eq!(host.count(ElementKind::ErrorBanner), 0);
    assert_eq!(host.count(ElementKind::Paper), 1);
    assert_eq!(host.count(ElementKind::Tooltip), 1);
}

#[test]
fn update_replaces_everything_drawn() {
    let replacement = vec![
        Series::from_values(&[&[10.0, 20.0, 30.0]]),
        Series::from_values(&[&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]]).with_type(SeriesType::StackedBar),
    ];

    let mut chart = build(monthly(), PartialOptions::default());
    chart.draw();
    chart.update(replacement.clone());

    let mut fresh = build(replacement, PartialOptions::default());
    fresh.draw();

    assert_eq!(chart.graph().surface().primitives(), fresh.graph().surface().primitives());
    assert_eq!(
        chart.graph().host().count(ElementKind::AxisLabels),
        fresh.graph().host().count(ElementKind::AxisLabels)
    );
}

#[test]
fn update_draws_grid_once_and_every_group() {
    let (renderers, probes) = probed_renderers();
    let mut chart = build(monthly(), PartialOptions::default()).with_renderers(renderers);
    chart.draw();
    assert_eq!(probes.grid.get(), 1);

    chart.update(vec![
        Series::from_values(&[&[1.0]]),
        Series::from_values(&[&[2.0]]).with_type(SeriesType::StackedBar),
        Series::from_values(&[&[3.0]]),
    ]);
    assert_eq!(probes.grid.get(), 2, "exactly one more grid");
    assert_eq!(*probes.line.borrow(), vec![0, 0, 2]);
    assert_eq!(*probes.bars.borrow(), vec![1]);
    assert_eq!(chart.graph().state.series_options.len(), 3);
}

#[test]
fn pie_only_graph_has_no_grid() {
    let (renderers, probes) = probed_renderers();
    let data = vec![Series::from_values(&[&[1.0], &[3.0]]).with_type(SeriesType::Pie)];
    let mut chart = build(data, PartialOptions::default()).with_renderers(renderers);
    chart.draw();

    assert_eq!(probes.grid.get(), 0);
    assert_eq!(*probes.pie.borrow(), vec![0]);
}

#[test]
fn grid_precedes_first_non_pie_group() {
    let (renderers, probes) = probed_renderers();
    let data = vec![
        Series::from_values(&[&[1.0], &[3.0]]).with_type(SeriesType::Pie),
        Series::from_values(&[&[1.0, 2.0]]),
    ];
    let mut chart = build(data, PartialOptions::default()).with_renderers(renderers);
    chart.draw();

    assert_eq!(probes.grid.get(), 1);
    assert_eq!(*probes.pie.borrow(), vec![0]);
    assert_eq!(*probes.line.borrow(), vec![1]);
}

#[test]
fn empty_data_still_draws_grid() {
    let (renderers, probes) = probed_renderers();
    let mut chart = build(Vec::new(), PartialOptions::default()).with_renderers(renderers);
    chart.draw();

    assert_eq!(probes.grid.get(), 1);
    assert!(probes.line.borrow().is_empty());
    assert_eq!(chart.graph().state.data_values(), vec![vec![0.0]]);
}

#[test]
fn unknown_series_type_is_skipped() {
    let (renderers, probes) = probed_renderers();
    let data = vec![Series::from_values(&[&[1.0, 2.0]]).with_type("scatter")];
    let mut chart = build(data, PartialOptions::default()).with_renderers(renderers);
    chart.draw();

    assert_eq!(probes.grid.get(), 1);
    assert!(probes.line.borrow().is_empty());
    assert!(probes.bars.borrow().is_empty());
    assert!(probes.pie.borrow().is_empty());
}

#[test]
fn series_type_comes_from_defaults_unless_overridden() {
    let (renderers, probes) = probed_renderers();
    let data = vec![
        Series::from_values(&[&[1.0, 2.0]]),
        Series::from_values(&[&[1.0, 2.0]]).with_type(SeriesType::Line),
    ];
    let defaults = options(r#"{ "seriesDefaults": { "type": "stackedBar" } }"#);
    let mut chart = build(data, defaults).with_renderers(renderers);
    chart.draw();

    assert_eq!(*probes.bars.borrow(), vec![0]);
    assert_eq!(*probes.line.borrow(), vec![1]);
}

#[test]
fn error_banner_sits_above_drawn_series() {
    let (renderers, probes) = probed_renderers();
    let mut chart = build(monthly(), options(r#"{ "errorMessage": "Data not available." }"#)).with_renderers(renderers);
    chart.draw();

    let graph = chart.graph();
    let host = graph.host();
    let banner = host.elements_of(ElementKind::ErrorBanner).next().expect("banner");
    assert_eq!(banner.content, "Data not available.");
    let paper = host.element(graph.paper()).expect("paper");
    assert_eq!(paper.children().first(), Some(&banner.id), "banner is prepended");
    assert_eq!(*probes.line.borrow(), vec![0], "series still drawn");

    chart.update(monthly());
    assert_eq!(chart.graph().host().count(ElementKind::ErrorBanner), 1, "banners do not pile up");
}

#[test]
fn colors_continue_across_groups() {
    let data = vec![
        Series::from_values(&[&[1.0, 2.0], &[2.0, 3.0]]),
        Series::from_values(&[&[3.0, 4.0]]),
    ];
    let chart = build(data, PartialOptions::default());
    assert_eq!(chart.graph().state.color_offset(0), 0);
    assert_eq!(chart.graph().state.color_offset(1), 2);
}

#[test]
fn json_entry_point_builds_a_graph() {
    let data = Series::list_from_json(
        r#"[{ "series": [[{ "value": 4 }, { "value": null }, { "value": 6 }]], "options": { "type": "stackedBar" } }]"#,
    )
    .expect("parse data");
    let mut chart = build(data, PartialOptions::default());
    chart.draw();

    // gridlines, baseline and two non-zero bars
    let rects = chart
        .graph()
        .surface()
        .primitives()
        .iter()
        .filter(|p| matches!(p, elroi_core::Primitive::Rect { .. }))
        .count();
    assert_eq!(rects, 2);
}

#[test]
fn non_finite_bound_still_draws_bars() {
    let mut series = Series::from_values(&[&[4.0, 6.0]]).with_type(SeriesType::StackedBar);
    series.options.max_y_value = Some(YBound::Value(f64::NAN));
    let mut chart = build(vec![series], PartialOptions::default());
    chart.draw();

    let rects = chart
        .graph()
        .surface()
        .primitives()
        .iter()
        .filter(|p| matches!(p, elroi_core::Primitive::Rect { .. }))
        .count();
    assert_eq!(rects, 2);
}
