// File: crates/elroi-core/src/graph.rs
// Summary: Graph state container: merged configuration, series data, layout, tooltip, and the collaborators.

use tracing::debug;

use crate::geometry::Point2;
use crate::helpers::{self, get_data_values, value_range};
use crate::host::{ElementId, ElementKind, Host, Overlay, Placement};
use crate::options::{Options, PartialOptions, SeriesOptions};
use crate::render::Layer;
use crate::scale::{BandScale, ValueScale};
use crate::series::Series;
use crate::surface::DrawingSurface;
use crate::tooltip::{TooltipRecord, TooltipState};
use crate::types::{Layout, Size};

/// Input of a construction call.
#[derive(Clone, Debug, Default)]
pub struct ElroiArgs {
    pub container: ElementId,
    pub data: Vec<Series>,
    pub options: PartialOptions,
    pub tooltips: Vec<TooltipRecord>,
}

impl ElroiArgs {
    pub fn new(container: ElementId, data: Vec<Series>) -> Self {
        Self { container, data, options: PartialOptions::default(), tooltips: Vec::new() }
    }

    pub fn with_options(mut self, options: PartialOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_tooltips(mut self, tooltips: Vec<TooltipRecord>) -> Self {
        self.tooltips = tooltips;
        self
    }
}

/// Everything drawers read: configuration, data and layout. Independent of the collaborators.
#[derive(Clone, Debug)]
pub struct GraphState {
    pub options: Options,
    pub all_series: Vec<Series>,
    /// `options.series_defaults` merged with each series' own options; parallel to `all_series`.
    pub series_options: Vec<SeriesOptions>,
    pub tooltips: Vec<TooltipRecord>,
    pub layout: Layout,
    pub tooltip: TooltipState,
}

impl GraphState {
    pub fn new(options: Options, all_series: Vec<Series>, tooltips: Vec<TooltipRecord>, size: Size) -> Self {
        let layout = Layout::new(size, options.padding);
        let tooltip = TooltipState::hidden(options.tooltip.width);
        let mut state = Self {
            options,
            all_series: Vec::new(),
            series_options: Vec::new(),
            tooltips,
            layout,
            tooltip,
        };
        state.set_series(all_series);
        state
    }

    /// Replace the series data and re-derive the per-series options from it.
    pub fn set_series(&mut self, all_series: Vec<Series>) {
        self.series_options = all_series
            .iter()
            .map(|s| self.options.series_defaults.merged(s.options.clone()))
            .collect();
        self.all_series = all_series;
    }

    pub fn has_data(&self) -> bool { helpers::has_data(&self.all_series) }

    pub fn has_point_flags(&self) -> bool { helpers::has_point_flags(&self.all_series) }

    pub fn data_values(&self) -> Vec<Vec<f64>> {
        get_data_values(&self.all_series, &self.series_options)
    }

    /// Axis range of series group `index`, with the top rounded up to a readable number.
    /// Groups that do not exist get the range of the empty-data sentinel.
    pub fn value_range(&self, index: usize) -> (f64, f64) {
        let values = self.data_values();
        let empty = vec![0.0];
        let group = values.get(index).unwrap_or(&empty);
        let fallback = SeriesOptions::default();
        let options = self.series_options.get(index).unwrap_or(&fallback);
        let (min, max) = value_range(group, options);
        let nice = helpers::nice_ceiling(max);
        (min, if nice > min { nice } else { max })
    }

    /// Y scale for series group `index` across the plot area.
    pub fn y_scale(&self, index: usize) -> ValueScale {
        let plot = self.layout.plot_rect();
        let (min, max) = self.value_range(index);
        ValueScale::new(plot.top, plot.bottom, min, max)
    }

    /// X scale with one band per point of series group `index`.
    pub fn x_scale(&self, index: usize) -> BandScale {
        let plot = self.layout.plot_rect();
        let count = self.all_series.get(index).map_or(0, Series::point_count);
        BandScale::new(plot.left, plot.right, count)
    }

    /// Palette offset of the first layer of series group `index`.
    pub fn color_offset(&self, index: usize) -> usize {
        self.all_series.iter().take(index).map(|s| s.series.len()).sum()
    }
}

/// The graph: state plus the drawing surface and the host it lives in.
pub struct Graph<H: Host, S: DrawingSurface> {
    pub state: GraphState,
    surface: S,
    host: H,
    container: ElementId,
    paper: ElementId,
    tooltip_element: ElementId,
}

impl<H: Host, S: DrawingSurface> Graph<H, S> {
    /// Merge configuration, size the paper, create the surface and the (hidden) tooltip.
    pub fn new(args: ElroiArgs, mut host: H, make_surface: impl FnOnce(Size) -> S) -> Self {
        let options = Options::merged(args.options);
        let container = args.container;

        let paper = host.create_element(container, ElementKind::Paper, Placement::Append);
        let paper_size = host.size(paper);
        let container_size = host.size(container);
        let size = Size::new(
            if paper_size.width > 0.0 { paper_size.width } else { container_size.width },
            if paper_size.height > 0.0 { paper_size.height } else { container_size.height },
        );
        let surface = make_surface(size);

        let state = GraphState::new(options, args.data, args.tooltips, size);

        let tooltip_element = host.create_element(paper, ElementKind::Tooltip, Placement::Append);
        host.set_width(tooltip_element, state.tooltip.width);
        host.sync_tooltip(tooltip_element, &state.tooltip);
        host.listen_pointer_leave(container);

        debug!(
            width = size.width,
            height = size.height,
            series = state.all_series.len(),
            "graph initialised"
        );

        Self { state, surface, host, container, paper, tooltip_element }
    }

    pub fn surface(&self) -> &S { &self.surface }
    pub fn host(&self) -> &H { &self.host }
    pub fn host_mut(&mut self) -> &mut H { &mut self.host }
    pub fn container(&self) -> ElementId { self.container }
    pub fn paper(&self) -> ElementId { self.paper }
    pub fn tooltip_element(&self) -> ElementId { self.tooltip_element }

    /// Hand a drawer's output to the collaborators.
    pub fn commit(&mut self, layer: Layer) {
        for primitive in layer.primitives {
            self.surface.draw(primitive);
        }
        for overlay in &layer.overlays {
            attach_overlay(&mut self.host, self.container, overlay);
        }
    }

    /// Prepend an error banner to the paper.
    pub fn show_error(&mut self, message: &str) {
        let banner = self.host.create_element(self.paper, ElementKind::ErrorBanner, Placement::Prepend);
        self.host.set_content(banner, message);
    }

    /// Remove every drawn primitive and every overlay. Paper, surface and tooltip survive.
    pub fn clear(&mut self) {
        self.surface.clear();
        let mut removed = 0;
        for kind in [
            ElementKind::AxisLabels,
            ElementKind::PointFlag,
            ElementKind::PointLabel,
            ElementKind::ErrorBanner,
        ] {
            removed += self.host.remove_all(self.container, kind);
        }
        debug!(removed_overlays = removed, "graph cleared");
    }

    pub fn show_tooltip(&mut self, position: Point2, content: String) {
        self.state.tooltip.show(position, content);
        self.host.sync_tooltip(self.tooltip_element, &self.state.tooltip);
    }

    pub fn hide_tooltip(&mut self) {
        self.state.tooltip.hide();
        self.host.sync_tooltip(self.tooltip_element, &self.state.tooltip);
    }

    /// Give the collaborators back, e.g. to export the surface.
    pub fn into_parts(self) -> (H, S) { (self.host, self.surface) }
}

fn attach_overlay<H: Host>(host: &mut H, parent: ElementId, overlay: &Overlay) {
    let id = host.create_element(parent, overlay.kind, Placement::Append);
    host.set_position(id, overlay.position);
    if !overlay.content.is_empty() {
        host.set_content(id, &overlay.content);
    }
    for child in &overlay.children {
        attach_overlay(host, id, child);
    }
}
