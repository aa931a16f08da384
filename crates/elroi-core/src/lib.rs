// File: crates/elroi-core/src/lib.rs
// Summary: Core library entry point; exports the public API for building, drawing and updating graphs.

pub mod chart;
pub mod error;
pub mod geometry;
pub mod graph;
pub mod helpers;
pub mod host;
pub mod options;
pub mod render;
pub mod scale;
pub mod series;
pub mod surface;
pub mod theme;
pub mod tooltip;
pub mod types;

pub use chart::{elroi, Elroi, PointerEvent};
pub use error::{ElroiError, Result};
pub use graph::{ElroiArgs, Graph, GraphState};
pub use helpers::{get_data_values, has_data, has_point_flags, sum_series};
pub use host::{ElementId, ElementKind, HeadlessHost, Host, Overlay};
pub use options::{Options, PartialOptions, PartialSeriesOptions, SeriesOptions};
pub use render::{GridRenderer, Layer, Renderers, SeriesRenderer};
pub use series::{Point, PointFlag, Series, SeriesTag, SeriesType};
pub use surface::{DrawingSurface, Primitive, RecordingSurface};
pub use theme::Color;
pub use tooltip::{TooltipRecord, TooltipState};
pub use types::{Padding, Size};
