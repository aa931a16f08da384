// File: crates/elroi-core/src/options.rs
// Summary: Typed graph configuration, its partial (override) mirror, and the recursive merge.
// Notes:
// - Every recognized option is enumerated here. Callers supply a `PartialOptions`
//   (usually parsed from JSON); `Options::merged` lays it over the built-in defaults
//   and returns a fresh value. Defaults are rebuilt on every call and never shared.
// - Nested structures merge field by field. Arrays merge index by index, so an
//   override of three colors replaces the first three palette entries only.

use serde::{de::Error as _, Deserialize, Deserializer};

use crate::error::Result;
use crate::series::{SeriesTag, SeriesType};
use crate::theme::{default_palette, Color};
use crate::types::Padding;

/// A configuration value that can absorb its partial counterpart.
pub trait Merge {
    type Partial;
    fn merge(&mut self, partial: Self::Partial);
}

macro_rules! merge_leaves {
    ($target:expr, $partial:expr; $($field:ident),* $(,)?) => {
        $( if let Some(v) = $partial.$field { $target.$field = v; } )*
    };
}

/// Overwrite `target[i]` with `overrides[i]`, appending entries past the end.
pub fn merge_indexed<T>(target: &mut Vec<T>, overrides: Vec<T>) {
    for (i, value) in overrides.into_iter().enumerate() {
        if i < target.len() {
            target[i] = value;
        } else {
            target.push(value);
        }
    }
}

/// Accepts `false` (or null) as "absent", anything else as a value.
pub(crate) fn false_as_none<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OrFalse<T> {
        Flag(bool),
        Value(T),
    }

    match Option::<OrFalse<T>>::deserialize(deserializer)? {
        None | Some(OrFalse::Flag(false)) => Ok(None),
        Some(OrFalse::Flag(true)) => Err(D::Error::custom("expected a value or `false`")),
        Some(OrFalse::Value(v)) => Ok(Some(v)),
    }
}

/// Partial-field flavour of [`false_as_none`]: a present `false` clears the default.
fn present_false_as_none<'de, D, T>(deserializer: D) -> std::result::Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    false_as_none(deserializer).map(Some)
}

/// Raw JSON form of an option that is either a number or `"auto"`.
#[derive(Deserialize)]
#[serde(untagged)]
pub enum NumberOrAuto {
    Number(f64),
    Text(String),
}

impl NumberOrAuto {
    fn into_auto(self) -> std::result::Result<Option<f64>, String> {
        match self {
            NumberOrAuto::Number(n) => Ok(Some(n)),
            NumberOrAuto::Text(s) if s.eq_ignore_ascii_case("auto") => Ok(None),
            NumberOrAuto::Text(s) => match s.trim().parse::<f64>() {
                Ok(n) if n.is_finite() => Ok(Some(n)),
                _ => Err(format!("expected a finite number or \"auto\", got {s:?}")),
            },
        }
    }
}

/// Y-axis bound: derived from the data, or pinned.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(try_from = "NumberOrAuto")]
pub enum YBound {
    Auto,
    Value(f64),
}

impl TryFrom<NumberOrAuto> for YBound {
    type Error = String;
    fn try_from(raw: NumberOrAuto) -> std::result::Result<Self, String> {
        Ok(raw.into_auto()?.map_or(YBound::Auto, YBound::Value))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(try_from = "NumberOrAuto")]
pub enum LabelWidth {
    Auto,
    Fixed(f32),
}

impl TryFrom<NumberOrAuto> for LabelWidth {
    type Error = String;
    fn try_from(raw: NumberOrAuto) -> std::result::Result<Self, String> {
        Ok(raw.into_auto()?.map_or(LabelWidth::Auto, |w| LabelWidth::Fixed(w as f32)))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisType {
    Date,
    Text,
}

/// Where a bar's point flag sits: above the stack or inside its segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlagPosition {
    Exterior,
    Interior,
}

// ---- grid -------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq)]
pub struct GridOptions {
    pub show: bool,
    pub show_baseline: bool,
    /// Rows of y labels. 0 draws no labels and 1 only the top label; gridlines skip the bottom row.
    pub num_y_labels: usize,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self { show: true, show_baseline: true, num_y_labels: 5 }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PartialGridOptions {
    pub show: Option<bool>,
    pub show_baseline: Option<bool>,
    pub num_y_labels: Option<usize>,
}

impl Merge for GridOptions {
    type Partial = PartialGridOptions;
    fn merge(&mut self, p: PartialGridOptions) {
        merge_leaves!(self, p; show, show_baseline, num_y_labels);
    }
}

// ---- axes -------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq)]
pub struct XAxisOptions {
    pub id: String,
    pub axis_type: AxisType,
    pub show: bool,
    pub labels: Vec<String>,
    pub custom_x_label: Option<String>,
    /// Index of the series group the axis derives its values from.
    pub series_index: usize,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PartialXAxisOptions {
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub axis_type: Option<AxisType>,
    pub show: Option<bool>,
    pub labels: Option<Vec<String>>,
    #[serde(deserialize_with = "present_false_as_none")]
    pub custom_x_label: Option<Option<String>>,
    pub series_index: Option<usize>,
}

impl Merge for XAxisOptions {
    type Partial = PartialXAxisOptions;
    fn merge(&mut self, p: PartialXAxisOptions) {
        merge_leaves!(self, p; id, axis_type, show, custom_x_label, series_index);
        if let Some(labels) = p.labels {
            merge_indexed(&mut self.labels, labels);
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct YAxisOptions {
    pub id: String,
    pub show: bool,
    pub unit: String,
    /// Unit shown on the topmost label only.
    pub top_unit: String,
    pub prefix_unit: bool,
    pub series_index: usize,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PartialYAxisOptions {
    pub id: Option<String>,
    pub show: Option<bool>,
    pub unit: Option<String>,
    pub top_unit: Option<String>,
    pub prefix_unit: Option<bool>,
    pub series_index: Option<usize>,
}

impl Merge for YAxisOptions {
    type Partial = PartialYAxisOptions;
    fn merge(&mut self, p: PartialYAxisOptions) {
        merge_leaves!(self, p; id, show, unit, top_unit, prefix_unit, series_index);
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Axes {
    pub x1: XAxisOptions,
    pub x2: XAxisOptions,
    pub y1: YAxisOptions,
    pub y2: YAxisOptions,
}

impl Default for Axes {
    fn default() -> Self {
        let x = |id: &str, axis_type, show| XAxisOptions {
            id: id.to_string(),
            axis_type,
            show,
            labels: Vec::new(),
            custom_x_label: None,
            series_index: 0,
        };
        let y = |id: &str, show| YAxisOptions {
            id: id.to_string(),
            show,
            unit: String::new(),
            top_unit: String::new(),
            prefix_unit: false,
            series_index: 0,
        };
        Self {
            x1: x("x1", AxisType::Date, true),
            x2: x("x2", AxisType::Text, false),
            y1: y("y1", true),
            y2: y("y2", false),
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct PartialAxes {
    pub x1: PartialXAxisOptions,
    pub x2: PartialXAxisOptions,
    pub y1: PartialYAxisOptions,
    pub y2: PartialYAxisOptions,
}

impl Merge for Axes {
    type Partial = PartialAxes;
    fn merge(&mut self, p: PartialAxes) {
        self.x1.merge(p.x1);
        self.x2.merge(p.x2);
        self.y1.merge(p.y1);
        self.y2.merge(p.y2);
    }
}

// ---- tooltip ----------------------------------------------------------------

#[derive(Clone, Debug, PartialEq)]
pub struct TooltipOptions {
    pub show: bool,
    pub width: f32,
}

impl Default for TooltipOptions {
    fn default() -> Self {
        Self { show: true, width: 120.0 }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct PartialTooltipOptions {
    pub show: Option<bool>,
    pub width: Option<f32>,
}

impl Merge for TooltipOptions {
    type Partial = PartialTooltipOptions;
    fn merge(&mut self, p: PartialTooltipOptions) {
        merge_leaves!(self, p; show, width);
    }
}

// ---- series -----------------------------------------------------------------

/// Per-series rendering options (`seriesDefaults` merged with a series' own options).
#[derive(Clone, Debug, PartialEq)]
pub struct SeriesOptions {
    pub series_type: SeriesTag,
    pub show_points: bool,
    pub fill_points: bool,
    pub label_points: bool,
    pub interpolate_nulls: bool,
    pub max_y_value: YBound,
    pub min_y_value: YBound,
    pub unit: String,
    pub point_label_units: String,
}

impl Default for SeriesOptions {
    fn default() -> Self {
        Self {
            series_type: SeriesTag::Known(SeriesType::Line),
            show_points: true,
            fill_points: false,
            label_points: false,
            interpolate_nulls: false,
            max_y_value: YBound::Auto,
            min_y_value: YBound::Value(0.0),
            unit: String::new(),
            point_label_units: String::new(),
        }
    }
}

impl SeriesOptions {
    /// A copy of these options with `partial` laid over them.
    pub fn merged(&self, partial: PartialSeriesOptions) -> Self {
        let mut out = self.clone();
        out.merge(partial);
        out
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PartialSeriesOptions {
    #[serde(rename = "type")]
    pub series_type: Option<SeriesTag>,
    pub show_points: Option<bool>,
    pub fill_points: Option<bool>,
    pub label_points: Option<bool>,
    pub interpolate_nulls: Option<bool>,
    pub max_y_value: Option<YBound>,
    pub min_y_value: Option<YBound>,
    pub unit: Option<String>,
    pub point_label_units: Option<String>,
}

impl Merge for SeriesOptions {
    type Partial = PartialSeriesOptions;
    fn merge(&mut self, p: PartialSeriesOptions) {
        merge_leaves!(self, p;
            series_type, show_points, fill_points, label_points, interpolate_nulls,
            max_y_value, min_y_value, unit, point_label_units,
        );
    }
}

// ---- bars & lines -----------------------------------------------------------

#[derive(Clone, Debug, PartialEq)]
pub struct BarOptions {
    pub flag_position: FlagPosition,
}

impl Default for BarOptions {
    fn default() -> Self {
        Self { flag_position: FlagPosition::Exterior }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PartialBarOptions {
    pub flag_position: Option<FlagPosition>,
}

impl Merge for BarOptions {
    type Partial = PartialBarOptions;
    fn merge(&mut self, p: PartialBarOptions) {
        merge_leaves!(self, p; flag_position);
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LineOptions {
    pub width: f32,
    pub opacity: f32,
    /// Opacity of filled point markers.
    pub fill_opacity: f32,
    pub point_radius: f32,
    pub point_stroke_width: f32,
}

impl Default for LineOptions {
    fn default() -> Self {
        Self {
            width: 2.0,
            opacity: 0.8,
            fill_opacity: 0.2,
            point_radius: 3.0,
            point_stroke_width: 2.0,
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PartialLineOptions {
    pub width: Option<f32>,
    pub opacity: Option<f32>,
    pub fill_opacity: Option<f32>,
    pub point_radius: Option<f32>,
    pub point_stroke_width: Option<f32>,
}

impl Merge for LineOptions {
    type Partial = PartialLineOptions;
    fn merge(&mut self, p: PartialLineOptions) {
        merge_leaves!(self, p; width, opacity, fill_opacity, point_radius, point_stroke_width);
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct PartialPadding {
    pub top: Option<f32>,
    pub right: Option<f32>,
    pub bottom: Option<f32>,
    pub left: Option<f32>,
}

impl Merge for Padding {
    type Partial = PartialPadding;
    fn merge(&mut self, p: PartialPadding) {
        merge_leaves!(self, p; top, right, bottom, left);
    }
}

// ---- top level --------------------------------------------------------------

#[derive(Clone, Debug, PartialEq)]
pub struct Options {
    pub colors: Vec<Color>,
    /// chrono strftime pattern for date x-axis labels.
    pub label_date_format: String,
    pub error_message: Option<String>,
    pub label_width: LabelWidth,
    pub flag_offset: f32,
    /// Lines with more points than this are drawn without point markers.
    pub skip_point_threshold: usize,
    pub grid: GridOptions,
    pub axes: Axes,
    pub tooltip: TooltipOptions,
    pub series_defaults: SeriesOptions,
    pub bars: BarOptions,
    pub lines: LineOptions,
    pub padding: Padding,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            colors: default_palette(),
            label_date_format: "%b".to_string(),
            error_message: None,
            label_width: LabelWidth::Auto,
            flag_offset: 5.0,
            skip_point_threshold: 18,
            grid: GridOptions::default(),
            axes: Axes::default(),
            tooltip: TooltipOptions::default(),
            series_defaults: SeriesOptions::default(),
            bars: BarOptions::default(),
            lines: LineOptions::default(),
            padding: Padding::default(),
        }
    }
}

impl Options {
    /// Built-in defaults with `overrides` merged over them.
    pub fn merged(overrides: PartialOptions) -> Self {
        let mut options = Self::default();
        options.merge(overrides);
        options
    }

    /// Palette color for the `index`-th drawn layer, wrapping around.
    pub fn color(&self, index: usize) -> Color {
        if self.colors.is_empty() {
            return default_palette()[index % 6];
        }
        self.colors[index % self.colors.len()]
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PartialOptions {
    pub colors: Option<Vec<Color>>,
    pub label_date_format: Option<String>,
    #[serde(deserialize_with = "present_false_as_none")]
    pub error_message: Option<Option<String>>,
    pub label_width: Option<LabelWidth>,
    pub flag_offset: Option<f32>,
    #[serde(alias = "skipPointThreshhold")]
    pub skip_point_threshold: Option<usize>,
    pub grid: PartialGridOptions,
    pub axes: PartialAxes,
    pub tooltip: PartialTooltipOptions,
    pub series_defaults: PartialSeriesOptions,
    pub bars: PartialBarOptions,
    pub lines: PartialLineOptions,
    pub padding: PartialPadding,
}

impl PartialOptions {
    /// Parse caller overrides from their JSON form. Unknown keys are ignored.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Merge for Options {
    type Partial = PartialOptions;
    fn merge(&mut self, p: PartialOptions) {
        merge_leaves!(self, p; label_date_format, error_message, label_width, flag_offset, skip_point_threshold);
        if let Some(colors) = p.colors {
            merge_indexed(&mut self.colors, colors);
        }
        self.grid.merge(p.grid);
        self.axes.merge(p.axes);
        self.tooltip.merge(p.tooltip);
        self.series_defaults.merge(p.series_defaults);
        self.bars.merge(p.bars);
        self.lines.merge(p.lines);
        self.padding.merge(p.padding);
    }
}
