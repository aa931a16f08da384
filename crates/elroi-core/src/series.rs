// File: crates/elroi-core/src/series.rs
// Summary: Series model: points, point flags, series groups and the closed set of series types.
// Notes:
// - A `Series` is a group of point sequences drawn by one drawer (several lines on one
//   axis, the layers of a bar stack, the slices of a pie).
// - Series type tags arrive as strings. Recognized tags map onto `SeriesType`;
//   anything else is kept verbatim in `SeriesTag::Unknown` so dispatch can skip it
//   explicitly instead of guessing.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::{ElroiError, Result};
use crate::options::{false_as_none, PartialSeriesOptions};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SeriesType {
    Line,
    StackedBar,
    Pie,
}

impl SeriesType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SeriesType::Line => "line",
            SeriesType::StackedBar => "stackedBar",
            SeriesType::Pie => "pie",
        }
    }
}

impl FromStr for SeriesType {
    type Err = ElroiError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "line" => Ok(SeriesType::Line),
            "stackedBar" => Ok(SeriesType::StackedBar),
            "pie" => Ok(SeriesType::Pie),
            other => Err(ElroiError::UnknownSeriesType(other.to_string())),
        }
    }
}

impl fmt::Display for SeriesType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

/// A series type tag as supplied by the caller.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum SeriesTag {
    Known(SeriesType),
    Unknown(String),
}

impl SeriesTag {
    pub fn kind(&self) -> Option<SeriesType> {
        match self {
            SeriesTag::Known(t) => Some(*t),
            SeriesTag::Unknown(_) => None,
        }
    }

    pub fn is_pie(&self) -> bool { matches!(self, SeriesTag::Known(SeriesType::Pie)) }
}

impl Default for SeriesTag {
    fn default() -> Self { SeriesTag::Known(SeriesType::Line) }
}

impl From<SeriesType> for SeriesTag {
    fn from(t: SeriesType) -> Self { SeriesTag::Known(t) }
}

impl From<String> for SeriesTag {
    fn from(s: String) -> Self {
        match s.parse::<SeriesType>() {
            Ok(t) => SeriesTag::Known(t),
            Err(_) => SeriesTag::Unknown(s),
        }
    }
}

impl From<&str> for SeriesTag {
    fn from(s: &str) -> Self { SeriesTag::from(s.to_string()) }
}

/// Rich annotation attached to a point and rendered as an overlay callout.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PointFlag(pub String);

impl PointFlag {
    pub fn new(content: impl Into<String>) -> Self { Self(content.into()) }
    pub fn content(&self) -> &str { &self.0 }
}

/// Any JSON value but `false` or null flags the point. A string is the callout content,
/// `true` an empty callout, and any other value is kept as its JSON text.
fn point_flag<'de, D>(deserializer: D) -> std::result::Result<Option<PointFlag>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) | Some(Value::Bool(false)) => None,
        Some(Value::Bool(true)) => Some(PointFlag::default()),
        Some(Value::String(content)) => Some(PointFlag(content)),
        Some(other) => Some(PointFlag(other.to_string())),
    })
}

/// One data sample. `value` is `None` for gaps (JSON null or absent).
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Point {
    #[serde(default)]
    pub value: Option<f64>,
    #[serde(default, deserialize_with = "point_flag")]
    pub point_flag: Option<PointFlag>,
    #[serde(default, deserialize_with = "false_as_none")]
    pub click_target: Option<String>,
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub label: Option<String>,
}

impl Point {
    pub fn new(value: f64) -> Self {
        Self { value: Some(value), ..Self::default() }
    }

    /// A gap in the data.
    pub fn null() -> Self { Self::default() }

    pub fn with_flag(mut self, flag: impl Into<String>) -> Self {
        self.point_flag = Some(PointFlag::new(flag));
        self
    }

    pub fn with_click_target(mut self, target: impl Into<String>) -> Self {
        self.click_target = Some(target.into());
        self
    }

    pub fn with_start_date(mut self, date: DateTime<Utc>) -> Self {
        self.start_date = Some(date);
        self
    }

    pub fn with_end_date(mut self, date: DateTime<Utc>) -> Self {
        self.end_date = Some(date);
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn has_flag(&self) -> bool { self.point_flag.is_some() }

    /// X-axis text for this point: an explicit label, else its date rendered with `date_format`.
    pub fn x_label(&self, date_format: &str) -> Option<String> {
        if let Some(label) = &self.label {
            return Some(label.clone());
        }
        self.start_date
            .or(self.end_date)
            .map(|d| d.format(date_format).to_string())
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Series {
    #[serde(default)]
    pub series: Vec<Vec<Point>>,
    #[serde(default)]
    pub options: PartialSeriesOptions,
}

impl Series {
    pub fn new(series: Vec<Vec<Point>>) -> Self {
        Self { series, options: PartialSeriesOptions::default() }
    }

    /// Build a group from plain numeric layers.
    pub fn from_values(layers: &[&[f64]]) -> Self {
        let series = layers
            .iter()
            .map(|layer| layer.iter().copied().map(Point::new).collect())
            .collect();
        Self::new(series)
    }

    pub fn with_type(mut self, series_type: impl Into<SeriesTag>) -> Self {
        self.options.series_type = Some(series_type.into());
        self
    }

    pub fn with_options(mut self, options: PartialSeriesOptions) -> Self {
        self.options = options;
        self
    }

    /// Parse the `data` array of a construction call.
    pub fn list_from_json(json: &str) -> Result<Vec<Series>> {
        Ok(serde_json::from_str(json)?)
    }

    /// Every point of every layer, layer by layer.
    pub fn points(&self) -> impl Iterator<Item = &Point> + '_ {
        self.series.iter().flatten()
    }

    /// Length of the longest layer.
    pub fn point_count(&self) -> usize {
        self.series.iter().map(Vec::len).max().unwrap_or(0)
    }
}
