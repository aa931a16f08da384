// File: crates/elroi-core/src/tooltip.rs
// Summary: Tooltip records supplied by the caller, the shared tooltip state, and the default formatter.

use serde::Deserialize;

use crate::error::Result;
use crate::geometry::Point2;

/// X position that parks the tooltip outside the visible area.
pub const OFFSCREEN_X: f32 = -10_000.0;

/// Precomputed tooltip content for one point index.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TooltipRecord {
    pub date_range: String,
    #[serde(alias = "you")]
    pub value: Option<f64>,
    pub unit: String,
    pub drill_link: Option<String>,
    pub drill_message: Option<String>,
}

impl TooltipRecord {
    pub fn list_from_json(json: &str) -> Result<Vec<TooltipRecord>> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Turns a record into tooltip content.
pub type TooltipFormatter = Box<dyn Fn(&TooltipRecord) -> String>;

/// Date range, value with unit, and drill message, one per line.
pub fn format_tooltip(record: &TooltipRecord) -> String {
    let mut lines = Vec::with_capacity(3);
    if !record.date_range.is_empty() {
        lines.push(record.date_range.clone());
    }
    if let Some(value) = record.value {
        if record.unit.is_empty() {
            lines.push(format!("{value}"));
        } else {
            lines.push(format!("{value} {}", record.unit));
        }
    }
    if let Some(message) = &record.drill_message {
        lines.push(message.clone());
    }
    lines.join("\n")
}

/// The single tooltip shared by every series of a graph.
/// Hidden means parked off-screen; the element itself is never destroyed.
#[derive(Clone, Debug, PartialEq)]
pub struct TooltipState {
    pub visible: bool,
    pub position: Point2,
    pub content: String,
    pub width: f32,
}

impl TooltipState {
    pub fn hidden(width: f32) -> Self {
        Self { visible: false, position: Point2::new(OFFSCREEN_X, 0.0), content: String::new(), width }
    }

    pub fn show(&mut self, position: Point2, content: String) {
        self.visible = true;
        self.position = position;
        self.content = content;
    }

    pub fn hide(&mut self) {
        self.visible = false;
        self.position.x = OFFSCREEN_X;
    }
}
