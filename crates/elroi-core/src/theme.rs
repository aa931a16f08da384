// File: crates/elroi-core/src/theme.rs
// Summary: Color type, default series palette and the fixed chrome colors used by the drawers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ElroiError;

/// An RGBA color. Parsed from and serialized to `#rrggbb` hex strings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self { Self { r, g, b, a: 255 } }

    pub const fn from_hex(hex: u32) -> Self {
        Self::rgb((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
    }

    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);
}

impl FromStr for Color {
    type Err = ElroiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ElroiError::InvalidColor(s.to_string());
        let digits = s.trim().strip_prefix('#').ok_or_else(invalid)?;
        let nibble = |c: char| c.to_digit(16).map(|d| d as u8).ok_or_else(invalid);
        let chars: Vec<char> = digits.chars().collect();
        match chars.len() {
            // #rgb expands each digit: #ccc == #cccccc
            3 => {
                let r = nibble(chars[0])?;
                let g = nibble(chars[1])?;
                let b = nibble(chars[2])?;
                Ok(Color::rgb(r * 17, g * 17, b * 17))
            }
            6 => {
                let byte = |i: usize| -> Result<u8, ElroiError> { Ok(nibble(chars[i])? << 4 | nibble(chars[i + 1])?) };
                Ok(Color::rgb(byte(0)?, byte(2)?, byte(4)?))
            }
            _ => Err(invalid()),
        }
    }
}

impl TryFrom<String> for Color {
    type Error = ElroiError;
    fn try_from(value: String) -> Result<Self, Self::Error> { value.parse() }
}

impl From<Color> for String {
    fn from(c: Color) -> Self { c.to_string() }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Default series palette, assigned in order and wrapped around.
pub fn default_palette() -> Vec<Color> {
    vec![
        Color::from_hex(0x99cc33),
        Color::from_hex(0xffee44),
        Color::from_hex(0xffbb11),
        Color::from_hex(0xee5500),
        Color::from_hex(0x33bbcc),
        Color::from_hex(0x88ddee),
    ]
}

/// Colors of the chart chrome (gridlines, baseline, surface background).
pub mod chrome {
    use super::Color;

    pub const GRID: Color = Color::rgb(0xe5, 0xe5, 0xe5);
    pub const BASELINE: Color = Color::rgb(0x99, 0x99, 0x99);
    pub const BACKGROUND: Color = Color::WHITE;
    pub const POINT_FILL: Color = Color::WHITE;
}
