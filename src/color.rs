//! Highlight colors written the way map authors write them.
//!
//! Areas and options carry colors as CSS-style strings (`rgba(255, 0, 0, 0.5)`,
//! `#ff000080`, `red`). They are parsed once on load and converted to egui
//! colors when painted.

use std::fmt;
use std::str::FromStr;

use bevy_egui::egui;
use serde::{Deserialize, Serialize};

/// An RGBA color with 8-bit channels and a fractional alpha.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HighlightColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// Opacity in `0.0..=1.0`
    pub a: f32,
}

impl HighlightColor {
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0.0);

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 1.0)
    }

    pub fn is_transparent(&self) -> bool {
        self.a <= 0.0
    }

    pub fn to_egui(self) -> egui::Color32 {
        egui::Color32::from_rgba_unmultiplied(
            self.r,
            self.g,
            self.b,
            (self.a.clamp(0.0, 1.0) * 255.0).round() as u8,
        )
    }
}

fn named_color(name: &str) -> Option<HighlightColor> {
    let color = match name {
        "transparent" => HighlightColor::TRANSPARENT,
        "black" => HighlightColor::rgb(0, 0, 0),
        "white" => HighlightColor::rgb(255, 255, 255),
        "red" => HighlightColor::rgb(255, 0, 0),
        "green" => HighlightColor::rgb(0, 128, 0),
        "lime" => HighlightColor::rgb(0, 255, 0),
        "blue" => HighlightColor::rgb(0, 0, 255),
        "yellow" => HighlightColor::rgb(255, 255, 0),
        "orange" => HighlightColor::rgb(255, 165, 0),
        "purple" => HighlightColor::rgb(128, 0, 128),
        "gray" | "grey" => HighlightColor::rgb(128, 128, 128),
        _ => return None,
    };
    Some(color)
}

fn parse_hex(hex: &str) -> Result<HighlightColor, String> {
    let digits: Vec<u8> = hex
        .chars()
        .map(|c| {
            c.to_digit(16)
                .map(|d| d as u8)
                .ok_or_else(|| format!("Invalid hex digit '{}' in color", c))
        })
        .collect::<Result<_, _>>()?;

    let channel = |hi: u8, lo: u8| hi * 16 + lo;

    match digits.as_slice() {
        [r, g, b] => Ok(HighlightColor::rgb(r * 17, g * 17, b * 17)),
        [r, g, b, a] => Ok(HighlightColor::rgba(
            r * 17,
            g * 17,
            b * 17,
            f32::from(a * 17) / 255.0,
        )),
        [r1, r2, g1, g2, b1, b2] => Ok(HighlightColor::rgb(
            channel(*r1, *r2),
            channel(*g1, *g2),
            channel(*b1, *b2),
        )),
        [r1, r2, g1, g2, b1, b2, a1, a2] => Ok(HighlightColor::rgba(
            channel(*r1, *r2),
            channel(*g1, *g2),
            channel(*b1, *b2),
            f32::from(channel(*a1, *a2)) / 255.0,
        )),
        _ => Err(format!("Hex color must have 3, 4, 6 or 8 digits, got {}", digits.len())),
    }
}

fn parse_channel(value: &str) -> Result<u8, String> {
    let value = value.trim();
    let parsed = if let Some(percent) = value.strip_suffix('%') {
        percent
            .trim()
            .parse::<f32>()
            .map(|p| p / 100.0 * 255.0)
    } else {
        value.parse::<f32>()
    };
    parsed
        .map(|v| v.clamp(0.0, 255.0).round() as u8)
        .map_err(|e| format!("Invalid color channel '{}': {}", value, e))
}

fn parse_alpha(value: &str) -> Result<f32, String> {
    let value = value.trim();
    let parsed = if let Some(percent) = value.strip_suffix('%') {
        percent.trim().parse::<f32>().map(|p| p / 100.0)
    } else {
        value.parse::<f32>()
    };
    parsed
        .map(|a| a.clamp(0.0, 1.0))
        .map_err(|e| format!("Invalid alpha '{}': {}", value, e))
}

fn parse_functional(args: &str, with_alpha: bool) -> Result<HighlightColor, String> {
    let parts: Vec<&str> = args.split(',').collect();
    match (parts.as_slice(), with_alpha) {
        ([r, g, b], _) => Ok(HighlightColor::rgb(
            parse_channel(r)?,
            parse_channel(g)?,
            parse_channel(b)?,
        )),
        ([r, g, b, a], true) => Ok(HighlightColor::rgba(
            parse_channel(r)?,
            parse_channel(g)?,
            parse_channel(b)?,
            parse_alpha(a)?,
        )),
        _ => Err(format!("Wrong number of color components in '{}'", args)),
    }
}

impl FromStr for HighlightColor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();

        if let Some(hex) = s.strip_prefix('#') {
            return parse_hex(hex);
        }

        if let Some(args) = s.strip_prefix("rgba(").and_then(|r| r.strip_suffix(')')) {
            return parse_functional(args, true);
        }

        if let Some(args) = s.strip_prefix("rgb(").and_then(|r| r.strip_suffix(')')) {
            return parse_functional(args, false);
        }

        named_color(&s).ok_or_else(|| format!("Unrecognized color '{}'", s))
    }
}

impl TryFrom<String> for HighlightColor {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<HighlightColor> for String {
    fn from(color: HighlightColor) -> Self {
        color.to_string()
    }
}

impl fmt::Display for HighlightColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}
