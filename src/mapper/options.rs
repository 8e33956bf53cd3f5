use serde::{Deserialize, Serialize};

use super::MapperHandlers;
use crate::color::HighlightColor;
use crate::constants::{
    DEFAULT_AREA_KEY_NAME, DEFAULT_FILL_COLOR, DEFAULT_LINE_WIDTH, DEFAULT_STROKE_COLOR,
    RERENDER_PROPS,
};
use crate::geometry::{DimensionContext, StyleContext};
use crate::map::ImageMap;

fn default_true() -> bool {
    true
}

/// What a click on an area does to its persistent highlight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HighlightPolicy {
    /// `true`: the clicked area is updated. `false`: the area with the same
    /// key is looked up in the host-supplied map and updated instead.
    #[serde(default = "default_true")]
    pub is_multi: bool,
    /// Clicking an area whose highlight comes from the host-supplied map
    /// removes it instead of overwriting it.
    #[serde(default)]
    pub toggle: bool,
}

impl Default for HighlightPolicy {
    fn default() -> Self {
        Self {
            is_multi: true,
            toggle: false,
        }
    }
}

/// Data-only mapper options. Every field has a default, so a config file
/// only needs to name what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MapperOptions {
    /// Explicit rendered width, `0` for unset
    pub width: f32,
    /// Explicit rendered height, `0` for unset
    pub height: f32,
    /// Width the area coordinates were authored against, `0` for the natural width
    pub img_width: f32,
    pub natural: bool,
    pub responsive: bool,
    pub parent_width: f32,
    pub fill_color: HighlightColor,
    pub stroke_color: HighlightColor,
    pub line_width: f32,
    /// Enables hover and click highlighting
    pub active: bool,
    /// Suppresses the interactive regions entirely
    pub disabled: bool,
    pub area_key_name: String,
    pub highlighted: Option<HighlightPolicy>,
}

impl Default for MapperOptions {
    fn default() -> Self {
        Self {
            width: 0.0,
            height: 0.0,
            img_width: 0.0,
            natural: false,
            responsive: false,
            parent_width: 0.0,
            fill_color: DEFAULT_FILL_COLOR,
            stroke_color: DEFAULT_STROKE_COLOR,
            line_width: DEFAULT_LINE_WIDTH,
            active: true,
            disabled: false,
            area_key_name: DEFAULT_AREA_KEY_NAME.to_string(),
            highlighted: None,
        }
    }
}

impl MapperOptions {
    pub fn style(&self) -> StyleContext {
        StyleContext {
            fill_color: self.fill_color,
            stroke_color: self.stroke_color,
            line_width: self.line_width,
        }
    }

    pub fn dimensions(&self, available_width: Option<f32>) -> DimensionContext {
        DimensionContext {
            width: self.width,
            height: self.height,
            responsive: self.responsive,
            parent_width: self.parent_width,
            natural: self.natural,
            available_width,
        }
    }
}

/// Everything the host passes to a mapper.
#[derive(Debug, Clone)]
pub struct MapperProps {
    /// Image asset path
    pub src: String,
    pub map: ImageMap,
    pub options: MapperOptions,
    pub handlers: MapperHandlers,
}

impl MapperProps {
    pub fn new(src: impl Into<String>, map: ImageMap, handlers: MapperHandlers) -> Self {
        Self {
            src: src.into(),
            map,
            options: MapperOptions::default(),
            handlers,
        }
    }

    pub fn with_options(mut self, options: MapperOptions) -> Self {
        self.options = options;
        self
    }
}

/// Props that take part in the re-render decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropKey {
    Src,
    Active,
    Disabled,
    Width,
    Height,
    ImgWidth,
    FillColor,
    StrokeColor,
    LineWidth,
    Natural,
    AreaKeyName,
    ParentWidth,
    Responsive,
}

impl PropKey {
    pub fn differs(&self, prev: &MapperProps, next: &MapperProps) -> bool {
        let (a, b) = (&prev.options, &next.options);
        match self {
            PropKey::Src => prev.src != next.src,
            PropKey::Active => a.active != b.active,
            PropKey::Disabled => a.disabled != b.disabled,
            PropKey::Width => a.width != b.width,
            PropKey::Height => a.height != b.height,
            PropKey::ImgWidth => a.img_width != b.img_width,
            PropKey::FillColor => a.fill_color != b.fill_color,
            PropKey::StrokeColor => a.stroke_color != b.stroke_color,
            PropKey::LineWidth => a.line_width != b.line_width,
            PropKey::Natural => a.natural != b.natural,
            PropKey::AreaKeyName => a.area_key_name != b.area_key_name,
            PropKey::ParentWidth => a.parent_width != b.parent_width,
            PropKey::Responsive => a.responsive != b.responsive,
        }
    }
}

/// Whether moving from `prev` to `next` requires a re-render: the map
/// differs structurally or a whitelisted prop changed. Handler changes never
/// count.
pub fn should_rerender(prev: &MapperProps, next: &MapperProps) -> bool {
    prev.map != next.map || RERENDER_PROPS.iter().any(|key| key.differs(prev, next))
}
