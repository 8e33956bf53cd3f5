//! Centralized constants used across the crate.
//!
//! Per-field defaults for [`MapperOptions`](crate::mapper::MapperOptions) and the
//! viewer window live here as explicit tables so no module keeps ambient state.

use crate::color::HighlightColor;
use crate::mapper::PropKey;

/// Default viewer window width in pixels
pub const DEFAULT_WINDOW_WIDTH: f32 = 1280.0;

/// Default viewer window height in pixels
pub const DEFAULT_WINDOW_HEIGHT: f32 = 800.0;

/// Field used as area identity when none is configured
pub const DEFAULT_AREA_KEY_NAME: &str = "id";

/// Default highlight fill
pub const DEFAULT_FILL_COLOR: HighlightColor = HighlightColor::rgba(255, 255, 255, 0.5);

/// Default highlight outline
pub const DEFAULT_STROKE_COLOR: HighlightColor = HighlightColor::rgba(0, 0, 0, 0.5);

/// Default outline width in pixels
pub const DEFAULT_LINE_WIDTH: f32 = 1.0;

/// Maximum number of recently opened map files to remember in config
pub const MAX_RECENT_MAPS: usize = 5;

/// Properties whose change forces a re-render of the mapper.
///
/// The area map itself is always compared structurally on top of this list.
/// Handlers and the highlight policy are deliberately absent.
pub const RERENDER_PROPS: &[PropKey] = &[
    PropKey::Src,
    PropKey::Active,
    PropKey::Disabled,
    PropKey::Width,
    PropKey::Height,
    PropKey::ImgWidth,
    PropKey::FillColor,
    PropKey::StrokeColor,
    PropKey::LineWidth,
    PropKey::Natural,
    PropKey::AreaKeyName,
    PropKey::ParentWidth,
    PropKey::Responsive,
];
