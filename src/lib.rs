//! Clickable, highlightable image maps for Bevy + egui.
//!
//! An [`ImageMap`](map::ImageMap) of areas authored against a nominal image
//! size is scaled to the size the image actually renders at. Hovering an area
//! paints a transient highlight; clicking can set or toggle a persistent one,
//! reported back to the host as a new map value.
//!
//! - [`geometry`]: sizing, coordinate scaling and area resolution
//! - [`canvas`]: the highlight drawing surface and renderer
//! - [`mapper`]: the reactive shell driving both
//! - [`plugin`]: Bevy asset loading and readiness

pub mod canvas;
pub mod color;
pub mod constants;
pub mod geometry;
pub mod map;
pub mod mapper;
pub mod plugin;
mod widget;

pub use color::HighlightColor;
pub use map::{Area, ImageMap, Shape};
pub use mapper::{
    HighlightPolicy, ImageMapper, MapperHandlers, MapperOptions, MapperProps, PointerKind,
};
pub use plugin::{ImageMapperLoading, ImageMapperPlugin, ImageMapperWidget};
