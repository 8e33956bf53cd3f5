//! Coordinate scaling and area resolution.
//!
//! Areas are authored against a nominal image size. This module works out the
//! size the image is actually rendered at, scales area coordinates to match,
//! resolves per-area styling, and hit tests the resulting outlines.

mod dimensions;
mod path;
mod resolver;
mod scale;

pub use dimensions::{DimensionContext, ImageSize, SizingStrategy, nominal_size};
pub use path::{HighlightPath, polygon_area};
pub use resolver::{ExtendedArea, ScaleContext, StyleContext, resolve};
pub use scale::{ScaleFactors, scale_coords};
