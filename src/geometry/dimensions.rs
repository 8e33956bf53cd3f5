//! Image sizing: which size the image renders at, and which size the area
//! coordinates were authored against.

use serde::{Deserialize, Serialize};

/// Width and height in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ImageSize {
    pub width: f32,
    pub height: f32,
}

impl ImageSize {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Height over width, or `None` for a zero-width size
    pub fn aspect(&self) -> Option<f32> {
        (self.width > 0.0).then(|| self.height / self.width)
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Size rounded to whole pixels, as used for surface backing stores.
    pub fn to_pixels(self) -> (u32, u32) {
        (
            self.width.max(0.0).round() as u32,
            self.height.max(0.0).round() as u32,
        )
    }
}

/// Which sizing rule produced a rendered size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizingStrategy {
    Explicit,
    Responsive,
    Natural,
    Layout,
}

/// Inputs that decide the rendered image size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DimensionContext {
    /// Explicit width, `0` when unset
    pub width: f32,
    /// Explicit height, `0` when unset
    pub height: f32,
    pub responsive: bool,
    /// Width of the parent container, `0` when unknown
    pub parent_width: f32,
    pub natural: bool,
    /// Width the surrounding layout offers, if the host knows it
    pub available_width: Option<f32>,
}

impl DimensionContext {
    /// Exactly one strategy applies; explicit sizes win over responsive,
    /// which wins over natural.
    pub fn strategy(&self) -> SizingStrategy {
        if self.width > 0.0 || self.height > 0.0 {
            SizingStrategy::Explicit
        } else if self.responsive && self.parent_width > 0.0 {
            SizingStrategy::Responsive
        } else if self.natural {
            SizingStrategy::Natural
        } else {
            SizingStrategy::Layout
        }
    }

    /// Size the image renders at given its intrinsic size.
    pub fn rendered_size(&self, natural: ImageSize) -> ImageSize {
        let aspect = natural.aspect();

        match self.strategy() {
            SizingStrategy::Explicit => {
                let width = if self.width > 0.0 {
                    self.width
                } else {
                    aspect.map(|a| self.height / a).unwrap_or(0.0)
                };
                let height = if self.height > 0.0 {
                    self.height
                } else {
                    aspect.map(|a| width * a).unwrap_or(0.0)
                };
                ImageSize::new(width, height)
            }
            SizingStrategy::Responsive => {
                let width = self.parent_width;
                ImageSize::new(width, aspect.map(|a| width * a).unwrap_or(0.0))
            }
            SizingStrategy::Natural => natural,
            SizingStrategy::Layout => match (self.available_width, aspect) {
                (Some(available), Some(a)) if available > 0.0 && natural.width > available => {
                    ImageSize::new(available, available * a)
                }
                _ => natural,
            },
        }
    }
}

/// Size the authored coordinates assume.
///
/// `img_width` overrides the natural width when positive; the height follows
/// the image's aspect ratio.
pub fn nominal_size(natural: ImageSize, img_width: f32) -> ImageSize {
    if img_width > 0.0 {
        let height = natural.aspect().map(|a| img_width * a).unwrap_or(0.0);
        ImageSize::new(img_width, height)
    } else {
        natural
    }
}
