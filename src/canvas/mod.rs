//! The drawing surface highlights are painted onto, and the renderer that
//! paints a single resolved area.

mod highlight_canvas;
mod triangulate;

pub use highlight_canvas::{CanvasOp, HighlightCanvas};
pub use triangulate::triangulate;

use crate::color::HighlightColor;
use crate::geometry::{ExtendedArea, HighlightPath};

/// A 2D immediate-mode surface sized to the rendered image.
///
/// Resizing a surface discards its contents, like an HTML canvas.
pub trait DrawingSurface {
    /// Backing size in whole pixels
    fn size(&self) -> (u32, u32);

    fn set_size(&mut self, width: u32, height: u32);

    fn clear(&mut self);

    fn fill(&mut self, path: &HighlightPath, color: HighlightColor);

    fn stroke(&mut self, path: &HighlightPath, color: HighlightColor, width: f32);
}

/// Paint one area's highlight.
///
/// Returns `false` without doing anything when no surface is attached yet,
/// which is expected while the image is still loading. Never clears the
/// surface first.
pub fn draw<S: DrawingSurface + ?Sized>(area: &ExtendedArea, surface: Option<&mut S>) -> bool {
    let Some(surface) = surface else {
        return false;
    };

    let path = area.path();
    surface.fill(&path, area.fill_color);

    if area.line_width > 0.0 && !area.stroke_color.is_transparent() {
        surface.stroke(&path, area.stroke_color, area.line_width);
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{ImageSize, ScaleContext, StyleContext, resolve};
    use crate::map::{Area, Shape};

    fn extended(line_width: f32) -> ExtendedArea {
        let natural = ImageSize::new(100.0, 100.0);
        resolve(
            &Area::new("a", Shape::Rect, vec![0.0, 0.0, 10.0, 10.0]),
            &ScaleContext::new(natural, natural, 0.0),
            &StyleContext {
                fill_color: HighlightColor::rgb(255, 0, 0),
                stroke_color: HighlightColor::rgb(0, 0, 0),
                line_width,
            },
        )
    }

    #[test]
    fn test_draw_without_surface_is_a_no_op() {
        assert!(!draw::<HighlightCanvas>(&extended(1.0), None));
    }

    #[test]
    fn test_draw_fills_and_strokes() {
        let mut canvas = HighlightCanvas::new(100, 100);
        assert!(draw(&extended(2.0), Some(&mut canvas)));
        assert_eq!(canvas.ops().len(), 2);
        assert!(matches!(canvas.ops()[0], CanvasOp::Fill { .. }));
        assert!(matches!(canvas.ops()[1], CanvasOp::Stroke { width, .. } if width == 2.0));
    }

    #[test]
    fn test_zero_line_width_skips_stroke() {
        let mut canvas = HighlightCanvas::new(100, 100);
        assert!(draw(&extended(0.0), Some(&mut canvas)));
        assert_eq!(canvas.ops().len(), 1);
    }

    #[test]
    fn test_draw_does_not_clear() {
        let mut canvas = HighlightCanvas::new(100, 100);
        draw(&extended(0.0), Some(&mut canvas));
        draw(&extended(0.0), Some(&mut canvas));
        assert_eq!(canvas.ops().len(), 2);
    }
}
