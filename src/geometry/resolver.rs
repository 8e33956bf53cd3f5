//! Area geometry resolution: authored area + sizing + styling in, drawable
//! area out. Everything here is a pure function of its arguments.

use super::{HighlightPath, ImageSize, ScaleFactors, nominal_size, scale_coords};
use crate::color::HighlightColor;
use crate::map::Area;

/// Global styling applied to areas without their own overrides.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StyleContext {
    pub fill_color: HighlightColor,
    pub stroke_color: HighlightColor,
    pub line_width: f32,
}

/// Rendered and authored sizes for one layout of the image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleContext {
    pub rendered: ImageSize,
    pub nominal: ImageSize,
}

impl ScaleContext {
    pub fn new(natural: ImageSize, rendered: ImageSize, img_width: f32) -> Self {
        Self {
            rendered,
            nominal: nominal_size(natural, img_width),
        }
    }

    pub fn factors(&self) -> ScaleFactors {
        ScaleFactors::between(self.rendered, self.nominal)
    }
}

/// An area with its geometry scaled to the rendered image and its styling
/// resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtendedArea {
    pub area: Area,
    pub scaled_coords: Vec<f32>,
    pub fill_color: HighlightColor,
    pub stroke_color: HighlightColor,
    pub line_width: f32,
    /// Whether the area takes part in hover/click highlighting
    pub active: bool,
}

impl ExtendedArea {
    pub fn path(&self) -> HighlightPath {
        HighlightPath::from_coords(self.area.shape, &self.scaled_coords)
    }

    /// The persistent highlight of this area, if it has one, as a fill.
    pub fn pre_filled(&self) -> Option<ExtendedArea> {
        self.area.pre_fill_color.map(|color| ExtendedArea {
            fill_color: color,
            ..self.clone()
        })
    }

    /// Scaled coordinates joined the way an HTML `coords` attribute writes them
    pub fn coords_attr(&self) -> String {
        self.scaled_coords
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Resolve an area against the current layout and style.
pub fn resolve(area: &Area, scale: &ScaleContext, style: &StyleContext) -> ExtendedArea {
    ExtendedArea {
        area: area.clone(),
        scaled_coords: scale_coords(area.shape, &area.coords, scale.factors()),
        fill_color: area.fill_color.unwrap_or(style.fill_color),
        stroke_color: area.stroke_color.unwrap_or(style.stroke_color),
        line_width: area.line_width.unwrap_or(style.line_width),
        active: !area.disabled && area.active.unwrap_or(true),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::Shape;

    fn style() -> StyleContext {
        StyleContext {
            fill_color: HighlightColor::rgba(255, 255, 255, 0.5),
            stroke_color: HighlightColor::rgba(0, 0, 0, 0.5),
            line_width: 1.0,
        }
    }

    fn scale(rendered_width: f32, img_width: f32) -> ScaleContext {
        let natural = ImageSize::new(100.0, 100.0);
        ScaleContext::new(
            natural,
            ImageSize::new(rendered_width, rendered_width),
            img_width,
        )
    }

    #[test]
    fn test_rect_doubles_at_twice_the_width() {
        let area = Area::new("a", Shape::Rect, vec![0.0, 0.0, 50.0, 50.0]);
        let resolved = resolve(&area, &scale(200.0, 100.0), &style());
        assert_eq!(resolved.scaled_coords, vec![0.0, 0.0, 100.0, 100.0]);
        assert_eq!(resolved.coords_attr(), "0,0,100,100");
    }

    #[test]
    fn test_circle_and_poly_scale() {
        let ctx = scale(50.0, 100.0);
        let circle = resolve(&Area::new("c", Shape::Circle, vec![20.0, 40.0, 10.0]), &ctx, &style());
        assert_eq!(circle.scaled_coords, vec![10.0, 20.0, 5.0]);

        let poly = resolve(
            &Area::new("p", Shape::Poly, vec![0.0, 0.0, 10.0, 0.0, 10.0, 10.0]),
            &ctx,
            &style(),
        );
        assert_eq!(poly.scaled_coords, vec![0.0, 0.0, 5.0, 0.0, 5.0, 5.0]);
    }

    #[test]
    fn test_per_area_colors_override_defaults() {
        let mut area = Area::new("a", Shape::Rect, vec![0.0, 0.0, 1.0, 1.0]);
        area.fill_color = Some(HighlightColor::rgb(1, 2, 3));
        area.line_width = Some(4.0);

        let resolved = resolve(&area, &scale(100.0, 0.0), &style());
        assert_eq!(resolved.fill_color, HighlightColor::rgb(1, 2, 3));
        assert_eq!(resolved.stroke_color, style().stroke_color);
        assert_eq!(resolved.line_width, 4.0);
    }

    #[test]
    fn test_disabled_area_is_never_active() {
        let mut area = Area::new("a", Shape::Rect, vec![0.0, 0.0, 1.0, 1.0]);
        area.disabled = true;
        area.active = Some(true);
        assert!(!resolve(&area, &scale(100.0, 0.0), &style()).active);
    }

    #[test]
    fn test_area_can_opt_out_of_highlighting() {
        let mut area = Area::new("a", Shape::Rect, vec![0.0, 0.0, 1.0, 1.0]);
        area.active = Some(false);
        assert!(!resolve(&area, &scale(100.0, 0.0), &style()).active);
    }

    #[test]
    fn test_resolve_is_pure() {
        let area = Area::new("a", Shape::Poly, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let other = Area::new("b", Shape::Circle, vec![9.0, 9.0, 9.0]);
        let ctx = scale(300.0, 100.0);

        let first = resolve(&area, &ctx, &style());
        let _ = resolve(&other, &scale(10.0, 70.0), &style());
        let second = resolve(&area, &ctx, &style());
        assert_eq!(first, second);
    }

    #[test]
    fn test_pre_filled_uses_pre_fill_color() {
        let mut area = Area::new("a", Shape::Rect, vec![0.0, 0.0, 1.0, 1.0]);
        let resolved = resolve(&area, &scale(100.0, 0.0), &style());
        assert!(resolved.pre_filled().is_none());

        area.pre_fill_color = Some(HighlightColor::rgb(0, 255, 0));
        let resolved = resolve(&area, &scale(100.0, 0.0), &style());
        let filled = resolved.pre_filled().unwrap();
        assert_eq!(filled.fill_color, HighlightColor::rgb(0, 255, 0));
        assert_eq!(filled.scaled_coords, resolved.scaled_coords);
    }
}
