use super::ImageSize;
use crate::map::Shape;

/// Per-axis factors mapping authored coordinates to rendered pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleFactors {
    pub x: f32,
    pub y: f32,
}

impl ScaleFactors {
    pub const IDENTITY: Self = Self { x: 1.0, y: 1.0 };

    /// `rendered / nominal` per axis; a non-positive nominal axis maps 1:1.
    pub fn between(rendered: ImageSize, nominal: ImageSize) -> Self {
        let factor = |rendered: f32, nominal: f32| {
            if nominal > 0.0 { rendered / nominal } else { 1.0 }
        };
        Self {
            x: factor(rendered.width, nominal.width),
            y: factor(rendered.height, nominal.height),
        }
    }
}

/// Scale raw coordinates for a shape.
///
/// Even positions are x values and odd positions y values, except a circle's
/// radius (third value) which follows the x factor. Malformed coordinate
/// lists are scaled as-is; nothing is validated here.
pub fn scale_coords(shape: Shape, coords: &[f32], factors: ScaleFactors) -> Vec<f32> {
    coords
        .iter()
        .enumerate()
        .map(|(i, &c)| {
            let use_x = match shape {
                Shape::Circle if i == 2 => true,
                _ => i % 2 == 0,
            };
            if use_x { c * factors.x } else { c * factors.y }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factors_between() {
        let f = ScaleFactors::between(ImageSize::new(200.0, 50.0), ImageSize::new(100.0, 100.0));
        assert_eq!(f, ScaleFactors { x: 2.0, y: 0.5 });
    }

    #[test]
    fn test_zero_nominal_is_identity() {
        let f = ScaleFactors::between(ImageSize::new(200.0, 50.0), ImageSize::default());
        assert_eq!(f, ScaleFactors::IDENTITY);
    }

    #[test]
    fn test_rect_scaling_per_axis() {
        let scaled = scale_coords(
            Shape::Rect,
            &[10.0, 20.0, 30.0, 40.0],
            ScaleFactors { x: 2.0, y: 3.0 },
        );
        assert_eq!(scaled, vec![20.0, 60.0, 60.0, 120.0]);
    }

    #[test]
    fn test_circle_radius_uses_width_factor() {
        let scaled = scale_coords(Shape::Circle, &[10.0, 10.0, 5.0], ScaleFactors { x: 2.0, y: 4.0 });
        assert_eq!(scaled, vec![20.0, 40.0, 10.0]);
    }

    #[test]
    fn test_poly_alternates_axes() {
        let scaled = scale_coords(
            Shape::Poly,
            &[1.0, 1.0, 2.0, 2.0, 3.0, 3.0],
            ScaleFactors { x: 10.0, y: 100.0 },
        );
        assert_eq!(scaled, vec![10.0, 100.0, 20.0, 200.0, 30.0, 300.0]);
    }

    #[test]
    fn test_scaling_is_linear_for_many_factors() {
        let raw = [3.0, 7.0, 11.0, 13.0];
        for factor in [0.25_f32, 0.5, 1.0, 1.5, 2.0, 10.0] {
            let scaled = scale_coords(Shape::Rect, &raw, ScaleFactors { x: factor, y: factor });
            for (s, r) in scaled.iter().zip(raw.iter()) {
                assert!((s - r * factor).abs() < 1e-4);
            }
        }
    }

    #[test]
    fn test_malformed_coords_pass_through() {
        let scaled = scale_coords(Shape::Rect, &[1.0, 2.0, 3.0], ScaleFactors { x: 2.0, y: 2.0 });
        assert_eq!(scaled, vec![2.0, 4.0, 6.0]);
    }
}
