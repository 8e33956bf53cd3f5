use bevy::prelude::*;
use bevy_egui::egui;

use super::{DrawingSurface, triangulate};
use crate::color::HighlightColor;
use crate::geometry::HighlightPath;

/// One recorded paint operation.
#[derive(Debug, Clone, PartialEq)]
pub enum CanvasOp {
    Fill {
        path: HighlightPath,
        color: HighlightColor,
    },
    Stroke {
        path: HighlightPath,
        color: HighlightColor,
        width: f32,
    },
}

/// Retained highlight layer drawn over the image.
///
/// egui redraws every frame, so instead of a pixel buffer the canvas keeps the
/// operations painted since the last clear and replays them through an
/// [`egui::Painter`].
#[derive(Debug, Clone, Default)]
pub struct HighlightCanvas {
    width: u32,
    height: u32,
    ops: Vec<CanvasOp>,
}

fn to_pos(origin: egui::Pos2, point: Vec2) -> egui::Pos2 {
    egui::pos2(origin.x + point.x, origin.y + point.y)
}

impl HighlightCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ops: Vec::new(),
        }
    }

    pub fn ops(&self) -> &[CanvasOp] {
        &self.ops
    }

    pub fn is_blank(&self) -> bool {
        self.ops.is_empty()
    }

    /// Replay the canvas with its top-left corner at `origin`, clipped to the
    /// canvas size.
    pub fn paint(&self, painter: &egui::Painter, origin: egui::Pos2) {
        let clip = egui::Rect::from_min_size(
            origin,
            egui::vec2(self.width as f32, self.height as f32),
        );
        let painter = painter.with_clip_rect(clip);

        for op in &self.ops {
            match op {
                CanvasOp::Fill { path, color } => fill_path(&painter, origin, path, color.to_egui()),
                CanvasOp::Stroke { path, color, width } => stroke_path(
                    &painter,
                    origin,
                    path,
                    egui::Stroke::new(*width, color.to_egui()),
                ),
            }
        }
    }
}

fn fill_path(painter: &egui::Painter, origin: egui::Pos2, path: &HighlightPath, color: egui::Color32) {
    match path {
        HighlightPath::Rect { min, max } => {
            let rect = egui::Rect::from_min_max(to_pos(origin, *min), to_pos(origin, *max));
            painter.rect_filled(rect, 0.0, color);
        }
        HighlightPath::Circle { center, radius } => {
            painter.circle_filled(to_pos(origin, *center), *radius, color);
        }
        HighlightPath::Polygon(points) => {
            let mesh = polygon_mesh(origin, points, color);
            if !mesh.indices.is_empty() {
                painter.add(egui::Shape::mesh(mesh));
            }
        }
    }
}

/// Fill mesh for a possibly concave polygon
fn polygon_mesh(origin: egui::Pos2, points: &[Vec2], color: egui::Color32) -> egui::Mesh {
    let mut mesh = egui::Mesh::default();
    for point in points {
        mesh.colored_vertex(to_pos(origin, *point), color);
    }
    for [a, b, c] in triangulate(points) {
        mesh.add_triangle(a, b, c);
    }
    mesh
}

fn stroke_path(painter: &egui::Painter, origin: egui::Pos2, path: &HighlightPath, stroke: egui::Stroke) {
    match path {
        HighlightPath::Rect { min, max } => {
            let rect = egui::Rect::from_min_max(to_pos(origin, *min), to_pos(origin, *max));
            painter.rect_stroke(rect, 0.0, stroke, egui::StrokeKind::Middle);
        }
        HighlightPath::Circle { center, radius } => {
            painter.circle_stroke(to_pos(origin, *center), *radius, stroke);
        }
        HighlightPath::Polygon(points) => {
            if points.len() < 2 {
                return;
            }
            let points = points.iter().map(|p| to_pos(origin, *p)).collect();
            painter.add(egui::Shape::closed_line(points, stroke));
        }
    }
}

impl DrawingSurface for HighlightCanvas {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn set_size(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.ops.clear();
    }

    fn clear(&mut self) {
        self.ops.clear();
    }

    fn fill(&mut self, path: &HighlightPath, color: HighlightColor) {
        if path.is_degenerate() || color.is_transparent() {
            return;
        }
        self.ops.push(CanvasOp::Fill {
            path: path.clone(),
            color,
        });
    }

    fn stroke(&mut self, path: &HighlightPath, color: HighlightColor, width: f32) {
        if path.is_degenerate() {
            return;
        }
        self.ops.push(CanvasOp::Stroke {
            path: path.clone(),
            color,
            width,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::draw;
    use crate::geometry::{ImageSize, ScaleContext, StyleContext, resolve};
    use crate::map::{Area, Shape};

    fn square() -> HighlightPath {
        HighlightPath::Rect {
            min: Vec2::ZERO,
            max: Vec2::splat(10.0),
        }
    }

    #[test]
    fn test_resize_discards_contents() {
        let mut canvas = HighlightCanvas::new(10, 10);
        canvas.fill(&square(), HighlightColor::rgb(1, 1, 1));
        assert!(!canvas.is_blank());

        canvas.set_size(20, 20);
        assert!(canvas.is_blank());
        assert_eq!(canvas.size(), (20, 20));
    }

    #[test]
    fn test_clear() {
        let mut canvas = HighlightCanvas::new(10, 10);
        canvas.fill(&square(), HighlightColor::rgb(1, 1, 1));
        canvas.clear();
        assert!(canvas.is_blank());
    }

    #[test]
    fn test_degenerate_and_transparent_fills_are_dropped() {
        let mut canvas = HighlightCanvas::new(10, 10);
        canvas.fill(
            &HighlightPath::Circle {
                center: Vec2::ZERO,
                radius: 0.0,
            },
            HighlightColor::rgb(1, 1, 1),
        );
        canvas.fill(&square(), HighlightColor::TRANSPARENT);
        assert!(canvas.is_blank());
    }

    #[test]
    fn test_degenerate_strokes_are_dropped() {
        let mut canvas = HighlightCanvas::new(10, 10);
        let flat = HighlightPath::Rect {
            min: Vec2::new(0.0, 5.0),
            max: Vec2::new(10.0, 5.0),
        };
        canvas.stroke(&flat, HighlightColor::rgb(1, 1, 1), 2.0);
        assert!(canvas.is_blank());

        canvas.stroke(&square(), HighlightColor::rgb(1, 1, 1), 2.0);
        assert_eq!(canvas.ops().len(), 1);
    }

    #[test]
    fn test_closed_polygon_draws_full_mesh() {
        let natural = ImageSize::new(100.0, 100.0);
        let closed = Area::new(
            "closed",
            Shape::Poly,
            vec![0.0, 0.0, 10.0, 0.0, 10.0, 10.0, 0.0, 10.0, 0.0, 0.0],
        );
        let extended = resolve(
            &closed,
            &ScaleContext::new(natural, natural, 0.0),
            &StyleContext {
                fill_color: HighlightColor::rgb(255, 0, 0),
                stroke_color: HighlightColor::rgb(0, 0, 0),
                line_width: 0.0,
            },
        );

        let mut canvas = HighlightCanvas::new(100, 100);
        assert!(draw(&extended, Some(&mut canvas)));

        let [CanvasOp::Fill { path: HighlightPath::Polygon(points), .. }] = canvas.ops() else {
            panic!("expected one polygon fill, got {:?}", canvas.ops());
        };
        let mesh = polygon_mesh(egui::Pos2::ZERO, points, egui::Color32::RED);
        // Two triangles covering the square
        assert_eq!(mesh.indices.len(), 6);
    }
}
