//! Drawable outlines built from scaled coordinates, and hit testing on them.

use bevy::prelude::*;

use crate::map::Shape;

/// The outline of one area in rendered pixel space.
#[derive(Debug, Clone, PartialEq)]
pub enum HighlightPath {
    Rect { min: Vec2, max: Vec2 },
    Circle { center: Vec2, radius: f32 },
    Polygon(Vec<Vec2>),
}

fn coord(coords: &[f32], i: usize) -> f32 {
    coords.get(i).copied().unwrap_or(0.0)
}

impl HighlightPath {
    /// Build the outline for a shape. Missing coordinates read as zero and a
    /// trailing odd polygon coordinate is dropped, so malformed input gives
    /// degenerate geometry rather than an error.
    pub fn from_coords(shape: Shape, coords: &[f32]) -> Self {
        match shape {
            Shape::Rect => {
                let a = Vec2::new(coord(coords, 0), coord(coords, 1));
                let b = Vec2::new(coord(coords, 2), coord(coords, 3));
                HighlightPath::Rect {
                    min: a.min(b),
                    max: a.max(b),
                }
            }
            Shape::Circle => HighlightPath::Circle {
                center: Vec2::new(coord(coords, 0), coord(coords, 1)),
                radius: coord(coords, 2).abs(),
            },
            Shape::Poly => HighlightPath::Polygon(
                coords
                    .chunks_exact(2)
                    .map(|pair| Vec2::new(pair[0], pair[1]))
                    .collect(),
            ),
        }
    }

    /// Whether the path encloses no area at all
    pub fn is_degenerate(&self) -> bool {
        match self {
            HighlightPath::Rect { min, max } => min.x >= max.x || min.y >= max.y,
            HighlightPath::Circle { radius, .. } => *radius <= 0.0,
            HighlightPath::Polygon(points) => points.len() < 3 || polygon_area(points).abs() < 0.0001,
        }
    }

    /// Check if a point lies inside the path
    pub fn contains(&self, point: Vec2) -> bool {
        match self {
            HighlightPath::Rect { min, max } => {
                point.x >= min.x && point.x <= max.x && point.y >= min.y && point.y <= max.y
            }
            HighlightPath::Circle { center, radius } => point.distance(*center) <= *radius,
            HighlightPath::Polygon(points) => point_in_polygon(point, points),
        }
    }

    /// Bounding box of the path (min, max corners)
    pub fn bounds(&self) -> (Vec2, Vec2) {
        match self {
            HighlightPath::Rect { min, max } => (*min, *max),
            HighlightPath::Circle { center, radius } => {
                (*center - Vec2::splat(*radius), *center + Vec2::splat(*radius))
            }
            HighlightPath::Polygon(points) => {
                let Some(first) = points.first() else {
                    return (Vec2::ZERO, Vec2::ZERO);
                };
                points
                    .iter()
                    .fold((*first, *first), |(min, max), p| (min.min(*p), max.max(*p)))
            }
        }
    }
}

/// Signed area of a polygon (positive for counter-clockwise in y-up space)
pub fn polygon_area(points: &[Vec2]) -> f32 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    (0..n)
        .map(|i| points[i].perp_dot(points[(i + 1) % n]))
        .sum::<f32>()
        / 2.0
}

/// Even-odd rule, matching how image map polygons are hit tested
fn point_in_polygon(point: Vec2, points: &[Vec2]) -> bool {
    if points.len() < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = points.len() - 1;
    for i in 0..points.len() {
        let (pi, pj) = (points[i], points[j]);
        if (pi.y > point.y) != (pj.y > point.y)
            && point.x < (pj.x - pi.x) * (point.y - pi.y) / (pj.y - pi.y) + pi.x
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}
