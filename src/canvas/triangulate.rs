//! Ear-clipping triangulation for filling concave area polygons.
//!
//! egui only fills convex paths correctly, so polygon highlights are
//! converted to triangle meshes before painting.

use bevy::prelude::*;

use crate::geometry::polygon_area;

/// Below this, edges count as zero-length and turns as straight
const EPSILON: f32 = 0.0001;

fn point_in_triangle(p: Vec2, a: Vec2, b: Vec2, c: Vec2) -> bool {
    let d1 = (b - a).perp_dot(p - a);
    let d2 = (c - b).perp_dot(p - b);
    let d3 = (a - c).perp_dot(p - c);
    let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
    let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;
    !(has_neg && has_pos)
}

/// Drop vertices that add no area: repeats of their neighbour (including a
/// closing vertex equal to the first) and vertices on a straight run.
fn simplify(points: &[Vec2], mut indices: Vec<usize>) -> Vec<usize> {
    while indices.len() >= 3 {
        let len = indices.len();
        let redundant = (0..len).find(|&i| {
            let prev = points[indices[(i + len - 1) % len]];
            let curr = points[indices[i]];
            let next = points[indices[(i + 1) % len]];
            curr.distance_squared(next) < EPSILON * EPSILON
                || (curr - prev).perp_dot(next - curr).abs() < EPSILON
        });
        match redundant {
            Some(i) => {
                indices.remove(i);
            }
            None => break,
        }
    }
    indices
}

/// Triangulate a simple polygon, returning index triples into `points`.
///
/// Repeated and collinear vertices are skipped, so an outline closed by
/// repeating its first point fills the same as an open one. Returns an empty
/// list for fewer than three distinct corners or zero area. Self-intersecting
/// input yields a best-effort partial fill.
pub fn triangulate(points: &[Vec2]) -> Vec<[u32; 3]> {
    let n = points.len();
    let area = polygon_area(points);
    if n < 3 || area.abs() < EPSILON {
        return Vec::new();
    }

    // Work in counter-clockwise order
    let order: Vec<usize> = if area > 0.0 {
        (0..n).collect()
    } else {
        (0..n).rev().collect()
    };
    let mut remaining = simplify(points, order);
    if remaining.len() < 3 {
        return Vec::new();
    }

    let mut triangles = Vec::with_capacity(remaining.len() - 2);
    let mut guard = 0;

    while remaining.len() > 3 && guard < n * n {
        guard += 1;
        let len = remaining.len();
        let mut clipped = false;

        for i in 0..len {
            let prev = remaining[(i + len - 1) % len];
            let curr = remaining[i];
            let next = remaining[(i + 1) % len];
            let (a, b, c) = (points[prev], points[curr], points[next]);

            // Reflex or collinear vertices are not ears
            if (b - a).perp_dot(c - b) <= 0.0 {
                continue;
            }

            // Vertices sharing a corner's position cannot block it
            let blocked = remaining
                .iter()
                .map(|&k| points[k])
                .filter(|p| {
                    p.distance_squared(a) >= EPSILON * EPSILON
                        && p.distance_squared(b) >= EPSILON * EPSILON
                        && p.distance_squared(c) >= EPSILON * EPSILON
                })
                .any(|p| point_in_triangle(p, a, b, c));
            if blocked {
                continue;
            }

            triangles.push([prev as u32, curr as u32, next as u32]);
            remaining.remove(i);
            clipped = true;
            break;
        }

        if !clipped {
            break;
        }
    }

    if remaining.len() == 3 {
        triangles.push([remaining[0] as u32, remaining[1] as u32, remaining[2] as u32]);
    }

    triangles
}
