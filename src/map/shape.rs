use serde::{Deserialize, Serialize};

/// Shape kind of an area, named the way HTML image maps name them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    /// `[x1, y1, x2, y2]`
    #[default]
    #[serde(alias = "rectangle")]
    Rect,
    /// `[cx, cy, radius]`
    #[serde(alias = "circ")]
    Circle,
    /// `[x1, y1, x2, y2, x3, y3, ...]`
    #[serde(alias = "polygon")]
    Poly,
}

impl Shape {
    pub fn all() -> &'static [Shape] {
        &[Shape::Rect, Shape::Circle, Shape::Poly]
    }

    /// Number of coordinates the shape expects (minimum for polygons)
    pub fn arity(&self) -> usize {
        match self {
            Shape::Rect => 4,
            Shape::Circle => 3,
            Shape::Poly => 6,
        }
    }

    /// Whether `count` coordinates form a well-formed instance of this shape
    pub fn accepts(&self, count: usize) -> bool {
        match self {
            Shape::Rect | Shape::Circle => count == self.arity(),
            Shape::Poly => count >= self.arity() && count % 2 == 0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Shape::Rect => "rect",
            Shape::Circle => "circle",
            Shape::Poly => "poly",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_arity() {
        assert!(Shape::Rect.accepts(4));
        assert!(!Shape::Rect.accepts(3));
        assert!(Shape::Circle.accepts(3));
        assert!(Shape::Poly.accepts(6));
        assert!(Shape::Poly.accepts(8));
        assert!(!Shape::Poly.accepts(7));
        assert!(!Shape::Poly.accepts(4));
    }

    #[test]
    fn test_shape_aliases() {
        let rect: Shape = serde_json::from_str("\"rectangle\"").unwrap();
        let poly: Shape = serde_json::from_str("\"polygon\"").unwrap();
        assert_eq!(rect, Shape::Rect);
        assert_eq!(poly, Shape::Poly);
        assert_eq!(serde_json::to_string(&Shape::Circle).unwrap(), "\"circle\"");
    }

    #[test]
    fn test_as_str_matches_serde_name() {
        for shape in Shape::all() {
            let json = serde_json::to_string(shape).unwrap();
            assert_eq!(json, format!("\"{}\"", shape.as_str()));
        }
    }
}
