use serde::{Deserialize, Serialize};

use super::Area;

/// A named, ordered collection of areas bound to one image.
///
/// Order is render order: later areas are drawn over earlier ones and win
/// hit tests where they overlap.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ImageMap {
    pub name: String,
    #[serde(default)]
    pub areas: Vec<Area>,
}

impl ImageMap {
    pub fn new(name: impl Into<String>, areas: Vec<Area>) -> Self {
        Self {
            name: name.into(),
            areas,
        }
    }

    /// Parse a map from its JSON representation
    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| format!("Invalid map file: {}", e))
    }

    pub fn to_json(&self) -> Result<String, String> {
        serde_json::to_string_pretty(self).map_err(|e| format!("Failed to serialize map: {}", e))
    }

    /// Position of the area matching `area` by key, falling back to
    /// `fallback_index` when the area carries no key.
    pub fn position_of(&self, area: &Area, key_name: &str, fallback_index: usize) -> Option<usize> {
        if area.key(key_name).is_some() {
            self.areas.iter().position(|a| a.same_key(area, key_name))
        } else if fallback_index < self.areas.len() {
            Some(fallback_index)
        } else {
            None
        }
    }

    /// A fresh area list with the entry at `index` replaced by `area`.
    ///
    /// `self` is left untouched.
    pub fn with_area_replaced(&self, index: usize, area: &Area) -> Vec<Area> {
        self.areas
            .iter()
            .enumerate()
            .map(|(i, current)| if i == index { area.clone() } else { current.clone() })
            .collect()
    }

    /// Number of areas whose coordinate count does not fit their shape
    pub fn malformed_count(&self) -> usize {
        self.areas.iter().filter(|a| !a.is_well_formed()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::Shape;

    fn sample_map() -> ImageMap {
        ImageMap::new(
            "m",
            vec![
                Area::new("a", Shape::Rect, vec![0.0, 0.0, 10.0, 10.0]),
                Area::new("b", Shape::Circle, vec![5.0, 5.0, 2.0]),
                Area::default(),
            ],
        )
    }

    #[test]
    fn test_from_json() {
        let map = ImageMap::from_json(
            r#"{"name":"m","areas":[{"id":"a","shape":"rect","coords":[0,0,50,50]}]}"#,
        )
        .unwrap();
        assert_eq!(map.name, "m");
        assert_eq!(map.areas.len(), 1);
        assert_eq!(map.areas[0].shape, Shape::Rect);
    }

    #[test]
    fn test_from_json_reports_errors() {
        let err = ImageMap::from_json("{not json").unwrap_err();
        assert!(err.starts_with("Invalid map file"));
    }

    #[test]
    fn test_missing_areas_default_to_empty() {
        let map = ImageMap::from_json(r#"{"name":"empty"}"#).unwrap();
        assert!(map.areas.is_empty());
    }

    #[test]
    fn test_position_of_by_key() {
        let map = sample_map();
        let target = Area::new("b", Shape::Rect, vec![]);
        assert_eq!(map.position_of(&target, "id", 0), Some(1));
    }

    #[test]
    fn test_position_of_keyless_uses_index() {
        let map = sample_map();
        assert_eq!(map.position_of(&Area::default(), "id", 2), Some(2));
        assert_eq!(map.position_of(&Area::default(), "id", 9), None);
    }

    #[test]
    fn test_with_area_replaced_leaves_source_untouched() {
        let map = sample_map();
        let replacement = Area::new("z", Shape::Poly, vec![]);
        let areas = map.with_area_replaced(0, &replacement);

        assert_eq!(areas[0].id.as_deref(), Some("z"));
        assert_eq!(map.areas[0].id.as_deref(), Some("a"));
        assert_eq!(areas[1], map.areas[1]);
    }

    #[test]
    fn test_malformed_count() {
        // The keyless default area is a rect with no coordinates
        assert_eq!(sample_map().malformed_count(), 1);
    }
}
