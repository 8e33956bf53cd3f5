use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::Shape;
use crate::color::HighlightColor;

/// One clickable, highlightable region of an image map.
///
/// Fields the mapper does not interpret are kept in `extra` so that any of
/// them can serve as the area key (see [`Area::key`]).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Area {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub shape: Shape,
    #[serde(default)]
    pub coords: Vec<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<HighlightColor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_color: Option<HighlightColor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_width: Option<f32>,
    /// Persistent highlight, painted whenever the canvas is reset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pre_fill_color: Option<HighlightColor>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub disabled: bool,
    /// Per-area opt-out of hover/click highlighting
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Area {
    pub fn new(id: impl Into<String>, shape: Shape, coords: Vec<f32>) -> Self {
        Self {
            id: Some(id.into()),
            shape,
            coords,
            ..Default::default()
        }
    }

    /// Value of the field named `key_name`, if the area has one.
    ///
    /// Typed fields are looked up by their JSON name (`shape`, `fillColor`).
    pub fn key(&self, key_name: &str) -> Option<Value> {
        let value = match key_name {
            "id" => self.id.clone().map(Value::String),
            "href" => self.href.clone().map(Value::String),
            _ => match self.extra.get(key_name) {
                Some(value) => Some(value.clone()),
                None => serde_json::to_value(self)
                    .ok()
                    .and_then(|mut v| v.get_mut(key_name).map(Value::take)),
            },
        };
        value.filter(|v| !v.is_null())
    }

    /// True when both areas carry the key field and its values are equal.
    pub fn same_key(&self, other: &Area, key_name: &str) -> bool {
        match (self.key(key_name), other.key(key_name)) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }

    pub fn is_well_formed(&self) -> bool {
        self.shape.accepts(self.coords.len())
    }

    /// Display label for logs and the viewer UI.
    pub fn label(&self, key_name: &str, index: usize) -> String {
        match self.key(key_name) {
            Some(Value::String(s)) => s,
            Some(other) => other.to_string(),
            None => index.to_string(),
        }
    }
}
