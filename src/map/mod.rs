//! Image map data model: shapes, areas and the named map that holds them.
//!
//! Map data is owned by the host. The mapper reads it and only ever hands back
//! new values through its change handler.

mod area;
mod image_map;
mod shape;

pub use area::Area;
pub use image_map::ImageMap;
pub use shape::Shape;
