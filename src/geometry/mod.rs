//! Geometric primitives: points, polygons and sections

mod point;
mod polygon;
mod section;

pub use point::Point;
pub use polygon::{Polygon, PolygonTags, Thickness};
pub use section::Section;

pub(crate) use polygon::{bounds, edges, perimeter, shoelace_area};
