mod bbox;
mod footprint;
mod geojson;

pub use bbox::BoundingBox;
pub use footprint::{bounds_to_footprint, Footprint};
pub use geojson::{geometry_from_geojson, polygon_to_geojson};
