use geo::{Area, Coord, LineString, Polygon};
use serde_json::Value;

use super::{bbox::BoundingBox, geojson::polygon_to_geojson};
use crate::raster::RasterDataset;

/// Rectangular polygon spanning a dataset's bounding box.
#[derive(Debug, Clone, PartialEq)]
pub struct Footprint {
    polygon: Polygon<f64>,
}

impl Footprint {
    /// Build the footprint ring `(x0,y0) -> (x0,y1) -> (x1,y1) -> (x1,y0)`, closed back to the start.
    pub fn from_bbox(bbox: &BoundingBox) -> Self {
        let start = Coord { x: bbox.min_x, y: bbox.min_y };
        // Closed explicitly: a degenerate box may already end where it starts.
        let ring = LineString::from(vec![
            start,
            Coord { x: bbox.min_x, y: bbox.max_y },
            Coord { x: bbox.max_x, y: bbox.max_y },
            Coord { x: bbox.max_x, y: bbox.min_y },
            start,
        ]);
        Self { polygon: Polygon::new(ring, vec![]) }
    }

    #[inline] pub fn polygon(&self) -> &Polygon<f64> { &self.polygon }

    #[inline] pub fn into_polygon(self) -> Polygon<f64> { self.polygon }

    /// The four corner vertices, without the closing vertex.
    pub fn vertices(&self) -> Vec<(f64, f64)> {
        let coords = &self.polygon.exterior().0;
        coords[..coords.len().saturating_sub(1)].iter()
            .map(|c| (c.x, c.y))
            .collect()
    }

    #[inline] pub fn area(&self) -> f64 { self.polygon.unsigned_area() }

    /// GeoJSON geometry mapping of the footprint.
    pub fn to_geojson(&self) -> Value { polygon_to_geojson(&self.polygon) }
}

/// Extract the bounding box of a dataset and the rectangular footprint spanning it.
pub fn bounds_to_footprint<D: RasterDataset + ?Sized>(dataset: &D) -> anyhow::Result<(BoundingBox, Footprint)> {
    let bbox = dataset.bounds()?.to_bbox()?;
    Ok((bbox, Footprint::from_bbox(&bbox)))
}
