use geo::{Coord, Rect};
use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box `(min_x, min_y, max_x, max_y)` in the native CRS units.
/// `min <= max` is assumed from the input, not enforced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 4]", into = "[f64; 4]")]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self { min_x, min_y, max_x, max_y }
    }

    #[inline] pub fn width(&self) -> f64 { self.max_x - self.min_x }

    #[inline] pub fn height(&self) -> f64 { self.max_y - self.min_y }

    /// Convert to a `geo::Rect`. Note that `Rect` normalizes swapped corners.
    pub fn to_rect(&self) -> Rect<f64> {
        Rect::new(
            Coord { x: self.min_x, y: self.min_y },
            Coord { x: self.max_x, y: self.max_y },
        )
    }
}

impl From<[f64; 4]> for BoundingBox {
    fn from(b: [f64; 4]) -> Self { Self::new(b[0], b[1], b[2], b[3]) }
}

impl From<BoundingBox> for [f64; 4] {
    fn from(b: BoundingBox) -> Self { [b.min_x, b.min_y, b.max_x, b.max_y] }
}
