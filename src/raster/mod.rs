mod geotransform;

pub use geotransform::{GeoTransform, RasterGrid};

use anyhow::Result;

use crate::{error::FootprintError, geom::BoundingBox};

/// A raster-like dataset that can report its extent.
pub trait RasterDataset {
    fn bounds(&self) -> Result<Bounds>;
}

impl<D: RasterDataset + ?Sized> RasterDataset for &D {
    fn bounds(&self) -> Result<Bounds> { (**self).bounds() }
}

/// Bounds already in hand act as their own dataset.
impl RasterDataset for Bounds {
    fn bounds(&self) -> Result<Bounds> { Ok(self.clone()) }
}

/// The two shapes a dataset may report its bounds in.
#[derive(Debug, Clone, PartialEq)]
pub enum Bounds {
    /// Named edges, as carried by a structured bounds value.
    Named { left: f64, bottom: f64, right: f64, top: f64 },
    /// Raw accessor output in the order `min_x, min_y, max_x, max_y`, not yet coerced.
    Values(Vec<BoundValue>),
}

impl Bounds {
    /// Resolve either shape into a bounding box, coercing raw values to `f64`.
    pub fn to_bbox(&self) -> Result<BoundingBox> {
        match self {
            Bounds::Named { left, bottom, right, top } => {
                Ok(BoundingBox::new(*left, *bottom, *right, *top))
            }
            Bounds::Values(values) => {
                let coerced = values.iter().enumerate()
                    .map(|(position, value)| value.to_f64(position))
                    .collect::<Result<Vec<_>, _>>()?;
                let bbox: [f64; 4] = coerced.try_into()
                    .map_err(|v: Vec<f64>| FootprintError::BoundsArity(v.len()))?;
                Ok(bbox.into())
            }
        }
    }
}

/// A numeric-like bound as returned by a bounds accessor.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundValue {
    Float(f64),
    Int(i64),
    Text(String),
}

impl BoundValue {
    fn to_f64(&self, position: usize) -> Result<f64, FootprintError> {
        match self {
            BoundValue::Float(v) => Ok(*v),
            BoundValue::Int(v) => Ok(*v as f64),
            BoundValue::Text(s) => s.trim().parse().map_err(|_| FootprintError::NonNumericBound {
                position,
                value: s.clone(),
            }),
        }
    }
}

impl From<f64> for BoundValue {
    fn from(v: f64) -> Self { BoundValue::Float(v) }
}

impl From<f32> for BoundValue {
    fn from(v: f32) -> Self { BoundValue::Float(v.into()) }
}

impl From<i64> for BoundValue {
    fn from(v: i64) -> Self { BoundValue::Int(v) }
}

impl From<i32> for BoundValue {
    fn from(v: i32) -> Self { BoundValue::Int(v.into()) }
}

impl From<&str> for BoundValue {
    fn from(v: &str) -> Self { BoundValue::Text(v.to_string()) }
}

impl From<String> for BoundValue {
    fn from(v: String) -> Self { BoundValue::Text(v) }
}

impl<T: Into<BoundValue>> FromIterator<T> for Bounds {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Bounds::Values(iter.into_iter().map(Into::into).collect())
    }
}
