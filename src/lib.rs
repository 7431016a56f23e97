#![doc = "Raster footprints and spatial search over geo-referenced item catalogs"]
mod catalog;
mod config;
mod crs;
mod error;
mod geom;
mod index;
mod raster;

#[doc(inline)]
pub use catalog::{Asset, Catalog, CatalogItem, ItemCollection};

#[doc(inline)]
pub use config::{DuplicatePolicy, IndexOptions};

#[doc(inline)]
pub use crs::Crs;

#[doc(inline)]
pub use error::FootprintError;

#[doc(inline)]
pub use geom::{bounds_to_footprint, geometry_from_geojson, polygon_to_geojson, BoundingBox, Footprint};

#[doc(inline)]
pub use index::{
    catalog_to_index, catalog_to_index_with, search_catalog, search_catalog_by_lookup, search_catalog_with,
    SpatialIndex,
};

#[doc(inline)]
pub use raster::{BoundValue, Bounds, GeoTransform, RasterDataset, RasterGrid};
