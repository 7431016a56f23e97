mod build;
mod search;
mod table;

pub use build::{catalog_to_index, catalog_to_index_with};
pub use search::{search_catalog, search_catalog_by_lookup, search_catalog_with};

use std::{collections::{HashMap, HashSet}, fmt};

use geo::Geometry;
use polars::frame::DataFrame;

use crate::{catalog::CatalogItem, crs::Crs};

/// In-memory table of catalog footprints, one row per item in catalog order.
///
/// Rows are keyed by item id (unique), every geometry is labeled with the single
/// table-wide CRS, and the resolved items travel with their rows so a search
/// never has to go back to the catalog.
pub struct SpatialIndex {
    crs: Crs,
    ids: Vec<String>,
    index: HashMap<String, usize>, // Map between item ids and row indices
    shared_ids: HashSet<String>, // ids carried by more than one catalog item
    geoms: Vec<Geometry<f64>>,
    items: Vec<CatalogItem>,
    table: DataFrame, // id + envelope columns
}

impl SpatialIndex {
    #[inline] pub fn crs(&self) -> Crs { self.crs }

    #[inline] pub fn len(&self) -> usize { self.ids.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.ids.is_empty() }

    /// Item ids in row order.
    #[inline] pub fn ids(&self) -> &[String] { &self.ids }

    #[inline] pub fn items(&self) -> &[CatalogItem] { &self.items }

    #[inline] pub fn geometries(&self) -> &[Geometry<f64>] { &self.geoms }

    /// Tabular view: `id`, `min_x`, `min_y`, `max_x`, `max_y`.
    #[inline] pub fn table(&self) -> &DataFrame { &self.table }

    /// Row index of an item id.
    #[inline] pub fn row(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Whether several catalog items carried this id and all but one were dropped.
    #[inline] pub fn is_shared_id(&self, id: &str) -> bool { self.shared_ids.contains(id) }

    pub fn get(&self, id: &str) -> Option<&CatalogItem> {
        self.row(id).map(|row| &self.items[row])
    }

    pub fn geometry(&self, id: &str) -> Option<&Geometry<f64>> {
        self.row(id).map(|row| &self.geoms[row])
    }

    /// Consume the index, keeping only the items at the given rows, in that order.
    pub(crate) fn into_items(self, rows: &[usize]) -> Vec<CatalogItem> {
        let mut slots: Vec<Option<CatalogItem>> = self.items.into_iter().map(Some).collect();
        rows.iter().filter_map(|&row| slots[row].take()).collect()
    }
}

impl fmt::Debug for SpatialIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Show up to 8 ids unless pretty-printed with {:#?}
        let max_ids = if f.alternate() { self.ids.len() } else { self.ids.len().min(8) };
        let more = self.ids.len() - max_ids;

        f.debug_struct("SpatialIndex")
            .field("crs", &self.crs.to_string())
            .field("rows", &self.len())
            .field("ids", &&self.ids[..max_ids])
            .field("more_ids", &more)
            .finish()
    }
}
