use anyhow::Result;
use geo::{Geometry, Intersects};

use super::{build::catalog_to_index_with, SpatialIndex};
use crate::{
    catalog::{Catalog, CatalogItem},
    config::IndexOptions,
    error::FootprintError,
};

impl SpatialIndex {
    /// Rows whose geometry intersects `query` (boundary contact included), in row order.
    /// With no query, every row matches.
    pub fn query(&self, query: Option<&Geometry<f64>>) -> Vec<usize> {
        match query {
            None => (0..self.len()).collect(),
            Some(query) => self.geometries().iter().enumerate()
                .filter(|(_, geom)| geom.intersects(query))
                .map(|(row, _)| row)
                .collect(),
        }
    }

    /// Ids of the rows matching `query`, in row order.
    pub fn query_ids(&self, query: Option<&Geometry<f64>>) -> Vec<&str> {
        self.query(query).into_iter().map(|row| self.ids()[row].as_str()).collect()
    }
}

/// Items of `catalog` whose footprint intersects `query`, in catalog order; all items when `query` is `None`.
pub fn search_catalog<C: Catalog + ?Sized>(catalog: &C, query: Option<&Geometry<f64>>) -> Result<Vec<CatalogItem>> {
    search_catalog_with(catalog, query, &IndexOptions::default())
}

/// Same as [`search_catalog`] with explicit index options.
///
/// The matched items are the ones already resolved while indexing, so the
/// catalog is read once.
pub fn search_catalog_with<C: Catalog + ?Sized>(
    catalog: &C,
    query: Option<&Geometry<f64>>,
    opts: &IndexOptions,
) -> Result<Vec<CatalogItem>> {
    let index = catalog_to_index_with(catalog, opts)?;
    let rows = index.query(query);
    tracing::debug!(matched = rows.len(), total = index.len(), "catalog search");
    Ok(index.into_items(&rows))
}

/// Variant of [`search_catalog_with`] that refetches every match through [`Catalog::get_item`],
/// for catalogs whose per-id lookup returns fresher data than the full listing.
/// Fails if the catalog cannot resolve a matched id, or if a matched id was shared
/// by several items (a per-id lookup cannot tell which one the index kept).
pub fn search_catalog_by_lookup<C: Catalog + ?Sized>(
    catalog: &C,
    query: Option<&Geometry<f64>>,
    opts: &IndexOptions,
) -> Result<Vec<CatalogItem>> {
    let index = catalog_to_index_with(catalog, opts)?;
    let ids = index.query_ids(query);
    tracing::debug!(matched = ids.len(), total = index.len(), "catalog search (by lookup)");
    ids.into_iter()
        .map(|id| {
            if index.is_shared_id(id) {
                return Err(FootprintError::AmbiguousId(id.to_string()).into());
            }
            catalog.get_item(id)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use geo::{coord, Rect};
    use serde_json::json;

    use super::*;
    use crate::{
        catalog::{Asset, ItemCollection},
        config::DuplicatePolicy,
    };

    fn catalog(ids: &[&str]) -> ItemCollection {
        ids.iter().enumerate()
            .map(|(i, id)| {
                let x = 2.0 * i as f64;
                CatalogItem::new(*id, json!({
                    "type": "Polygon",
                    "coordinates": [[[x, 0.0], [x, 1.0], [x + 1.0, 1.0], [x + 1.0, 0.0], [x, 0.0]]],
                }))
                .with_asset("DEM", Asset::new("dem.tif").with_field("proj:epsg", 25832))
            })
            .collect()
    }

    fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Geometry<f64> {
        Geometry::Rect(Rect::new(coord! { x: x0, y: y0 }, coord! { x: x1, y: y1 }))
    }

    #[test]
    fn query_without_geometry_matches_all_rows() {
        let index = catalog_to_index_with(&catalog(&["a", "b", "c"]), &IndexOptions::default()).unwrap();
        assert_eq!(index.query(None), vec![0, 1, 2]);
    }

    #[test]
    fn query_ids_follow_row_order() {
        let index = catalog_to_index_with(&catalog(&["a", "b", "c"]), &IndexOptions::default()).unwrap();
        assert_eq!(index.query_ids(Some(&rect(0.5, 0.5, 4.5, 0.6))), vec!["a", "b", "c"]);
        assert_eq!(index.query_ids(Some(&rect(2.5, 0.5, 2.6, 0.6))), vec!["b"]);
        assert!(index.query_ids(Some(&rect(10.0, 10.0, 11.0, 11.0))).is_empty());
    }

    /// Lookup variant propagates the catalog's own failure for an unresolvable id.
    #[test]
    fn lookup_errors_propagate() {
        struct ForgetfulCatalog(ItemCollection);

        impl Catalog for ForgetfulCatalog {
            fn all_items(&self) -> Result<Vec<CatalogItem>> { self.0.all_items() }
            fn get_item(&self, id: &str) -> Result<CatalogItem> { anyhow::bail!("lost track of {id}") }
        }

        let catalog = ForgetfulCatalog(catalog(&["a"]));
        let err = search_catalog_by_lookup(&catalog, None, &IndexOptions::default()).unwrap_err();
        assert_eq!(err.to_string(), "lost track of a");
    }

    #[test]
    fn lookup_variant_returns_catalog_items() {
        let catalog = catalog(&["a", "b"]);
        let found = search_catalog_by_lookup(&catalog, Some(&rect(2.0, 0.0, 3.0, 1.0)), &IndexOptions::default()).unwrap();
        assert_eq!(found, vec![catalog.get_item("b").unwrap()]);
    }

    #[test]
    fn lookup_refuses_shared_ids() {
        let catalog: ItemCollection = catalog(&["a", "a"]);
        let opts = IndexOptions { duplicates: DuplicatePolicy::KeepLast, ..Default::default() };
        let point = Geometry::Point(geo::Point::new(2.5, 0.5));

        // Direct search returns the kept (last) item.
        let direct = search_catalog_with(&catalog, Some(&point), &opts).unwrap();
        assert_eq!(direct, vec![catalog.items()[1].clone()]);

        let err = search_catalog_by_lookup(&catalog, Some(&point), &opts).unwrap_err();
        assert_eq!(err.downcast_ref::<FootprintError>(), Some(&FootprintError::AmbiguousId("a".into())));

        let keep_first = IndexOptions { duplicates: DuplicatePolicy::KeepFirst, ..Default::default() };
        assert!(search_catalog_by_lookup(&catalog, None, &keep_first).is_err());
    }

    #[test]
    fn lookup_allows_unshared_ids_under_lenient_policy() {
        let catalog = catalog(&["a", "a", "b"]);
        let opts = IndexOptions { duplicates: DuplicatePolicy::KeepLast, ..Default::default() };
        let found = search_catalog_by_lookup(&catalog, Some(&rect(4.0, 0.0, 5.0, 1.0)), &opts).unwrap();
        assert_eq!(found, vec![catalog.get_item("b").unwrap()]);
    }
}
