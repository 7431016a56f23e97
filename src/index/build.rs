use std::collections::{HashMap, HashSet};

use anyhow::Result;

use super::{table::envelope_table, SpatialIndex};
use crate::{
    catalog::{Catalog, CatalogItem},
    config::{DuplicatePolicy, IndexOptions},
    crs::Crs,
    error::FootprintError,
    geom::geometry_from_geojson,
};

/// Build a spatial index over every item of `catalog`, using default options.
pub fn catalog_to_index<C: Catalog + ?Sized>(catalog: &C) -> Result<SpatialIndex> {
    catalog_to_index_with(catalog, &IndexOptions::default())
}

/// Build a spatial index over every item of `catalog`.
///
/// The table CRS comes from the first item's `opts.crs_asset` asset. Items are
/// read from the catalog exactly once, and the index keeps catalog order.
pub fn catalog_to_index_with<C: Catalog + ?Sized>(catalog: &C, opts: &IndexOptions) -> Result<SpatialIndex> {
    let items = catalog.all_items()?;

    let first = items.first().ok_or(FootprintError::EmptyCatalog)?;
    let crs = catalog_crs(first, opts)?;

    if opts.validate_crs {
        for item in &items[1..] {
            check_crs(item, crs, opts)?;
        }
    }

    let mut index: HashMap<String, usize> = HashMap::with_capacity(items.len());
    let mut shared_ids: HashSet<String> = HashSet::new();
    let mut rows: Vec<(CatalogItem, geo::Geometry<f64>)> = Vec::with_capacity(items.len());

    for item in items {
        let geometry = geometry_from_geojson(&item.geometry)
            .map_err(|e| FootprintError::InvalidGeometry { item: item.id.clone(), reason: format!("{e:#}") })?;

        let existing = index.get(&item.id).copied();
        let Some(row) = existing else {
            index.insert(item.id.clone(), rows.len());
            rows.push((item, geometry));
            continue;
        };

        match opts.duplicates {
            DuplicatePolicy::Reject => return Err(FootprintError::DuplicateId(item.id).into()),
            DuplicatePolicy::KeepFirst => {
                tracing::warn!(id = %item.id, "dropping later item with duplicate id");
                shared_ids.insert(item.id);
            }
            DuplicatePolicy::KeepLast => {
                tracing::warn!(id = %item.id, "replacing earlier item with duplicate id");
                shared_ids.insert(item.id.clone());
                rows[row] = (item, geometry);
            }
        }
    }

    let (items, geoms): (Vec<_>, Vec<_>) = rows.into_iter().unzip();
    let ids: Vec<String> = items.iter().map(|item| item.id.clone()).collect();
    let table = envelope_table(&ids, &geoms)?;

    tracing::debug!(rows = ids.len(), %crs, "built spatial index");

    Ok(SpatialIndex { crs, ids, index, shared_ids, geoms, items, table })
}

/// Read the table CRS from the first item; this one must carry it.
fn catalog_crs(item: &CatalogItem, opts: &IndexOptions) -> Result<Crs> {
    let asset = item.asset(&opts.crs_asset)
        .ok_or_else(|| FootprintError::MissingAsset { item: item.id.clone(), asset: opts.crs_asset.clone() })?;
    let epsg = asset.epsg(&opts.epsg_field)
        .ok_or_else(|| FootprintError::MissingEpsg {
            item: item.id.clone(),
            asset: opts.crs_asset.clone(),
            field: opts.epsg_field.clone(),
        })?;
    Ok(Crs::from_epsg(epsg))
}

/// Fail on an item whose own CRS disagrees with the table; items without one are taken as-is.
fn check_crs(item: &CatalogItem, crs: Crs, opts: &IndexOptions) -> Result<()> {
    match item.asset(&opts.crs_asset).and_then(|asset| asset.epsg(&opts.epsg_field)) {
        Some(found) if found != crs.epsg() => Err(FootprintError::CrsMismatch {
            item: item.id.clone(),
            expected: crs.epsg(),
            found,
        }.into()),
        Some(_) => Ok(()),
        None => {
            tracing::warn!(id = %item.id, %crs, "item has no CRS metadata, assuming catalog CRS");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    use super::*;
    use crate::catalog::{Asset, ItemCollection};

    fn square(x: f64, y: f64) -> Value {
        json!({
            "type": "Polygon",
            "coordinates": [[[x, y], [x, y + 1.0], [x + 1.0, y + 1.0], [x + 1.0, y], [x, y]]],
        })
    }

    fn item(id: &str, x: f64, epsg: Option<u32>) -> CatalogItem {
        let mut dem = Asset::new(format!("{id}.tif"));
        if let Some(code) = epsg {
            dem = dem.with_field("proj:epsg", code);
        }
        CatalogItem::new(id, square(x, 0.0)).with_asset("DEM", dem)
    }

    fn error_of(result: Result<SpatialIndex>) -> FootprintError {
        result.unwrap_err().downcast::<FootprintError>().expect("expected a FootprintError")
    }

    #[test]
    fn one_row_per_item_in_catalog_order() {
        let catalog = ItemCollection::new(vec![
            item("c", 0.0, Some(32633)),
            item("a", 2.0, Some(32633)),
            item("b", 4.0, Some(32633)),
        ]);
        let index = catalog_to_index(&catalog).unwrap();

        assert_eq!(index.len(), 3);
        assert_eq!(index.ids(), ["c", "a", "b"]);
        assert_eq!(index.crs().to_string(), "epsg:32633");
        assert_eq!(index.row("a"), Some(1));
        assert_eq!(index.get("b").unwrap().id, "b");
        assert!(index.geometry("z").is_none());
    }

    #[test]
    fn empty_catalog_fails() {
        let catalog = ItemCollection::default();
        assert_eq!(error_of(catalog_to_index(&catalog)), FootprintError::EmptyCatalog);
    }

    #[test]
    fn first_item_must_carry_crs() {
        let no_asset = ItemCollection::new(vec![CatalogItem::new("a", square(0.0, 0.0))]);
        assert_eq!(
            error_of(catalog_to_index(&no_asset)),
            FootprintError::MissingAsset { item: "a".into(), asset: "DEM".into() },
        );

        let no_field = ItemCollection::new(vec![item("a", 0.0, None)]);
        assert_eq!(
            error_of(catalog_to_index(&no_field)),
            FootprintError::MissingEpsg { item: "a".into(), asset: "DEM".into(), field: "proj:epsg".into() },
        );
    }

    #[test]
    fn later_items_without_crs_are_accepted() {
        let catalog = ItemCollection::new(vec![item("a", 0.0, Some(4326)), item("b", 2.0, None)]);
        assert_eq!(catalog_to_index(&catalog).unwrap().len(), 2);
    }

    #[test]
    fn crs_mismatch_fails_unless_disabled() {
        let catalog = ItemCollection::new(vec![item("a", 0.0, Some(32633)), item("b", 2.0, Some(32634))]);
        assert_eq!(
            error_of(catalog_to_index(&catalog)),
            FootprintError::CrsMismatch { item: "b".into(), expected: 32633, found: 32634 },
        );

        let opts = IndexOptions { validate_crs: false, ..Default::default() };
        let index = catalog_to_index_with(&catalog, &opts).unwrap();
        assert_eq!(index.crs().epsg(), 32633);
    }

    #[test]
    fn custom_crs_asset() {
        let catalog = ItemCollection::new(vec![
            CatalogItem::new("a", square(0.0, 0.0))
                .with_asset("DSM", Asset::new("a.tif").with_field("epsg", 2056)),
        ]);
        let opts = IndexOptions { crs_asset: "DSM".into(), epsg_field: "epsg".into(), ..Default::default() };
        assert_eq!(catalog_to_index_with(&catalog, &opts).unwrap().crs().epsg(), 2056);
    }

    #[test]
    fn duplicate_ids_follow_policy() {
        let catalog = ItemCollection::new(vec![
            item("a", 0.0, Some(4326)),
            item("b", 2.0, Some(4326)),
            item("a", 4.0, Some(4326)),
        ]);
        assert_eq!(error_of(catalog_to_index(&catalog)), FootprintError::DuplicateId("a".into()));

        let keep_first = IndexOptions { duplicates: DuplicatePolicy::KeepFirst, ..Default::default() };
        let index = catalog_to_index_with(&catalog, &keep_first).unwrap();
        assert_eq!(index.ids(), ["a", "b"]);
        assert_eq!(index.geometry("a"), Some(&geometry_from_geojson(&square(0.0, 0.0)).unwrap()));

        let keep_last = IndexOptions { duplicates: DuplicatePolicy::KeepLast, ..Default::default() };
        let index = catalog_to_index_with(&catalog, &keep_last).unwrap();
        assert_eq!(index.ids(), ["a", "b"]);
        assert_eq!(index.geometry("a"), Some(&geometry_from_geojson(&square(4.0, 0.0)).unwrap()));
        assert!(index.is_shared_id("a"));
        assert!(!index.is_shared_id("b"));
    }

    #[test]
    fn invalid_geometry_names_item() {
        let catalog = ItemCollection::new(vec![
            item("a", 0.0, Some(4326)),
            CatalogItem::new("broken", Value::Null),
        ]);
        match error_of(catalog_to_index(&catalog)) {
            FootprintError::InvalidGeometry { item, .. } => assert_eq!(item, "broken"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn table_holds_envelopes() {
        let catalog = ItemCollection::new(vec![item("a", 0.0, Some(4326)), item("b", 5.0, Some(4326))]);
        let index = catalog_to_index(&catalog).unwrap();
        let table = index.table();

        assert_eq!(table.height(), 2);
        assert_eq!(table.get_column_names_str(), ["id", "min_x", "min_y", "max_x", "max_y"]);
        let min_x: Vec<Option<f64>> = table.column("min_x").unwrap().as_materialized_series().f64().unwrap().into_iter().collect();
        assert_eq!(min_x, [Some(0.0), Some(5.0)]);
    }
}
