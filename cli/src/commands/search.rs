use std::{fs, path::Path};

use anyhow::{Context, Result};
use footprints::{geometry_from_geojson, search_catalog_with, BoundingBox, ItemCollection};
use geo::Geometry;
use serde_json::{json, Value};

use super::load_options;

/// Read a query geometry from a GeoJSON geometry or Feature file.
fn read_geometry(path: &Path) -> Result<Geometry<f64>> {
    let bytes = fs::read(path)
        .with_context(|| format!("Failed to read geometry file: {}", path.display()))?;
    let value: Value = serde_json::from_slice(&bytes)
        .with_context(|| format!("Failed to parse geometry file: {}", path.display()))?;

    let geometry = match value.get("type").and_then(Value::as_str) {
        Some("Feature") => &value["geometry"],
        _ => &value,
    };
    geometry_from_geojson(geometry)
        .with_context(|| format!("Invalid geometry in {}", path.display()))
}

pub fn run(_cli: &crate::cli::Cli, args: &crate::cli::SearchArgs) -> Result<()> {
    let opts = load_options(args.config.as_deref())?;
    let catalog = ItemCollection::from_path(&args.catalog)?;

    let query = match (&args.bbox, &args.geometry) {
        (Some(b), _) => {
            let bbox: [f64; 4] = b.as_slice().try_into()
                .context("--bbox needs exactly four values")?;
            Some(Geometry::Rect(BoundingBox::from(bbox).to_rect()))
        }
        (None, Some(path)) => Some(read_geometry(path)?),
        (None, None) => None,
    };

    let found = search_catalog_with(&catalog, query.as_ref(), &opts)?;
    tracing::info!(matched = found.len(), total = catalog.len(), "searched {}", args.catalog.display());

    if args.json {
        let out = json!({
            "type": "FeatureCollection",
            "features": found,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        for item in &found {
            println!("{}", item.id);
        }
    }
    Ok(())
}
