use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single catalog item (a STAC Item, i.e. a GeoJSON Feature with assets).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    #[serde(rename = "type", default = "feature_type")]
    pub type_: String,

    /// Unique item identifier.
    pub id: String,

    /// Footprint as a GeoJSON geometry object; `Null` when the item has none.
    #[serde(default)]
    pub geometry: Value,

    /// Bounding box `[west, south, east, north]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bbox: Option<Vec<f64>>,

    #[serde(default)]
    pub properties: Map<String, Value>,

    #[serde(default)]
    pub assets: HashMap<String, Asset>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection: Option<String>,

    /// Remaining members (`stac_version`, `links`, ...), kept so items serialize back unchanged.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn feature_type() -> String { "Feature".to_string() }

impl CatalogItem {
    pub fn new(id: impl Into<String>, geometry: Value) -> Self {
        Self {
            type_: feature_type(),
            id: id.into(),
            geometry,
            bbox: None,
            properties: Map::new(),
            assets: HashMap::new(),
            collection: None,
            extra: Map::new(),
        }
    }

    /// Builder-style asset insertion.
    pub fn with_asset(mut self, name: impl Into<String>, asset: Asset) -> Self {
        self.assets.insert(name.into(), asset);
        self
    }

    /// Get an asset by key.
    pub fn asset(&self, key: &str) -> Option<&Asset> {
        self.assets.get(key)
    }
}

/// A file referenced by a catalog item, with any extension fields (e.g., `proj:epsg`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    #[serde(default)]
    pub href: String,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<String>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Asset {
    pub fn new(href: impl Into<String>) -> Self {
        Self { href: href.into(), ..Default::default() }
    }

    /// Builder-style extra field insertion.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Read an EPSG code from an extra field; `None` if absent or not a non-negative integer.
    pub fn epsg(&self, field: &str) -> Option<u32> {
        self.extra.get(field)
            .and_then(Value::as_u64)
            .and_then(|code| u32::try_from(code).ok())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn deserializes_stac_item() {
        let item: CatalogItem = serde_json::from_value(json!({
            "type": "Feature",
            "stac_version": "1.0.0",
            "id": "tile_0_0",
            "geometry": {"type": "Polygon", "coordinates": [[[0, 0], [0, 1], [1, 1], [1, 0], [0, 0]]]},
            "properties": {"datetime": "2023-01-01T00:00:00Z"},
            "assets": {
                "DEM": {
                    "href": "./tile_0_0.tif",
                    "type": "image/tiff; application=geotiff",
                    "roles": ["data"],
                    "proj:epsg": 32633,
                    "proj:shape": [1000, 1000],
                },
            },
        })).unwrap();

        assert_eq!(item.id, "tile_0_0");
        let dem = item.asset("DEM").unwrap();
        assert_eq!(dem.href, "./tile_0_0.tif");
        assert_eq!(dem.epsg("proj:epsg"), Some(32633));
        assert_eq!(dem.extra["proj:shape"], json!([1000, 1000]));
        assert!(item.asset("ortho").is_none());
        assert_eq!(item.extra["stac_version"], json!("1.0.0"));
    }

    #[test]
    fn missing_members_take_defaults() {
        let item: CatalogItem = serde_json::from_value(json!({"id": "bare"})).unwrap();
        assert_eq!(item.type_, "Feature");
        assert!(item.geometry.is_null());
        assert!(item.assets.is_empty());
    }

    #[test]
    fn epsg_requires_integer() {
        let asset = Asset::new("a.tif")
            .with_field("proj:epsg", "32633")
            .with_field("alt:epsg", -1)
            .with_field("ok:epsg", 2056);
        assert_eq!(asset.epsg("proj:epsg"), None);
        assert_eq!(asset.epsg("alt:epsg"), None);
        assert_eq!(asset.epsg("ok:epsg"), Some(2056));
        assert_eq!(asset.epsg("missing"), None);
    }
}
