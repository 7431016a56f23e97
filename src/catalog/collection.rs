use std::{fs, path::Path};

use anyhow::{bail, Context, Result};
use serde_json::Value;

use super::{Catalog, CatalogItem};
use crate::error::FootprintError;

/// An in-memory catalog, typically loaded from a STAC ItemCollection / GeoJSON FeatureCollection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemCollection {
    items: Vec<CatalogItem>,
}

impl ItemCollection {
    pub fn new(items: Vec<CatalogItem>) -> Self { Self { items } }

    #[inline] pub fn len(&self) -> usize { self.items.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.items.is_empty() }

    #[inline] pub fn items(&self) -> &[CatalogItem] { &self.items }

    /// Parse a catalog from JSON bytes: either `{"features": [...]}` or a bare array of items.
    pub fn from_json_bytes(bytes: &[u8]) -> Result<Self> {
        let root: Value = serde_json::from_slice(bytes)
            .context("Failed to parse item collection JSON")?;

        let features = match root {
            Value::Array(items) => items,
            Value::Object(mut obj) => match obj.remove("features") {
                Some(Value::Array(features)) => features,
                Some(_) => bail!("'features' must be an array"),
                None => bail!("Item collection has no 'features' array"),
            },
            _ => bail!("Item collection must be a JSON object or array"),
        };

        features.into_iter().enumerate()
            .map(|(i, feature)| {
                let id = feature.get("id").and_then(Value::as_str).map(str::to_string);
                serde_json::from_value::<CatalogItem>(feature).with_context(|| match id {
                    Some(id) => format!("Invalid item '{id}' at index {i}"),
                    None => format!("Invalid item at index {i}"),
                })
            })
            .collect::<Result<Vec<_>>>()
            .map(Self::new)
    }

    /// Read a catalog from a JSON file at `path`.
    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = fs::read(path)
            .with_context(|| format!("Failed to read item collection: {}", path.display()))?;
        let collection = Self::from_json_bytes(&bytes)
            .with_context(|| format!("Invalid item collection: {}", path.display()))?;
        tracing::debug!(path = %path.display(), items = collection.len(), "loaded item collection");
        Ok(collection)
    }
}

impl Catalog for ItemCollection {
    fn all_items(&self) -> Result<Vec<CatalogItem>> {
        Ok(self.items.clone())
    }

    fn get_item(&self, id: &str) -> Result<CatalogItem> {
        self.items.iter()
            .find(|item| item.id == id)
            .cloned()
            .ok_or_else(|| FootprintError::UnknownItem(id.to_string()).into())
    }
}

impl FromIterator<CatalogItem> for ItemCollection {
    fn from_iter<I: IntoIterator<Item = CatalogItem>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
