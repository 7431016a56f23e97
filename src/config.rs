use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// What to do when two catalog items share an id.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Fail the index build.
    #[default]
    Reject,
    /// Keep the earliest item, drop the later ones.
    KeepFirst,
    /// Keep the latest item, in the position of the earliest one.
    KeepLast,
}

/// Options controlling how a catalog is turned into a spatial index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexOptions {
    /// Asset whose metadata carries the catalog CRS (e.g., "DEM")
    pub crs_asset: String,
    /// Field inside that asset holding the EPSG code
    pub epsg_field: String,
    /// Check every item against the CRS of the first one
    pub validate_crs: bool,
    pub duplicates: DuplicatePolicy,
}

impl Default for IndexOptions {
    fn default() -> Self {
        Self {
            crs_asset: "DEM".to_string(),
            epsg_field: "proj:epsg".to_string(),
            validate_crs: true,
            duplicates: DuplicatePolicy::Reject,
        }
    }
}

impl IndexOptions {
    /// Read options from a JSON file; missing fields take their defaults.
    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = fs::read(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_json_bytes(&bytes)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_json_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }
}
