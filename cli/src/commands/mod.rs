pub mod footprint;
pub mod index;
pub mod search;

use std::path::Path;

use anyhow::Result;
use footprints::IndexOptions;

/// Options from `--config`, or the defaults.
pub(crate) fn load_options(config: Option<&Path>) -> Result<IndexOptions> {
    match config {
        Some(path) => IndexOptions::from_path(path),
        None => Ok(IndexOptions::default()),
    }
}
