use std::io::Write;

use anyhow::Result;
use footprints::{catalog_to_index_with, ItemCollection};

use super::load_options;

pub fn run(_cli: &crate::cli::Cli, args: &crate::cli::IndexArgs) -> Result<()> {
    let opts = load_options(args.config.as_deref())?;
    let catalog = ItemCollection::from_path(&args.catalog)?;
    let index = catalog_to_index_with(&catalog, &opts)?;

    tracing::info!(rows = index.len(), crs = %index.crs(), "indexed {}", args.catalog.display());

    match &args.output {
        Some(path) => {
            index.write_table(path)?;
            tracing::info!("wrote index table to {}", path.display());
        }
        None => std::io::stdout().write_all(&index.to_json_bytes()?)?,
    }
    Ok(())
}
