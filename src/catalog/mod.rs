mod collection;
mod item;

pub use collection::ItemCollection;
pub use item::{Asset, CatalogItem};

use anyhow::Result;

/// A source of catalog items.
pub trait Catalog {
    /// All items, in catalog order.
    fn all_items(&self) -> Result<Vec<CatalogItem>>;

    /// A single item by identifier; fails if the catalog has no such item.
    fn get_item(&self, id: &str) -> Result<CatalogItem>;
}

impl<C: Catalog + ?Sized> Catalog for &C {
    fn all_items(&self) -> Result<Vec<CatalogItem>> { (**self).all_items() }

    fn get_item(&self, id: &str) -> Result<CatalogItem> { (**self).get_item(id) }
}
