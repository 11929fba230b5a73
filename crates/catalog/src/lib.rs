//! Sources of placeable items beyond the free-form furniture list: built-in
//! architectural elements and an external product catalog.

use serde::{Deserialize, Serialize};
use shared::domain::{Dimensions, FurnitureItem, Vec3};

mod fixed;
mod products;

pub use fixed::FixedElementsCatalog;
pub use products::{map_product_type, ProductCatalog, MAX_SEARCH_RESULTS};

/// One selectable catalog item, independent of where it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Grouping used for filtering. For products this is the product type.
    pub category: String,
    pub brand: String,
    pub price: f64,
    pub currency: String,
    #[serde(default)]
    pub url: String,
    pub dimensions: Dimensions,
    /// Color a placed item gets when the caller does not pick one.
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_reference: Option<String>,
}

/// Converts catalog entries into scene furniture. The returned item is not
/// added anywhere; callers hand it to the scene store.
pub trait CatalogAdapter: Send + Sync {
    fn list_entries(&self) -> Vec<CatalogEntry>;

    fn find_entry(&self, id: &str) -> Option<CatalogEntry> {
        self.list_entries().into_iter().find(|entry| entry.id == id)
    }

    fn to_furniture_item(
        &self,
        entry: &CatalogEntry,
        position: Vec3,
        rotation: f64,
        color: Option<&str>,
    ) -> FurnitureItem;
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
