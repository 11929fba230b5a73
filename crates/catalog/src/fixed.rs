use shared::domain::{Dimensions, FurnitureItem, ProductInfo, Vec3};

use crate::{CatalogAdapter, CatalogEntry};

const FIXED_COLOR: &str = "#FFFFFF";

struct FixedElement {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    model_path: &'static str,
    category: &'static str,
    dimensions: Dimensions,
}

const ELEMENTS: &[FixedElement] = &[
    FixedElement {
        id: "bookshelf-wall",
        name: "Built-in Bookshelf",
        description: "A built-in bookshelf that spans from floor to ceiling",
        model_path: "/models/built_in_bookshelf.glb",
        category: "storage",
        dimensions: Dimensions::new(2.4, 2.8, 0.4),
    },
    FixedElement {
        id: "kitchen-cabinets",
        name: "Kitchen Cabinets",
        description: "Built-in kitchen cabinets with countertop",
        model_path: "/models/kitchen_cabinets.glb",
        category: "kitchen",
        dimensions: Dimensions::new(3.0, 2.1, 0.6),
    },
    FixedElement {
        id: "wall-fireplace",
        name: "Wall Fireplace",
        description: "Modern built-in wall fireplace with surround",
        model_path: "/models/wall_fireplace.glb",
        category: "heating",
        dimensions: Dimensions::new(1.8, 2.0, 0.3),
    },
    FixedElement {
        id: "tv-wall-unit",
        name: "TV Wall Unit",
        description: "TV wall mount with integrated storage and media center",
        model_path: "/models/wall_tv_unit.glb",
        category: "entertainment",
        dimensions: Dimensions::new(2.5, 1.8, 0.35),
    },
];

/// Built-in architectural elements. Items created from it are fixed, so the
/// scene store refuses to remove them.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedElementsCatalog;

impl CatalogAdapter for FixedElementsCatalog {
    fn list_entries(&self) -> Vec<CatalogEntry> {
        ELEMENTS
            .iter()
            .map(|element| CatalogEntry {
                id: element.id.into(),
                name: element.name.into(),
                description: element.description.into(),
                category: element.category.into(),
                brand: "Custom".into(),
                price: 0.0,
                currency: "USD".into(),
                url: String::new(),
                dimensions: element.dimensions,
                color: FIXED_COLOR.into(),
                model_reference: Some(element.model_path.into()),
            })
            .collect()
    }

    fn to_furniture_item(
        &self,
        entry: &CatalogEntry,
        position: Vec3,
        rotation: f64,
        color: Option<&str>,
    ) -> FurnitureItem {
        FurnitureItem {
            is_fixed: true,
            model_reference: entry.model_reference.clone(),
            product_info: Some(ProductInfo {
                name: entry.name.clone(),
                brand: entry.brand.clone(),
                price: entry.price,
                currency: entry.currency.clone(),
                url: entry.url.clone(),
                dimensions: entry.dimensions,
            }),
            ..FurnitureItem::new(
                entry.name.clone(),
                position,
                rotation,
                color.unwrap_or(FIXED_COLOR),
            )
        }
    }
}
