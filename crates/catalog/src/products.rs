use shared::domain::{Dimensions, FurnitureItem, ProductInfo, Vec3};
use tracing::debug;

use crate::{CatalogAdapter, CatalogEntry};

pub const MAX_SEARCH_RESULTS: usize = 10;

const FALLBACK_FURNITURE_TYPE: &str = "table";

const TYPE_MAP: &[(&str, &str)] = &[
    ("sofa", "sofa"),
    ("armchair", "sofa"),
    ("coffee table", "table"),
    ("dining table", "table"),
    ("desk", "desk"),
    ("chair", "chair"),
    ("bed", "bed"),
    ("bookcase", "bookshelf"),
    ("lamp", "lamp"),
    ("wardrobe", "cabinet"),
    ("cabinet", "cabinet"),
    ("shelf", "bookshelf"),
    ("plant", "plant"),
    ("rug", "rug"),
];

/// Product type to the furniture type the renderer knows how to draw.
pub fn map_product_type(product_type: &str) -> &'static str {
    let product_type = product_type.to_lowercase();
    TYPE_MAP
        .iter()
        .find(|(from, _)| *from == product_type)
        .map(|(_, to)| *to)
        .unwrap_or(FALLBACK_FURNITURE_TYPE)
}

struct Product {
    id: &'static str,
    name: &'static str,
    price: f64,
    url: &'static str,
    product_type: &'static str,
    dimensions: Dimensions,
    color: &'static str,
}

const fn product(
    id: &'static str,
    name: &'static str,
    price: f64,
    url: &'static str,
    product_type: &'static str,
    dimensions: Dimensions,
    color: &'static str,
) -> Product {
    Product {
        id,
        name,
        price,
        url,
        product_type,
        dimensions,
        color,
    }
}

const MOCK_PRODUCTS: &[Product] = &[
    product(
        "ikea-001",
        "KIVIK Sofa",
        699.0,
        "https://www.ikea.com/products/kivik-sofa",
        "sofa",
        Dimensions::new(2.28, 0.83, 0.95),
        "#CCCCCC",
    ),
    product(
        "ikea-002",
        "POÄNG Armchair",
        199.0,
        "https://www.ikea.com/products/poang-armchair",
        "chair",
        Dimensions::new(0.68, 1.05, 0.82),
        "#8B4513",
    ),
    product(
        "ikea-003",
        "LACK Coffee Table",
        49.99,
        "https://www.ikea.com/products/lack-coffee-table",
        "coffee table",
        Dimensions::new(0.9, 0.45, 0.55),
        "#000000",
    ),
    product(
        "ikea-004",
        "MALM Bed Frame",
        349.0,
        "https://www.ikea.com/products/malm-bed-frame",
        "bed",
        Dimensions::new(1.68, 0.38, 2.09),
        "#FFFFFF",
    ),
    product(
        "ikea-005",
        "BILLY Bookcase",
        129.0,
        "https://www.ikea.com/products/billy-bookcase",
        "bookcase",
        Dimensions::new(0.8, 2.02, 0.28),
        "#F5F5DC",
    ),
    product(
        "ikea-006",
        "KALLAX Shelf Unit",
        119.0,
        "https://www.ikea.com/products/kallax-shelf-unit",
        "shelf",
        Dimensions::new(1.47, 1.47, 0.39),
        "#F5F5F5",
    ),
    product(
        "ikea-007",
        "HEMNES Dresser",
        249.0,
        "https://www.ikea.com/products/hemnes-dresser",
        "cabinet",
        Dimensions::new(1.08, 0.96, 0.5),
        "#5F4B32",
    ),
    product(
        "ikea-008",
        "VITTSJÖ TV Unit",
        99.0,
        "https://www.ikea.com/products/vittsjo-tv-unit",
        "cabinet",
        Dimensions::new(1.5, 0.47, 0.4),
        "#000000",
    ),
    product(
        "ikea-009",
        "LISABO Dining Table",
        299.0,
        "https://www.ikea.com/products/lisabo-dining-table",
        "dining table",
        Dimensions::new(1.4, 0.74, 0.8),
        "#D2B48C",
    ),
    product(
        "ikea-010",
        "STOCKHOLM Rug",
        299.0,
        "https://www.ikea.com/products/stockholm-rug",
        "rug",
        Dimensions::new(2.7, 0.01, 1.8),
        "#708090",
    ),
    product(
        "ikea-011",
        "FEJKA Artificial plant",
        5.99,
        "https://www.ikea.com/products/fejka-artificial-plant",
        "plant",
        Dimensions::new(0.12, 0.35, 0.12),
        "#228B22",
    ),
    product(
        "ikea-012",
        "HEKTAR Floor lamp",
        69.99,
        "https://www.ikea.com/products/hektar-floor-lamp",
        "lamp",
        Dimensions::new(0.31, 1.81, 0.31),
        "#2F4F4F",
    ),
];

/// Third-party product list. Backed by a fixed mock data set; entries keep
/// their product type in `category`.
#[derive(Debug, Clone)]
pub struct ProductCatalog {
    entries: Vec<CatalogEntry>,
}

impl Default for ProductCatalog {
    fn default() -> Self {
        Self::mock()
    }
}

impl ProductCatalog {
    pub fn mock() -> Self {
        Self::from_entries(MOCK_PRODUCTS.iter().map(|p| CatalogEntry {
            id: p.id.into(),
            name: p.name.into(),
            description: String::new(),
            category: p.product_type.into(),
            brand: "IKEA".into(),
            price: p.price,
            currency: "USD".into(),
            url: p.url.into(),
            dimensions: p.dimensions,
            color: p.color.into(),
            model_reference: None,
        }))
    }

    pub fn from_entries(entries: impl IntoIterator<Item = CatalogEntry>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// Case-insensitive match of `query` against name or product type,
    /// optionally narrowed to product types containing `category`. An empty
    /// query matches everything.
    pub fn search(&self, query: &str, category: Option<&str>) -> Vec<CatalogEntry> {
        let query = query.to_lowercase();
        let category = category
            .map(str::to_lowercase)
            .filter(|category| !category.is_empty());

        let results: Vec<CatalogEntry> = self
            .entries
            .iter()
            .filter(|entry| {
                let kind = entry.category.to_lowercase();
                let matches_query =
                    entry.name.to_lowercase().contains(&query) || kind.contains(&query);
                let matches_category = category.as_deref().map_or(true, |c| kind.contains(c));
                matches_query && matches_category
            })
            .take(MAX_SEARCH_RESULTS)
            .cloned()
            .collect();

        debug!(%query, ?category, results = results.len(), "product search");
        results
    }
}

impl CatalogAdapter for ProductCatalog {
    fn list_entries(&self) -> Vec<CatalogEntry> {
        self.entries.clone()
    }

    fn to_furniture_item(
        &self,
        entry: &CatalogEntry,
        position: Vec3,
        rotation: f64,
        color: Option<&str>,
    ) -> FurnitureItem {
        FurnitureItem {
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
                map_product_type(&entry.category),
                position,
                rotation,
                color.unwrap_or(&entry.color),
            )
        }
    }
}
