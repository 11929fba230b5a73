use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub name: String,
    pub display_name: String,
    pub texture_path: String,
    pub color: String,
    pub scale: f64,
    pub roughness: f64,
    pub metalness: f64,
}

impl Material {
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }
}

struct MaterialEntry {
    name: &'static str,
    display_name: &'static str,
    texture_path: &'static str,
    color: &'static str,
    scale: f64,
    roughness: f64,
    metalness: f64,
}

impl From<&MaterialEntry> for Material {
    fn from(entry: &MaterialEntry) -> Self {
        Self {
            name: entry.name.to_string(),
            display_name: entry.display_name.to_string(),
            texture_path: entry.texture_path.to_string(),
            color: entry.color.to_string(),
            scale: entry.scale,
            roughness: entry.roughness,
            metalness: entry.metalness,
        }
    }
}

// The first entry doubles as the fallback for unknown names.
const CATALOG: &[MaterialEntry] = &[
    MaterialEntry {
        name: "wood",
        display_name: "Wood",
        texture_path: "wood.jpg",
        color: "#A0522D",
        scale: 1.0,
        roughness: 0.5,
        metalness: 0.1,
    },
    MaterialEntry {
        name: "plaster",
        display_name: "Plaster/Wall",
        texture_path: "asphalt.png",
        color: "#F5F5F5",
        scale: 2.0,
        roughness: 0.7,
        metalness: 0.1,
    },
    MaterialEntry {
        name: "concrete",
        display_name: "Concrete",
        texture_path: "asphalt.png",
        color: "#808080",
        scale: 1.0,
        roughness: 0.8,
        metalness: 0.2,
    },
    MaterialEntry {
        name: "grass",
        display_name: "Grass/Plants",
        texture_path: "grass.png",
        color: "#006400",
        scale: 1.0,
        roughness: 0.9,
        metalness: 0.0,
    },
    MaterialEntry {
        name: "sand",
        display_name: "Sand/Beach",
        texture_path: "sand.jpg",
        color: "#F5DEB3",
        scale: 1.0,
        roughness: 0.9,
        metalness: 0.0,
    },
    MaterialEntry {
        name: "tile",
        display_name: "Tile",
        texture_path: "asphalt.png",
        color: "#E5E5E5",
        scale: 0.5,
        roughness: 0.3,
        metalness: 0.2,
    },
    MaterialEntry {
        name: "marble",
        display_name: "Marble",
        texture_path: "asphalt.png",
        color: "#F0F0F0",
        scale: 1.0,
        roughness: 0.2,
        metalness: 0.3,
    },
    MaterialEntry {
        name: "carpet",
        display_name: "Carpet",
        texture_path: "asphalt.png",
        color: "#A52A2A",
        scale: 0.5,
        roughness: 0.9,
        metalness: 0.0,
    },
    MaterialEntry {
        name: "brick",
        display_name: "Brick",
        texture_path: "asphalt.png",
        color: "#8B4513",
        scale: 0.3,
        roughness: 0.8,
        metalness: 0.1,
    },
    MaterialEntry {
        name: "sky",
        display_name: "Sky",
        texture_path: "sky.png",
        color: "#87CEEB",
        scale: 1.0,
        roughness: 0.1,
        metalness: 0.0,
    },
];

pub fn material_catalog() -> Vec<Material> {
    CATALOG.iter().map(Material::from).collect()
}

pub fn find_material(name: &str) -> Option<Material> {
    CATALOG
        .iter()
        .find(|entry| entry.name == name)
        .map(Material::from)
}

/// Looks up a catalog material by name, falling back to the first catalog
/// entry for unknown names.
pub fn get_material_by_name(name: &str) -> Material {
    find_material(name).unwrap_or_else(|| Material::from(&CATALOG[0]))
}
