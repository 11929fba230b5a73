use serde::{Deserialize, Serialize};

use crate::materials::{get_material_by_name, Material};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(pub i64);
    };
}

id_newtype!(FurnitureId);
id_newtype!(DesignId);

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ORIGIN: Vec3 = Vec3::new(0.0, 0.0, 0.0);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Room envelope in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
}

impl Dimensions {
    pub const fn new(width: f64, height: f64, depth: f64) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }

    pub fn is_valid(&self) -> bool {
        [self.width, self.height, self.depth]
            .iter()
            .all(|v| v.is_finite() && *v > 0.0)
    }

    /// Whether a floor position lies inside the room footprint. The room is
    /// centered on the origin, so the bounds are the half extents.
    pub fn contains_footprint(&self, position: &Vec3) -> bool {
        position.x.abs() <= self.width / 2.0 && position.z.abs() <= self.depth / 2.0
    }
}

impl Default for Dimensions {
    fn default() -> Self {
        Self::new(6.0, 3.0, 6.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Surface {
    Wall,
    Floor,
    Ceiling,
}

impl Surface {
    pub const ALL: [Surface; 3] = [Surface::Wall, Surface::Floor, Surface::Ceiling];

    pub fn noun(self) -> &'static str {
        match self {
            Surface::Wall => "wall",
            Surface::Floor => "floor",
            Surface::Ceiling => "ceiling",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    #[default]
    Orbit,
    FirstPerson,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Light {
    pub position: Vec3,
    pub color: String,
    pub intensity: f64,
    #[serde(default)]
    pub cast_shadow: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Window {
    pub position: Vec3,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub rotation: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Door {
    pub position: Vec3,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub rotation: f64,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductInfo {
    pub name: String,
    pub brand: String,
    pub price: f64,
    pub currency: String,
    pub url: String,
    pub dimensions: Dimensions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FurnitureItem {
    /// Free-form: catalog names ("sofa") and user-typed text are both valid.
    #[serde(rename = "type")]
    pub item_type: String,
    pub position: Vec3,
    /// Degrees. Not wrapped into [0, 360).
    #[serde(default)]
    pub rotation: f64,
    pub color: String,
    #[serde(default = "default_scale")]
    pub scale: f64,
    #[serde(default)]
    pub is_fixed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_info: Option<ProductInfo>,
}

fn default_scale() -> f64 {
    1.0
}

impl FurnitureItem {
    pub fn new(
        item_type: impl Into<String>,
        position: Vec3,
        rotation: f64,
        color: impl Into<String>,
    ) -> Self {
        Self {
            item_type: item_type.into(),
            position,
            rotation,
            color: color.into(),
            scale: 1.0,
            is_fixed: false,
            model_reference: None,
            product_info: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneConfiguration {
    pub dimensions: Dimensions,
    pub wall_material: Material,
    pub floor_material: Material,
    pub ceiling_material: Material,
    pub ambient_light_intensity: f64,
    pub directional_light_intensity: f64,
    pub background_color: String,
    #[serde(default)]
    pub additional_lights: Vec<Light>,
    /// Identity of an item is its position in this list.
    #[serde(default)]
    pub furniture: Vec<FurnitureItem>,
    #[serde(default)]
    pub windows: Vec<Window>,
    #[serde(default)]
    pub doors: Vec<Door>,
}

impl SceneConfiguration {
    pub fn material(&self, surface: Surface) -> &Material {
        match surface {
            Surface::Wall => &self.wall_material,
            Surface::Floor => &self.floor_material,
            Surface::Ceiling => &self.ceiling_material,
        }
    }
}

impl Default for SceneConfiguration {
    fn default() -> Self {
        Self {
            dimensions: Dimensions::default(),
            wall_material: get_material_by_name("plaster").with_color("#f5f5f5"),
            floor_material: get_material_by_name("wood").with_color("#c4a484"),
            ceiling_material: get_material_by_name("plaster").with_color("#ffffff"),
            ambient_light_intensity: 0.5,
            directional_light_intensity: 1.0,
            background_color: "#87CEEB".into(),
            additional_lights: Vec::new(),
            furniture: Vec::new(),
            windows: vec![Window {
                position: Vec3::new(0.0, 1.5, 3.0),
                width: 1.2,
                height: 1.2,
                rotation: 0.0,
            }],
            doors: vec![Door {
                position: Vec3::new(-3.0, 1.2, 0.0),
                width: 1.0,
                height: 2.2,
                rotation: 90.0,
                color: "#8B4513".into(),
            }],
        }
    }
}

/// Partial configuration. `None` leaves the target field untouched; `Some`
/// replaces it wholesale, so `Some(vec![])` clears a collection.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SceneConfigurationPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<Dimensions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wall_material: Option<Material>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floor_material: Option<Material>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ceiling_material: Option<Material>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ambient_light_intensity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directional_light_intensity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_lights: Option<Vec<Light>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub furniture: Option<Vec<FurnitureItem>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub windows: Option<Vec<Window>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doors: Option<Vec<Door>>,
}

impl SceneConfigurationPatch {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_scene_matches_static_snapshot() {
        let scene = SceneConfiguration::default();
        assert_eq!(scene.dimensions, Dimensions::new(6.0, 3.0, 6.0));
        assert_eq!(scene.wall_material.name, "plaster");
        assert_eq!(scene.wall_material.color, "#f5f5f5");
        assert_eq!(scene.floor_material.name, "wood");
        assert_eq!(scene.ceiling_material.color, "#ffffff");
        assert!(scene.furniture.is_empty());
        assert_eq!(scene.windows.len(), 1);
        assert_eq!(scene.doors[0].rotation, 90.0);
    }

    #[test]
    fn dimensions_reject_non_positive_and_non_finite() {
        assert!(Dimensions::new(4.0, 2.7, 4.0).is_valid());
        assert!(!Dimensions::new(0.0, 3.0, 6.0).is_valid());
        assert!(!Dimensions::new(6.0, -1.0, 6.0).is_valid());
        assert!(!Dimensions::new(f64::NAN, 3.0, 6.0).is_valid());
        assert!(!Dimensions::new(6.0, 3.0, f64::INFINITY).is_valid());
    }

    #[test]
    fn furniture_item_uses_type_on_the_wire() {
        let item = FurnitureItem::new("sofa", Vec3::new(1.0, 0.0, 2.0), 45.0, "#6B8E23");
        let encoded = serde_json::to_value(&item).expect("encode");
        assert_eq!(encoded["type"], "sofa");
        assert!(encoded.get("product_info").is_none());

        let decoded: FurnitureItem = serde_json::from_value(serde_json::json!({
            "type": "reading nook",
            "position": { "x": 0.0, "y": 0.0, "z": 0.0 },
            "color": "#FFFFFF"
        }))
        .expect("decode");
        assert_eq!(decoded.scale, 1.0);
        assert!(!decoded.is_fixed);
        assert_eq!(decoded.rotation, 0.0);
    }
}
