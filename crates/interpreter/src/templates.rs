use shared::domain::{Dimensions, FurnitureItem, Vec3};

use crate::keywords::RoomType;

/// Footprint edge (meters) the template positions are laid out for.
pub const REFERENCE_FOOTPRINT: f64 = 6.0;

pub struct TemplateItem {
    pub item_type: &'static str,
    pub color: &'static str,
    pub position: Vec3,
    pub rotation: f64,
}

const fn item(
    item_type: &'static str,
    color: &'static str,
    x: f64,
    y: f64,
    z: f64,
    rotation: f64,
) -> TemplateItem {
    TemplateItem {
        item_type,
        color,
        position: Vec3::new(x, y, z),
        rotation,
    }
}

const LIVING_ROOM: &[TemplateItem] = &[
    item("sofa", "#6B8E23", 0.0, 0.25, 2.0, 0.0),
    item("table", "#8B4513", 0.0, 0.0, 0.8, 0.0),
    item("chair", "#708090", -1.5, 0.0, 0.0, 45.0),
    item("chair", "#708090", 1.5, 0.0, 0.0, -45.0),
    item("lamp", "#F5F5DC", -2.0, 0.0, 2.0, 0.0),
    item("plant", "#228B22", 2.0, 0.0, 2.0, 0.0),
];

const BEDROOM: &[TemplateItem] = &[
    item("bed", "#4682B4", 0.0, 0.0, 0.0, 0.0),
    item("cabinet", "#8B4513", 2.0, 0.0, -1.0, 90.0),
    item("cabinet", "#8B4513", -2.0, 0.0, -1.0, -90.0),
    item("lamp", "#F5F5DC", -1.5, 0.0, -1.0, 0.0),
];

const KITCHEN: &[TemplateItem] = &[
    item("cabinet", "#2F4F4F", -2.0, 0.0, -2.0, 0.0),
    item("cabinet", "#2F4F4F", -1.0, 0.0, -2.0, 0.0),
    item("cabinet", "#2F4F4F", 0.0, 0.0, -2.0, 0.0),
    item("cabinet", "#2F4F4F", 1.0, 0.0, -2.0, 0.0),
    item("cabinet", "#2F4F4F", 2.0, 0.0, -2.0, 0.0),
    item("table", "#8B4513", 0.0, 0.0, 1.0, 0.0),
    item("chair", "#A0522D", -1.0, 0.0, 1.0, 0.0),
    item("chair", "#A0522D", 1.0, 0.0, 1.0, 0.0),
];

const OFFICE: &[TemplateItem] = &[
    item("desk", "#5F9EA0", 0.0, 0.0, -1.5, 0.0),
    item("chair", "#000000", 0.0, 0.0, -0.5, 180.0),
    item("bookshelf", "#8B4513", -2.0, 0.0, -2.0, 0.0),
    item("lamp", "#F5F5DC", 1.0, 0.0, -1.5, 0.0),
    item("plant", "#006400", 2.0, 0.0, -2.0, 0.0),
];

const BATHROOM: &[TemplateItem] = &[
    item("cabinet", "#FFFFFF", -1.5, 0.0, -1.5, 0.0),
    item("cabinet", "#FFFFFF", 1.5, 0.0, -1.5, 0.0),
    item("rug", "#87CEFA", 0.0, 0.0, 0.0, 0.0),
];

const DINING_ROOM: &[TemplateItem] = &[
    item("table", "#8B4513", 0.0, 0.0, 0.0, 0.0),
    item("chair", "#A0522D", -1.0, 0.0, -1.0, 0.0),
    item("chair", "#A0522D", 1.0, 0.0, -1.0, 0.0),
    item("chair", "#A0522D", -1.0, 0.0, 1.0, 180.0),
    item("chair", "#A0522D", 1.0, 0.0, 1.0, 180.0),
    item("cabinet", "#8B4513", -2.0, 0.0, -2.0, 0.0),
    item("lamp", "#F5F5DC", 2.0, 0.0, -2.0, 0.0),
];

pub fn furniture_template(room_type: RoomType) -> &'static [TemplateItem] {
    match room_type {
        RoomType::Bedroom => BEDROOM,
        RoomType::Kitchen => KITCHEN,
        RoomType::Bathroom => BATHROOM,
        RoomType::DiningRoom => DINING_ROOM,
        RoomType::Office => OFFICE,
        // Library and playroom have no layout of their own yet.
        RoomType::LivingRoom | RoomType::Library | RoomType::Playroom => LIVING_ROOM,
    }
}

/// Lays the template out in a room of the given size. Floor coordinates are
/// scaled uniformly by `min(width, depth) / REFERENCE_FOOTPRINT`; height is kept.
pub fn instantiate(room_type: RoomType, dimensions: &Dimensions) -> Vec<FurnitureItem> {
    let scale = dimensions.width.min(dimensions.depth) / REFERENCE_FOOTPRINT;
    furniture_template(room_type)
        .iter()
        .map(|template| {
            let position = Vec3::new(
                template.position.x * scale,
                template.position.y,
                template.position.z * scale,
            );
            FurnitureItem::new(template.item_type, position, template.rotation, template.color)
        })
        .collect()
}
