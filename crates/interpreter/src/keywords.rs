//! Keyword tables and the per-decision classifiers.
//!
//! Every classifier matches by substring on the lower-cased text and scans its
//! table in declaration order; the first entry with a matching keyword wins.

use serde::{Deserialize, Serialize};
use shared::{
    domain::Dimensions,
    materials::{get_material_by_name, Material},
};

pub const AMBIENT_RANGE: (f64, f64) = (0.2, 0.8);
pub const DIRECTIONAL_RANGE: (f64, f64) = (0.3, 1.5);

const BRIGHT_DELTA: (f64, f64) = (0.1, 0.2);

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| text.contains(keyword))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomType {
    LivingRoom,
    Bedroom,
    Kitchen,
    Bathroom,
    DiningRoom,
    Office,
    Library,
    Playroom,
}

impl RoomType {
    pub fn as_str(self) -> &'static str {
        match self {
            RoomType::LivingRoom => "living room",
            RoomType::Bedroom => "bedroom",
            RoomType::Kitchen => "kitchen",
            RoomType::Bathroom => "bathroom",
            RoomType::DiningRoom => "dining room",
            RoomType::Office => "office",
            RoomType::Library => "library",
            RoomType::Playroom => "playroom",
        }
    }
}

const ROOM_TYPES: &[(RoomType, &[&str])] = &[
    (
        RoomType::LivingRoom,
        &["living room", "lounge", "family room", "sitting room"],
    ),
    (
        RoomType::Bedroom,
        &["bedroom", "master bedroom", "guest room", "sleeping"],
    ),
    (RoomType::Kitchen, &["kitchen", "cooking", "culinary"]),
    (RoomType::Bathroom, &["bathroom", "bath", "shower", "toilet"]),
    (
        RoomType::DiningRoom,
        &["dining room", "dining area", "eating area"],
    ),
    (
        RoomType::Office,
        &["office", "study", "work room", "home office"],
    ),
    (RoomType::Library, &["library", "book room", "reading room"]),
    (RoomType::Playroom, &["playroom", "game room", "entertainment"]),
];

pub fn room_type_from_description(description: &str) -> RoomType {
    let text = description.to_lowercase();
    ROOM_TYPES
        .iter()
        .find(|(_, keywords)| contains_any(&text, keywords))
        .map(|(room_type, _)| *room_type)
        .unwrap_or(RoomType::LivingRoom)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomSize {
    Small,
    Medium,
    Large,
    Huge,
}

impl RoomSize {
    pub fn dimensions(self) -> Dimensions {
        match self {
            RoomSize::Small => Dimensions::new(4.0, 2.7, 4.0),
            RoomSize::Medium => Dimensions::new(6.0, 3.0, 6.0),
            RoomSize::Large => Dimensions::new(8.0, 3.2, 8.0),
            RoomSize::Huge => Dimensions::new(10.0, 3.5, 10.0),
        }
    }
}

// Increasing size order. Medium has no keywords of its own: it is only
// reached when nothing else matches.
const ROOM_SIZES: &[(RoomSize, &[&str])] = &[
    (RoomSize::Small, &["small", "tiny", "compact"]),
    (RoomSize::Medium, &[]),
    (RoomSize::Large, &["large", "big", "spacious"]),
    (RoomSize::Huge, &["huge", "enormous", "vast"]),
];

pub fn room_size_from_description(description: &str) -> RoomSize {
    let text = description.to_lowercase();
    ROOM_SIZES
        .iter()
        .find(|(_, keywords)| contains_any(&text, keywords))
        .map(|(size, _)| *size)
        .unwrap_or(RoomSize::Medium)
}

const MATERIALS: &[(&str, &[&str])] = &[
    (
        "wood",
        &["wood", "wooden", "timber", "hardwood", "oak", "maple", "pine"],
    ),
    ("concrete", &["concrete", "cement", "gray", "industrial"]),
    ("marble", &["marble", "stone", "granite", "luxury"]),
    ("brick", &["brick", "red brick", "exposed brick", "rustic"]),
    (
        "plaster",
        &["plaster", "drywall", "painted", "white wall", "smooth"],
    ),
    (
        "tile",
        &["tile", "tiles", "ceramic", "porcelain", "bathroom"],
    ),
    ("carpet", &["carpet", "rug", "soft", "plush", "wool"]),
];

const DEFAULT_MATERIAL: &str = "plaster";

/// Catalog material whose keywords appear in the text, plaster otherwise.
pub fn material_from_description(description: &str) -> Material {
    let text = description.to_lowercase();
    let name = MATERIALS
        .iter()
        .find(|(_, keywords)| contains_any(&text, keywords))
        .map(|(name, _)| *name)
        .unwrap_or(DEFAULT_MATERIAL);
    get_material_by_name(name)
}

const COLORS: &[(&str, &str)] = &[
    ("white", "#FFFFFF"),
    ("black", "#000000"),
    ("gray", "#808080"),
    ("grey", "#808080"),
    ("red", "#FF0000"),
    ("blue", "#0000FF"),
    ("green", "#008000"),
    ("yellow", "#FFFF00"),
    ("purple", "#800080"),
    ("pink", "#FFC0CB"),
    ("orange", "#FFA500"),
    ("brown", "#8B4513"),
    ("beige", "#F5F5DC"),
    ("tan", "#D2B48C"),
    ("teal", "#008080"),
    ("navy", "#000080"),
    ("cream", "#FFFDD0"),
    ("ivory", "#FFFFF0"),
    ("olive", "#808000"),
    ("maroon", "#800000"),
    ("gold", "#FFD700"),
    ("silver", "#C0C0C0"),
];

// Consulted only when no named color matched.
const SURFACE_COLORS: &[(&str, &str)] = &[
    ("wall", "#F5F5F5"),
    ("floor", "#C4A484"),
    ("ceiling", "#FFFFFF"),
];

const DEFAULT_COLOR: &str = "#CCCCCC";

pub fn color_from_description(description: &str) -> &'static str {
    let text = description.to_lowercase();
    COLORS
        .iter()
        .chain(SURFACE_COLORS)
        .find(|(keyword, _)| text.contains(keyword))
        .map(|(_, hex)| *hex)
        .unwrap_or(DEFAULT_COLOR)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeOfDay {
    Unspecified,
    Morning,
    Noon,
    Evening,
    Night,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Brightness {
    Neutral,
    Bright,
    Dim,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Lighting {
    pub time_of_day: TimeOfDay,
    pub brightness: Brightness,
    pub ambient: f64,
    pub directional: f64,
    pub background_color: &'static str,
}

struct LightingPreset {
    time_of_day: TimeOfDay,
    keywords: &'static [&'static str],
    ambient: f64,
    directional: f64,
    background_color: &'static str,
}

const DEFAULT_LIGHTING: LightingPreset = LightingPreset {
    time_of_day: TimeOfDay::Unspecified,
    keywords: &[],
    ambient: 0.5,
    directional: 1.0,
    background_color: "#87CEEB",
};

const LIGHTING_PRESETS: &[LightingPreset] = &[
    LightingPreset {
        time_of_day: TimeOfDay::Morning,
        keywords: &["morning", "sunrise", "dawn"],
        ambient: 0.4,
        directional: 0.9,
        background_color: "#FFB6C1",
    },
    LightingPreset {
        time_of_day: TimeOfDay::Noon,
        keywords: &["noon", "midday", "bright day"],
        ambient: 0.6,
        directional: 1.2,
        background_color: "#87CEEB",
    },
    LightingPreset {
        time_of_day: TimeOfDay::Evening,
        keywords: &["evening", "sunset", "dusk"],
        ambient: 0.4,
        directional: 0.7,
        background_color: "#FFA07A",
    },
    LightingPreset {
        time_of_day: TimeOfDay::Night,
        keywords: &["night", "dark"],
        ambient: 0.3,
        directional: 0.4,
        background_color: "#191970",
    },
];

const BRIGHTNESS: &[(Brightness, &[&str])] = &[
    (Brightness::Bright, &["bright", "well-lit", "sunny"]),
    (Brightness::Dim, &["dim", "dark", "moody"]),
];

/// Time-of-day preset, then brightness delta, then clamping.
pub fn lighting_from_description(description: &str) -> Lighting {
    let text = description.to_lowercase();
    let preset = LIGHTING_PRESETS
        .iter()
        .find(|preset| contains_any(&text, preset.keywords))
        .unwrap_or(&DEFAULT_LIGHTING);
    let brightness = BRIGHTNESS
        .iter()
        .find(|(_, keywords)| contains_any(&text, keywords))
        .map(|(brightness, _)| *brightness)
        .unwrap_or(Brightness::Neutral);

    let (ambient_delta, directional_delta) = match brightness {
        Brightness::Neutral => (0.0, 0.0),
        Brightness::Bright => BRIGHT_DELTA,
        Brightness::Dim => (-BRIGHT_DELTA.0, -BRIGHT_DELTA.1),
    };

    Lighting {
        time_of_day: preset.time_of_day,
        brightness,
        ambient: (preset.ambient + ambient_delta).clamp(AMBIENT_RANGE.0, AMBIENT_RANGE.1),
        directional: (preset.directional + directional_delta)
            .clamp(DIRECTIONAL_RANGE.0, DIRECTIONAL_RANGE.1),
        background_color: preset.background_color,
    }
}
