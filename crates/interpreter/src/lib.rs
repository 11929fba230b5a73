use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use shared::domain::{
    Dimensions, Door, Light, SceneConfigurationPatch, Surface, Vec3, Window,
};
use tracing::debug;

pub mod keywords;
pub mod templates;

pub use keywords::{
    color_from_description, lighting_from_description, material_from_description,
    room_size_from_description, room_type_from_description, Brightness, Lighting, RoomSize,
    RoomType, TimeOfDay, AMBIENT_RANGE, DIRECTIONAL_RANGE,
};

/// Longer descriptions are truncated before classification.
pub const MAX_DESCRIPTION_CHARS: usize = 10_000;

const DOOR_COLOR: &str = "#8B4513";
const CEILING_LIGHT_COLOR: &str = "#FFF9C4";
const CEILING_LIGHT_INTENSITY: f64 = 0.8;

/// The classification decisions behind a generated configuration.
#[derive(Debug, Clone, Serialize)]
pub struct Interpretation {
    pub room_type: RoomType,
    pub size: RoomSize,
    pub time_of_day: TimeOfDay,
    pub brightness: Brightness,
    pub patch: SceneConfigurationPatch,
}

/// Classifies a free-form room description. Total: text without any known
/// keyword takes the default branch of every decision.
pub fn analyze(description: &str) -> Interpretation {
    let text: String = description
        .chars()
        .take(MAX_DESCRIPTION_CHARS)
        .collect::<String>()
        .to_lowercase();

    let room_type = room_type_from_description(&text);
    let size = room_size_from_description(&text);
    let dimensions = size.dimensions();
    let lighting = lighting_from_description(&text);
    debug!(
        room_type = room_type.as_str(),
        ?size,
        time_of_day = ?lighting.time_of_day,
        brightness = ?lighting.brightness,
        "classified description"
    );

    let [wall_material, floor_material, ceiling_material] = Surface::ALL.map(|surface| {
        // The surface noun is appended so surface-specific fallbacks can
        // match; keywords anywhere in the text still win for every surface.
        let qualified = format!("{text} {}", surface.noun());
        material_from_description(&qualified).with_color(color_from_description(&qualified))
    });

    let (windows, doors, additional_lights) = synthesize_openings(&dimensions);

    Interpretation {
        room_type,
        size,
        time_of_day: lighting.time_of_day,
        brightness: lighting.brightness,
        patch: SceneConfigurationPatch {
            dimensions: Some(dimensions),
            wall_material: Some(wall_material),
            floor_material: Some(floor_material),
            ceiling_material: Some(ceiling_material),
            ambient_light_intensity: Some(lighting.ambient),
            directional_light_intensity: Some(lighting.directional),
            background_color: Some(lighting.background_color.to_string()),
            additional_lights: Some(additional_lights),
            furniture: Some(templates::instantiate(room_type, &dimensions)),
            windows: Some(windows),
            doors: Some(doors),
        },
    }
}

pub fn interpret(description: &str) -> SceneConfigurationPatch {
    analyze(description).patch
}

/// Back-wall window, front-wall door and one ceiling light, all derived from
/// the room size.
fn synthesize_openings(dimensions: &Dimensions) -> (Vec<Window>, Vec<Door>, Vec<Light>) {
    let Dimensions {
        width,
        height,
        depth,
    } = *dimensions;

    let window = Window {
        position: Vec3::new(0.0, height / 2.0, -(depth / 2.0)),
        width: width * 0.25,
        height: height * 0.4,
        rotation: 0.0,
    };
    let door = Door {
        position: Vec3::new(-(width / 4.0), height / 2.2, depth / 2.0),
        width: width * 0.15,
        height: height * 0.8,
        rotation: 0.0,
        color: DOOR_COLOR.to_string(),
    };
    let light = Light {
        position: Vec3::new(0.0, height - 0.1, 0.0),
        color: CEILING_LIGHT_COLOR.to_string(),
        intensity: CEILING_LIGHT_INTENSITY,
        cast_shadow: true,
    };

    (vec![window], vec![door], vec![light])
}

/// Turns a description into a partial configuration. Implementations may
/// call out to a remote service, so classification is asynchronous.
#[async_trait]
pub trait DescriptionClassifier: Send + Sync {
    async fn classify(&self, description: &str) -> SceneConfigurationPatch;
}

/// Local keyword classifier with a fixed simulated service latency.
#[derive(Debug, Clone)]
pub struct KeywordClassifier {
    latency: Duration,
}

impl KeywordClassifier {
    pub const DEFAULT_LATENCY: Duration = Duration::from_millis(1500);

    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }

    pub fn immediate() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }
}

impl Default for KeywordClassifier {
    fn default() -> Self {
        Self::new(Self::DEFAULT_LATENCY)
    }
}

#[async_trait]
impl DescriptionClassifier for KeywordClassifier {
    async fn classify(&self, description: &str) -> SceneConfigurationPatch {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        interpret(description)
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
