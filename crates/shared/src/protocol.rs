use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    domain::{
        DesignId, Dimensions, Door, FurnitureItem, Light, SceneConfiguration,
        SceneConfigurationPatch, Surface, Vec3, ViewMode, Window,
    },
    materials::Material,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseDescriptionRequest {
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseDescriptionResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteDesignResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveDesignRequest {
    pub name: String,
    pub design: SceneConfiguration,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveDesignResponse {
    pub success: bool,
    pub id: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesignSummary {
    pub id: DesignId,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesignRecord {
    pub id: DesignId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub design: SceneConfiguration,
}

/// Opaque external form of a design id.
pub fn design_reference(id: DesignId) -> String {
    format!("design-{}", id.0)
}

pub fn parse_design_reference(reference: &str) -> Option<DesignId> {
    let raw = reference.strip_prefix("design-").unwrap_or(reference);
    raw.parse::<i64>().ok().map(DesignId)
}

/// A single mutation of the scene, in serializable form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum SceneOperation {
    Reset,
    ApplyConfiguration {
        patch: SceneConfigurationPatch,
    },
    SetRoomDimensions {
        dimensions: Dimensions,
    },
    SetMaterial {
        surface: Surface,
        material: Material,
    },
    /// Resolves through the material catalog; unknown names use the fallback entry.
    SelectMaterial {
        surface: Surface,
        name: String,
    },
    SetAmbientLight {
        intensity: f64,
    },
    SetDirectionalLight {
        intensity: f64,
    },
    SetBackgroundColor {
        color: String,
    },
    AddLight {
        light: Light,
    },
    RemoveLight {
        index: usize,
    },
    AddFurniture {
        item: FurnitureItem,
    },
    RemoveFurniture {
        index: usize,
    },
    CopyFurniture {
        index: usize,
    },
    UpdateFurniturePosition {
        index: usize,
        position: Vec3,
    },
    UpdateFurnitureRotation {
        index: usize,
        rotation: f64,
    },
    UpdateFurnitureColor {
        index: usize,
        color: String,
    },
    AddWindow {
        window: Window,
    },
    RemoveWindow {
        index: usize,
    },
    AddDoor {
        door: Door,
    },
    RemoveDoor {
        index: usize,
    },
    SetViewMode {
        mode: ViewMode,
    },
    SetCameraPosition {
        position: Vec3,
    },
}

/// Broadcast after every successful store mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum SceneEvent {
    ConfigurationReset { version: u64 },
    ConfigurationMerged { version: u64 },
    RoomChanged { version: u64 },
    LightingChanged { version: u64 },
    FurnitureAdded { version: u64, index: usize },
    FurnitureRemoved { version: u64, index: usize },
    FurnitureUpdated { version: u64, index: usize },
    OpeningsChanged { version: u64 },
    ViewChanged { version: u64 },
}

impl SceneEvent {
    pub fn version(&self) -> u64 {
        match self {
            SceneEvent::ConfigurationReset { version }
            | SceneEvent::ConfigurationMerged { version }
            | SceneEvent::RoomChanged { version }
            | SceneEvent::LightingChanged { version }
            | SceneEvent::FurnitureAdded { version, .. }
            | SceneEvent::FurnitureRemoved { version, .. }
            | SceneEvent::FurnitureUpdated { version, .. }
            | SceneEvent::OpeningsChanged { version }
            | SceneEvent::ViewChanged { version } => *version,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn design_reference_round_trips_through_prefix() {
        assert_eq!(design_reference(DesignId(42)), "design-42");
        assert_eq!(parse_design_reference("design-42"), Some(DesignId(42)));
        assert_eq!(parse_design_reference("42"), Some(DesignId(42)));
        assert_eq!(parse_design_reference("design-abc"), None);
    }

    #[test]
    fn scene_operation_uses_tagged_wire_format() {
        let op: SceneOperation = serde_json::from_value(serde_json::json!({
            "type": "update_furniture_color",
            "payload": { "index": 2, "color": "#FF0000" }
        }))
        .expect("decode");
        assert!(matches!(
            op,
            SceneOperation::UpdateFurnitureColor { index: 2, ref color } if color == "#FF0000"
        ));

        let reset = serde_json::to_value(SceneOperation::Reset).expect("encode");
        assert_eq!(reset["type"], "reset");
    }

    #[test]
    fn empty_patch_omits_every_field() {
        let encoded = serde_json::to_value(SceneConfigurationPatch::default()).expect("encode");
        assert_eq!(encoded, serde_json::json!({}));

        let clearing = SceneConfigurationPatch {
            furniture: Some(Vec::new()),
            ..Default::default()
        };
        let encoded = serde_json::to_value(&clearing).expect("encode");
        assert_eq!(encoded, serde_json::json!({ "furniture": [] }));
    }
}
