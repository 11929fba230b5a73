use std::sync::Arc;

use serde::Serialize;
use shared::{
    domain::{
        Dimensions, Door, FurnitureId, FurnitureItem, Light, SceneConfiguration,
        SceneConfigurationPatch, Surface, Vec3, ViewMode, Window,
    },
    materials::{get_material_by_name, Material},
    protocol::{SceneEvent, SceneOperation},
};
use tokio::sync::{broadcast, RwLock, RwLockWriteGuard};
use tracing::{debug, warn};

mod error;
mod furniture;
mod state;

pub use error::{Collection, StoreError};
pub use furniture::{FurnitureHandle, FurnitureList};
pub use state::{SceneState, DEFAULT_RECENTLY_USED_LIMIT};

pub const DEFAULT_CAMERA_POSITION: Vec3 = Vec3::new(0.0, 1.65, 5.0);

const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Immutable copy of everything a renderer reads.
#[derive(Debug, Clone, Serialize)]
pub struct SceneSnapshot {
    pub version: u64,
    pub configuration: SceneConfiguration,
    pub view_mode: ViewMode,
    pub camera_position: Vec3,
}

struct StoreInner {
    scene: SceneState,
    view_mode: ViewMode,
    camera_position: Vec3,
    version: u64,
}

/// Shared handle to the scene. Clones refer to the same scene; every write
/// goes through one lock, bumps the version and broadcasts a [`SceneEvent`].
#[derive(Clone)]
pub struct SceneStore {
    inner: Arc<RwLock<StoreInner>>,
    events: broadcast::Sender<SceneEvent>,
}

impl Default for SceneStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneStore {
    pub fn new() -> Self {
        Self::with_configuration(SceneConfiguration::default())
    }

    pub fn with_configuration(configuration: SceneConfiguration) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            inner: Arc::new(RwLock::new(StoreInner {
                scene: SceneState::from_configuration(configuration),
                view_mode: ViewMode::default(),
                camera_position: DEFAULT_CAMERA_POSITION,
                version: 0,
            })),
            events,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SceneEvent> {
        self.events.subscribe()
    }

    pub async fn snapshot(&self) -> SceneSnapshot {
        let inner = self.inner.read().await;
        SceneSnapshot {
            version: inner.version,
            configuration: inner.scene.to_configuration(),
            view_mode: inner.view_mode,
            camera_position: inner.camera_position,
        }
    }

    pub async fn configuration(&self) -> SceneConfiguration {
        self.inner.read().await.scene.to_configuration()
    }

    pub async fn version(&self) -> u64 {
        self.inner.read().await.version
    }

    /// Runs a read-only query against the current scene.
    pub async fn read<T>(&self, query: impl FnOnce(&SceneState) -> T) -> T {
        query(&self.inner.read().await.scene)
    }

    pub async fn reset(&self) {
        self.update(
            |inner| inner.scene.reset(),
            |version, _| SceneEvent::ConfigurationReset { version },
        )
        .await
    }

    pub async fn initialize(&self) {
        self.reset().await
    }

    /// Merges an interpreted (or otherwise partial) configuration.
    pub async fn apply_interpreted_configuration(
        &self,
        patch: SceneConfigurationPatch,
    ) -> Result<(), StoreError> {
        self.try_update(
            "apply_interpreted_configuration",
            |inner| inner.scene.apply_patch(patch),
            |version, _| SceneEvent::ConfigurationMerged { version },
        )
        .await
    }

    /// Returns the indices of furniture left outside the new footprint so
    /// the caller can warn about them.
    pub async fn set_room_dimensions(
        &self,
        width: f64,
        height: f64,
        depth: f64,
    ) -> Result<Vec<usize>, StoreError> {
        self.try_update(
            "set_room_dimensions",
            |inner| {
                inner
                    .scene
                    .set_room_dimensions(Dimensions::new(width, height, depth))?;
                Ok(inner.scene.furniture_outside_room())
            },
            |version, _| SceneEvent::RoomChanged { version },
        )
        .await
    }

    pub async fn set_material(&self, surface: Surface, material: Material) {
        self.update(
            |inner| inner.scene.set_material(surface, material),
            |version, _| SceneEvent::RoomChanged { version },
        )
        .await
    }

    /// Sets a catalog material by name; unknown names resolve to the
    /// catalog's fallback entry. Returns the material that was applied.
    pub async fn select_material(&self, surface: Surface, name: &str) -> Material {
        let material = get_material_by_name(name);
        if material.name != name {
            debug!(requested = name, applied = %material.name, "unknown material name");
        }
        self.set_material(surface, material.clone()).await;
        material
    }

    pub async fn set_ambient_light(&self, intensity: f64) {
        self.update(
            |inner| inner.scene.set_ambient_light(intensity),
            |version, _| SceneEvent::LightingChanged { version },
        )
        .await
    }

    pub async fn set_directional_light(&self, intensity: f64) {
        self.update(
            |inner| inner.scene.set_directional_light(intensity),
            |version, _| SceneEvent::LightingChanged { version },
        )
        .await
    }

    pub async fn set_background_color(&self, color: impl Into<String>) {
        let color = color.into();
        self.update(
            |inner| inner.scene.set_background_color(color),
            |version, _| SceneEvent::LightingChanged { version },
        )
        .await
    }

    pub async fn add_light(&self, light: Light) -> usize {
        self.update(
            |inner| inner.scene.add_light(light),
            |version, _| SceneEvent::LightingChanged { version },
        )
        .await
    }

    pub async fn remove_light(&self, index: usize) -> Result<Light, StoreError> {
        self.try_update(
            "remove_light",
            |inner| inner.scene.remove_light(index),
            |version, _| SceneEvent::LightingChanged { version },
        )
        .await
    }

    /// The returned index is only valid until the next mutation that
    /// removes furniture.
    pub async fn add_furniture(&self, item: FurnitureItem) -> FurnitureHandle {
        self.update(
            |inner| inner.scene.add_furniture(item),
            |version, handle| SceneEvent::FurnitureAdded {
                version,
                index: handle.index,
            },
        )
        .await
    }

    pub async fn remove_furniture(&self, index: usize) -> Result<FurnitureItem, StoreError> {
        self.try_update(
            "remove_furniture",
            |inner| inner.scene.remove_furniture(index),
            |version, _| SceneEvent::FurnitureRemoved { version, index },
        )
        .await
    }

    pub async fn copy_furniture(&self, index: usize) -> Result<FurnitureHandle, StoreError> {
        self.try_update(
            "copy_furniture",
            |inner| inner.scene.copy_furniture(index),
            |version, handle| SceneEvent::FurnitureAdded {
                version,
                index: handle.index,
            },
        )
        .await
    }

    pub async fn update_furniture_position(
        &self,
        index: usize,
        position: Vec3,
    ) -> Result<(), StoreError> {
        self.try_update(
            "update_furniture_position",
            |inner| inner.scene.update_furniture_position(index, position),
            |version, _| SceneEvent::FurnitureUpdated { version, index },
        )
        .await
    }

    pub async fn update_furniture_rotation(
        &self,
        index: usize,
        rotation: f64,
    ) -> Result<(), StoreError> {
        self.try_update(
            "update_furniture_rotation",
            |inner| inner.scene.update_furniture_rotation(index, rotation),
            |version, _| SceneEvent::FurnitureUpdated { version, index },
        )
        .await
    }

    pub async fn update_furniture_color(
        &self,
        index: usize,
        color: impl Into<String>,
    ) -> Result<(), StoreError> {
        let color = color.into();
        self.try_update(
            "update_furniture_color",
            |inner| inner.scene.update_furniture_color(index, color),
            |version, _| SceneEvent::FurnitureUpdated { version, index },
        )
        .await
    }

    pub async fn add_window(&self, window: Window) -> usize {
        self.update(
            |inner| inner.scene.add_window(window),
            |version, _| SceneEvent::OpeningsChanged { version },
        )
        .await
    }

    pub async fn remove_window(&self, index: usize) -> Result<Window, StoreError> {
        self.try_update(
            "remove_window",
            |inner| inner.scene.remove_window(index),
            |version, _| SceneEvent::OpeningsChanged { version },
        )
        .await
    }

    pub async fn add_door(&self, door: Door) -> usize {
        self.update(
            |inner| inner.scene.add_door(door),
            |version, _| SceneEvent::OpeningsChanged { version },
        )
        .await
    }

    pub async fn remove_door(&self, index: usize) -> Result<Door, StoreError> {
        self.try_update(
            "remove_door",
            |inner| inner.scene.remove_door(index),
            |version, _| SceneEvent::OpeningsChanged { version },
        )
        .await
    }

    pub async fn set_view_mode(&self, mode: ViewMode) {
        self.update(
            |inner| inner.view_mode = mode,
            |version, _| SceneEvent::ViewChanged { version },
        )
        .await
    }

    pub async fn set_camera_position(&self, position: Vec3) {
        self.update(
            |inner| inner.camera_position = position,
            |version, _| SceneEvent::ViewChanged { version },
        )
        .await
    }

    pub async fn recently_used(&self, limit: usize) -> Vec<FurnitureItem> {
        self.read(|scene| scene.recently_used(limit)).await
    }

    pub async fn furniture_outside_room(&self) -> Vec<usize> {
        self.read(SceneState::furniture_outside_room).await
    }

    pub async fn furniture_index(&self, id: FurnitureId) -> Option<usize> {
        self.read(|scene| scene.furniture().index_of(id)).await
    }

    pub async fn furniture_id(&self, index: usize) -> Option<FurnitureId> {
        self.read(|scene| scene.furniture().id_at(index)).await
    }

    /// Applies one serialized operation.
    pub async fn apply(&self, operation: SceneOperation) -> Result<(), StoreError> {
        match operation {
            SceneOperation::Reset => self.reset().await,
            SceneOperation::ApplyConfiguration { patch } => {
                self.apply_interpreted_configuration(patch).await?
            }
            SceneOperation::SetRoomDimensions { dimensions } => {
                let outside = self
                    .set_room_dimensions(dimensions.width, dimensions.height, dimensions.depth)
                    .await?;
                if !outside.is_empty() {
                    warn!(?outside, "furniture left outside the resized room");
                }
            }
            SceneOperation::SetMaterial { surface, material } => {
                self.set_material(surface, material).await
            }
            SceneOperation::SelectMaterial { surface, name } => {
                self.select_material(surface, &name).await;
            }
            SceneOperation::SetAmbientLight { intensity } => {
                self.set_ambient_light(intensity).await
            }
            SceneOperation::SetDirectionalLight { intensity } => {
                self.set_directional_light(intensity).await
            }
            SceneOperation::SetBackgroundColor { color } => self.set_background_color(color).await,
            SceneOperation::AddLight { light } => {
                self.add_light(light).await;
            }
            SceneOperation::RemoveLight { index } => {
                self.remove_light(index).await?;
            }
            SceneOperation::AddFurniture { item } => {
                self.add_furniture(item).await;
            }
            SceneOperation::RemoveFurniture { index } => {
                self.remove_furniture(index).await?;
            }
            SceneOperation::CopyFurniture { index } => {
                self.copy_furniture(index).await?;
            }
            SceneOperation::UpdateFurniturePosition { index, position } => {
                self.update_furniture_position(index, position).await?
            }
            SceneOperation::UpdateFurnitureRotation { index, rotation } => {
                self.update_furniture_rotation(index, rotation).await?
            }
            SceneOperation::UpdateFurnitureColor { index, color } => {
                self.update_furniture_color(index, color).await?
            }
            SceneOperation::AddWindow { window } => {
                self.add_window(window).await;
            }
            SceneOperation::RemoveWindow { index } => {
                self.remove_window(index).await?;
            }
            SceneOperation::AddDoor { door } => {
                self.add_door(door).await;
            }
            SceneOperation::RemoveDoor { index } => {
                self.remove_door(index).await?;
            }
            SceneOperation::SetViewMode { mode } => self.set_view_mode(mode).await,
            SceneOperation::SetCameraPosition { position } => {
                self.set_camera_position(position).await
            }
        }
        Ok(())
    }

    async fn update<T>(
        &self,
        apply: impl FnOnce(&mut StoreInner) -> T,
        event: impl FnOnce(u64, &T) -> SceneEvent,
    ) -> T {
        let mut inner = self.inner.write().await;
        let value = apply(&mut inner);
        self.publish(inner, |version| event(version, &value));
        value
    }

    async fn try_update<T>(
        &self,
        operation: &'static str,
        apply: impl FnOnce(&mut StoreInner) -> Result<T, StoreError>,
        event: impl FnOnce(u64, &T) -> SceneEvent,
    ) -> Result<T, StoreError> {
        let mut inner = self.inner.write().await;
        match apply(&mut inner) {
            Ok(value) => {
                self.publish(inner, |version| event(version, &value));
                Ok(value)
            }
            Err(error) => {
                warn!(operation, %error, "scene operation not applied");
                Err(error)
            }
        }
    }

    fn publish(
        &self,
        mut inner: RwLockWriteGuard<'_, StoreInner>,
        event: impl FnOnce(u64) -> SceneEvent,
    ) {
        inner.version += 1;
        let event = event(inner.version);
        drop(inner);
        debug!(?event, "scene updated");
        // No subscribers is fine.
        let _ = self.events.send(event);
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
