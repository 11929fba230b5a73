use std::collections::HashSet;

use shared::{
    domain::{
        Dimensions, Door, FurnitureItem, Light, SceneConfiguration, SceneConfigurationPatch,
        Surface, Vec3, Window,
    },
    materials::Material,
};

use crate::{
    error::{Collection, StoreError},
    furniture::{FurnitureHandle, FurnitureList},
};

pub const DEFAULT_RECENTLY_USED_LIMIT: usize = 5;

/// The scene as owned by the store. Every method is a total transition from
/// the current state; an `Err` means nothing was changed.
#[derive(Debug, Clone)]
pub struct SceneState {
    dimensions: Dimensions,
    wall_material: Material,
    floor_material: Material,
    ceiling_material: Material,
    ambient_light_intensity: f64,
    directional_light_intensity: f64,
    background_color: String,
    additional_lights: Vec<Light>,
    furniture: FurnitureList,
    windows: Vec<Window>,
    doors: Vec<Door>,
}

impl Default for SceneState {
    fn default() -> Self {
        Self::from_configuration(SceneConfiguration::default())
    }
}

impl SceneState {
    pub fn from_configuration(config: SceneConfiguration) -> Self {
        Self {
            dimensions: config.dimensions,
            wall_material: config.wall_material,
            floor_material: config.floor_material,
            ceiling_material: config.ceiling_material,
            ambient_light_intensity: config.ambient_light_intensity,
            directional_light_intensity: config.directional_light_intensity,
            background_color: config.background_color,
            additional_lights: config.additional_lights,
            furniture: FurnitureList::from_items(config.furniture),
            windows: config.windows,
            doors: config.doors,
        }
    }

    pub fn to_configuration(&self) -> SceneConfiguration {
        SceneConfiguration {
            dimensions: self.dimensions,
            wall_material: self.wall_material.clone(),
            floor_material: self.floor_material.clone(),
            ceiling_material: self.ceiling_material.clone(),
            ambient_light_intensity: self.ambient_light_intensity,
            directional_light_intensity: self.directional_light_intensity,
            background_color: self.background_color.clone(),
            additional_lights: self.additional_lights.clone(),
            furniture: self.furniture.to_vec(),
            windows: self.windows.clone(),
            doors: self.doors.clone(),
        }
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    pub fn material(&self, surface: Surface) -> &Material {
        match surface {
            Surface::Wall => &self.wall_material,
            Surface::Floor => &self.floor_material,
            Surface::Ceiling => &self.ceiling_material,
        }
    }

    pub fn ambient_light(&self) -> f64 {
        self.ambient_light_intensity
    }

    pub fn directional_light(&self) -> f64 {
        self.directional_light_intensity
    }

    pub fn lights(&self) -> &[Light] {
        &self.additional_lights
    }

    pub fn furniture(&self) -> &FurnitureList {
        &self.furniture
    }

    pub fn windows(&self) -> &[Window] {
        &self.windows
    }

    pub fn doors(&self) -> &[Door] {
        &self.doors
    }

    /// Back to the static default scene. The furniture id sequence carries
    /// on so ids issued before the reset stay dead.
    pub fn reset(&mut self) {
        let mut furniture = std::mem::take(&mut self.furniture);
        *self = Self::default();
        furniture.replace_all(self.furniture.to_vec());
        self.furniture = furniture;
    }

    /// Shallow merge: each field present in the patch replaces the current
    /// value wholesale, absent fields are kept. Rejected as a whole if the
    /// patch carries invalid dimensions.
    pub fn apply_patch(&mut self, patch: SceneConfigurationPatch) -> Result<(), StoreError> {
        if let Some(dimensions) = &patch.dimensions {
            validate_dimensions(dimensions)?;
        }

        let SceneConfigurationPatch {
            dimensions,
            wall_material,
            floor_material,
            ceiling_material,
            ambient_light_intensity,
            directional_light_intensity,
            background_color,
            additional_lights,
            furniture,
            windows,
            doors,
        } = patch;

        if let Some(v) = dimensions {
            self.dimensions = v;
        }
        if let Some(v) = wall_material {
            self.wall_material = v;
        }
        if let Some(v) = floor_material {
            self.floor_material = v;
        }
        if let Some(v) = ceiling_material {
            self.ceiling_material = v;
        }
        if let Some(v) = ambient_light_intensity {
            self.ambient_light_intensity = v;
        }
        if let Some(v) = directional_light_intensity {
            self.directional_light_intensity = v;
        }
        if let Some(v) = background_color {
            self.background_color = v;
        }
        if let Some(v) = additional_lights {
            self.additional_lights = v;
        }
        if let Some(v) = furniture {
            self.furniture.replace_all(v);
        }
        if let Some(v) = windows {
            self.windows = v;
        }
        if let Some(v) = doors {
            self.doors = v;
        }
        Ok(())
    }

    /// Existing furniture is neither moved nor rescaled; see
    /// [`SceneState::furniture_outside_room`].
    pub fn set_room_dimensions(&mut self, dimensions: Dimensions) -> Result<(), StoreError> {
        validate_dimensions(&dimensions)?;
        self.dimensions = dimensions;
        Ok(())
    }

    pub fn set_material(&mut self, surface: Surface, material: Material) {
        match surface {
            Surface::Wall => self.wall_material = material,
            Surface::Floor => self.floor_material = material,
            Surface::Ceiling => self.ceiling_material = material,
        }
    }

    /// Not clamped: manual edits may go outside the generated range.
    pub fn set_ambient_light(&mut self, intensity: f64) {
        self.ambient_light_intensity = intensity;
    }

    /// Not clamped, like [`SceneState::set_ambient_light`].
    pub fn set_directional_light(&mut self, intensity: f64) {
        self.directional_light_intensity = intensity;
    }

    pub fn set_background_color(&mut self, color: String) {
        self.background_color = color;
    }

    pub fn add_light(&mut self, light: Light) -> usize {
        self.additional_lights.push(light);
        self.additional_lights.len() - 1
    }

    pub fn remove_light(&mut self, index: usize) -> Result<Light, StoreError> {
        remove_at(&mut self.additional_lights, index, Collection::Lights)
    }

    pub fn add_furniture(&mut self, item: FurnitureItem) -> FurnitureHandle {
        self.furniture.push(item)
    }

    /// Fixed elements are refused.
    pub fn remove_furniture(&mut self, index: usize) -> Result<FurnitureItem, StoreError> {
        let item = self.furniture_at(index)?;
        if item.is_fixed {
            return Err(StoreError::FixedItem { index });
        }
        self.furniture
            .remove(index)
            .ok_or_else(|| self.furniture_out_of_range(index))
    }

    /// Appends a copy of the item at `index`, placed at the origin with no
    /// rotation. Fixed elements may be copied.
    pub fn copy_furniture(&mut self, index: usize) -> Result<FurnitureHandle, StoreError> {
        let copy = FurnitureItem {
            position: Vec3::ORIGIN,
            rotation: 0.0,
            ..self.furniture_at(index)?.clone()
        };
        Ok(self.furniture.push(copy))
    }

    pub fn update_furniture_position(
        &mut self,
        index: usize,
        position: Vec3,
    ) -> Result<(), StoreError> {
        self.furniture_at_mut(index)?.position = position;
        Ok(())
    }

    pub fn update_furniture_rotation(
        &mut self,
        index: usize,
        rotation: f64,
    ) -> Result<(), StoreError> {
        self.furniture_at_mut(index)?.rotation = rotation;
        Ok(())
    }

    pub fn update_furniture_color(
        &mut self,
        index: usize,
        color: String,
    ) -> Result<(), StoreError> {
        self.furniture_at_mut(index)?.color = color;
        Ok(())
    }

    pub fn add_window(&mut self, window: Window) -> usize {
        self.windows.push(window);
        self.windows.len() - 1
    }

    pub fn remove_window(&mut self, index: usize) -> Result<Window, StoreError> {
        remove_at(&mut self.windows, index, Collection::Windows)
    }

    pub fn add_door(&mut self, door: Door) -> usize {
        self.doors.push(door);
        self.doors.len() - 1
    }

    pub fn remove_door(&mut self, index: usize) -> Result<Door, StoreError> {
        remove_at(&mut self.doors, index, Collection::Doors)
    }

    /// Most recent distinct furniture types, newest first. Fixed elements are
    /// left out since the list offers items as freely placeable.
    pub fn recently_used(&self, limit: usize) -> Vec<FurnitureItem> {
        let mut seen = HashSet::new();
        self.furniture
            .iter()
            .rev()
            .filter(|item| !item.is_fixed)
            .filter(|item| seen.insert(item.item_type.clone()))
            .take(limit)
            .cloned()
            .collect()
    }

    /// Indices of furniture whose floor position lies outside the room.
    pub fn furniture_outside_room(&self) -> Vec<usize> {
        self.furniture
            .iter()
            .enumerate()
            .filter(|(_, item)| !self.dimensions.contains_footprint(&item.position))
            .map(|(index, _)| index)
            .collect()
    }

    fn furniture_at(&self, index: usize) -> Result<&FurnitureItem, StoreError> {
        self.furniture
            .get(index)
            .ok_or_else(|| self.furniture_out_of_range(index))
    }

    fn furniture_at_mut(&mut self, index: usize) -> Result<&mut FurnitureItem, StoreError> {
        let error = self.furniture_out_of_range(index);
        self.furniture.get_mut(index).ok_or(error)
    }

    fn furniture_out_of_range(&self, index: usize) -> StoreError {
        StoreError::IndexOutOfRange {
            collection: Collection::Furniture,
            index,
            len: self.furniture.len(),
        }
    }
}

fn validate_dimensions(dimensions: &Dimensions) -> Result<(), StoreError> {
    if dimensions.is_valid() {
        return Ok(());
    }
    Err(StoreError::InvalidDimensions {
        width: dimensions.width,
        height: dimensions.height,
        depth: dimensions.depth,
    })
}

fn remove_at<T>(
    items: &mut Vec<T>,
    index: usize,
    collection: Collection,
) -> Result<T, StoreError> {
    if index >= items.len() {
        return Err(StoreError::IndexOutOfRange {
            collection,
            index,
            len: items.len(),
        });
    }
    Ok(items.remove(index))
}

#[cfg(test)]
#[path = "tests/state_tests.rs"]
mod tests;
