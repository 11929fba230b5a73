use std::collections::HashMap;

use serde::Serialize;
use shared::domain::{FurnitureId, FurnitureItem};

/// Where an item sits right now. The index is only valid until the next
/// removal; the id stays valid for the item's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FurnitureHandle {
    pub index: usize,
    pub id: FurnitureId,
}

/// Furniture keyed by stable id, ordered by an id list. The public API
/// addresses items by index; ids are translated at the boundary.
#[derive(Debug, Clone, Default)]
pub struct FurnitureList {
    items: HashMap<FurnitureId, FurnitureItem>,
    order: Vec<FurnitureId>,
    next_id: i64,
}

impl FurnitureList {
    pub fn from_items(items: impl IntoIterator<Item = FurnitureItem>) -> Self {
        let mut list = Self::default();
        list.extend(items);
        list
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn push(&mut self, item: FurnitureItem) -> FurnitureHandle {
        self.next_id += 1;
        let id = FurnitureId(self.next_id);
        self.items.insert(id, item);
        self.order.push(id);
        FurnitureHandle {
            index: self.order.len() - 1,
            id,
        }
    }

    pub fn get(&self, index: usize) -> Option<&FurnitureItem> {
        self.order.get(index).and_then(|id| self.items.get(id))
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut FurnitureItem> {
        let id = *self.order.get(index)?;
        self.items.get_mut(&id)
    }

    pub fn by_id(&self, id: FurnitureId) -> Option<&FurnitureItem> {
        self.items.get(&id)
    }

    pub fn id_at(&self, index: usize) -> Option<FurnitureId> {
        self.order.get(index).copied()
    }

    pub fn index_of(&self, id: FurnitureId) -> Option<usize> {
        self.order.iter().position(|candidate| *candidate == id)
    }

    /// Removes the item at `index`; every later item shifts down by one.
    pub fn remove(&mut self, index: usize) -> Option<FurnitureItem> {
        if index >= self.order.len() {
            return None;
        }
        let id = self.order.remove(index);
        self.items.remove(&id)
    }

    /// Replaces the whole list. New ids are issued so that ids held from
    /// before the replacement never resolve to an unrelated item.
    pub fn replace_all(&mut self, items: impl IntoIterator<Item = FurnitureItem>) {
        self.items.clear();
        self.order.clear();
        self.extend(items);
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &FurnitureItem> + '_ {
        self.order.iter().filter_map(|id| self.items.get(id))
    }

    pub fn to_vec(&self) -> Vec<FurnitureItem> {
        self.iter().cloned().collect()
    }

    fn extend(&mut self, items: impl IntoIterator<Item = FurnitureItem>) {
        for item in items {
            self.push(item);
        }
    }
}
