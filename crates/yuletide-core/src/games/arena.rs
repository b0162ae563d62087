//! Per-session entity storage.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// Insertion-ordered entities keyed by a per-arena counter.
///
/// Ids are never reused within a session; `clear` discards everything and
/// restarts the counter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Arena<T> {
    next_id: u32,
    items: Vec<(EntityId, T)>,
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self {
            next_id: 0,
            items: Vec::new(),
        }
    }
}

impl<T> Arena<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, item: T) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        self.items.push((id, item));
        id
    }

    pub fn get(&self, id: EntityId) -> Option<&T> {
        self.items.iter().find(|(i, _)| *i == id).map(|(_, t)| t)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut T> {
        self.items.iter_mut().find(|(i, _)| *i == id).map(|(_, t)| t)
    }

    pub fn remove(&mut self, id: EntityId) -> Option<T> {
        let pos = self.items.iter().position(|(i, _)| *i == id)?;
        Some(self.items.remove(pos).1)
    }

    pub fn retain(&mut self, mut keep: impl FnMut(&T) -> bool) {
        self.items.retain(|(_, t)| keep(t));
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &T)> {
        self.items.iter().map(|(i, t)| (*i, t))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (EntityId, &mut T)> {
        self.items.iter_mut().map(|(i, t)| (*i, t))
    }

    /// Entity at insertion position `index`.
    pub fn nth(&self, index: usize) -> Option<(EntityId, &T)> {
        self.items.get(index).map(|(i, t)| (*i, t))
    }

    pub fn last(&self) -> Option<&T> {
        self.items.last().map(|(_, t)| t)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether `id` was handed out by this arena since the last `clear`.
    pub fn issued(&self, id: EntityId) -> bool {
        id.0 < self.next_id
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.next_id = 0;
    }
}
