//! Gift shopping list.
//!
//! Stored as one JSON array under [`GIFTS_KEY`]. Every mutation rewrites the
//! whole list.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;
use crate::storage::{KeyValueStore, PreferenceStore, GIFTS_KEY};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gift {
    pub id: String,
    pub name: String,
    pub recipient: String,
    #[serde(default)]
    pub purchased: bool,
}

/// Purchased vs. total, with the rounded percentage shown next to the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GiftProgress {
    pub purchased: usize,
    pub total: usize,
    pub percent: u32,
}

pub struct GiftPlanner<'a, S: KeyValueStore> {
    store: &'a PreferenceStore<S>,
}

impl<'a, S: KeyValueStore> GiftPlanner<'a, S> {
    pub fn new(store: &'a PreferenceStore<S>) -> Self {
        Self { store }
    }

    pub fn list(&self) -> Vec<Gift> {
        self.store.read_json(GIFTS_KEY)
    }

    /// Add an unpurchased gift. Name and recipient are trimmed and must not be blank.
    pub fn add(&self, name: &str, recipient: &str) -> Result<Gift, ValidationError> {
        let name = non_blank("name", name)?;
        let recipient = non_blank("recipient", recipient)?;
        let gift = Gift {
            id: Uuid::new_v4().to_string(),
            name,
            recipient,
            purchased: false,
        };
        let mut gifts = self.list();
        gifts.push(gift.clone());
        self.store.write_json(GIFTS_KEY, &gifts);
        Ok(gift)
    }

    /// Flip the purchased flag; returns the updated gift.
    pub fn toggle(&self, id: &str) -> Result<Gift, ValidationError> {
        let mut gifts = self.list();
        let gift = gifts
            .iter_mut()
            .find(|g| g.id == id)
            .ok_or_else(|| not_found(id))?;
        gift.purchased = !gift.purchased;
        let updated = gift.clone();
        self.store.write_json(GIFTS_KEY, &gifts);
        Ok(updated)
    }

    pub fn remove(&self, id: &str) -> Result<Gift, ValidationError> {
        let mut gifts = self.list();
        let pos = gifts
            .iter()
            .position(|g| g.id == id)
            .ok_or_else(|| not_found(id))?;
        let removed = gifts.remove(pos);
        self.store.write_json(GIFTS_KEY, &gifts);
        Ok(removed)
    }

    pub fn progress(&self) -> GiftProgress {
        let gifts = self.list();
        let total = gifts.len();
        let purchased = gifts.iter().filter(|g| g.purchased).count();
        let percent = if total == 0 {
            0
        } else {
            ((purchased * 100 + total / 2) / total) as u32
        };
        GiftProgress {
            purchased,
            total,
            percent,
        }
    }
}

fn non_blank(field: &str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::InvalidValue {
            field: field.into(),
            message: "must not be blank".into(),
        });
    }
    Ok(trimmed.to_string())
}

fn not_found(id: &str) -> ValidationError {
    ValidationError::NotFound {
        kind: "gift".into(),
        id: id.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn add_trims_and_rejects_blanks() {
        let prefs = PreferenceStore::new(MemoryStore::new());
        let planner = GiftPlanner::new(&prefs);

        let gift = planner.add("  Scarf ", " Grandma ").unwrap();
        assert_eq!(gift.name, "Scarf");
        assert_eq!(gift.recipient, "Grandma");
        assert!(!gift.purchased);

        assert!(planner.add("   ", "Dad").is_err());
        assert!(planner.add("Socks", "").is_err());
        assert_eq!(planner.list().len(), 1);
    }

    #[test]
    fn toggle_and_progress() {
        let prefs = PreferenceStore::new(MemoryStore::new());
        let planner = GiftPlanner::new(&prefs);
        let a = planner.add("Book", "Sam").unwrap();
        planner.add("Mug", "Alex").unwrap();
        planner.add("Kite", "Jo").unwrap();

        assert!(planner.toggle(&a.id).unwrap().purchased);
        let progress = planner.progress();
        assert_eq!((progress.purchased, progress.total, progress.percent), (1, 3, 33));

        assert!(!planner.toggle(&a.id).unwrap().purchased);
        assert!(matches!(
            planner.toggle("missing"),
            Err(ValidationError::NotFound { .. })
        ));
    }

    #[test]
    fn remove_drops_one_entry() {
        let prefs = PreferenceStore::new(MemoryStore::new());
        let planner = GiftPlanner::new(&prefs);
        let a = planner.add("Book", "Sam").unwrap();
        let b = planner.add("Mug", "Alex").unwrap();

        assert_eq!(planner.remove(&a.id).unwrap(), a);
        assert_eq!(planner.list(), vec![b]);
        assert!(planner.remove(&a.id).is_err());
        assert_eq!(planner.progress().percent, 0);
    }

    #[test]
    fn corrupt_list_reads_as_empty() {
        let store = MemoryStore::new();
        store.set(GIFTS_KEY, "{not json").unwrap();
        let prefs = PreferenceStore::new(store);
        assert!(GiftPlanner::new(&prefs).list().is_empty());
    }
}
