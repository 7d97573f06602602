//! Item instances
//!
//! An instance is one concrete object the player can hold; its kind-level
//! knowledge lives in the discovery table, while the flags here are local
//! to the instance and travel with it.

use serde::{Deserialize, Serialize};

use super::ItemKind;
use crate::rng::SessionRng;

/// Unique identifier for item instances
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemId(pub u32);

impl ItemId {
    pub const NONE: ItemId = ItemId(0);

    pub fn next(self) -> Self {
        ItemId(self.0 + 1)
    }
}

bitflags::bitflags! {
    /// Instance-local state bits. Serialized as raw bits; keep assignments
    /// stable.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ItemFlags: u8 {
        /// The player experimented with this very item. Sticky: outlives
        /// later changes to the kind's table entry.
        const TRIED = 1 << 0;
        /// The player gave this instance a label.
        const CALLED = 1 << 1;
    }
}

impl Serialize for ItemFlags {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.bits().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ItemFlags {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let bits = u8::deserialize(deserializer)?;
        Ok(ItemFlags::from_bits_truncate(bits))
    }
}

/// Item instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Unique identifier
    pub id: ItemId,

    /// What category of item this is
    pub kind: ItemKind,

    /// Quantity (for stackable items)
    pub quantity: u32,

    /// Instance-local flags
    pub flags: ItemFlags,

    /// Seed for the generated display name, assigned on first use and
    /// persisted so the name survives save/restore.
    name_seed: Option<u32>,
}

impl Item {
    pub fn new(id: ItemId, kind: ItemKind) -> Self {
        Self {
            id,
            kind,
            quantity: 1,
            flags: ItemFlags::empty(),
            name_seed: None,
        }
    }

    /// Record that the player experimented with this item.
    pub fn mark_tried(&mut self) {
        self.flags.insert(ItemFlags::TRIED);
    }

    pub fn name_seed(&self) -> Option<u32> {
        self.name_seed
    }

    /// Get the name seed, minting one on first use. Once assigned the seed
    /// never changes, so the generated name is stable for the item's life.
    pub fn ensure_name_seed(&mut self, rng: &mut SessionRng) -> u32 {
        match self.name_seed {
            Some(seed) => seed,
            None => {
                let seed = rng.next_name_seed();
                self.name_seed = Some(seed);
                seed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::{ItemClass, POT_HEALING};

    fn potion() -> Item {
        Item::new(ItemId(1), ItemKind::new(ItemClass::Potion, POT_HEALING))
    }

    #[test]
    fn test_new_item_is_blank() {
        let item = potion();
        assert_eq!(item.quantity, 1);
        assert!(item.flags.is_empty());
        assert_eq!(item.name_seed(), None);
    }

    #[test]
    fn test_mark_tried_is_sticky() {
        let mut item = potion();
        item.mark_tried();
        item.mark_tried();
        assert!(item.flags.contains(ItemFlags::TRIED));
    }

    #[test]
    fn test_name_seed_assigned_once() {
        let mut rng = SessionRng::new(42);
        let mut item = potion();
        let first = item.ensure_name_seed(&mut rng);
        let second = item.ensure_name_seed(&mut rng);
        assert_eq!(first, second);
        assert_eq!(item.name_seed(), Some(first));
    }

    #[test]
    fn test_flags_serialize_as_bits() {
        let mut item = potion();
        item.mark_tried();
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["flags"], serde_json::json!(1));
        let back: Item = serde_json::from_value(json).unwrap();
        assert_eq!(back, item);
    }
}
