//! Object system
//!
//! Item classes (fixed templates) and item instances.

mod obj;
mod objclass;

pub use obj::{Item, ItemFlags, ItemId};
pub use objclass::{
    ItemClass, ItemKind,
    // Kind indices
    POT_ACID, POT_CONFUSION, POT_EXTRA_HEALING, POT_HEALING, POT_SLEEPING, SCR_BLESS_ARMOR,
    SCR_BLESS_WEAPON, SCR_IDENTIFY, SCR_TELEPORT, WAND_DEEP_SLEEP, WAND_DIGGING, WAND_LIGHT,
    WAND_SLEEP,
};
