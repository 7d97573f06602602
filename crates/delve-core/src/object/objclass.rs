//! Item class definitions
//!
//! Classes are a fixed enumeration; whether a class participates in
//! identification, and how many sub-types it has, is decided at compile
//! time. Discriminants are save-stable and must not be renumbered.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Item classes
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[repr(u8)]
pub enum ItemClass {
    #[default]
    Weapon = 0,
    Armor = 1,
    Ring = 2,
    Amulet = 3,
    Tool = 4,
    Food = 5,
    Potion = 6,
    Scroll = 7,
    Spellbook = 8,
    Wand = 9,
    Coin = 10,
    Gem = 11,
    Rock = 12,
    Corpse = 13,
}

impl ItemClass {
    /// Get the inventory symbol for this class
    pub const fn symbol(&self) -> char {
        match self {
            ItemClass::Weapon => ')',
            ItemClass::Armor => '[',
            ItemClass::Ring => '=',
            ItemClass::Amulet => '"',
            ItemClass::Tool => '(',
            ItemClass::Food => '%',
            ItemClass::Potion => '!',
            ItemClass::Scroll => '?',
            ItemClass::Spellbook => '+',
            ItemClass::Wand => '/',
            ItemClass::Coin => '$',
            ItemClass::Gem => '*',
            ItemClass::Rock => '`',
            ItemClass::Corpse => '%',
        }
    }

    /// Check if kinds of this class start a game unidentified
    pub const fn is_identifiable(&self) -> bool {
        matches!(
            self,
            ItemClass::Ring
                | ItemClass::Amulet
                | ItemClass::Potion
                | ItemClass::Scroll
                | ItemClass::Spellbook
                | ItemClass::Wand
        )
    }

    /// Number of sub-types in this class (0 for non-identifiable classes)
    pub const fn kind_count(&self) -> usize {
        match self {
            ItemClass::Ring => 11,
            ItemClass::Amulet => 7,
            ItemClass::Potion => 13,
            ItemClass::Scroll => 12,
            ItemClass::Spellbook => 9,
            ItemClass::Wand => 10,
            _ => 0,
        }
    }

    /// Look up a class by its save-file code
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(ItemClass::Weapon),
            1 => Some(ItemClass::Armor),
            2 => Some(ItemClass::Ring),
            3 => Some(ItemClass::Amulet),
            4 => Some(ItemClass::Tool),
            5 => Some(ItemClass::Food),
            6 => Some(ItemClass::Potion),
            7 => Some(ItemClass::Scroll),
            8 => Some(ItemClass::Spellbook),
            9 => Some(ItemClass::Wand),
            10 => Some(ItemClass::Coin),
            11 => Some(ItemClass::Gem),
            12 => Some(ItemClass::Rock),
            13 => Some(ItemClass::Corpse),
            _ => None,
        }
    }
}

// Kind indices referenced by game logic and the elimination pairs.
pub const POT_HEALING: u8 = 0;
pub const POT_EXTRA_HEALING: u8 = 1;
pub const POT_SLEEPING: u8 = 2;
pub const POT_CONFUSION: u8 = 3;
pub const POT_ACID: u8 = 4;

pub const SCR_BLESS_WEAPON: u8 = 0;
pub const SCR_BLESS_ARMOR: u8 = 1;
pub const SCR_IDENTIFY: u8 = 2;
pub const SCR_TELEPORT: u8 = 3;

pub const WAND_SLEEP: u8 = 0;
pub const WAND_DEEP_SLEEP: u8 = 1;
pub const WAND_DIGGING: u8 = 2;
pub const WAND_LIGHT: u8 = 3;

/// A category of item: class plus sub-type index. Distinct from a specific
/// item instance; knowledge is tracked per kind, not per instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemKind {
    pub class: ItemClass,
    pub index: u8,
}

impl ItemKind {
    pub const fn new(class: ItemClass, index: u8) -> Self {
        Self { class, index }
    }

    /// Valid kinds belong to an identifiable class and stay inside its
    /// sub-type range.
    pub const fn is_valid(&self) -> bool {
        self.class.is_identifiable() && (self.index as usize) < self.class.kind_count()
    }
}

impl core::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}#{}", self.class, self.index)
    }
}
