//! Per-kind knowledge tracking
//!
//! One table per game session records how much the player knows about each
//! identifiable kind. The table is created empty at session start, mutated
//! only through the transition entry point, and lives for the whole save.

use std::collections::BTreeMap;

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoEnumIterator};
use thiserror::Error;

use crate::object::{Item, ItemClass, ItemFlags, ItemKind};

/// How much the player knows about one kind.
///
/// Discriminants are the persisted state codes; older saves read them raw,
/// so they must never be renumbered. The three tried variants share a rank
/// and differ only for message text.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[repr(u8)]
pub enum KnowledgeState {
    /// Nothing learned yet
    #[default]
    Unknown = 0,
    /// Experienced first-hand (quaffed, read, zapped...)
    TriedByPlayer = 1,
    /// Effect observed on a monster
    TriedByMonster = 2,
    /// Effect observed through another item
    TriedOnItem = 3,
    /// Fully identified; terminal in normal play
    Known = 4,
}

impl KnowledgeState {
    /// Ordering rank for the no-downgrade rule. Tried variants are
    /// co-equal.
    pub const fn rank(&self) -> u8 {
        match self {
            KnowledgeState::Unknown => 0,
            KnowledgeState::TriedByPlayer
            | KnowledgeState::TriedByMonster
            | KnowledgeState::TriedOnItem => 1,
            KnowledgeState::Known => 2,
        }
    }

    pub const fn is_tried(&self) -> bool {
        matches!(
            self,
            KnowledgeState::TriedByPlayer
                | KnowledgeState::TriedByMonster
                | KnowledgeState::TriedOnItem
        )
    }

    pub const fn is_known(&self) -> bool {
        matches!(self, KnowledgeState::Known)
    }

    /// The save-file code for this state.
    pub const fn code(&self) -> u8 {
        *self as u8
    }

    /// Look up a state by its save-file code.
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(KnowledgeState::Unknown),
            1 => Some(KnowledgeState::TriedByPlayer),
            2 => Some(KnowledgeState::TriedByMonster),
            3 => Some(KnowledgeState::TriedOnItem),
            4 => Some(KnowledgeState::Known),
            _ => None,
        }
    }
}

/// Errors raised while decoding a saved discovery table.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableDecodeError {
    #[error("malformed class key '{0}' in discovery table")]
    BadClassKey(String),

    #[error("unknown item class code {0} in discovery table")]
    UnknownClass(u8),

    #[error("discovery table has a row for non-identifiable class code {0}")]
    NotIdentifiable(u8),

    #[error("discovery table row for class {class} has {got} entries, expected {expected}")]
    WrongLength { class: u8, expected: usize, got: usize },

    #[error("invalid knowledge state code {code} for class {class}")]
    InvalidStateCode { class: u8, code: u8 },

    #[error("discovery table is missing class code {0}")]
    MissingClass(u8),

    #[error("malformed kind key '{0}' in discovery table")]
    BadKindKey(String),
}

/// Per-session knowledge about every identifiable kind.
///
/// Dense per-class rows sized at construction from the class metadata;
/// rows for non-identifiable classes are empty and indexing into them is a
/// programming error.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscoveryTable {
    /// Indexed by class discriminant, then kind index.
    states: Vec<Vec<KnowledgeState>>,
    /// Player-assigned labels for unidentified kinds.
    called: HashMap<ItemKind, String>,
}

impl DiscoveryTable {
    /// Create the table for a fresh session: every kind starts `Unknown`.
    pub fn new() -> Self {
        let states = ItemClass::iter()
            .map(|class| vec![KnowledgeState::Unknown; class.kind_count()])
            .collect();
        Self {
            states,
            called: HashMap::new(),
        }
    }

    /// Current knowledge state for a kind.
    ///
    /// # Panics
    /// Panics on a non-identifiable class or an out-of-range index; callers
    /// are expected to only query valid kinds.
    pub fn state(&self, kind: ItemKind) -> KnowledgeState {
        assert!(
            kind.class.is_identifiable(),
            "{} is not an identifiable class",
            kind.class
        );
        let row = &self.states[kind.class as usize];
        assert!(
            (kind.index as usize) < row.len(),
            "kind index {} out of range for {}",
            kind.index,
            kind.class
        );
        row[kind.index as usize]
    }

    pub(crate) fn set(&mut self, kind: ItemKind, state: KnowledgeState) {
        // Validate through the query path first.
        let _ = self.state(kind);
        self.states[kind.class as usize][kind.index as usize] = state;
    }

    pub fn is_known(&self, kind: ItemKind) -> bool {
        self.state(kind).is_known()
    }

    /// Whether an item should carry the "tried" marker.
    ///
    /// Nothing at or above `Known` is ever marked. Below that, either the
    /// kind-level state or the instance's own sticky flag counts: an item
    /// tried before a wizard-mode table reset stays marked afterwards.
    pub fn is_tried(&self, item: &Item) -> bool {
        let state = self.state(item.kind);
        if state.is_known() {
            return false;
        }
        item.flags.contains(ItemFlags::TRIED) || state.is_tried()
    }

    /// Number of fully identified kinds, for the discoveries screen.
    pub fn known_count(&self) -> usize {
        self.states
            .iter()
            .flatten()
            .filter(|state| state.is_known())
            .count()
    }

    /// Label an unidentified kind ("a potion called swirly").
    pub fn call_kind(&mut self, kind: ItemKind, label: impl Into<String>) {
        let _ = self.state(kind);
        self.called.insert(kind, label.into());
    }

    pub fn called(&self, kind: ItemKind) -> Option<&str> {
        self.called.get(&kind).map(String::as_str)
    }

    /// Drop a kind's label. Identification does this automatically.
    pub fn forget_call(&mut self, kind: ItemKind) {
        self.called.remove(&kind);
    }
}

impl Default for DiscoveryTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Serde helper - the save layer reads dense rows of raw state codes keyed
/// by class code, so the in-memory layout stays free to change.
#[derive(Serialize, Deserialize)]
struct RawTable {
    states: BTreeMap<String, Vec<u8>>,
    called: BTreeMap<String, String>,
}

impl From<&DiscoveryTable> for RawTable {
    fn from(table: &DiscoveryTable) -> Self {
        let states = ItemClass::iter()
            .filter(|class| class.is_identifiable())
            .map(|class| {
                let codes = table.states[class as usize]
                    .iter()
                    .map(|state| state.code())
                    .collect();
                ((class as u8).to_string(), codes)
            })
            .collect();
        let called = table
            .called
            .iter()
            .map(|(kind, label)| {
                (
                    format!("{}:{}", kind.class as u8, kind.index),
                    label.clone(),
                )
            })
            .collect();
        Self { states, called }
    }
}

fn parse_kind_key(key: &str) -> Result<ItemKind, TableDecodeError> {
    let bad = || TableDecodeError::BadKindKey(key.to_string());
    let (class_part, index_part) = key.split_once(':').ok_or_else(bad)?;
    let class_code: u8 = class_part.parse().map_err(|_| bad())?;
    let index: u8 = index_part.parse().map_err(|_| bad())?;
    let class = ItemClass::from_code(class_code).ok_or_else(bad)?;
    let kind = ItemKind::new(class, index);
    if !kind.is_valid() {
        return Err(bad());
    }
    Ok(kind)
}

impl TryFrom<RawTable> for DiscoveryTable {
    type Error = TableDecodeError;

    fn try_from(raw: RawTable) -> Result<Self, Self::Error> {
        let mut table = DiscoveryTable::new();

        for (key, row) in &raw.states {
            let code: u8 = key
                .parse()
                .map_err(|_| TableDecodeError::BadClassKey(key.clone()))?;
            let class =
                ItemClass::from_code(code).ok_or(TableDecodeError::UnknownClass(code))?;
            if !class.is_identifiable() {
                return Err(TableDecodeError::NotIdentifiable(code));
            }
            if row.len() != class.kind_count() {
                return Err(TableDecodeError::WrongLength {
                    class: code,
                    expected: class.kind_count(),
                    got: row.len(),
                });
            }
            for (index, &state_code) in row.iter().enumerate() {
                let state = KnowledgeState::from_code(state_code).ok_or(
                    TableDecodeError::InvalidStateCode {
                        class: code,
                        code: state_code,
                    },
                )?;
                table.states[class as usize][index] = state;
            }
        }

        for class in ItemClass::iter().filter(|class| class.is_identifiable()) {
            if !raw.states.contains_key(&(class as u8).to_string()) {
                return Err(TableDecodeError::MissingClass(class as u8));
            }
        }

        for (key, label) in raw.called {
            let kind = parse_kind_key(&key)?;
            table.called.insert(kind, label);
        }

        Ok(table)
    }
}

impl Serialize for DiscoveryTable {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        RawTable::from(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for DiscoveryTable {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = RawTable::deserialize(deserializer)?;
        DiscoveryTable::try_from(raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::{ItemId, POT_EXTRA_HEALING, POT_HEALING, SCR_IDENTIFY};

    fn healing() -> ItemKind {
        ItemKind::new(ItemClass::Potion, POT_HEALING)
    }

    #[test]
    fn test_fresh_table_all_unknown() {
        let table = DiscoveryTable::new();
        for class in ItemClass::iter().filter(|c| c.is_identifiable()) {
            for index in 0..class.kind_count() as u8 {
                let kind = ItemKind::new(class, index);
                assert_eq!(table.state(kind), KnowledgeState::Unknown);
            }
        }
        assert_eq!(table.known_count(), 0);
    }

    #[test]
    #[should_panic(expected = "not an identifiable class")]
    fn test_non_identifiable_query_panics() {
        let table = DiscoveryTable::new();
        table.state(ItemKind::new(ItemClass::Food, 0));
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_out_of_range_query_panics() {
        let table = DiscoveryTable::new();
        table.state(ItemKind::new(ItemClass::Potion, 13));
    }

    #[test]
    fn test_rank_ordering() {
        assert!(KnowledgeState::Unknown.rank() < KnowledgeState::TriedByPlayer.rank());
        assert_eq!(
            KnowledgeState::TriedByPlayer.rank(),
            KnowledgeState::TriedOnItem.rank()
        );
        assert_eq!(
            KnowledgeState::TriedByMonster.rank(),
            KnowledgeState::TriedByPlayer.rank()
        );
        assert!(KnowledgeState::TriedByMonster.rank() < KnowledgeState::Known.rank());
    }

    #[test]
    fn test_state_codes_round_trip() {
        for state in KnowledgeState::iter() {
            assert_eq!(KnowledgeState::from_code(state.code()), Some(state));
        }
        assert_eq!(KnowledgeState::from_code(5), None);
    }

    #[test]
    fn test_is_tried_instance_flag_sticky() {
        let mut table = DiscoveryTable::new();
        let mut item = Item::new(ItemId(1), healing());

        assert!(!table.is_tried(&item));
        item.mark_tried();
        assert!(table.is_tried(&item));

        // Kind-level knowledge reaching Known clears the marker.
        table.set(healing(), KnowledgeState::Known);
        assert!(!table.is_tried(&item));

        // A reset back to Unknown exposes the sticky instance flag again.
        table.set(healing(), KnowledgeState::Unknown);
        assert!(table.is_tried(&item));
    }

    #[test]
    fn test_is_tried_from_kind_state() {
        let mut table = DiscoveryTable::new();
        let item = Item::new(ItemId(1), healing());
        table.set(healing(), KnowledgeState::TriedByMonster);
        assert!(table.is_tried(&item));
    }

    #[test]
    fn test_call_labels() {
        let mut table = DiscoveryTable::new();
        table.call_kind(healing(), "bubbly");
        assert_eq!(table.called(healing()), Some("bubbly"));
        table.forget_call(healing());
        assert_eq!(table.called(healing()), None);
    }

    #[test]
    fn test_serde_round_trip() {
        let mut table = DiscoveryTable::new();
        table.set(healing(), KnowledgeState::Known);
        table.set(
            ItemKind::new(ItemClass::Potion, POT_EXTRA_HEALING),
            KnowledgeState::TriedByMonster,
        );
        table.call_kind(ItemKind::new(ItemClass::Scroll, SCR_IDENTIFY), "spiky");

        let json = serde_json::to_string(&table).unwrap();
        let back: DiscoveryTable = serde_json::from_str(&json).unwrap();
        assert_eq!(back, table);
    }

    #[test]
    fn test_serde_emits_raw_state_codes() {
        let mut table = DiscoveryTable::new();
        table.set(healing(), KnowledgeState::Known);

        let json = serde_json::to_value(&table).unwrap();
        let potions = &json["states"][(ItemClass::Potion as u8).to_string()];
        assert_eq!(potions[POT_HEALING as usize], serde_json::json!(4));
        assert_eq!(potions[POT_EXTRA_HEALING as usize], serde_json::json!(0));
    }

    #[test]
    fn test_decode_rejects_bad_state_code() {
        let table = DiscoveryTable::new();
        let mut json = serde_json::to_value(&table).unwrap();
        json["states"]["6"][0] = serde_json::json!(9);
        let err = serde_json::from_value::<DiscoveryTable>(json).unwrap_err();
        assert!(err.to_string().contains("invalid knowledge state code 9"));
    }

    #[test]
    fn test_decode_rejects_wrong_row_length() {
        let table = DiscoveryTable::new();
        let mut json = serde_json::to_value(&table).unwrap();
        json["states"]["6"] = serde_json::json!([0, 0]);
        let err = serde_json::from_value::<DiscoveryTable>(json).unwrap_err();
        assert!(err.to_string().contains("expected 13"));
    }

    #[test]
    fn test_decode_rejects_missing_class() {
        let table = DiscoveryTable::new();
        let mut json = serde_json::to_value(&table).unwrap();
        json["states"].as_object_mut().unwrap().remove("6");
        let err = serde_json::from_value::<DiscoveryTable>(json).unwrap_err();
        assert!(err.to_string().contains("missing class code 6"));
    }
}
