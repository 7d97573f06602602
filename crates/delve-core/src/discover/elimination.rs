//! Identification by elimination
//!
//! A handful of kind pairs share a gameplay role closely enough that
//! identifying one pins down the other, provided its effect was already
//! seen on a monster. The list is deliberately short and closed: kinds
//! outside it are never auto-deduced, even when a player could infer them.

use crate::discover::knowledge::{DiscoveryTable, KnowledgeState};
use crate::discover::transition::{request_transition, DiscoveryHooks};
use crate::object::{
    ItemClass, ItemKind, POT_EXTRA_HEALING, POT_HEALING, SCR_BLESS_ARMOR, SCR_BLESS_WEAPON,
    WAND_DEEP_SLEEP, WAND_SLEEP,
};

/// Kind pairs eligible for identification by elimination.
pub const LINKED_KINDS: [(ItemKind, ItemKind); 3] = [
    (
        ItemKind::new(ItemClass::Potion, POT_HEALING),
        ItemKind::new(ItemClass::Potion, POT_EXTRA_HEALING),
    ),
    (
        ItemKind::new(ItemClass::Wand, WAND_SLEEP),
        ItemKind::new(ItemClass::Wand, WAND_DEEP_SLEEP),
    ),
    (
        ItemKind::new(ItemClass::Scroll, SCR_BLESS_WEAPON),
        ItemKind::new(ItemClass::Scroll, SCR_BLESS_ARMOR),
    ),
];

/// Promote the partner of a newly known kind when only the monster-tried
/// half of a pair is left. Promotion goes through the normal transition
/// entry point, so the promoted kind gets its own rescan, note and pricing
/// round.
pub(crate) fn infer_by_elimination(
    table: &mut DiscoveryTable,
    newly_known: ItemKind,
    hooks: &mut dyn DiscoveryHooks,
) {
    for &(a, b) in &LINKED_KINDS {
        let partner = if newly_known == a {
            b
        } else if newly_known == b {
            a
        } else {
            continue;
        };
        if table.is_known(partner) {
            continue;
        }
        if table.state(partner) != KnowledgeState::TriedByMonster {
            continue;
        }
        request_transition(table, partner, KnowledgeState::Known, true, hooks);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discover::transition::SilentHooks;
    use crate::object::POT_SLEEPING;

    fn healing() -> ItemKind {
        ItemKind::new(ItemClass::Potion, POT_HEALING)
    }

    fn extra_healing() -> ItemKind {
        ItemKind::new(ItemClass::Potion, POT_EXTRA_HEALING)
    }

    #[test]
    fn test_pairs_are_valid_kinds() {
        for (a, b) in LINKED_KINDS {
            assert!(a.is_valid());
            assert!(b.is_valid());
            assert_ne!(a, b);
        }
    }

    #[test]
    fn test_monster_tried_partner_promoted() {
        let mut table = DiscoveryTable::new();
        let mut hooks = SilentHooks;

        request_transition(
            &mut table,
            extra_healing(),
            KnowledgeState::TriedByMonster,
            false,
            &mut hooks,
        );
        assert!(request_transition(
            &mut table,
            healing(),
            KnowledgeState::Known,
            false,
            &mut hooks
        ));

        // One triggering transition settles both halves of the pair.
        assert!(table.is_known(healing()));
        assert!(table.is_known(extra_healing()));
        assert!(!request_transition(
            &mut table,
            healing(),
            KnowledgeState::Known,
            false,
            &mut hooks
        ));
    }

    #[test]
    fn test_promotion_works_in_both_directions() {
        let mut table = DiscoveryTable::new();
        let mut hooks = SilentHooks;

        request_transition(
            &mut table,
            healing(),
            KnowledgeState::TriedByMonster,
            false,
            &mut hooks,
        );
        request_transition(&mut table, extra_healing(), KnowledgeState::Known, false, &mut hooks);

        assert!(table.is_known(healing()));
    }

    #[test]
    fn test_player_tried_partner_not_promoted() {
        let mut table = DiscoveryTable::new();
        let mut hooks = SilentHooks;

        request_transition(
            &mut table,
            extra_healing(),
            KnowledgeState::TriedByPlayer,
            false,
            &mut hooks,
        );
        request_transition(&mut table, healing(), KnowledgeState::Known, false, &mut hooks);

        assert!(!table.is_known(extra_healing()));
    }

    #[test]
    fn test_untried_partner_not_promoted() {
        let mut table = DiscoveryTable::new();
        let mut hooks = SilentHooks;

        request_transition(&mut table, healing(), KnowledgeState::Known, false, &mut hooks);
        assert!(!table.is_known(extra_healing()));
    }

    #[test]
    fn test_unpaired_kinds_never_deduced() {
        let mut table = DiscoveryTable::new();
        let mut hooks = SilentHooks;
        let sleeping = ItemKind::new(ItemClass::Potion, POT_SLEEPING);

        request_transition(
            &mut table,
            sleeping,
            KnowledgeState::TriedByMonster,
            false,
            &mut hooks,
        );
        // Identify every other potion kind.
        for index in 0..ItemClass::Potion.kind_count() as u8 {
            if index == POT_SLEEPING {
                continue;
            }
            request_transition(
                &mut table,
                ItemKind::new(ItemClass::Potion, index),
                KnowledgeState::Known,
                false,
                &mut hooks,
            );
        }

        // Logically inferable, but not in the pair list.
        assert!(!table.is_known(sleeping));
    }
}
