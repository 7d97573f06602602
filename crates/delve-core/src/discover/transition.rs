//! Identification state machine
//!
//! All knowledge promotion funnels through [`request_transition`]. The
//! table entry only ever moves up in rank unless the caller forces it, and
//! every side effect (pack rescan, discovery note, elimination, pricing)
//! settles before the call returns.

use crate::discover::elimination::infer_by_elimination;
use crate::discover::knowledge::{DiscoveryTable, KnowledgeState};
use crate::object::ItemKind;

/// Collaborator seams notified by the state machine. The game session
/// implements this against its inventory, message log and shops.
pub trait DiscoveryHooks {
    /// Re-evaluate carried items of this kind (captions, auto-pickup).
    fn rescan_pack(&mut self, _kind: ItemKind) {}

    /// A kind just became fully known.
    fn take_note(&mut self, _kind: ItemKind) {}

    /// Shop valuations for this kind may have changed.
    fn price_changed(&mut self, _kind: ItemKind) {}
}

/// No-op hooks for callers without a UI (tests, headless evaluation).
pub struct SilentHooks;

impl DiscoveryHooks for SilentHooks {}

/// Request a knowledge-state change for one kind.
///
/// Without `force`, a request is rejected when it would not strictly raise
/// the kind's rank: re-applied tried marks, re-identification and any
/// downgrade all return `false` with the table untouched, which makes the
/// operation idempotent. `force` overwrites unconditionally (wizard mode,
/// elimination promotion).
///
/// Returns whether the table changed.
///
/// # Panics
/// Panics if `kind` is not a valid identifiable kind.
pub fn request_transition(
    table: &mut DiscoveryTable,
    kind: ItemKind,
    new_state: KnowledgeState,
    force: bool,
    hooks: &mut dyn DiscoveryHooks,
) -> bool {
    let current = table.state(kind);
    if !force {
        if new_state == KnowledgeState::Unknown {
            return false;
        }
        if new_state.rank() <= current.rank() {
            return false;
        }
    }

    table.set(kind, new_state);
    hooks.rescan_pack(kind);

    if new_state.is_known() {
        table.forget_call(kind);
        hooks.take_note(kind);
        infer_by_elimination(table, kind, hooks);
        hooks.price_changed(kind);
    }

    true
}
