//! Discovery system
//!
//! Tracks per-kind player knowledge: the session discovery table, the
//! transition logic that promotes it, and the paired-kind elimination
//! inference.

mod elimination;
mod knowledge;
mod transition;

pub use elimination::LINKED_KINDS;
pub use knowledge::{DiscoveryTable, KnowledgeState, TableDecodeError};
pub use transition::{request_transition, DiscoveryHooks, SilentHooks};
