//! delve-core: item identification core for Delve
//!
//! Pure game logic with no I/O dependencies: item classes and instances,
//! the per-session discovery table, the identification state machine and
//! its elimination inference. Display names for unidentified kinds come
//! from the sibling `delve-namegen` crate; this crate only owns the seed
//! each item carries.

pub mod discover;
pub mod object;

mod rng;

pub use rng::SessionRng;
