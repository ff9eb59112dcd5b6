//! Deduction state shared by detective players.
//!
//! - `candidates`: per-category cards that may still be the solution.
//! - `constraints`: per-player cards known held and known lacking.
//! - `snapshot`: serializable, name-resolved view of both.

mod candidates;
mod constraints;
mod snapshot;

pub use candidates::CandidateSets;
pub use constraints::{ConstraintTable, PlayerConstraints};
pub use snapshot::{KnowledgeSnapshot, PlayerSnapshot};
