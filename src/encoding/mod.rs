//! Perfect hashing of heads-up observations into flat table indices.
//!
//! A state index packs the seen-card deck, the clipped score differential,
//! and three cards. An action-state index appends the 4-bit action code.
mod indexing;
mod observation;

pub use indexing::*;
pub use observation::*;
