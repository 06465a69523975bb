//! Shared value tables and the agents that learn them.
//!
//! Tables are flat arrays indexed by action-state, updated atomically
//! from every training worker. [`Learner`] is the seam the trainer and
//! the table-driven player program against.
mod double;
mod learner;
mod montecarlo;
mod persist;
mod policy;
mod rates;
mod rule;
mod table;
mod tabular;
mod tally;

pub use double::*;
pub use learner::*;
pub use montecarlo::*;
pub use persist::*;
pub use policy::*;
pub use rates::*;
pub use rule::*;
pub use table::*;
pub use tabular::*;
pub use tally::*;
