//! The closed set of strategies that can sit at a table.
mod random;
mod robot;

pub use random::*;
pub use robot::*;

use crate::encoding::Observation;
use crate::game::Action;
use rand::rngs::SmallRng;

/// Anything that picks a move from a heads-up observation.
pub trait Player: Send + Sync {
    fn choose(&self, observation: &Observation, rng: &mut SmallRng) -> Action;
}
