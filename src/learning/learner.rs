use super::persist::PersistError;
use super::policy;
use super::rates::Rates;
use crate::Probability;
use crate::Utility;
use crate::game::Action;
use rand::rngs::SmallRng;
use std::path::Path;

/// One observed transition for a temporal-difference update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    /// the action-state being updated
    pub last: usize,
    /// the action-state taken next, meaningless once `ended`
    pub next: usize,
    pub reward: Utility,
    pub ended: bool,
    /// the exploration rate the behavior policy is following
    pub epsilon: Probability,
}

/// A table-backed agent that can be trained by self-play.
///
/// Learners are shared across training workers behind an `Arc`,
/// so every method takes `&self` and mutates through atomics.
pub trait Learner: Send + Sync {
    fn name(&self) -> &'static str;
    /// the estimate for an action-state index
    fn value(&self, index: usize) -> Utility;
    fn rates(&self) -> &Rates;
    /// one temporal-difference update
    fn update(&self, step: Step, rng: &mut SmallRng);
    /// called once per player per game with the action-states they visited
    fn conclude(&self, _visits: &[usize], _won: bool, _rng: &mut SmallRng) {}
    /// called once after training drains
    fn finalize(&self) {}
    fn save(&self, path: &Path) -> Result<(), PersistError>;
    fn load(&self, path: &Path) -> Result<(), PersistError>;
    fn greedy(&self, state: usize) -> Option<(Action, usize)> {
        policy::greedy(|i| self.value(i), state)
    }
}
