use super::learner::Learner;
use super::learner::Step;
use super::persist;
use super::persist::PersistError;
use super::policy;
use super::rates::Rates;
use super::table::Table;
use crate::Utility;
use crate::encoding::ACTION_SPACE;
use crate::encoding::without_action;
use rand::Rng;
use rand::rngs::SmallRng;
use rayon::prelude::*;
use std::path::Path;

/// Double Q-learning: two tables, each updated toward the other's
/// estimate of its own greedy action, which curbs the upward bias
/// of bootstrapping from a maximum. The behavior policy uses their sum.
pub struct Double {
    tables: [Table<f32>; 2],
    rates: Rates,
}

impl Double {
    pub fn new() -> Self {
        Self::sized(ACTION_SPACE)
    }
    pub fn sized(len: usize) -> Self {
        Self {
            tables: [Table::new(len), Table::new(len)],
            rates: Rates::default(),
        }
    }
    pub fn tables(&self) -> &[Table<f32>; 2] {
        &self.tables
    }

    /// updates `tables[which]`, bootstrapping from the other one
    fn learn(&self, which: usize, step: Step) {
        let ref own = self.tables[which];
        let ref other = self.tables[1 - which];
        let target = match step.ended {
            true => step.reward,
            false => {
                let best = policy::greedy(|i| own.get(i), without_action(step.next))
                    .map(|(_, best)| best)
                    .unwrap_or(step.next);
                step.reward + self.rates.gamma() * other.get(best)
            }
        };
        let alpha = self.rates.alpha();
        own.update(step.last, |q| q + alpha * (target - q));
    }
}

impl Default for Double {
    fn default() -> Self {
        Self::new()
    }
}

impl Learner for Double {
    fn name(&self) -> &'static str {
        "double"
    }
    fn value(&self, index: usize) -> Utility {
        self.tables[0].get(index) + self.tables[1].get(index)
    }
    fn rates(&self) -> &Rates {
        &self.rates
    }
    fn update(&self, step: Step, rng: &mut SmallRng) {
        self.learn(rng.random_range(0..2), step);
    }
    /// collapse both estimates into their mean
    fn finalize(&self) {
        let [a, b] = &self.tables;
        (0..a.len()).into_par_iter().for_each(|i| {
            let (x, y) = (a.get(i), b.get(i));
            if x != y {
                let mean = (x + y) / 2.;
                a.set(i, mean);
                b.set(i, mean);
            }
        });
    }
    fn save(&self, path: &Path) -> Result<(), PersistError> {
        persist::save(path, &self.rates, &[&self.tables[0], &self.tables[1]])
    }
    fn load(&self, path: &Path) -> Result<(), PersistError> {
        persist::load(path, &self.rates, &[&self.tables[0], &self.tables[1]])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn learner() -> Double {
        let learner = Double::sized(64);
        learner.rates().set_alpha(0.5);
        learner.rates().set_gamma(1.);
        learner
    }

    #[test]
    fn bootstraps_from_the_other_table() {
        let learner = learner();
        learner.tables()[0].set(20, 8.);
        learner.tables()[0].set(16, 1.);
        learner.tables()[1].set(20, 2.);
        learner.tables()[1].set(16, 6.);
        let step = Step {
            last: 0,
            next: 16,
            reward: 0.,
            ended: false,
            epsilon: 0.,
        };
        learner.learn(0, step);
        // argmax on table 0 is 20, valued 2 by table 1
        assert_eq!(learner.tables()[0].get(0), 1.);
        learner.learn(1, step);
        // argmax on table 1 is 16, valued 1 by table 0
        assert_eq!(learner.tables()[1].get(0), 0.5);
        assert_eq!(learner.value(0), 1.5);
    }

    #[test]
    fn updates_one_table_at_a_time() {
        let learner = learner();
        let ref mut rng = SmallRng::seed_from_u64(0);
        let step = Step {
            last: 3,
            next: 0,
            reward: 4.,
            ended: true,
            epsilon: 0.,
        };
        learner.update(step, rng);
        let (a, b) = (learner.tables()[0].get(3), learner.tables()[1].get(3));
        assert_eq!(a + b, 2.);
        assert!(a == 0. || b == 0.);
    }

    #[test]
    fn finalize_averages() {
        let learner = learner();
        learner.tables()[0].set(5, 3.);
        learner.tables()[1].set(5, 1.);
        learner.finalize();
        assert_eq!(learner.tables()[0].get(5), 2.);
        assert_eq!(learner.tables()[1].get(5), 2.);
        assert_eq!(learner.value(5), 4.);
    }

    #[test]
    fn policy_uses_the_sum() {
        let learner = learner();
        learner.tables()[0].set(2, 3.);
        learner.tables()[1].set(4, 2.);
        learner.tables()[1].set(2, -2.);
        assert_eq!(learner.greedy(0).map(|(_, i)| i), Some(4));
    }
}
