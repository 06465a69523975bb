use super::learner::Learner;
use super::learner::Step;
use super::persist;
use super::persist::PersistError;
use super::rates::Rates;
use super::table::Table;
use super::tally::Tally;
use crate::Utility;
use crate::encoding::ACTION_SPACE;
use rand::Rng;
use rand::rngs::SmallRng;
use std::path::Path;

/// Every-visit Monte Carlo over win tallies.
///
/// The return credited to a visit is the win indicator discounted once
/// per later turn taken by the same player, so a value is the estimated
/// discounted probability of winning after playing that action. Returns
/// are folded into integer tallies by stochastic rounding, which keeps
/// the running mean unbiased.
pub struct MonteCarlo {
    table: Table<Tally>,
    rates: Rates,
}

impl MonteCarlo {
    pub fn new() -> Self {
        Self::sized(ACTION_SPACE)
    }
    pub fn sized(len: usize) -> Self {
        Self {
            table: Table::new(len),
            rates: Rates::default(),
        }
    }
    pub fn table(&self) -> &Table<Tally> {
        &self.table
    }
}

impl Default for MonteCarlo {
    fn default() -> Self {
        Self::new()
    }
}

impl Learner for MonteCarlo {
    fn name(&self) -> &'static str {
        "montecarlo"
    }
    fn value(&self, index: usize) -> Utility {
        self.table.get(index).mean()
    }
    fn rates(&self) -> &Rates {
        &self.rates
    }
    /// nothing to learn until the game is over
    fn update(&self, _: Step, _: &mut SmallRng) {}
    fn conclude(&self, visits: &[usize], won: bool, rng: &mut SmallRng) {
        let gamma = self.rates.gamma();
        let n = visits.len();
        for (k, i) in visits.iter().enumerate() {
            let ret = match won {
                true => gamma.powi((n - 1 - k) as i32),
                false => 0.,
            };
            let hit = rng.random::<Utility>() < ret;
            self.table.update(*i, |t| t.record(hit));
        }
    }
    fn save(&self, path: &Path) -> Result<(), PersistError> {
        persist::save(path, &self.rates, &[&self.table])
    }
    fn load(&self, path: &Path) -> Result<(), PersistError> {
        persist::load(path, &self.rates, &[&self.table])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn undiscounted_counts_wins() {
        let learner = MonteCarlo::sized(32);
        let ref mut rng = SmallRng::seed_from_u64(0);
        learner.conclude(&[1, 2, 3], true, rng);
        learner.conclude(&[1, 5], false, rng);
        assert_eq!(learner.value(1), 0.5);
        assert_eq!(learner.value(2), 1.);
        assert_eq!(learner.value(5), 0.);
        assert_eq!(learner.value(7), 0.);
    }

    #[test]
    fn discounting_favors_late_plays() {
        let learner = MonteCarlo::sized(32);
        learner.rates().set_gamma(0.5);
        let ref mut rng = SmallRng::seed_from_u64(0);
        (0..4000).for_each(|_| learner.conclude(&[1, 2, 3], true, rng));
        assert_eq!(learner.value(3), 1.);
        assert!((learner.value(2) - 0.5).abs() < 0.05);
        assert!((learner.value(1) - 0.25).abs() < 0.05);
    }

    #[test]
    fn ignores_intermediate_steps() {
        let learner = MonteCarlo::sized(32);
        let ref mut rng = SmallRng::seed_from_u64(0);
        let step = Step {
            last: 1,
            next: 2,
            reward: 100.,
            ended: true,
            epsilon: 0.,
        };
        learner.update(step, rng);
        assert_eq!(learner.table().visited(), 0);
    }
}
