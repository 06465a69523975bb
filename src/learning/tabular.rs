use super::learner::Learner;
use super::learner::Step;
use super::persist;
use super::persist::PersistError;
use super::rates::Rates;
use super::rule::Rule;
use super::table::Table;
use crate::Utility;
use crate::encoding::ACTION_SPACE;
use crate::encoding::actions;
use crate::encoding::without_action;
use rand::rngs::SmallRng;
use std::path::Path;

/// A single action-value table trained by SARSA, Q-learning,
/// or Expected SARSA.
pub struct Tabular {
    rule: Rule,
    table: Table<f32>,
    rates: Rates,
}

impl Tabular {
    pub fn new(rule: Rule) -> Self {
        Self::sized(rule, ACTION_SPACE)
    }
    /// a learner over a table of arbitrary length, for hand-built cases
    pub fn sized(rule: Rule, len: usize) -> Self {
        assert!(rule != Rule::DoubleQ, "double Q-learning needs two tables");
        Self {
            rule,
            table: Table::new(len),
            rates: Rates::default(),
        }
    }
    pub fn table(&self) -> &Table<f32> {
        &self.table
    }
    pub fn rule(&self) -> Rule {
        self.rule
    }

    /// the estimated value of what follows `step.next`
    fn bootstrap(&self, step: &Step) -> Utility {
        let state = without_action(step.next);
        match self.rule {
            Rule::Sarsa | Rule::DoubleQ => self.value(step.next),
            Rule::QLearning => self
                .greedy(state)
                .map(|(_, best)| self.value(best))
                .unwrap_or_else(|| self.value(step.next)),
            Rule::ExpectedSarsa => match self.greedy(state) {
                None => self.value(step.next),
                Some((_, best)) => {
                    let n = actions(state).count() as Utility;
                    let explore = step.epsilon / n;
                    let spread = actions(state).map(|i| self.value(i)).sum::<Utility>();
                    explore * spread + (1. - step.epsilon) * self.value(best)
                }
            },
        }
    }
}

impl Learner for Tabular {
    fn name(&self) -> &'static str {
        self.rule.name()
    }
    fn value(&self, index: usize) -> Utility {
        self.table.get(index)
    }
    fn rates(&self) -> &Rates {
        &self.rates
    }
    fn update(&self, step: Step, _: &mut SmallRng) {
        let target = match step.ended {
            true => step.reward,
            false => step.reward + self.rates.gamma() * self.bootstrap(&step),
        };
        let alpha = self.rates.alpha();
        log::trace!("{} update {} toward {:.3}", self.rule, step.last, target);
        self.table.update(step.last, |q| q + alpha * (target - q));
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

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(0)
    }

    fn learner(rule: Rule) -> Tabular {
        let learner = Tabular::sized(rule, 64);
        learner.rates().set_alpha(0.5);
        learner.rates().set_gamma(0.5);
        learner
    }

    fn step(next: usize) -> Step {
        Step {
            last: 0,
            next,
            reward: 1.,
            ended: false,
            epsilon: 0.5,
        }
    }

    #[test]
    fn terminal_ignores_the_future() {
        let learner = learner(Rule::QLearning);
        learner.table().set(16, 10.);
        let step = Step {
            ended: true,
            ..step(16)
        };
        learner.update(step, &mut rng());
        assert_eq!(learner.value(0), 0.5);
    }

    #[test]
    fn sarsa_uses_taken_action() {
        let learner = learner(Rule::Sarsa);
        learner.table().set(16, 2.);
        learner.table().set(20, 8.);
        learner.update(step(16), &mut rng());
        // 0 + 0.5 * (1 + 0.5 * 2 - 0)
        assert_eq!(learner.value(0), 1.);
    }

    #[test]
    fn qlearning_uses_best_action() {
        let learner = learner(Rule::QLearning);
        learner.table().set(16, 2.);
        learner.table().set(20, 8.);
        learner.update(step(16), &mut rng());
        // 0 + 0.5 * (1 + 0.5 * 8 - 0)
        assert_eq!(learner.value(0), 2.5);
    }

    #[test]
    fn qlearning_falls_back_without_preference() {
        let learner = learner(Rule::QLearning);
        learner.update(step(16), &mut rng());
        assert_eq!(learner.value(0), 0.5);
    }

    #[test]
    fn expected_sarsa_averages_under_policy() {
        let learner = learner(Rule::ExpectedSarsa);
        learner.table().set(16, 2.);
        learner.table().set(20, 8.);
        learner.update(step(16), &mut rng());
        // expectation: 0.5 / 16 * (2 + 8) + 0.5 * 8 = 4.3125
        // 0 + 0.5 * (1 + 0.5 * 4.3125)
        assert_eq!(learner.value(0), 1.578125);
    }

    #[test]
    fn updates_move_toward_target() {
        let learner = learner(Rule::Sarsa);
        learner.table().set(0, 4.);
        let step = Step {
            reward: -4.,
            ended: true,
            ..step(16)
        };
        learner.update(step, &mut rng());
        assert_eq!(learner.value(0), 0.);
    }
}
