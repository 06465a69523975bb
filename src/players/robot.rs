use super::Player;
use super::Random;
use crate::encoding::Observation;
use crate::game::Action;
use crate::learning::Learner;
use rand::rngs::SmallRng;
use std::sync::Arc;

/// Plays the greedy action of a trained table, falling back
/// to [`Random`] wherever the table has no preference.
#[derive(Clone)]
pub struct Robot {
    learner: Arc<dyn Learner>,
}

impl Robot {
    pub fn new(learner: Arc<dyn Learner>) -> Self {
        Self { learner }
    }
}

impl Player for Robot {
    fn choose(&self, observation: &Observation, rng: &mut SmallRng) -> Action {
        match self.learner.greedy(observation.index()) {
            Some((action, _)) => action,
            None => Random.choose(observation, rng),
        }
    }
}

impl std::fmt::Debug for Robot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Robot({})", self.learner.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Card;
    use crate::cards::Deck;
    use crate::learning::Rule;
    use crate::learning::Tabular;
    use rand::SeedableRng;

    #[test]
    fn follows_the_table() {
        let learner = Arc::new(Tabular::sized(Rule::QLearning, 16));
        learner.table().set(3, 1.);
        let robot = Robot::new(learner);
        let observation = Observation {
            seen: Deck::empty(),
            recent: Card::Guard,
            old: Card::Guard,
            opponent: Card::Guard,
            diff: 0,
        };
        assert_eq!(observation.index(), 0);
        let ref mut rng = SmallRng::seed_from_u64(0);
        assert_eq!(robot.choose(&observation, rng), Action::from(3u8));
    }
}
