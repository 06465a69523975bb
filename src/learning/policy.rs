use super::learner::Learner;
use crate::Probability;
use crate::Utility;
use crate::encoding::Observation;
use crate::encoding::action_of;
use crate::encoding::actions;
use crate::encoding::with_action;
use crate::game::Action;
use crate::players::Player;
use crate::players::Random;
use rand::Rng;
use rand::rngs::SmallRng;

/// The highest-valued action from `state` and its action-state index.
///
/// Ties go to the lowest action code. `None` means no preference:
/// the best value is still the untrained zero.
pub fn greedy<F>(value: F, state: usize) -> Option<(Action, usize)>
where
    F: Fn(usize) -> Utility,
{
    actions(state)
        .map(|i| (i, value(i)))
        .reduce(|best, next| if next.1 > best.1 { next } else { best })
        .filter(|(_, v)| *v != 0.)
        .map(|(i, _)| (action_of(i), i))
}

/// Greedy with probability `1 - epsilon`, otherwise (or when the learner
/// has no preference yet) a random action that obeys the obvious rules.
pub fn epsilon_greedy<L>(
    learner: &L,
    observation: &Observation,
    epsilon: Probability,
    rng: &mut SmallRng,
) -> (Action, usize)
where
    L: Learner + ?Sized,
{
    let state = observation.index();
    match learner.greedy(state) {
        Some(choice) if rng.random::<Probability>() >= epsilon => choice,
        _ => {
            let action = Random.choose(observation, rng);
            (action, with_action(state, action))
        }
    }
}
