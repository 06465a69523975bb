use super::Player;
use crate::cards::Card;
use crate::encoding::Observation;
use crate::game::Action;
use rand::Rng;
use rand::rngs::SmallRng;

/// Uniformly random play that never breaks an obvious rule.
///
/// It never discards the Princess, honors the Countess, and aims
/// opponent-only cards at the opponent. It is otherwise clueless,
/// happily Baron-ing a hand it has already seen is higher.
#[derive(Debug, Default, Clone, Copy)]
pub struct Random;

impl Player for Random {
    fn choose(&self, observation: &Observation, rng: &mut SmallRng) -> Action {
        let action = Action::new(
            rng.random(),
            rng.random_range(0..crate::N),
            Card::from(rng.random_range(Card::Priest.value()..=Card::Princess.value())),
        );
        legalize(observation, action)
    }
}

/// the nearest action to `action` that a careful player could make
fn legalize(observation: &Observation, action: Action) -> Action {
    let opponent = 1;
    let pick = |a: Action| match a.recent {
        true => (observation.recent, observation.old),
        false => (observation.old, observation.recent),
    };
    let action = match pick(action) {
        (Card::Princess, _) => action.flip(),
        _ => action,
    };
    let (played, kept) = pick(action);
    match played {
        Card::Prince | Card::King if kept == Card::Countess => action.flip(),
        Card::Prince if kept == Card::Princess => Action {
            target: opponent,
            ..action
        },
        card if card.needs_opponent() => Action {
            target: opponent,
            ..action
        },
        _ => action,
    }
}
