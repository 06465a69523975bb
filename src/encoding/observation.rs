use super::indexing::*;
use crate::cards::Card;
use crate::cards::Deck;
use crate::game::Action;
use crate::game::Game;

/// What the active player of a heads-up game can act on.
///
/// This deliberately forgets most of the public record: who discarded
/// what, the order of discards, and anything learned through a Priest.
/// What survives is small enough to index a flat table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Observation {
    /// face-up burns plus every discard, unattributed
    pub seen: Deck,
    /// the card just drawn
    pub recent: Card,
    /// the card already held
    pub old: Card,
    /// the opponent's last play, Guard if they have not played yet
    pub opponent: Card,
    /// own discard score minus the opponent's
    pub diff: i32,
}

impl Observation {
    pub fn index(&self) -> usize {
        usize::from(*self)
    }
    /// the action-state index of playing `action` here
    pub fn with(&self, action: Action) -> usize {
        with_action(self.index(), action)
    }
}

impl From<&Game> for Observation {
    fn from(game: &Game) -> Self {
        let me = game.active();
        let them = (me + 1) % game.players();
        Self {
            seen: game.seen(),
            recent: game.drawn(),
            old: game.hand(me),
            opponent: match game.last_play(them) {
                Card::None => Card::Guard,
                card => card,
            },
            diff: game.score(me) - game.score(them),
        }
    }
}

/// usize isomorphism onto `[0, STATE_SPACE)`, exact up to score clipping
impl From<Observation> for usize {
    fn from(o: Observation) -> usize {
        index(o.seen, o.recent, o.old, o.opponent, o.diff)
    }
}
impl From<usize> for Observation {
    fn from(n: usize) -> Self {
        assert!(n < STATE_SPACE, "state index {} out of range", n);
        let (recent, old, opponent) = unhand(n & 0x1FF);
        Self {
            seen: Deck::from(n >> 14),
            recent,
            old,
            opponent,
            diff: unscore(n >> 9 & 0x1F),
        }
    }
}

impl std::fmt::Display for Observation {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "seen {} | {} + {} | vs {} | {:+}",
            self.seen, self.old, self.recent, self.opponent, self.diff
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Arbitrary;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn bijective_usize() {
        let observation = Observation {
            seen: Deck::random(),
            recent: Card::random(),
            old: Card::random(),
            opponent: Card::random(),
            diff: rand::random_range(-15..=15),
        };
        assert_eq!(observation, Observation::from(usize::from(observation)));
    }

    #[test]
    fn observes_the_active_player() {
        let ref mut rng = SmallRng::seed_from_u64(7);
        let game = Game::new(2, rng).unwrap();
        let observation = Observation::from(&game);
        assert_eq!(observation.recent, game.drawn());
        assert_eq!(observation.old, game.hand(0));
        assert_eq!(observation.opponent, Card::Guard);
        assert_eq!(observation.diff, 0);
        assert_eq!(observation.seen.size(), 3);
    }

    #[test]
    fn observes_opponent_play_and_scores() {
        let ref mut rng = SmallRng::seed_from_u64(8);
        let mut deck = Deck::empty();
        (0..4).for_each(|_| deck.add(Card::Guard));
        let mut game = Game::arranged(deck, vec![Card::Prince, Card::King], Card::Handmaid);
        game.apply(Action::new(true, 0, Card::None), rng);
        let observation = Observation::from(&game);
        assert_eq!(observation.recent, Card::Guard);
        assert_eq!(observation.old, Card::King);
        assert_eq!(observation.opponent, Card::Handmaid);
        assert_eq!(observation.diff, -4);
        assert_eq!(observation.seen.count(Card::Handmaid), 1);
    }

    #[test]
    #[should_panic]
    fn out_of_range_fails_fast() {
        let _ = Observation::from(STATE_SPACE);
    }

    #[test]
    fn action_indices_share_the_state() {
        let observation = Observation::from(16317usize);
        let i = observation.with(Action::new(false, 1, Card::Baron));
        assert_eq!(without_action(i), 16317);
    }
}
