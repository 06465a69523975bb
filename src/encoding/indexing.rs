use crate::cards::Card;
use crate::cards::DECK_SPACE;
use crate::cards::Deck;
use crate::game::ACTION_CODES;
use crate::game::Action;

/// bits reserved for the clipped score differential
const SCORE_BITS: usize = 5;
/// bits reserved for the three cards of the hand
const HAND_BITS: usize = 9;
/// bits reserved for the action code
const ACTION_BITS: usize = 4;

/// Number of distinct heads-up observations.
pub const STATE_SPACE: usize = DECK_SPACE << SCORE_BITS << HAND_BITS;
/// Number of distinct (observation, action) pairs.
pub const ACTION_SPACE: usize = STATE_SPACE * ACTION_CODES;

/// Perfect hash of an observation onto `[0, STATE_SPACE)`.
///
/// `((deck << 5 | score) << 9) | hand`, see [`score`] and [`hand`].
pub fn index(seen: Deck, recent: Card, old: Card, opponent: Card, diff: i32) -> usize {
    let deck = usize::from(seen);
    ((deck << SCORE_BITS | score(diff)) << HAND_BITS) | hand(recent, old, opponent)
}

/// Sign in bit 4, magnitude clipped to 15 in bits 0 to 3.
pub fn score(diff: i32) -> usize {
    let magnitude = diff.unsigned_abs().min(crate::SCORE_CLIP as u32) as usize;
    match diff < 0 {
        true => 1 << 4 | magnitude,
        false => magnitude,
    }
}

/// Inverse of [`score`], exact within the clip.
pub fn unscore(bits: usize) -> i32 {
    let magnitude = (bits & 0b1111) as i32;
    match bits & 0b10000 {
        0 => magnitude,
        _ => -magnitude,
    }
}

/// Three octal digits: old card, recent card, opponent's last play.
/// Every card must be real.
pub fn hand(recent: Card, old: Card, opponent: Card) -> usize {
    (old.slot() << 3 | recent.slot()) << 3 | opponent.slot()
}

/// Inverse of [`hand`] as `(recent, old, opponent)`.
pub fn unhand(bits: usize) -> (Card, Card, Card) {
    let card = |b: usize| Card::from((b & 0b111) as u8 + 1);
    (card(bits >> 3), card(bits >> 6), card(bits))
}

/// The action-state index of playing `action` from `state`.
pub fn with_action(state: usize, action: Action) -> usize {
    debug_assert!(state < STATE_SPACE);
    state << ACTION_BITS | u8::from(action) as usize
}

/// The state an action-state index was taken from.
pub fn without_action(index: usize) -> usize {
    index >> ACTION_BITS
}

/// The action an action-state index encodes.
pub fn action_of(index: usize) -> Action {
    Action::from((index & (ACTION_CODES - 1)) as u8)
}

/// All sixteen action-states reachable from `state`, lowest code first.
pub fn actions(state: usize) -> impl Iterator<Item = usize> {
    (0..ACTION_CODES).map(move |code| state << ACTION_BITS | code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_state() {
        assert_eq!(index(Deck::empty(), Card::Guard, Card::Guard, Card::Guard, 0), 0);
    }

    #[test]
    fn minimal_deck() {
        let mut deck = Deck::empty();
        deck.add(Card::Guard);
        assert_eq!(index(deck, Card::Guard, Card::Guard, Card::Guard, 0), 1 << 14);
    }

    #[test]
    fn simple_deck() {
        let i = index(Deck::empty(), Card::Princess, Card::Countess, Card::King, -15);
        assert_eq!(i, 16317);
    }

    #[test]
    fn full_state() {
        let i = index(Deck::full(), Card::Princess, Card::Princess, Card::Princess, -15);
        assert_eq!(i, STATE_SPACE - 1);
    }

    #[test]
    fn score_clipping() {
        for (diff, bits) in [
            (0, 0),
            (3, 3),
            (15, 15),
            (16, 15),
            (2356, 15),
            (-3, 19),
            (-15, 31),
            (-16, 31),
            (-2356, 31),
        ] {
            assert_eq!(score(diff), bits, "diff {}", diff);
            assert_eq!(unscore(bits), diff.clamp(-15, 15), "bits {}", bits);
        }
    }

    #[test]
    fn hand_values() {
        assert_eq!(hand(Card::Guard, Card::Guard, Card::Guard), 0);
        assert_eq!(hand(Card::Priest, Card::Priest, Card::Priest), 73);
        assert_eq!(hand(Card::Princess, Card::Princess, Card::Princess), 511);
        assert_eq!(
            unhand(hand(Card::Baron, Card::King, Card::Guard)),
            (Card::Baron, Card::King, Card::Guard)
        );
    }

    #[test]
    #[should_panic]
    fn none_card_fails_fast() {
        hand(Card::None, Card::Guard, Card::Guard);
    }

    #[test]
    fn action_states() {
        let state = index(Deck::empty(), Card::Princess, Card::Countess, Card::King, -15);
        assert_eq!(with_action(state, Action::default()), 16317 << 4);
        let action = Action::new(true, 0, Card::Princess);
        let i = with_action(state, action);
        assert_eq!(i, 15 + (16317 << 4));
        assert_eq!(without_action(i), state);
        assert_eq!(action_of(i), Action::new(true, 1, Card::Princess));
    }

    #[test]
    fn sixteen_actions_per_state() {
        let state = 12345;
        let all = actions(state).collect::<Vec<_>>();
        assert_eq!(all.len(), 16);
        assert!(all.iter().all(|i| without_action(*i) == state));
        assert_eq!(all[0], state << 4);
        assert_eq!(all[15], state << 4 | 15);
    }
}
