use crate::cards::Card;
use serde::Deserialize;
use serde::Serialize;

/// Number of distinct action codes in a heads-up game.
pub const ACTION_CODES: usize = 16;

/// A decision by the active player.
///
/// - `recent` discards the card just drawn, otherwise the one already held
/// - `target` is an offset from the actor around the table (0 = self)
/// - `guess` is only read by the Guard; `None` behaves like guessing a Guard
#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub recent: bool,
    pub target: usize,
    pub guess: Card,
}

impl Action {
    pub fn new(recent: bool, target: usize, guess: Card) -> Self {
        Self {
            recent,
            target,
            guess,
        }
    }
    /// the same choice, discarding the other card
    pub fn flip(self) -> Self {
        Self {
            recent: !self.recent,
            ..self
        }
    }
    /// the 3-bit payload of the code: a real guess wins over the target
    fn payload(&self) -> u8 {
        match self.guess {
            Card::None | Card::Guard => self.target.min(1) as u8,
            guess => guess.value() - 1,
        }
    }
}

/// u8 isomorphism (heads-up)
///
/// `code = payload << 1 | recent` fits in 4 bits.
/// payload 0 is "target self, no guess"; payload v > 0 is
/// "target the opponent, guess card v + 1". Targeting the
/// opponent without a guess therefore aliases a Priest guess,
/// which changes nothing for any card but the Guard.
impl From<Action> for u8 {
    fn from(a: Action) -> u8 {
        a.payload() << 1 | a.recent as u8
    }
}
impl From<u8> for Action {
    fn from(n: u8) -> Self {
        debug_assert!((n as usize) < ACTION_CODES);
        let recent = n & 1 == 1;
        match (n >> 1) & 0b111 {
            0 => Self::new(recent, 0, Card::None),
            v => Self::new(recent, 1, Card::from(v + 1)),
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} @{} ?{}",
            if self.recent { "recent" } else { "held" },
            self.target,
            self.guess
        )
    }
}
