use crate::cards::Card;
use serde::Deserialize;
use serde::Serialize;

/// Snapshot of how a game ended, from the point of view of
/// the player who was active when it ended. Taken once, at the
/// moment of elimination or round end, since later bookkeeping
/// (moving an eliminated hand onto its discards) loses it.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Final {
    /// the card whose play ended the game
    pub discard: Card,
    /// the card the active player kept
    pub retained: Card,
    /// what the next live opponent was holding
    pub opponent: Card,
    /// cards left in the deck
    pub remaining: usize,
    /// whether the active player won
    pub won: bool,
}

impl Final {
    pub fn header() -> &'static str {
        "Discard  | InHand   | Opponent | Deck | Won?\n\
         ---------|----------|----------|------|------"
    }
}

impl std::fmt::Display for Final {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{:<8} | {:<8} | {:<8} | {:>4} | {}",
            self.discard, self.retained, self.opponent, self.remaining, self.won
        )
    }
}
