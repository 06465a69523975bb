use serde::Deserialize;
use serde::Serialize;

/// A Love Letter card. The discriminant is the face value,
/// and the total order by face value decides every comparison
/// in the game. `None` is the sentinel for "no card".
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    Hash,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Serialize,
    Deserialize,
)]
pub enum Card {
    #[default]
    None = 0,
    Guard = 1,
    Priest = 2,
    Baron = 3,
    Handmaid = 4,
    Prince = 5,
    King = 6,
    Countess = 7,
    Princess = 8,
}

impl Card {
    /// every real card, lowest first
    pub const fn all() -> [Card; 8] {
        [
            Card::Guard,
            Card::Priest,
            Card::Baron,
            Card::Handmaid,
            Card::Prince,
            Card::King,
            Card::Countess,
            Card::Princess,
        ]
    }
    /// how many copies of this card a fresh deck holds
    pub const fn multiplicity(&self) -> u8 {
        match self {
            Card::None => 0,
            Card::Guard => 5,
            Card::Priest => 2,
            Card::Baron => 2,
            Card::Handmaid => 2,
            Card::Prince => 2,
            Card::King => 1,
            Card::Countess => 1,
            Card::Princess => 1,
        }
    }
    /// face value, which is also the discard score
    pub const fn value(&self) -> u8 {
        *self as u8
    }
    /// zero-based slot among the real cards.
    /// panics on the sentinel, which never belongs in a slot.
    pub fn slot(&self) -> usize {
        assert!(*self != Card::None, "the None card has no slot");
        self.value() as usize - 1
    }
    pub const fn is_none(&self) -> bool {
        matches!(self, Card::None)
    }
    /// cards whose effect must land on another player
    pub const fn needs_opponent(&self) -> bool {
        matches!(self, Card::Guard | Card::Priest | Card::Baron | Card::King)
    }
    pub const fn name(&self) -> &'static str {
        match self {
            Card::None => "None",
            Card::Guard => "Guard",
            Card::Priest => "Priest",
            Card::Baron => "Baron",
            Card::Handmaid => "Handmaid",
            Card::Prince => "Prince",
            Card::King => "King",
            Card::Countess => "Countess",
            Card::Princess => "Princess",
        }
    }
}

/// u8 isomorphism over face values, anything
/// out of range collapses to the sentinel
impl From<u8> for Card {
    fn from(n: u8) -> Self {
        match n {
            1 => Card::Guard,
            2 => Card::Priest,
            3 => Card::Baron,
            4 => Card::Handmaid,
            5 => Card::Prince,
            6 => Card::King,
            7 => Card::Countess,
            8 => Card::Princess,
            _ => Card::None,
        }
    }
}
impl From<Card> for u8 {
    fn from(c: Card) -> u8 {
        c.value()
    }
}

/// str parsing is forgiving: the human front end
/// sends free-form names, and anything unknown
/// means "no card selected"
impl From<&str> for Card {
    fn from(s: &str) -> Self {
        Card::all()
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(s.trim()))
            .unwrap_or_default()
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.pad(self.name())
    }
}

impl crate::Arbitrary for Card {
    fn random() -> Self {
        Card::from(rand::random_range(1..=8u8))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Arbitrary;

    #[test]
    fn bijective_u8() {
        let card = Card::random();
        assert_eq!(card, Card::from(u8::from(card)));
    }

    #[test]
    fn ordering_by_face_value() {
        assert!(Card::Guard < Card::Priest);
        assert!(Card::Countess < Card::Princess);
        assert!(Card::None < Card::Guard);
    }

    #[test]
    fn sixteen_cards() {
        let total = Card::all()
            .iter()
            .map(|c| c.multiplicity() as usize)
            .sum::<usize>();
        assert_eq!(total, 16);
    }

    #[test]
    fn parse_names() {
        assert_eq!(Card::from("guard"), Card::Guard);
        assert_eq!(Card::from(" PRINCESS "), Card::Princess);
        assert_eq!(Card::from("joker"), Card::None);
    }
}
