//! Card ranks, the counting deck, and ordered card stacks.
//!
//! - [`Card`] : one of the eight ranks, ordered by face value
//! - [`Deck`] : a multiset of cards with a bijective integer index
//! - [`Stack`] : an ordered pile of cards (discards, face-up burns)
mod card;
mod deck;
mod stack;

pub use card::*;
pub use deck::*;
pub use stack::*;
