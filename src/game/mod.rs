//! The Love Letter rules engine.
//!
//! A [`Game`] owns one round: the deal, turn resolution, the
//! knowledge players gain about each other, and the terminal outcome.
//! [`Action`] is the 4-bit heads-up move, and a game can be
//! serialized to a resume token for stateless front ends.

mod action;
mod error;
mod events;
mod game;
mod terminal;
mod token;

pub use action::*;
pub use error::*;
pub use events::*;
pub use game::*;
pub use terminal::*;
