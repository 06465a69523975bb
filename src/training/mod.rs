//! Concurrent self-play training and evaluation.
mod arena;
mod producer;
mod progress;
mod trainer;
mod worker;

pub use arena::*;
pub use producer::*;
pub use progress::*;
pub use trainer::*;
pub use worker::*;
