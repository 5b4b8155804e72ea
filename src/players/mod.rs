pub mod base;
pub mod candidates;
pub mod minimax;
pub mod random;

pub use base::{Agent, RoadRequest, TurnClock};
pub use minimax::MinimaxAgent;
pub use random::RandomAgent;
