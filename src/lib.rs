#![warn(clippy::all)]
#![deny(rust_2018_idioms)]

pub mod board;
pub mod cli;
pub mod config;
pub mod coords;
pub mod game;
pub mod heuristic;
pub mod players;
pub mod types;

pub use board::{MapLayout, Tile, Topology};
pub use config::{DisplayMode, GameConfig, SetupError};
pub use game::{Game, GameError, GameState, GameSummary, Move};
pub use heuristic::{Heuristic, Modifier};
pub use players::{Agent, MinimaxAgent, RandomAgent};
pub use types::{Color, Resource};
