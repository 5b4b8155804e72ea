pub mod action;
pub mod bank;
pub mod game;
pub mod players;
pub mod resources;
pub mod roads;
pub mod rules;
pub mod state;

pub use action::{CardPlay, Move, MoveCategory, PlayerId, RobberChoice, RollOutcome};
pub use bank::Bank;
pub use game::{Dice, EngineDice, Game, GameSummary, Observer, ScriptedDice, Seat, run_turn};
pub use players::{PlayerIdentity, PlayerState};
pub use resources::{
    COST_CITY, COST_DEVELOPMENT, COST_ROAD, COST_SETTLEMENT, ResourceBundle, ResourceError,
};
pub use rules::RoadPayment;
pub use state::{Award, GameError, GameState, InvalidMove, Structure};
