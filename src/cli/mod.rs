//! Terminal front end: player codes, table rendering and the interactive
//! human agent.

pub mod display;
pub mod human;
pub mod players;

pub use display::{TerminalDisplay, describe_move, render_board, render_text};
pub use human::{HumanAgent, TableTopDice};
pub use players::{CLI_PLAYERS, CliPlayer, create_agent, print_player_help};
