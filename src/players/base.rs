use std::time::{Duration, Instant};

use crate::board::{EdgeId, NodeId};
use crate::game::action::{Move, PlayerId, RobberChoice};
use crate::game::resources::ResourceBundle;
use crate::game::state::GameState;

/// Why the engine is asking an agent for a road.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoadRequest {
    /// Opening road, which must touch this freshly placed settlement.
    Initial(NodeId),
    /// One of the placements granted by a road-building card.
    Free,
}

/// Wall-clock budget for one player turn.
#[derive(Debug, Clone, Copy)]
pub struct TurnClock {
    started: Instant,
    limit: Duration,
}

impl TurnClock {
    pub fn start(limit: Duration) -> Self {
        Self {
            started: Instant::now(),
            limit,
        }
    }

    pub fn unlimited() -> Self {
        Self::start(Duration::MAX)
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    pub fn expired(&self) -> bool {
        self.elapsed() >= self.limit
    }

    pub fn remaining(&self) -> Duration {
        self.limit.saturating_sub(self.elapsed())
    }
}

/// A decision maker seated at the table. Agents only read the state; the
/// game loop applies whatever they choose through the rules engine and treats
/// an illegal choice as a failure of the agent.
pub trait Agent: Send {
    fn initial_placement(&mut self, state: &GameState, player: PlayerId) -> Option<NodeId>;

    fn choose_road_location(
        &mut self,
        state: &GameState,
        player: PlayerId,
        request: RoadRequest,
    ) -> Option<EdgeId>;

    fn robber(&mut self, state: &GameState, player: PlayerId) -> RobberChoice;

    /// Exactly `count` cards from the player's hand.
    fn robber_discard(&mut self, state: &GameState, player: PlayerId, count: u8)
    -> ResourceBundle;

    /// The next move of the current turn; `Move::EndTurn` finishes it.
    fn turn_action(&mut self, state: &GameState, player: PlayerId, clock: &TurnClock) -> Move;

    /// Heuristic score of `state` for `player`, for agents that have one.
    fn evaluate(&self, _state: &GameState, _player: PlayerId) -> Option<i64> {
        None
    }
}
