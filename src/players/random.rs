use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::{IteratorRandom, SliceRandom};

use crate::board::{EdgeId, NodeId};
use crate::game::action::{Move, PlayerId, RobberChoice};
use crate::game::resources::ResourceBundle;
use crate::game::state::GameState;
use crate::players::base::{Agent, RoadRequest, TurnClock};
use crate::players::candidates::{moves_in, random_discard, robber_choices};

/// Picks uniformly among legal options: first a move category, then a
/// concrete move inside it, so ending the turn stays likely.
#[derive(Debug, Clone)]
pub struct RandomAgent {
    rng: StdRng,
}

impl RandomAgent {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Agent for RandomAgent {
    fn initial_placement(&mut self, state: &GameState, player: PlayerId) -> Option<NodeId> {
        state
            .settlement_sites(player, true)
            .choose(&mut self.rng)
            .copied()
    }

    fn choose_road_location(
        &mut self,
        state: &GameState,
        player: PlayerId,
        _request: RoadRequest,
    ) -> Option<EdgeId> {
        state.road_sites(player).choose(&mut self.rng).copied()
    }

    fn robber(&mut self, state: &GameState, player: PlayerId) -> RobberChoice {
        robber_choices(state, player)
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(RobberChoice {
                tile: state.robber_tile(),
                victim: None,
            })
    }

    fn robber_discard(
        &mut self,
        state: &GameState,
        player: PlayerId,
        count: u8,
    ) -> ResourceBundle {
        random_discard(&state.player(player).resources, count, &mut self.rng)
    }

    fn turn_action(&mut self, state: &GameState, player: PlayerId, _clock: &TurnClock) -> Move {
        let Some(category) = state.legal_moves(player).into_iter().choose(&mut self.rng) else {
            return Move::EndTurn;
        };
        moves_in(state, player, category)
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(Move::EndTurn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::game::players::PlayerIdentity;
    use crate::types::{Color, PlayerKind};

    #[test]
    fn opening_choice_is_legal() {
        let identities = vec![
            PlayerIdentity::new(1, Color::Red, PlayerKind::Ai),
            PlayerIdentity::new(2, Color::Blue, PlayerKind::Ai),
        ];
        let mut state = GameState::new(identities, &GameConfig::default());
        let mut agent = RandomAgent::new(11);
        let node = agent.initial_placement(&state, 0).unwrap();
        state.place_initial_settlement(0, node).unwrap();
        let edge = agent
            .choose_road_location(&state, 0, RoadRequest::Initial(node))
            .unwrap();
        assert!(state.topology().edge(edge).touches(node));
    }
}
