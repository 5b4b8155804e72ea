use rand::SeedableRng;
use rand::rngs::StdRng;
use rayon::prelude::*;

use crate::board::{EdgeId, NodeId};
use crate::config::GameConfig;
use crate::game::action::{Move, PlayerId, RobberChoice};
use crate::game::resources::ResourceBundle;
use crate::game::state::GameState;
use crate::heuristic::Heuristic;
use crate::players::base::{Agent, RoadRequest, TurnClock};
use crate::players::candidates::{concrete_moves, random_discard, simulate, strongest_robber_choice};

/// Look-ahead agent: simulates every concrete move on a cloned state, scores
/// the result with its heuristic and plays the best one. With a depth above
/// one it also chains its own follow-up moves inside the same turn.
#[derive(Debug, Clone)]
pub struct MinimaxAgent {
    heuristic: Heuristic,
    max_depth: u8,
    parallel: bool,
    rng: StdRng,
}

impl MinimaxAgent {
    pub fn new(heuristic: Heuristic, max_depth: u8, seed: u64) -> Self {
        Self {
            heuristic,
            max_depth: max_depth.max(1),
            parallel: false,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_config(heuristic: Heuristic, config: &GameConfig, seat: u64) -> Self {
        Self::new(heuristic, config.minimax_max_depth, config.seed.wrapping_add(seat))
            .parallel(config.parallel_search)
    }

    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn heuristic(&self) -> &Heuristic {
        &self.heuristic
    }

    /// Score of the position after `mv`, or `None` if the move does not apply.
    fn score_after(
        &self,
        state: &GameState,
        player: PlayerId,
        mv: Move,
        depth: u8,
        clock: &TurnClock,
    ) -> Option<i64> {
        if mv == Move::EndTurn {
            return Some(self.heuristic.evaluate(state, player));
        }
        let sim = simulate(state, player, mv, |s| self.heuristic.evaluate(s, player))?;
        let here = self.heuristic.evaluate(&sim, player);
        if depth <= 1 || clock.expired() {
            return Some(here);
        }
        let deeper = concrete_moves(&sim, player)
            .into_iter()
            .filter(|next| *next != Move::EndTurn)
            .filter_map(|next| self.score_after(&sim, player, next, depth - 1, clock))
            .max();
        Some(deeper.map_or(here, |d| d.max(here)))
    }

    /// Best move with its score. Candidates are scored in order and only a
    /// strictly better score replaces the incumbent, so `EndTurn` (listed
    /// first) wins ties.
    pub fn best_move(&self, state: &GameState, player: PlayerId, clock: &TurnClock) -> (Move, i64) {
        let candidates = concrete_moves(state, player);
        let scored: Vec<(usize, i64)> = if self.parallel {
            candidates
                .par_iter()
                .enumerate()
                .filter_map(|(index, mv)| {
                    if index > 0 && clock.expired() {
                        return None;
                    }
                    self.score_after(state, player, *mv, self.max_depth, clock)
                        .map(|score| (index, score))
                })
                .collect()
        } else {
            let mut scored = Vec::with_capacity(candidates.len());
            for (index, mv) in candidates.iter().enumerate() {
                if index > 0 && clock.expired() {
                    log::debug!(
                        "turn budget spent after {index} of {} candidates",
                        candidates.len()
                    );
                    break;
                }
                if let Some(score) = self.score_after(state, player, *mv, self.max_depth, clock) {
                    scored.push((index, score));
                }
            }
            scored
        };
        scored
            .into_iter()
            .fold(None, |best: Option<(usize, i64)>, (index, score)| match best {
                Some((_, top)) if top >= score => best,
                _ => Some((index, score)),
            })
            .map_or((Move::EndTurn, i64::MIN), |(index, score)| {
                (candidates[index], score)
            })
    }

    fn best_by_simulation<T: Copy>(
        &self,
        state: &GameState,
        player: PlayerId,
        options: Vec<T>,
        apply: impl Fn(&mut GameState, T) -> bool,
    ) -> Option<T> {
        let mut best: Option<(T, i64)> = None;
        for option in options {
            let mut sim = state.simulation();
            if !apply(&mut sim, option) {
                continue;
            }
            let score = self.heuristic.evaluate(&sim, player);
            if best.is_none_or(|(_, top)| score > top) {
                best = Some((option, score));
            }
        }
        best.map(|(option, _)| option)
    }
}

impl Agent for MinimaxAgent {
    fn initial_placement(&mut self, state: &GameState, player: PlayerId) -> Option<NodeId> {
        let sites = state.settlement_sites(player, true);
        self.best_by_simulation(state, player, sites, |sim, node| {
            sim.place_initial_settlement(player, node).is_ok()
        })
    }

    fn choose_road_location(
        &mut self,
        state: &GameState,
        player: PlayerId,
        _request: RoadRequest,
    ) -> Option<EdgeId> {
        let sites = state.road_sites(player);
        self.best_by_simulation(state, player, sites, |sim, edge| {
            sim.place_road(player, edge).is_ok()
        })
    }

    fn robber(&mut self, state: &GameState, player: PlayerId) -> RobberChoice {
        strongest_robber_choice(state, player).unwrap_or(RobberChoice {
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

    fn turn_action(&mut self, state: &GameState, player: PlayerId, clock: &TurnClock) -> Move {
        if clock.expired() {
            log::debug!("turn budget spent, ending turn");
            return Move::EndTurn;
        }
        let (mv, score) = self.best_move(state, player, clock);
        log::trace!(
            "{:?} scores {score} with {:?} left",
            mv.category(),
            clock.remaining()
        );
        mv
    }

    fn evaluate(&self, state: &GameState, player: PlayerId) -> Option<i64> {
        Some(self.heuristic.evaluate(state, player))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::game::players::PlayerIdentity;
    use crate::types::{Color, PlayerKind, Resource};

    fn opened() -> GameState {
        let identities = vec![
            PlayerIdentity::new(1, Color::Red, PlayerKind::Ai),
            PlayerIdentity::new(2, Color::Blue, PlayerKind::Ai),
        ];
        let mut state = GameState::new(identities, &GameConfig::default());
        let node = state.topology().node("i,j,n").unwrap();
        state.place_initial_settlement(0, node).unwrap();
        let edge = state.topology().intersection(node).edges[0];
        state.place_road(0, edge).unwrap();
        state
    }

    #[test]
    fn empty_hand_ends_the_turn() {
        let state = opened();
        let agent = MinimaxAgent::new(Heuristic::default(), 1, 1);
        let (mv, _) = agent.best_move(&state, 0, &TurnClock::unlimited());
        assert_eq!(mv, Move::EndTurn);
    }

    #[test]
    fn expired_clock_ends_the_turn() {
        let mut state = opened();
        for resource in [Resource::Wood, Resource::Clay] {
            state.give_card(0, resource).unwrap();
        }
        let mut agent = MinimaxAgent::new(Heuristic::default(), 1, 1);
        let clock = TurnClock::start(Duration::ZERO);
        assert_eq!(agent.turn_action(&state, 0, &clock), Move::EndTurn);
    }

    #[test]
    fn parallel_and_serial_agree() {
        let mut state = opened();
        for resource in [Resource::Wood, Resource::Clay, Resource::Wood, Resource::Clay] {
            state.give_card(0, resource).unwrap();
        }
        let serial = MinimaxAgent::new(Heuristic::default(), 1, 1);
        let parallel = serial.clone().parallel(true);
        let clock = TurnClock::unlimited();
        assert_eq!(
            serial.best_move(&state, 0, &clock),
            parallel.best_move(&state, 0, &clock)
        );
    }

    #[test]
    fn opening_prefers_productive_corners() {
        let identities = vec![
            PlayerIdentity::new(1, Color::Red, PlayerKind::Ai),
            PlayerIdentity::new(2, Color::Blue, PlayerKind::Ai),
        ];
        let state = GameState::new(identities, &GameConfig::default());
        let mut agent = MinimaxAgent::new(Heuristic::default(), 1, 1);
        let node = agent.initial_placement(&state, 0).unwrap();
        let score_at = |node: NodeId| {
            let mut sim = state.simulation();
            sim.place_initial_settlement(0, node).unwrap();
            agent.heuristic().evaluate(&sim, 0)
        };
        let chosen = score_at(node);
        for other in state.settlement_sites(0, true) {
            assert!(score_at(other) <= chosen);
        }
        // a two-tile corner on the 2:1 sheep harbour beats every inland corner
        assert_eq!(state.topology().intersection(node).key, "b,c");
    }
}
