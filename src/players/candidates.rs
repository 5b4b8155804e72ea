use itertools::Itertools;
use rand::Rng;
use rand::seq::SliceRandom;

use crate::game::action::{CardPlay, Move, MoveCategory, PlayerId, RobberChoice};
use crate::game::resources::ResourceBundle;
use crate::game::state::GameState;
use crate::types::{DevelopmentCard, Resource};

/// Concrete moves for one legal category.
pub fn moves_in(state: &GameState, player: PlayerId, category: MoveCategory) -> Vec<Move> {
    match category {
        MoveCategory::EndTurn => vec![Move::EndTurn],
        MoveCategory::BuildSettlement => state
            .settlement_sites(player, false)
            .into_iter()
            .map(Move::BuildSettlement)
            .collect(),
        MoveCategory::BuildCity => state
            .city_sites(player)
            .into_iter()
            .map(Move::BuildCity)
            .collect(),
        MoveCategory::BuildRoad => state
            .road_sites(player)
            .into_iter()
            .map(Move::BuildRoad)
            .collect(),
        MoveCategory::BuyDevelopmentCard => vec![Move::BuyDevelopmentCard],
        MoveCategory::PlayDevelopmentCard => state
            .playable_cards(player)
            .into_iter()
            .flat_map(|card| card_plays(state, player, card))
            .map(Move::PlayDevelopmentCard)
            .collect(),
        MoveCategory::TradeWithBank => state
            .bank_trades(player)
            .into_iter()
            .map(|(give, get)| Move::TradeWithBank { give, get })
            .collect(),
    }
}

/// Every concrete move open to `player`, with `EndTurn` first.
pub fn concrete_moves(state: &GameState, player: PlayerId) -> Vec<Move> {
    state
        .legal_moves(player)
        .into_iter()
        .flat_map(|category| moves_in(state, player, category))
        .collect()
}

fn card_plays(state: &GameState, player: PlayerId, card: DevelopmentCard) -> Vec<CardPlay> {
    match card {
        DevelopmentCard::Soldier => robber_choices(state, player)
            .into_iter()
            .map(CardPlay::Soldier)
            .collect(),
        DevelopmentCard::Monopoly => Resource::ALL.into_iter().map(CardPlay::Monopoly).collect(),
        DevelopmentCard::YearOfPlenty => Resource::ALL
            .into_iter()
            .combinations_with_replacement(2)
            .map(|pair| CardPlay::YearOfPlenty(pair[0], pair[1]))
            .collect(),
        DevelopmentCard::RoadBuilding => vec![CardPlay::RoadBuilding],
        DevelopmentCard::VictoryPoint => Vec::new(),
    }
}

/// Every legal robber destination, once per possible victim.
pub fn robber_choices(state: &GameState, player: PlayerId) -> Vec<RobberChoice> {
    let mut choices = Vec::new();
    for tile in state.robber_tiles() {
        let victims = state.robber_victims(player, tile);
        if victims.is_empty() {
            choices.push(RobberChoice { tile, victim: None });
        }
        for victim in victims {
            choices.push(RobberChoice {
                tile,
                victim: Some(victim),
            });
        }
    }
    choices
}

/// Robber placement that blocks the most opponent production while sparing
/// the player's own buildings; the victim is whoever holds the most cards.
pub fn strongest_robber_choice(state: &GameState, player: PlayerId) -> Option<RobberChoice> {
    let topology = state.topology();
    let tile = state.robber_tiles().max_by_key(|tile| {
        let tile = topology.tile(*tile);
        let mut own = 0u32;
        let mut blocked = 0u32;
        for node in &tile.nodes {
            if let Some(structure) = state.building(*node) {
                let pips = tile.frequency() as u32 * structure.yield_multiplier() as u32;
                if structure.owner() == player {
                    own += pips;
                } else {
                    blocked += pips;
                }
            }
        }
        (own == 0, blocked)
    })?;
    let victim = state
        .robber_victims(player, tile)
        .into_iter()
        .max_by_key(|victim| (state.player(*victim).resources.total(), usize::MAX - victim));
    Some(RobberChoice { tile, victim })
}

/// `count` cards drawn at random from `hand`.
pub fn random_discard(hand: &ResourceBundle, count: u8, rng: &mut impl Rng) -> ResourceBundle {
    let mut discard = ResourceBundle::zero();
    for resource in hand.cards().choose_multiple(rng, count as usize) {
        discard.add(*resource, 1);
    }
    discard
}

/// Applies `mv` to an isolated copy of `state`. Free roads from a
/// road-building card are placed one at a time on the edge `score` likes best.
pub fn simulate(
    state: &GameState,
    player: PlayerId,
    mv: Move,
    score: impl Fn(&GameState) -> i64,
) -> Option<GameState> {
    let mut sim = state.simulation();
    sim.apply_move(player, mv).ok()?;
    while sim.free_roads(player) > 0 {
        let best = sim.road_sites(player).into_iter().max_by_key(|edge| {
            let mut next = sim.clone();
            match next.place_road(player, *edge) {
                Ok(_) => score(&next),
                Err(_) => i64::MIN,
            }
        });
        match best {
            Some(edge) => {
                sim.place_road(player, edge).ok()?;
            }
            None => {
                sim.forfeit_free_roads(player).ok()?;
            }
        }
    }
    Some(sim)
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::config::GameConfig;
    use crate::game::players::PlayerIdentity;
    use crate::types::{Color, PlayerKind};

    fn state() -> GameState {
        let identities = vec![
            PlayerIdentity::new(1, Color::Red, PlayerKind::Ai),
            PlayerIdentity::new(2, Color::Blue, PlayerKind::Ai),
        ];
        GameState::new(identities, &GameConfig::default())
    }

    #[test]
    fn bare_hand_can_only_end_the_turn() {
        let s = state();
        assert_eq!(concrete_moves(&s, 0), vec![Move::EndTurn]);
    }

    #[test]
    fn trades_list_every_target() {
        let mut s = state();
        for _ in 0..4 {
            s.give_card(0, Resource::Wood).unwrap();
        }
        let moves = concrete_moves(&s, 0);
        assert_eq!(moves[0], Move::EndTurn);
        let trades = moves
            .iter()
            .filter(|m| matches!(m, Move::TradeWithBank { give: Resource::Wood, .. }))
            .count();
        assert_eq!(trades, 4);
    }

    #[test]
    fn listed_moves_match_their_category() {
        let mut s = state();
        let node = s.topology().node("a1").unwrap();
        s.place_initial_settlement(0, node).unwrap();
        let edge = s.topology().intersection(node).edges[0];
        s.place_road(0, edge).unwrap();
        for _ in 0..4 {
            s.give_card(0, Resource::Wood).unwrap();
        }
        s.give_card(0, Resource::Clay).unwrap();
        for category in s.legal_moves(0) {
            let moves = moves_in(&s, 0, category);
            assert!(!moves.is_empty(), "{category:?}");
            assert!(moves.iter().all(|m| m.category() == category), "{category:?}");
        }
    }

    #[test]
    fn robber_prefers_opponent_tiles() {
        let mut s = state();
        let node = s.topology().node("i,j,n").unwrap();
        s.place_initial_settlement(1, node).unwrap();
        let choice = strongest_robber_choice(&s, 0).unwrap();
        let tile = s.topology().tile(choice.tile);
        assert!(tile.nodes.contains(&node));
        assert_eq!(choice.victim, Some(1));
    }

    #[test]
    fn discard_takes_exactly_the_count() {
        let hand = ResourceBundle::from_counts([3, 2, 2, 1, 1]);
        let discard = random_discard(&hand, 4, &mut StdRng::seed_from_u64(3));
        assert_eq!(discard.total(), 4);
        assert!(hand.can_afford(&discard));
    }

    #[test]
    fn simulation_leaves_the_original_alone() {
        let mut s = state();
        for _ in 0..4 {
            s.give_card(0, Resource::Wood).unwrap();
        }
        let sim = simulate(
            &s,
            0,
            Move::TradeWithBank {
                give: Resource::Wood,
                get: Resource::Rock,
            },
            |_| 0,
        )
        .unwrap();
        assert!(sim.is_simulation());
        assert_eq!(sim.player(0).resources.get(Resource::Rock), 1);
        assert_eq!(s.player(0).resources.get(Resource::Wood), 4);
        assert_eq!(s.player(0).resources.get(Resource::Rock), 0);
    }
}
