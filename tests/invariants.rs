//! Properties that hold across whole games and at the rule boundaries.

mod common;

use catan_engine::config::GameConfig;
use catan_engine::game::{
    CardPlay, Game, GameError, GameState, InvalidMove, Move, PlayerIdentity, RollOutcome, Seat,
};
use catan_engine::heuristic::Heuristic;
use catan_engine::players::{Agent, RandomAgent, RoadRequest, TurnClock};
use catan_engine::types::{BuildingKind, Color, DevelopmentCard, PlayerKind, Resource};
use pretty_assertions::assert_eq;

use common::{coast, dev_card_total, edge, fund, resource_totals, table};

fn assert_distance_rule(state: &GameState) {
    for e in state.edges() {
        let (a, b) = e.nodes;
        assert!(
            state.building(a).is_none() || state.building(b).is_none(),
            "neighbouring buildings on {}",
            e.key
        );
    }
}

fn random_seats(count: usize) -> Vec<Seat> {
    Color::ORDERED
        .into_iter()
        .take(count)
        .enumerate()
        .map(|(seat, color)| {
            Seat::new(
                PlayerIdentity::new(seat as u8 + 1, color, PlayerKind::Ai),
                Box::new(RandomAgent::new(seat as u64 * 31 + 1)),
            )
        })
        .collect()
}

#[test]
fn random_games_conserve_cards() {
    for seed in [1, 2, 3] {
        let config = GameConfig {
            seed,
            round_limit: 80,
            ..GameConfig::default()
        };
        let mut game = Game::new(random_seats(4), config).unwrap();
        let summary = game.play().unwrap();

        assert!(summary.winner.is_some());
        assert_eq!(resource_totals(&game.state), vec![19; 5]);
        assert_eq!(dev_card_total(&game.state), 25);
        assert_distance_rule(&game.state);
        assert!(game.state.robber_tile() < game.state.tiles().len());
        for player in 0..4 {
            assert!(game.state.count_structure(player, BuildingKind::Settlement) <= 5);
            assert!(game.state.count_structure(player, BuildingKind::City) <= 4);
            assert!(game.state.count_structure(player, BuildingKind::Road) <= 15);
        }
        if let Some((holder, length)) = game.state.longest_road_holder() {
            assert!(length >= 5);
            assert_eq!(game.state.road_length(holder), length as usize);
        }
    }
}

/// Plays turns by hand so every single move can be inspected.
#[test]
fn victory_points_never_drop_during_own_turn() {
    let mut state = table(3);
    let mut agents: Vec<RandomAgent> = (0..3).map(|seat| RandomAgent::new(seat + 40)).collect();

    for player in [0, 1, 2, 2, 1, 0] {
        let agent = &mut agents[player];
        let site = agent.initial_placement(&state, player).unwrap();
        state.place_initial_settlement(player, site).unwrap();
        let road = agent
            .choose_road_location(&state, player, RoadRequest::Initial(site))
            .unwrap();
        state.place_road(player, road).unwrap();
    }

    let clock = TurnClock::unlimited();
    for turn in 0..150 {
        let player = turn % 3;
        let roll = state.roll_dice();
        if let RollOutcome::Seven { discards } = state.process_roll(roll, player).unwrap() {
            for (victim, count) in discards {
                let cards = agents[victim].robber_discard(&state, victim, count);
                state.discard(victim, cards).unwrap();
            }
            let choice = agents[player].robber(&state, player);
            state.move_robber(player, choice).unwrap();
        }

        let mut points = state.victory_points(player);
        loop {
            let mv = agents[player].turn_action(&state, player, &clock);
            state.apply_move(player, mv).unwrap();
            while state.free_roads(player) > 0 {
                match agents[player].choose_road_location(&state, player, RoadRequest::Free) {
                    Some(road) => {
                        state.place_road(player, road).unwrap();
                    }
                    None => {
                        state.forfeit_free_roads(player).unwrap();
                    }
                }
            }
            let now = state.victory_points(player);
            assert!(now >= points, "{mv} dropped {points} to {now}");
            points = now;
            if mv == Move::EndTurn {
                break;
            }
        }
        assert_eq!(resource_totals(&state), vec![19; 5]);
        assert_distance_rule(&state);
    }
}

#[test]
fn settlement_limit_is_five() {
    let mut state = table(2);
    let shore = coast(&state);
    for step in 0..5 {
        state.place_initial_settlement(0, shore[step * 3]).unwrap();
    }
    let sixth = state.place_initial_settlement(0, shore[15]);
    assert!(matches!(
        sixth,
        Err(GameError::MoveNotValid(InvalidMove::LimitReached(
            BuildingKind::Settlement
        )))
    ));
    assert_eq!(state.count_structure(0, BuildingKind::Settlement), 5);
}

#[test]
fn neighbouring_settlements_are_refused() {
    let mut state = table(2);
    let shore = coast(&state);
    state.place_initial_settlement(0, shore[4]).unwrap();
    assert!(state.check_for_nearby_occupancy(shore[5]));
    assert!(matches!(
        state.place_initial_settlement(1, shore[5]),
        Err(GameError::MoveNotValid(InvalidMove::DistanceRule(_)))
    ));
    assert!(!state.check_for_nearby_occupancy(shore[6]));
    state.place_initial_settlement(1, shore[6]).unwrap();
    assert_distance_rule(&state);
}

#[test]
fn unconnected_roads_are_refused() {
    let mut state = table(2);
    let shore = coast(&state);
    state.place_initial_settlement(0, shore[0]).unwrap();
    state.place_road(0, edge(&state, shore[0], shore[1])).unwrap();
    fund(&mut state, 0, &[Resource::Wood, Resource::Clay]);
    assert!(matches!(
        state.place_road(0, edge(&state, shore[10], shore[11])),
        Err(GameError::MoveNotValid(InvalidMove::NotConnected(_)))
    ));
    assert!(state.has_potential_road(0));
    assert_eq!(state.player(0).resources.total(), 2, "a refused road costs nothing");
}

#[test]
fn monopoly_on_an_unheld_resource_takes_nothing() {
    let mut state = table(3);
    fund(&mut state, 1, &[Resource::Wood, Resource::Clay]);
    state.give_development_card(0, DevelopmentCard::Monopoly).unwrap();
    state.end_turn(0);
    state
        .play_development_card(0, CardPlay::Monopoly(Resource::Rock))
        .unwrap();
    assert_eq!(state.player(0).resources.total(), 0);
    assert_eq!(state.player(1).resources.total(), 2);
    assert_eq!(dev_card_total(&state), 25);
}

#[test]
fn give_then_return_restores_the_bank() {
    let mut state = table(2);
    let before = *state.resource_deck();
    state.give_card(1, Resource::Clay).unwrap();
    assert_eq!(state.resource_deck().get(Resource::Clay), 18);
    state.return_card(1, Resource::Clay).unwrap();
    assert_eq!(*state.resource_deck(), before);
    assert!(state.return_card(1, Resource::Clay).is_err());
}

#[test]
fn simulations_leave_the_original_untouched() {
    let mut state = table(2);
    let shore = coast(&state);
    state.place_initial_settlement(0, shore[0]).unwrap();
    state.place_road(0, edge(&state, shore[0], shore[1])).unwrap();
    fund(&mut state, 0, &[Resource::Wood, Resource::Clay]);

    let heuristic = Heuristic::default();
    let before = heuristic.evaluate(&state, 0);
    let mv = Move::BuildRoad(edge(&state, shore[1], shore[2]));

    let mut sim = state.simulation();
    sim.apply_move(0, mv).unwrap();
    let mut direct = state.clone();
    direct.apply_move(0, mv).unwrap();

    assert_eq!(heuristic.evaluate(&sim, 0), heuristic.evaluate(&direct, 0));
    assert_eq!(heuristic.evaluate(&state, 0), before);
    assert_eq!(state.roads_of(0).count(), 1);
    assert_eq!(state.player(0).resources.total(), 2);
    assert_eq!(state.dev_deck().len(), 25);
}
