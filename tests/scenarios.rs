//! End-to-end rule scenarios on the default board.

mod common;

use catan_engine::game::{
    CardPlay, GameState, Move, ResourceBundle, RobberChoice, RollOutcome, run_turn,
};
use catan_engine::heuristic::Heuristic;
use catan_engine::players::{MinimaxAgent, TurnClock};
use catan_engine::types::{DevelopmentCard, Resource};
use pretty_assertions::assert_eq;

use common::{coast, dev_card_total, edge, fund, fund_road, node, table};

#[test]
fn default_board_starts_with_full_decks() {
    let state = table(3);
    let desert = state.topology().tile_by_letter('n').unwrap();
    assert!(desert.is_desert());
    assert_eq!(desert.number, 7);
    assert!(state.contains_robber(desert.id));
    assert_eq!(state.robber_tile(), desert.id);

    let a = state.topology().tile_by_letter('a').unwrap();
    assert_eq!((a.resource, a.number), (Some(Resource::Wheat), 9));

    assert_eq!(state.resource_deck().total(), 95);
    assert_eq!(state.dev_deck().len(), 25);
    assert_eq!(state.tiles().len(), 19);
    assert_eq!(state.intersections().len(), 54);
    assert_eq!(state.edges().len(), 72);
    assert_eq!(state.port_list().len(), 9);
}

#[test]
fn rolls_pay_settlements_once_and_cities_twice() {
    let mut state = table(2);
    let corner = node(&state, "a1");
    state.place_initial_settlement(0, corner).unwrap();

    let outcome = state.process_roll(9, 1).unwrap();
    let RollOutcome::Produced { gains, shortages } = outcome else {
        panic!("nine is not a seven");
    };
    assert!(shortages.is_empty());
    assert_eq!(gains.len(), 1);
    assert_eq!(state.player(0).resources.get(Resource::Wheat), 1);

    fund(
        &mut state,
        0,
        &[Resource::Wheat, Resource::Rock, Resource::Rock, Resource::Rock],
    );
    state.place_city(0, corner).unwrap();
    assert_eq!(state.player(0).resources.total(), 0);

    state.process_roll(9, 1).unwrap();
    assert_eq!(state.player(0).resources.get(Resource::Wheat), 2);
    assert_eq!(state.player(1).resources.total(), 0);
}

#[test]
fn seven_halves_only_hands_over_seven() {
    use Resource::*;
    let mut state = table(2);
    fund(&mut state, 0, &[Wheat, Wheat, Wood, Wood, Sheep, Sheep, Clay, Rock]);
    fund(&mut state, 1, &[Wheat, Wood, Wood, Sheep, Sheep, Clay, Rock]);

    let outcome = state.process_roll(7, 1).unwrap();
    assert_eq!(outcome, RollOutcome::Seven { discards: vec![(0, 4)] });
    assert_eq!(state.discard_owed(0), 4);
    assert_eq!(state.discard_owed(1), 0);

    let away = RobberChoice {
        tile: state.topology().tile_by_letter('a').unwrap().id,
        victim: None,
    };
    assert!(state.move_robber(1, away).is_err(), "discards come first");

    // wheat, wood and two sheep
    let discarded = ResourceBundle::from_counts([1, 1, 2, 0, 0]);
    state.discard(0, discarded).unwrap();
    assert_eq!(state.player(0).resources.total(), 4);
    assert_eq!(state.resource_deck().total(), 95 - 15 + 4);

    state.move_robber(1, away).unwrap();
    assert_eq!(state.robber_tile(), away.tile);
}

fn extend(state: &mut GameState, player: usize, path: &[usize]) {
    for pair in path.windows(2) {
        fund_road(state, player);
        let road = edge(state, pair[0], pair[1]);
        state.place_road(player, road).unwrap();
    }
}

#[test]
fn longest_road_moves_only_on_strict_improvement() {
    let mut state = table(2);
    let shore = coast(&state);

    state.place_initial_settlement(0, shore[0]).unwrap();
    state.place_road(0, edge(&state, shore[0], shore[1])).unwrap();
    state.place_initial_settlement(1, shore[15]).unwrap();
    state.place_road(1, edge(&state, shore[15], shore[16])).unwrap();

    extend(&mut state, 0, &shore[1..=4]);
    assert_eq!(state.longest_road_holder(), None, "four roads earn nothing");

    extend(&mut state, 0, &shore[4..=5]);
    assert_eq!(state.longest_road_holder(), Some((0, 5)));
    assert_eq!(state.victory_points(0), 3);

    extend(&mut state, 1, &shore[16..=21]);
    assert_eq!(state.longest_road_holder(), Some((1, 6)));
    assert_eq!(state.victory_points(0), 1);
    assert_eq!(state.victory_points(1), 3);

    extend(&mut state, 0, &shore[5..=6]);
    assert_eq!(state.road_length(0), 6);
    assert_eq!(state.longest_road_holder(), Some((1, 6)), "a tie keeps the holder");
}

#[test]
fn monopoly_collects_every_opponent_card() {
    let mut state = table(3);
    fund(&mut state, 1, &[Resource::Sheep, Resource::Sheep, Resource::Wood]);
    fund(&mut state, 2, &[Resource::Sheep; 3]);
    state.give_development_card(0, DevelopmentCard::Monopoly).unwrap();
    assert!(
        state
            .play_development_card(0, CardPlay::Monopoly(Resource::Sheep))
            .is_err(),
        "a fresh card waits a turn"
    );

    state.end_turn(0);
    state
        .play_development_card(0, CardPlay::Monopoly(Resource::Sheep))
        .unwrap();
    assert_eq!(state.player(0).resources.get(Resource::Sheep), 5);
    assert_eq!(state.player(1).resources.get(Resource::Sheep), 0);
    assert_eq!(state.player(2).resources.get(Resource::Sheep), 0);
    assert_eq!(state.player(1).resources.get(Resource::Wood), 1);
    assert_eq!(state.player(0).dev_cards_played, 1);
}

#[test]
fn look_ahead_builds_the_available_settlement() {
    let mut state = table(2);
    let shore = coast(&state);
    state.place_initial_settlement(0, shore[0]).unwrap();
    state.place_road(0, edge(&state, shore[0], shore[1])).unwrap();
    extend(&mut state, 0, &shore[1..=2]);
    fund(
        &mut state,
        0,
        &[Resource::Wood, Resource::Clay, Resource::Sheep, Resource::Wheat],
    );
    assert_eq!(state.settlement_sites(0, false), vec![shore[2]]);

    let mut agent = MinimaxAgent::new(Heuristic::default(), 1, 5);
    let applied = run_turn(&mut state, &mut agent, 0, &TurnClock::unlimited()).unwrap();

    assert_eq!(applied.first(), Some(&Move::BuildSettlement(shore[2])));
    assert_eq!(applied.last(), Some(&Move::EndTurn));
    assert_eq!(state.settlements_of(0).count(), 2);
    assert_eq!(state.victory_points(0), 2);
}

fn soldier(state: &mut GameState, player: usize, letter: char) {
    let tile = state.topology().tile_by_letter(letter).unwrap().id;
    let choice = RobberChoice { tile, victim: None };
    state.play_development_card(player, CardPlay::Soldier(choice)).unwrap();
    state.end_turn(player);
}

#[test]
fn largest_army_needs_three_soldiers_and_a_strict_lead() {
    let mut state = table(2);
    state.place_initial_settlement(1, node(&state, "a1")).unwrap();
    fund(&mut state, 1, &[Resource::Sheep]);
    for (player, count) in [(0, 3), (1, 4)] {
        for _ in 0..count {
            state.give_development_card(player, DevelopmentCard::Soldier).unwrap();
        }
        state.end_turn(player);
    }
    assert_eq!(state.dev_deck().len(), 18);

    // the only building on tile a is blue's, so the first soldier robs it
    soldier(&mut state, 0, 'a');
    assert_eq!(state.player(0).resources.get(Resource::Sheep), 1);
    assert_eq!(state.player(1).resources.total(), 0);
    soldier(&mut state, 0, 'n');
    assert_eq!(state.largest_army_holder(), None, "two soldiers earn nothing");
    soldier(&mut state, 0, 'b');
    assert_eq!(state.largest_army_holder(), Some((0, 3)));
    assert_eq!(state.victory_points(0), 2);

    for letter in ['a', 'n', 'b'] {
        soldier(&mut state, 1, letter);
    }
    assert_eq!(state.player(1).played_soldiers, 3);
    assert_eq!(state.largest_army_holder(), Some((0, 3)), "a tie keeps the holder");

    soldier(&mut state, 1, 'a');
    assert_eq!(state.largest_army_holder(), Some((1, 4)));
    assert_eq!(state.victory_points(0), 0);
    assert_eq!(state.victory_points(1), 3);

    assert_eq!(state.dev_deck().len(), 18, "soldiers stay in front of their owner");
    assert_eq!(dev_card_total(&state), 25);
}

#[test]
fn settlement_cuts_the_longest_road() {
    let mut state = table(2);
    let shore = coast(&state);
    state.place_initial_settlement(0, shore[0]).unwrap();
    state.place_road(0, edge(&state, shore[0], shore[1])).unwrap();
    extend(&mut state, 0, &shore[1..=6]);
    assert_eq!(state.longest_road_holder(), Some((0, 6)));
    assert_eq!(state.victory_points(0), 3);

    // an interior stop of the trail with an inland edge to approach from
    let (cut, inland) = (2..=4)
        .find_map(|i| {
            let corner = state.topology().intersection(shore[i]);
            corner
                .neighbors
                .iter()
                .find(|n| !shore.contains(n))
                .map(|n| (shore[i], *n))
        })
        .unwrap();
    let start = state
        .topology()
        .intersection(inland)
        .neighbors
        .iter()
        .copied()
        .find(|n| *n != cut && state.settlement_sites(1, true).contains(n))
        .unwrap();
    state.place_initial_settlement(1, start).unwrap();
    state.place_road(1, edge(&state, start, inland)).unwrap();
    extend(&mut state, 1, &[inland, cut]);
    fund(
        &mut state,
        1,
        &[Resource::Wood, Resource::Clay, Resource::Sheep, Resource::Wheat],
    );
    state.place_settlement(1, cut).unwrap();

    assert!(state.road_length(0) < 5, "trail still {}", state.road_length(0));
    assert_eq!(state.longest_road_holder(), None);
    assert_eq!(state.victory_points(0), 1);
    assert_eq!(state.victory_points(1), 2);
}
