#![allow(dead_code)]

use catan_engine::board::{EdgeId, NodeId};
use catan_engine::config::GameConfig;
use catan_engine::game::{GameState, PlayerIdentity};
use catan_engine::types::{Color, PlayerKind, Resource};

/// Fresh default-layout state with `seats` AI players in colour order.
pub fn table(seats: usize) -> GameState {
    let identities = Color::ORDERED
        .into_iter()
        .take(seats)
        .enumerate()
        .map(|(seat, color)| PlayerIdentity::new(seat as u8 + 1, color, PlayerKind::Ai))
        .collect();
    GameState::new(identities, &GameConfig::default())
}

pub fn node(state: &GameState, key: &str) -> NodeId {
    state
        .topology()
        .node(key)
        .unwrap_or_else(|| panic!("no intersection {key}"))
}

pub fn edge(state: &GameState, a: NodeId, b: NodeId) -> EdgeId {
    state
        .topology()
        .edge_between(a, b)
        .unwrap_or_else(|| panic!("no edge between #{a} and #{b}"))
}

/// Moves the listed cards from the bank into the player's hand.
pub fn fund(state: &mut GameState, player: usize, cards: &[Resource]) {
    for resource in cards {
        state.give_card(player, *resource).unwrap();
    }
}

pub fn fund_road(state: &mut GameState, player: usize) {
    fund(state, player, &[Resource::Wood, Resource::Clay]);
}

/// Every intersection on the coastline, in walking order.
pub fn coast(state: &GameState) -> Vec<NodeId> {
    let topology = state.topology();
    let coastal = |edge: &EdgeId| topology.edge(*edge).tiles.len() == 1;
    let start = topology
        .edges()
        .iter()
        .find(|e| e.tiles.len() == 1)
        .map(|e| e.nodes.0)
        .unwrap();
    let mut walk = vec![start];
    let mut previous = None;
    let mut current = start;
    loop {
        let next = topology
            .intersection(current)
            .edges
            .iter()
            .filter(|e| coastal(e))
            .map(|e| topology.edge(*e).other(current))
            .find(|n| Some(*n) != previous)
            .unwrap();
        if next == start {
            return walk;
        }
        walk.push(next);
        previous = Some(current);
        current = next;
    }
}

/// Per-resource totals across the bank and every hand.
pub fn resource_totals(state: &GameState) -> Vec<u32> {
    Resource::ALL
        .into_iter()
        .map(|resource| {
            let held: u32 = state
                .players()
                .iter()
                .map(|p| p.resources.get(resource) as u32)
                .sum();
            held + state.resource_deck().get(resource) as u32
        })
        .collect()
}

/// Development cards in the deck, in hands and spent as soldiers.
pub fn dev_card_total(state: &GameState) -> usize {
    let held: usize = state
        .players()
        .iter()
        .map(|p| p.dev_card_total() + p.played_soldiers as usize)
        .sum();
    held + state.dev_deck().len()
}
