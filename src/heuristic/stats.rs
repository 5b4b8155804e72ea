use std::collections::{BTreeMap, BTreeSet};

use itertools::Itertools;
use strum::IntoEnumIterator;

use crate::board::NodeId;
use crate::game::action::PlayerId;
use crate::game::resources::cost_of;
use crate::game::state::GameState;
use crate::types::{BuildingKind, DevelopmentCard, PortKind, Purchase, Resource};

/// Production profile of one of the player's buildings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SiteStats {
    pub node: NodeId,
    /// Sum of dice-frequency weights of the surrounding tiles.
    pub frequency: u32,
    /// Number of producing tiles around the site.
    pub adjacency: u32,
}

/// Everything the modifier chain reads, gathered once per evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct Stats {
    pub player: PlayerId,
    pub turn: u32,
    pub target_score: u8,
    pub victory_points: u8,
    pub settlements: Vec<SiteStats>,
    pub cities: Vec<SiteStats>,
    pub ports: Vec<PortKind>,
    pub resources: BTreeMap<Resource, u8>,
    pub dev_cards: BTreeMap<DevelopmentCard, u8>,
    pub dev_cards_played: u8,
    pub road_count: usize,
    pub longest_road: usize,
    pub army: u8,
    pub has_longest_road: bool,
    pub has_largest_army: bool,
    /// Opponents and their victory points.
    pub opponents: Vec<(PlayerId, u8)>,
    pub max_opponent_army: u8,
    /// Frequency-weighted pips per resource, robber excluded.
    pub roll_map: BTreeMap<Resource, u32>,
    /// Empty intersections on the player's roads that pass the distance rule.
    pub available_settlements: usize,
    /// Opponent buildings sitting on the ends of the player's roads.
    pub opponents_on_roads: usize,
    /// Own buildings touched by at least one own road.
    pub connected_settlements: usize,
    pub average_distance: Option<f64>,
    pub affordable: BTreeSet<Purchase>,
}

impl Stats {
    pub fn collect(state: &GameState, player: PlayerId) -> Self {
        let topology = state.topology();
        let hand = state.player(player);

        let site = |node: NodeId| {
            let producing = topology
                .intersection(node)
                .tiles
                .iter()
                .map(|tile| topology.tile(*tile))
                .filter(|tile| !tile.is_desert());
            let (frequency, adjacency) = producing.fold((0, 0), |(freq, count), tile| {
                (freq + tile.frequency() as u32, count + 1)
            });
            SiteStats {
                node,
                frequency,
                adjacency,
            }
        };
        let settlements: Vec<SiteStats> = state.settlements_of(player).map(site).collect();
        let cities: Vec<SiteStats> = state.cities_of(player).map(site).collect();

        let road_nodes: BTreeSet<NodeId> = state
            .roads_of(player)
            .flat_map(|edge| {
                let (a, b) = topology.edge(edge).nodes;
                [a, b]
            })
            .collect();
        let available_settlements = road_nodes
            .iter()
            .filter(|node| {
                state.building(**node).is_none() && !state.check_for_nearby_occupancy(**node)
            })
            .count();
        let opponents_on_roads = road_nodes
            .iter()
            .filter(|node| matches!(state.building(**node), Some(s) if s.owner() != player))
            .count();
        let connected_settlements = road_nodes
            .iter()
            .filter(|node| state.owns_building_at(player, **node))
            .count();

        let holdings: Vec<NodeId> = state.holdings_of(player).map(|(node, _)| node).collect();
        let distances: Vec<usize> = holdings
            .iter()
            .tuple_combinations()
            .filter_map(|(a, b)| topology.distance(*a, *b))
            .collect();
        let average_distance = (!distances.is_empty())
            .then(|| distances.iter().sum::<usize>() as f64 / distances.len() as f64);

        let has_settlement = !settlements.is_empty();
        let affordable = Purchase::iter()
            .filter(|purchase| hand.resources.can_afford(&cost_of(*purchase)))
            .filter(|purchase| *purchase != Purchase::City || has_settlement)
            .collect();

        let opponents = (0..state.players().len())
            .filter(|seat| *seat != player)
            .map(|seat| (seat, state.victory_points(seat)))
            .collect();
        let max_opponent_army = state
            .players()
            .iter()
            .enumerate()
            .filter(|(seat, _)| *seat != player)
            .map(|(_, other)| other.played_soldiers)
            .max()
            .unwrap_or(0);

        Self {
            player,
            turn: state.turn,
            target_score: state.target_score(),
            victory_points: state.victory_points(player),
            settlements,
            cities,
            ports: state.ports_of(player),
            resources: hand.resource_counts(),
            dev_cards: hand.dev_card_counts(),
            dev_cards_played: hand.dev_cards_played,
            road_count: state.count_structure(player, BuildingKind::Road),
            longest_road: state.road_length(player),
            army: hand.played_soldiers,
            has_longest_road: state.longest_road_holder().map(|(p, _)| p) == Some(player),
            has_largest_army: state.largest_army_holder().map(|(p, _)| p) == Some(player),
            opponents,
            max_opponent_army,
            roll_map: state.roll_map(player),
            available_settlements,
            opponents_on_roads,
            connected_settlements,
            average_distance,
            affordable,
        }
    }

    pub fn hand_size(&self) -> u32 {
        self.resources.values().map(|v| *v as u32).sum()
    }

    pub fn dev_card_total(&self) -> u32 {
        self.dev_cards.values().map(|v| *v as u32).sum()
    }

    pub fn building_count(&self) -> usize {
        self.settlements.len() + self.cities.len()
    }

    pub fn best_opponent_points(&self) -> u8 {
        self.opponents.iter().map(|(_, vp)| *vp).max().unwrap_or(0)
    }

    pub fn rolls_of(&self, resource: Resource) -> u32 {
        self.roll_map.get(&resource).copied().unwrap_or(0)
    }
}
