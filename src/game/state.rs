use std::fmt;
use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::board::{Edge, EdgeId, Intersection, NodeId, Port, Tile, TileId, Topology};
use crate::config::{GameConfig, SetupError};
use crate::game::action::PlayerId;
use crate::game::bank::Bank;
use crate::game::players::{MAX_ROADS, PlayerIdentity, PlayerState};
use crate::game::resources::{BUILDING_COSTS, ResourceBundle};
use crate::game::roads;
use crate::types::{BuildingKind, DevelopmentCard, PortKind, Purchase, Resource};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Structure {
    Settlement { player: PlayerId },
    City { player: PlayerId },
}

impl Structure {
    pub fn owner(&self) -> PlayerId {
        match self {
            Structure::Settlement { player } | Structure::City { player } => *player,
        }
    }

    /// Resource cards produced per matching roll.
    pub fn yield_multiplier(&self) -> u8 {
        match self {
            Structure::Settlement { .. } => 1,
            Structure::City { .. } => 2,
        }
    }
}

/// Holder and size of a special award (road length or army size).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Award {
    pub holder: Option<PlayerId>,
    pub size: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidMove {
    #[error("no player #{0}")]
    UnknownPlayer(PlayerId),
    #[error("intersection {0} is already occupied")]
    NodeOccupied(String),
    #[error("intersection {0} is within one road of another building")]
    DistanceRule(String),
    #[error("{0} does not connect to the player's roads or buildings")]
    NotConnected(String),
    #[error("initial road must touch intersection {0}")]
    NotAnchored(String),
    #[error("no {0} pieces left")]
    LimitReached(BuildingKind),
    #[error("insufficient resources for {0}")]
    InsufficientResources(Purchase),
    #[error("edge {0} already holds a road")]
    EdgeOccupied(String),
    #[error("intersection {0} does not hold the player's settlement")]
    NotOwnSettlement(String),
    #[error("the development deck is empty")]
    DeckEmpty,
    #[error("no playable {0} card in hand")]
    CardNotPlayable(DevelopmentCard),
    #[error("the robber must move to a different tile")]
    RobberNotMoved,
    #[error("player #{0} has no building on the robber's tile")]
    InvalidVictim(PlayerId),
    #[error("a victim must be chosen among {0:?}")]
    VictimRequired(Vec<PlayerId>),
    #[error("player #{0} owes no discard")]
    NoDiscardOwed(PlayerId),
    #[error("expected a discard of {expected} cards, got {actual}")]
    WrongDiscardSize { expected: u8, actual: u32 },
    #[error("discard includes cards the player does not hold")]
    DiscardNotHeld,
    #[error("cannot trade {give} for {get}")]
    SameResource { give: Resource, get: Resource },
    #[error("need {ratio} {give} to trade, have {held}")]
    TradeRatio { give: Resource, ratio: u8, held: u8 },
    #[error("the bank has no {0} left")]
    BankEmpty(Resource),
    #[error("no free road placements are pending")]
    NoFreeRoads,
    #[error("no {kind} #{id} on this board")]
    NoSuchSite { kind: &'static str, id: usize },
    #[error("dice total {0} is outside 2..=12")]
    InvalidRoll(u8),
    #[error("discards are still owed")]
    DiscardsPending,
    #[error("player holds no {0}")]
    NotHeld(Resource),
    #[error("no {0} card left in the deck")]
    CardNotInDeck(DevelopmentCard),
}

#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error(transparent)]
    Setup(#[from] SetupError),
    #[error("move not valid: {0}")]
    MoveNotValid(#[from] InvalidMove),
    #[error("bank exhausted: {requested} {resource} owed, {available} available")]
    BankExhausted {
        resource: Resource,
        requested: u32,
        available: u8,
    },
    #[error("agent for player #{player} failed: {reason}")]
    AgentFailure { player: PlayerId, reason: String },
}

/// The authoritative game data: board occupancy, hands, decks, robber and
/// awards. Only the rules in [`crate::game::rules`] mutate it; cloning it is a
/// flat copy plus a shared pointer to the static topology.
#[derive(Debug, Clone)]
pub struct GameState {
    topology: Arc<Topology>,
    pub(crate) players: Vec<PlayerState>,
    pub(crate) bank: Bank,
    pub(crate) buildings: Vec<Option<Structure>>,
    pub(crate) roads: Vec<Option<PlayerId>>,
    pub(crate) robber: TileId,
    pub(crate) longest_road: Award,
    pub(crate) largest_army: Award,
    pub(crate) pending_discards: Vec<(PlayerId, u8)>,
    pub(crate) free_roads: Option<(PlayerId, u8)>,
    pub(crate) initial_anchor: Option<(PlayerId, NodeId)>,
    pub turn: u32,
    pub round: u32,
    target_score: u8,
    in_simulation: bool,
    pub(crate) rng: StdRng,
}

impl GameState {
    /// Fresh state in the given seat order, with the layout and RNG taken
    /// from the configuration.
    pub fn new(identities: Vec<PlayerIdentity>, config: &GameConfig) -> Self {
        let mut rng = StdRng::seed_from_u64(config.seed);
        let topology = Topology::build(config.layout(), &mut rng);
        Self::from_parts(Arc::new(topology), identities, config.target_score, rng)
    }

    pub fn from_parts(
        topology: Arc<Topology>,
        identities: Vec<PlayerIdentity>,
        target_score: u8,
        mut rng: StdRng,
    ) -> Self {
        let bank = Bank::standard(&mut rng);
        let robber = topology.desert().map(|tile| tile.id).unwrap_or_default();
        let node_count = topology.intersections().len();
        let edge_count = topology.edges().len();
        Self {
            topology,
            players: identities.into_iter().map(PlayerState::new).collect(),
            bank,
            buildings: vec![None; node_count],
            roads: vec![None; edge_count],
            robber,
            longest_road: Award::default(),
            largest_army: Award::default(),
            pending_discards: Vec::new(),
            free_roads: None,
            initial_anchor: None,
            turn: 0,
            round: 0,
            target_score,
            in_simulation: false,
            rng,
        }
    }

    /// An isolated copy for look-ahead. It logs nothing and reshuffles its own
    /// development deck so the real draw order stays hidden.
    pub fn simulation(&self) -> GameState {
        let mut clone = self.clone();
        clone.in_simulation = true;
        let GameState { bank, rng, .. } = &mut clone;
        bank.shuffle_development_deck(rng);
        clone
    }

    pub fn is_simulation(&self) -> bool {
        self.in_simulation
    }

    pub(crate) fn log_action(&self, player: PlayerId, args: fmt::Arguments<'_>) {
        if self.in_simulation {
            return;
        }
        let name = self
            .players
            .get(player)
            .map(|p| p.identity.name.as_str())
            .unwrap_or("?");
        log::info!("[turn {}] {} {}", self.turn, name, args);
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn shared_topology(&self) -> Arc<Topology> {
        Arc::clone(&self.topology)
    }

    pub fn tiles(&self) -> &[Tile] {
        self.topology.tiles()
    }

    pub fn intersections(&self) -> &[Intersection] {
        self.topology.intersections()
    }

    pub fn edges(&self) -> &[Edge] {
        self.topology.edges()
    }

    pub fn port_list(&self) -> &[Port] {
        self.topology.ports()
    }

    pub fn players(&self) -> &[PlayerState] {
        &self.players
    }

    pub fn player(&self, player: PlayerId) -> &PlayerState {
        &self.players[player]
    }

    pub fn resource_deck(&self) -> &ResourceBundle {
        self.bank.resources()
    }

    pub fn dev_deck(&self) -> &[DevelopmentCard] {
        self.bank.development_deck()
    }

    pub fn building_costs(&self) -> &'static [(Purchase, ResourceBundle)] {
        &BUILDING_COSTS
    }

    pub fn target_score(&self) -> u8 {
        self.target_score
    }

    pub fn longest_road_holder(&self) -> Option<(PlayerId, u8)> {
        self.longest_road.holder.map(|p| (p, self.longest_road.size))
    }

    pub fn largest_army_holder(&self) -> Option<(PlayerId, u8)> {
        self.largest_army.holder.map(|p| (p, self.largest_army.size))
    }

    pub fn robber_tile(&self) -> TileId {
        self.robber
    }

    pub fn contains_robber(&self, tile: TileId) -> bool {
        self.robber == tile
    }

    pub fn building(&self, node: NodeId) -> Option<Structure> {
        self.buildings[node]
    }

    pub fn road_owner(&self, edge: EdgeId) -> Option<PlayerId> {
        self.roads[edge]
    }

    pub fn pending_discards(&self) -> &[(PlayerId, u8)] {
        &self.pending_discards
    }

    /// Free road placements left from a road-building card.
    pub fn free_roads(&self, player: PlayerId) -> u8 {
        match self.free_roads {
            Some((owner, count)) if owner == player => count,
            _ => 0,
        }
    }

    pub fn settlements_of(&self, player: PlayerId) -> impl Iterator<Item = NodeId> + '_ {
        self.buildings
            .iter()
            .enumerate()
            .filter_map(move |(node, b)| match b {
                Some(Structure::Settlement { player: p }) if *p == player => Some(node),
                _ => None,
            })
    }

    pub fn cities_of(&self, player: PlayerId) -> impl Iterator<Item = NodeId> + '_ {
        self.buildings
            .iter()
            .enumerate()
            .filter_map(move |(node, b)| match b {
                Some(Structure::City { player: p }) if *p == player => Some(node),
                _ => None,
            })
    }

    /// Every intersection holding one of the player's buildings, with its
    /// yield multiplier.
    pub fn holdings_of(&self, player: PlayerId) -> impl Iterator<Item = (NodeId, u8)> + '_ {
        self.buildings
            .iter()
            .enumerate()
            .filter_map(move |(node, b)| match b {
                Some(s) if s.owner() == player => Some((node, s.yield_multiplier())),
                _ => None,
            })
    }

    pub fn roads_of(&self, player: PlayerId) -> impl Iterator<Item = EdgeId> + '_ {
        self.roads
            .iter()
            .enumerate()
            .filter_map(move |(edge, owner)| (*owner == Some(player)).then_some(edge))
    }

    pub fn count_structure(&self, player: PlayerId, kind: BuildingKind) -> usize {
        match kind {
            BuildingKind::Settlement => self.settlements_of(player).count(),
            BuildingKind::City => self.cities_of(player).count(),
            BuildingKind::Road => self.roads_of(player).count(),
        }
    }

    /// True if any intersection one edge away from `node` is built on.
    pub fn check_for_nearby_occupancy(&self, node: NodeId) -> bool {
        self.topology
            .intersection(node)
            .neighbors
            .iter()
            .any(|n| self.buildings[*n].is_some())
    }

    pub fn owns_building_at(&self, player: PlayerId, node: NodeId) -> bool {
        matches!(self.buildings[node], Some(s) if s.owner() == player)
    }

    /// Whether a road of `player` may continue from `node`: the player builds
    /// there, or has a road ending there not cut by an opponent's building.
    pub fn node_reaches_network(&self, player: PlayerId, node: NodeId) -> bool {
        match self.buildings[node] {
            Some(s) if s.owner() == player => true,
            Some(_) => false,
            None => self
                .topology
                .intersection(node)
                .edges
                .iter()
                .any(|e| self.roads[*e] == Some(player)),
        }
    }

    /// Whether the player has a piece left and an empty edge touching their
    /// network.
    pub fn has_potential_road(&self, player: PlayerId) -> bool {
        if self.count_structure(player, BuildingKind::Road) >= MAX_ROADS {
            return false;
        }
        self.topology.edges().iter().any(|edge| {
            self.roads[edge.id].is_none()
                && (self.node_reaches_network(player, edge.nodes.0)
                    || self.node_reaches_network(player, edge.nodes.1))
        })
    }

    pub fn ports_of(&self, player: PlayerId) -> Vec<PortKind> {
        self.topology
            .ports()
            .iter()
            .filter(|port| port.nodes.iter().any(|n| self.owns_building_at(player, *n)))
            .map(|port| port.kind)
            .collect()
    }

    /// Best bank-trade ratio available to the player when giving `resource`.
    pub fn trade_ratio(&self, player: PlayerId, resource: Resource) -> u8 {
        self.ports_of(player)
            .into_iter()
            .filter(|kind| kind.applies_to(resource))
            .map(PortKind::ratio)
            .min()
            .unwrap_or(4)
    }

    /// Longest simple trail over the player's roads.
    pub fn road_length(&self, player: PlayerId) -> usize {
        let owned: Vec<(NodeId, NodeId)> = self
            .roads_of(player)
            .map(|e| self.topology.edge(e).nodes)
            .collect();
        roads::longest_road(&owned, |node| {
            matches!(self.buildings[node], Some(s) if s.owner() != player)
        })
    }

    /// Roll-map for a player: expected pips per resource over a dice cycle,
    /// ignoring the tile under the robber.
    pub fn roll_map(&self, player: PlayerId) -> std::collections::BTreeMap<Resource, u32> {
        self.topology
            .production(self.holdings_of(player), Some(self.robber))
    }

    pub fn victory_points(&self, player: PlayerId) -> u8 {
        self.players[player].victory_points
    }

    pub fn leader(&self) -> Option<PlayerId> {
        (0..self.players.len()).max_by_key(|p| (self.players[*p].victory_points, usize::MAX - p))
    }

    pub fn winner(&self) -> Option<PlayerId> {
        (0..self.players.len()).find(|p| self.players[*p].victory_points >= self.target_score)
    }
}
