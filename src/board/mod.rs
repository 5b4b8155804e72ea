use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use itertools::Itertools;
use petgraph::algo::dijkstra;
use petgraph::graphmap::UnGraphMap;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::coords::{CubeCoord, Direction};
use crate::types::{PortKind, Resource};

pub mod layout;

use layout::{DESERT_NUMBER, PORTS, TILE_POSITIONS};

pub type TileId = usize;
pub type NodeId = usize;
pub type EdgeId = usize;

pub const TILE_COUNT: usize = 19;
pub const NODE_COUNT: usize = 54;
pub const EDGE_COUNT: usize = 72;

/// Relative weight of a dice number: how many of the 36 two-dice outcomes
/// produce it, with 7 weighted zero.
pub fn frequency(number: u8) -> u8 {
    match number {
        6 | 8 => 5,
        5 | 9 => 4,
        4 | 10 => 3,
        3 | 11 => 2,
        2 | 12 => 1,
        _ => 0,
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tile {
    pub id: TileId,
    pub letter: char,
    pub coord: CubeCoord,
    pub resource: Option<Resource>,
    pub number: u8,
    pub nodes: SmallVec<[NodeId; 6]>,
    pub edges: SmallVec<[EdgeId; 6]>,
}

impl Tile {
    pub fn is_desert(&self) -> bool {
        self.resource.is_none()
    }

    pub fn frequency(&self) -> u8 {
        frequency(self.number)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Intersection {
    pub id: NodeId,
    pub key: String,
    pub tiles: SmallVec<[TileId; 3]>,
    pub edges: SmallVec<[EdgeId; 3]>,
    pub neighbors: SmallVec<[NodeId; 3]>,
    pub port: Option<PortKind>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    pub id: EdgeId,
    pub key: String,
    pub tiles: SmallVec<[TileId; 2]>,
    pub nodes: (NodeId, NodeId),
}

impl Edge {
    pub fn touches(&self, node: NodeId) -> bool {
        self.nodes.0 == node || self.nodes.1 == node
    }

    pub fn other(&self, node: NodeId) -> NodeId {
        if self.nodes.0 == node {
            self.nodes.1
        } else {
            self.nodes.0
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Port {
    pub kind: PortKind,
    pub nodes: [NodeId; 2],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MapLayout {
    #[default]
    Default,
    Random,
}

impl fmt::Display for MapLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MapLayout::Default => "default",
            MapLayout::Random => "random",
        };
        write!(f, "{label}")
    }
}

impl FromStr for MapLayout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "default" => Ok(MapLayout::Default),
            "random" => Ok(MapLayout::Random),
            _ => Err(format!("unknown map layout: {s}")),
        }
    }
}

/// Static board topology. Built once per game and shared between every clone
/// of the game state.
#[derive(Debug, Clone)]
pub struct Topology {
    tiles: Vec<Tile>,
    intersections: Vec<Intersection>,
    edges: Vec<Edge>,
    ports: Vec<Port>,
    node_keys: HashMap<String, NodeId>,
    graph: UnGraphMap<NodeId, EdgeId>,
}

impl Topology {
    pub fn standard() -> Self {
        Self::from_assignment(&layout::default_resources(), &layout::default_numbers())
    }

    pub fn build(layout: MapLayout, rng: &mut impl rand::Rng) -> Self {
        match layout {
            MapLayout::Default => Self::standard(),
            MapLayout::Random => {
                let mut resources = layout::default_resources();
                resources.shuffle(rng);
                Self::from_assignment(&resources, &layout::default_numbers())
            }
        }
    }

    /// `resources` is indexed by letter order; `numbers` are handed out in
    /// order to the non-desert tiles, the desert always carrying 7.
    pub fn from_assignment(resources: &[Option<Resource>], numbers: &[u8]) -> Self {
        debug_assert_eq!(resources.len(), TILE_COUNT);
        let mut numbers = numbers.iter().copied();
        let mut tiles: Vec<Tile> = TILE_POSITIONS
            .iter()
            .zip(resources)
            .enumerate()
            .map(|(id, ((letter, coord), resource))| Tile {
                id,
                letter: *letter,
                coord: *coord,
                resource: *resource,
                number: match resource {
                    Some(_) => numbers.next().unwrap_or(DESERT_NUMBER),
                    None => DESERT_NUMBER,
                },
                nodes: SmallVec::new(),
                edges: SmallVec::new(),
            })
            .collect();

        let on_board: HashMap<CubeCoord, TileId> =
            tiles.iter().map(|tile| (tile.coord, tile.id)).collect();

        // corners are identified by the three hexes meeting there
        let mut corner_ids: HashMap<[CubeCoord; 3], NodeId> = HashMap::new();
        let mut intersections: Vec<Intersection> = Vec::with_capacity(NODE_COUNT);
        for tile in tiles.iter_mut() {
            for direction in Direction::CYCLE {
                let corner = tile.coord.corner(direction);
                let id = *corner_ids.entry(corner).or_insert_with(|| {
                    let tiles_here: SmallVec<[TileId; 3]> = corner
                        .iter()
                        .filter_map(|coord| on_board.get(coord).copied())
                        .sorted()
                        .collect();
                    intersections.push(Intersection {
                        id: intersections.len(),
                        key: String::new(),
                        tiles: tiles_here,
                        edges: SmallVec::new(),
                        neighbors: SmallVec::new(),
                        port: None,
                    });
                    intersections.len() - 1
                });
                tile.nodes.push(id);
            }
        }

        let mut edge_ids: HashMap<(NodeId, NodeId), EdgeId> = HashMap::new();
        let mut edges: Vec<Edge> = Vec::with_capacity(EDGE_COUNT);
        for tile in tiles.iter_mut() {
            for (idx, direction) in Direction::CYCLE.into_iter().enumerate() {
                let a = tile.nodes[(idx + 5) % 6];
                let b = tile.nodes[idx];
                let pair = (a.min(b), a.max(b));
                let neighbor = on_board.get(&tile.coord.neighbor(direction)).copied();
                let id = *edge_ids.entry(pair).or_insert_with(|| {
                    let tiles_here: SmallVec<[TileId; 2]> = std::iter::once(tile.id)
                        .chain(neighbor)
                        .sorted()
                        .collect();
                    edges.push(Edge {
                        id: edges.len(),
                        key: String::new(),
                        tiles: tiles_here,
                        nodes: pair,
                    });
                    edges.len() - 1
                });
                tile.edges.push(id);
            }
        }

        for edge in &edges {
            let (a, b) = edge.nodes;
            intersections[a].edges.push(edge.id);
            intersections[a].neighbors.push(b);
            intersections[b].edges.push(edge.id);
            intersections[b].neighbors.push(a);
        }

        assign_node_keys(&tiles, &mut intersections);
        for edge in edges.iter_mut() {
            let (a, b) = edge.nodes;
            edge.key = [&intersections[a].key, &intersections[b].key]
                .into_iter()
                .sorted()
                .join("|");
        }

        let mut ports = Vec::with_capacity(PORTS.len());
        for (letter, direction, kind) in PORTS {
            let tile = &tiles[tile_index(letter)];
            let edge = &edges[tile.edges[direction_index(direction)]];
            let (a, b) = edge.nodes;
            intersections[a].port = Some(kind);
            intersections[b].port = Some(kind);
            ports.push(Port { kind, nodes: [a, b] });
        }

        let node_keys = intersections
            .iter()
            .map(|node| (node.key.clone(), node.id))
            .collect();

        let mut graph = UnGraphMap::with_capacity(NODE_COUNT, EDGE_COUNT);
        for edge in &edges {
            graph.add_edge(edge.nodes.0, edge.nodes.1, edge.id);
        }

        Self {
            tiles,
            intersections,
            edges,
            ports,
            node_keys,
            graph,
        }
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn tile(&self, id: TileId) -> &Tile {
        &self.tiles[id]
    }

    pub fn tile_by_letter(&self, letter: char) -> Option<&Tile> {
        self.tiles.iter().find(|tile| tile.letter == letter)
    }

    pub fn desert(&self) -> Option<&Tile> {
        self.tiles.iter().find(|tile| tile.is_desert())
    }

    pub fn intersections(&self) -> &[Intersection] {
        &self.intersections
    }

    pub fn intersection(&self, id: NodeId) -> &Intersection {
        &self.intersections[id]
    }

    pub fn node(&self, key: &str) -> Option<NodeId> {
        self.node_keys.get(key).copied()
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id]
    }

    pub fn edge_between(&self, a: NodeId, b: NodeId) -> Option<EdgeId> {
        self.graph.edge_weight(a, b).copied()
    }

    pub fn ports(&self) -> &[Port] {
        &self.ports
    }

    /// Number of edge hops between two intersections.
    pub fn distance(&self, from: NodeId, to: NodeId) -> Option<usize> {
        dijkstra(&self.graph, from, Some(to), |_| 1usize)
            .get(&to)
            .copied()
    }

    /// Expected pips per resource for a set of (intersection, multiplier)
    /// holdings, skipping `blocked`.
    pub fn production(
        &self,
        holdings: impl IntoIterator<Item = (NodeId, u8)>,
        blocked: Option<TileId>,
    ) -> BTreeMap<Resource, u32> {
        let mut rolls: BTreeMap<Resource, u32> = Resource::ALL.iter().map(|r| (*r, 0)).collect();
        for (node, multiplier) in holdings {
            for &tile_id in &self.intersections[node].tiles {
                if Some(tile_id) == blocked {
                    continue;
                }
                let tile = &self.tiles[tile_id];
                if let Some(resource) = tile.resource {
                    *rolls.entry(resource).or_default() +=
                        tile.frequency() as u32 * multiplier as u32;
                }
            }
        }
        rolls
    }
}

fn tile_index(letter: char) -> TileId {
    (letter as u8 - b'a') as TileId
}

fn direction_index(direction: Direction) -> usize {
    Direction::CYCLE
        .iter()
        .position(|d| *d == direction)
        .unwrap_or_default()
}

/// Multi-tile corners are keyed by their sorted comma-joined letters;
/// single-tile corners by the letter and a running `1`/`2` suffix.
fn assign_node_keys(tiles: &[Tile], intersections: &mut [Intersection]) {
    let mut singles: HashMap<TileId, u8> = HashMap::new();
    for node in intersections.iter_mut() {
        node.key = match node.tiles.as_slice() {
            [only] => {
                let count = singles.entry(*only).or_insert(0);
                *count += 1;
                format!("{}{}", tiles[*only].letter, count)
            }
            many => many.iter().map(|t| tiles[*t].letter).sorted().join(","),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_board_has_expected_counts() {
        let topology = Topology::standard();
        assert_eq!(topology.tiles().len(), TILE_COUNT);
        assert_eq!(topology.intersections().len(), NODE_COUNT);
        assert_eq!(topology.edges().len(), EDGE_COUNT);
        assert_eq!(topology.ports().len(), 9);
    }

    #[test]
    fn node_keys_are_unique_and_canonical() {
        let topology = Topology::standard();
        let keys: std::collections::HashSet<_> =
            topology.intersections().iter().map(|n| n.key.clone()).collect();
        assert_eq!(keys.len(), NODE_COUNT);
        assert!(topology.node("a1").is_some());
        assert!(topology.node("a2").is_some());
        assert!(topology.node("a3").is_none());
        assert!(topology.node("a,b,e").is_some());
        assert!(topology.node("i,j,n").is_some());
    }

    #[test]
    fn corner_classes_match_a_nineteen_hex_board() {
        let topology = Topology::standard();
        let by_size = topology
            .intersections()
            .iter()
            .counts_by(|node| node.tiles.len());
        assert_eq!(by_size[&1], 18);
        assert_eq!(by_size[&2], 12);
        assert_eq!(by_size[&3], 24);
    }

    #[test]
    fn neighbours_are_one_hop_away() {
        let topology = Topology::standard();
        let a1 = topology.node("a1").unwrap();
        for &n in &topology.intersection(a1).neighbors {
            assert_eq!(topology.distance(a1, n), Some(1));
            assert!(topology.edge_between(a1, n).is_some());
        }
    }

    #[test]
    fn ports_sit_on_coastal_edges() {
        let topology = Topology::standard();
        for port in topology.ports() {
            let edge = topology.edge_between(port.nodes[0], port.nodes[1]).unwrap();
            assert_eq!(topology.edge(edge).tiles.len(), 1);
        }
        let with_port = topology
            .intersections()
            .iter()
            .filter(|n| n.port.is_some())
            .count();
        assert_eq!(with_port, 18);
    }

    #[test]
    fn random_layout_keeps_desert_on_seven() {
        use rand::SeedableRng;
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        let topology = Topology::build(MapLayout::Random, &mut rng);
        let desert = topology.desert().unwrap();
        assert_eq!(desert.number, 7);
        assert_eq!(
            topology.tiles().iter().filter(|t| t.number == 7).count(),
            1
        );
    }
}
