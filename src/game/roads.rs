use std::collections::HashSet;

use petgraph::algo::kosaraju_scc;
use petgraph::graphmap::UnGraphMap;

use crate::board::NodeId;

/// Vertex ids handed to the per-road copies of a blocked intersection.
const SPLIT_BASE: usize = usize::MAX / 2;

/// Length in edges of the longest trail (no edge used twice) over `edges`.
///
/// Intersections for which `blocked` holds carry an opponent's building. A
/// trail may end there but not pass through, so every road touching such an
/// intersection gets its own private endpoint before the graph is split into
/// connected components.
pub fn longest_road(edges: &[(NodeId, NodeId)], blocked: impl Fn(NodeId) -> bool) -> usize {
    if edges.is_empty() {
        return 0;
    }
    let mut split = SPLIT_BASE;
    let mut endpoint = |node: NodeId| {
        if blocked(node) {
            split += 1;
            split
        } else {
            node
        }
    };
    let mut graph: UnGraphMap<usize, ()> = UnGraphMap::with_capacity(edges.len() * 2, edges.len());
    for &(a, b) in edges {
        let a = endpoint(a);
        let b = endpoint(b);
        graph.add_edge(a, b, ());
    }
    kosaraju_scc(&graph)
        .iter()
        .map(|component| {
            component
                .iter()
                .map(|start| trail_from(&graph, *start, &mut HashSet::new()))
                .max()
                .unwrap_or(0)
        })
        .max()
        .unwrap_or(0)
}

fn trail_from(
    graph: &UnGraphMap<usize, ()>,
    node: usize,
    used: &mut HashSet<(usize, usize)>,
) -> usize {
    let mut best = 0;
    for next in graph.neighbors(node) {
        let key = (node.min(next), node.max(next));
        if used.insert(key) {
            best = best.max(1 + trail_from(graph, next, used));
            used.remove(&key);
        }
    }
    best
}
