use crate::collections::FxIndexMap;

use std::{fmt, hash::Hash};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};


/// Directed weighted arc, the source node is implicit
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Edge<N, C = f64> {
    pub to: N,
    pub cost: C,
}

impl<N, C> Edge<N, C> {
    pub fn new(to: N, cost: C) -> Self {
        Self { to, cost }
    }
}


/// Weighted directed graph as an adjacency list
/// N: Node key - any hashable value, the graph never creates keys itself
/// C: Edge cost
///
/// Nodes without an entry simply have no outgoing edges. Searches only read
/// the graph, so a shared reference can be searched from several threads.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(bound(
    serialize = "N: Serialize + Eq + Hash, C: Serialize",
    deserialize = "N: Deserialize<'de> + Eq + Hash, C: Deserialize<'de>",
)))]
pub struct Graph<N, C = f64> {
    adjacency: FxIndexMap<N, Vec<Edge<N, C>>>,
}

impl<N, C> Graph<N, C>
where
    N: Eq + Hash + Clone,
{

    pub fn new() -> Self {
        Self { adjacency: FxIndexMap::default() }
    }

    pub fn with_capacity(nodes: usize) -> Self {
        Self { adjacency: FxIndexMap::with_capacity_and_hasher(nodes, Default::default()) }
    }

    /// Register a node with no outgoing edges (no-op if already present)
    pub fn add_node(&mut self, node: N) {
        self.adjacency.entry(node).or_default();
    }

    /// Add a directed edge, registering `from` if needed
    /// `to` is not registered, it only gets an entry if it has edges of its own.
    pub fn add_edge(&mut self, from: N, to: N, cost: C) {
        self.adjacency.entry(from).or_default().push(Edge { to, cost });
    }

    /// Add an edge in both directions
    pub fn add_undirected_edge(&mut self, a: N, b: N, cost: C)
    where
        C: Copy,
    {
        self.add_edge(a.clone(), b.clone(), cost);
        self.add_edge(b, a, cost);
    }

    /// Outgoing edges of a node, empty for unknown nodes
    pub fn edges(&self, node: &N) -> &[Edge<N, C>] {
        self.adjacency.get(node).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains_node(&self, node: &N) -> bool {
        self.adjacency.contains_key(node)
    }

    /// Number of nodes with an adjacency entry
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum()
    }

    /// Nodes with an adjacency entry, in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &N> {
        self.adjacency.keys()
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }
}

impl<N, C> Default for Graph<N, C>
where
    N: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<N, C> FromIterator<(N, Vec<Edge<N, C>>)> for Graph<N, C>
where
    N: Eq + Hash + Clone,
{
    fn from_iter<I: IntoIterator<Item = (N, Vec<Edge<N, C>>)>>(iter: I) -> Self {
        let mut graph = Self::new();
        graph.extend(iter);
        graph
    }
}

impl<N, C> Extend<(N, Vec<Edge<N, C>>)> for Graph<N, C>
where
    N: Eq + Hash + Clone,
{
    /// Edges for an existing node are appended, not replaced
    fn extend<I: IntoIterator<Item = (N, Vec<Edge<N, C>>)>>(&mut self, iter: I) {
        for (node, edges) in iter {
            self.adjacency.entry(node).or_default().extend(edges);
        }
    }
}

/// One `node -> [edges]` line per node, sorted so output is stable
impl<N, C> fmt::Display for Graph<N, C>
where
    N: fmt::Debug,
    C: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut lines: Vec<String> = self.adjacency
            .iter()
            .map(|(node, edges)| {
                let edges: Vec<String> = edges
                    .iter()
                    .map(|e| format!("{:?}:{:?}", e.to, e.cost))
                    .collect();
                format!("{:?} -> [{}]", node, edges.join(" "))
            })
            .collect();
        lines.sort();
        write!(f, "{}", lines.join("\n"))
    }
}
