pub mod graph;
pub mod dijkstra;
pub mod a_star;
mod shortest_path;

pub use shortest_path::reconstruct_path;
use shortest_path::path_from_index;

use crate::collections::{FxHashMap, FxIndexMap};
use crate::errors::SearchError;

use std::{fmt::Debug, hash::Hash};
use num_traits::float::FloatCore;

/// Type alias for the node map used in path planning algorithms
/// N: Node - space on a graph
/// C: Cost of reaching the node from the start
/// The tuple contains (parent_index, cost) where:
/// - parent_index is the index of the parent node in the map, usize::MAX for the start
/// - cost is the best known cost to reach this node from the start (gScore)
pub type GraphNodeMap<N, C> = FxIndexMap<N, (usize, C)>;


/// Cost and path of a single search
/// `path` runs from the target back to the source. When the target was not
/// reached `cost` is infinity and `path` holds only the target.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchResult<N, C = f64> {
    pub cost: C,
    pub path: Vec<N>,
}

impl<N, C: FloatCore> SearchResult<N, C> {

    pub(crate) fn unreached(target: N) -> Self {
        Self { cost: C::infinity(), path: vec![target] }
    }

    pub fn is_reachable(&self) -> bool {
        self.cost.is_finite()
    }
}


/// Single source shortest path tree
/// Holds the best cost and predecessor of every node reached from the source.
#[derive(Clone, Debug)]
pub struct ShortestPaths<N, C = f64> {
    nodes: GraphNodeMap<N, C>,
}

impl<N, C> ShortestPaths<N, C>
where
    N: Eq + Hash + Clone + Debug,
    C: FloatCore + Debug,
{

    pub(crate) fn new(nodes: GraphNodeMap<N, C>) -> Self {
        Self { nodes }
    }

    pub fn source(&self) -> Option<&N> {
        self.nodes.get_index(0).map(|(node, _)| node)
    }

    /// Best cost from the source, infinity when unreached
    pub fn cost(&self, node: &N) -> C {
        self.nodes.get(node).map_or(C::infinity(), |&(_, cost)| cost)
    }

    /// Previous node on the best path, None for the source and unreached nodes
    pub fn predecessor(&self, node: &N) -> Option<&N> {
        let &(parent_index, _) = self.nodes.get(node)?;
        self.nodes.get_index(parent_index).map(|(parent, _)| parent)
    }

    pub fn is_reachable(&self, node: &N) -> bool {
        self.nodes.contains_key(node)
    }

    /// Number of reached nodes, the source included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Owned map of reached node -> best cost
    pub fn costs(&self) -> FxHashMap<N, C> {
        self.nodes.iter().map(|(node, &(_, cost))| (node.clone(), cost)).collect()
    }

    /// Owned map of reached node -> predecessor, the source has no entry
    pub fn predecessors(&self) -> FxHashMap<N, N> {
        self.nodes
            .iter()
            .filter_map(|(node, &(parent_index, _))| {
                self.nodes.get_index(parent_index).map(|(parent, _)| (node.clone(), parent.clone()))
            })
            .collect()
    }

    /// Path from `target` back to the source
    pub fn path_to(&self, target: &N) -> Result<Vec<N>, SearchError> {
        let index = self.nodes.get_index_of(target).ok_or(SearchError::Unreachable)?;
        path_from_index(&self.nodes, index)
    }

    /// Cost and path to `target`, unreached targets get infinity and `[target]`
    pub fn result_for(&self, target: &N) -> SearchResult<N, C> {
        match self.path_to(target) {
            Ok(path) => SearchResult { cost: self.cost(target), path },
            Err(_) => SearchResult::unreached(target.clone()),
        }
    }
}
