use crate::errors::SearchError;
use super::GraphNodeMap;

use std::{collections::HashMap, hash::{BuildHasher, Hash}};


/// Construct the path from the goal node back to the start node
/// Returns the path ordered goal first, start last
/// node_map: GraphNodeMap<N, C> - map of nodes with their parent index and cost
/// goal_index: usize - index of the goal node in the node_map
pub(crate) fn path_from_index<N, C>(node_map: &GraphNodeMap<N, C>, goal_index: usize) -> Result<Vec<N>, SearchError>
where
    N: Clone,
{

    let mut path = Vec::new();
    let mut current_index = goal_index;

    // Trace back from goal to start
    while current_index != usize::MAX {
        // Parent indices always point at earlier insertions, a longer walk means corruption
        if path.len() > node_map.len() {
            return Err(SearchError::BrokenPredecessorChain);
        }
        match node_map.get_index(current_index) {
            Some((node, &(parent_index, _))) => {
                path.push(node.clone());
                current_index = parent_index;
            }
            None => return Err(SearchError::Unreachable),
        }
    }

    Ok(path)
}


/// Rebuild a path from predecessor links
/// Walks `predecessors` from `target` until `source` is reached and returns the
/// nodes ordered target first, source last. `target == source` gives `[source]`.
///
/// Errors:
/// - `Unreachable` if `target` has no predecessor
/// - `BrokenPredecessorChain` if the links loop or end before `source`
pub fn reconstruct_path<N, S>(predecessors: &HashMap<N, N, S>, source: &N, target: &N) -> Result<Vec<N>, SearchError>
where
    N: Eq + Hash + Clone,
    S: BuildHasher,
{
    let mut path = vec![target.clone()];
    let mut current = target;

    while current != source {
        match predecessors.get(current) {
            Some(previous) => {
                path.push(previous.clone());
                // every node appears at most once on a valid chain
                if path.len() > predecessors.len() + 1 {
                    return Err(SearchError::BrokenPredecessorChain);
                }
                current = previous;
            }
            None if path.len() == 1 => return Err(SearchError::Unreachable),
            None => return Err(SearchError::BrokenPredecessorChain),
        }
    }

    Ok(path)
}
