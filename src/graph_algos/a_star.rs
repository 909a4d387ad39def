use crate::collections::FxIndexMap;
use crate::queue::PrioritySet;
use super::{GraphNodeMap, SearchResult, ShortestPaths, path_from_index};
use super::dijkstra::graph_neighbors;
use super::graph::Graph;

use std::{hash::Hash, fmt::Debug};
use num_traits::float::FloatCore;
use indexmap::map::Entry::{Occupied, Vacant};


/// Outcome for one target of a multi-target search
#[derive(Clone, Debug, PartialEq)]
pub struct TargetResult<N, C = f64> {
    pub target: N,
    pub cost: C,
    pub path: Vec<N>,
}


/// A* from `source` to `target`
/// https://en.wikipedia.org/wiki/A*_search_algorithm
///
/// `heuristic` must never overestimate the remaining cost to `target`, the
/// result is only optimal under that condition and it is not checked.
/// Stops as soon as `target` is expanded. Unreached targets get infinity and `[target]`.
pub fn a_star<N, C, H>(graph: &Graph<N, C>, source: &N, target: &N, heuristic: H) -> SearchResult<N, C>
where
    N: Eq + Hash + Clone + Debug,
    C: FloatCore + Debug,
    H: Fn(&N) -> C,
{
    if source == target {
        return SearchResult { cost: C::zero(), path: vec![source.clone()] };
    }

    let (node_map, goal_index) = build_a_star_graph(
        source.clone(),
        |node: &N| graph_neighbors(graph, node),
        heuristic,
        |node| node == target,
    );

    goal_index
        .and_then(|index| {
            let (_, &(_, cost)) = node_map.get_index(index)?;
            let path = path_from_index(&node_map, index).ok()?;
            Some(SearchResult { cost, path })
        })
        .unwrap_or_else(|| SearchResult::unreached(target.clone()))
}


/// A* from `source` to several targets with a single search
/// The search is not cut short at the first target found, it runs until the
/// open set is empty and every target is answered from the shared result.
/// The heuristic still orders the expansion. Results follow the order of `targets`.
pub fn a_star_multi<N, C, H>(graph: &Graph<N, C>, source: &N, targets: &[N], heuristic: H) -> Vec<TargetResult<N, C>>
where
    N: Eq + Hash + Clone + Debug,
    C: FloatCore + Debug,
    H: Fn(&N) -> C,
{
    let (node_map, _) = build_a_star_graph(
        source.clone(),
        |node: &N| graph_neighbors(graph, node),
        heuristic,
        |_| false,
    );
    let paths = ShortestPaths::new(node_map);

    targets
        .iter()
        .map(|target| {
            let SearchResult { cost, path } = paths.result_for(target);
            TargetResult { target: target.clone(), cost, path }
        })
        .collect()
}


/// A* over an implicit graph
/// From start Node, traverse through graph until node meets goal criteria
/// The Approach has 2 requirements:
/// 1. The heuristic function must be admissible (never overestimates the true cost to reach the goal)
/// 2. A path actually exists between the start and goal nodes, otherwise None is returned
pub fn a_star_plan<N, C, IT, NN, H, G>(start: N, neighbors: NN, heuristic_fn: H, goal_fn: G) -> Option<SearchResult<N, C>>
where
    N: Eq + Hash + Clone + Debug,
    NN: Fn(&N) -> IT, // returns iterator of neighbors + costs
    H: Fn(&N) -> C, // heuristic function
    IT: IntoIterator<Item = (N, C)>, // Iterator of neighbors + edge cost to neighbor node
    C: FloatCore + Debug,
    G: Fn(&N) -> bool, // node qualifier for goal
    {

    let (node_map, goal_index) = build_a_star_graph(start, neighbors, heuristic_fn, goal_fn);

    let goal_index = goal_index?;
    let (_, &(_, cost)) = node_map.get_index(goal_index)?;
    let path = path_from_index(&node_map, goal_index).ok()?;
    Some(SearchResult { cost, path })
}


impl<N, C> Graph<N, C>
where
    N: Eq + Hash + Clone + Debug,
    C: FloatCore + Debug,
{
    /// See [`a_star`]
    pub fn a_star<H: Fn(&N) -> C>(&self, source: &N, target: &N, heuristic: H) -> SearchResult<N, C> {
        a_star(self, source, target, heuristic)
    }

    /// See [`a_star_multi`]
    pub fn a_star_multi<H: Fn(&N) -> C>(&self, source: &N, targets: &[N], heuristic: H) -> Vec<TargetResult<N, C>> {
        a_star_multi(self, source, targets, heuristic)
    }
}


/// Traverses the graph using A* algorithm
/// Returns a map of nodes with their smallest costs along with the index of the goal node
fn build_a_star_graph<N, C, IT, NN, H, G>(start: N, neighbors: NN, heuristic_fn: H, goal_fn: G) -> (GraphNodeMap<N, C>, Option<usize>)
where
    N: Eq + Hash + Clone + Debug,
    NN: Fn(&N) -> IT, // returns iterator of neighbors + costs
    IT: IntoIterator<Item = (N, C)>, // Iterator of neighbors + edge cost to neighbor node
    C: FloatCore + Debug,
    H: Fn(&N) -> C, // heuristic function
    G: Fn(&N) -> bool // Returns true if goal is met
{
    // Open set
    // Nodes that need to be evaluated, keyed by index in the closed_list
    // Sorting is done by f_cost (cost + heuristic), a pending node is only ever queued once
    let mut open_set: PrioritySet<usize, C> = PrioritySet::new();

    // Best known (parent_index, cost) per node, used to find the final path
    // for the start node, parent_index is set to usize::MAX to indicate it has no parent
    let mut closed_list: GraphNodeMap<N, C> = FxIndexMap::default();

    let start_f_cost = heuristic_fn(&start);
    let start_index = closed_list.insert_full(start, (usize::MAX, C::zero())).0;
    open_set.push(start_index, start_f_cost);

    let mut expanded = 0usize;

    while let Some((index, _)) = open_set.pop() {

        let Some((node, &(_, cost))) = closed_list.get_index(index) else {
            continue;
        };

        // Check if we've reached the goal
        if goal_fn(node) {
            log::debug!("a* reached {node:?} at cost {cost:?} after expanding {expanded} nodes");
            return (closed_list, Some(index));
        }
        expanded += 1;

        // loop over neighbors
        for (neighbor, edge_cost) in neighbors(node) {

            // new cost to reach this node = edge cost + node cost
            // This is confirmed cost, not heuristic
            let tentative_cost = cost + edge_cost;

            let (neighbor_index, f_cost) = match closed_list.entry(neighbor) {
                Vacant(e) => {
                    // This is the first time we're seeing this neighbor
                    let f_cost = tentative_cost + heuristic_fn(e.key());
                    let neighbor_index = e.index();
                    e.insert((index, tentative_cost));
                    (neighbor_index, f_cost)
                }
                Occupied(mut e) => {
                    if tentative_cost < e.get().1 {
                        // We've found a better path to this neighbor
                        let f_cost = tentative_cost + heuristic_fn(e.key());
                        e.insert((index, tentative_cost));
                        (e.index(), f_cost)
                    } else {
                        // The existing path is better, do nothing
                        continue;
                    }
                }
            };

            // Queues the neighbor, or lowers its f_cost if it is already pending
            open_set.push(neighbor_index, f_cost);
        }
    }

    log::debug!("a* exhausted the open set after expanding {expanded} of {} discovered nodes", closed_list.len());
    (closed_list, None)
}
