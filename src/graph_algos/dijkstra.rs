use crate::collections::FxIndexMap;
use crate::queue::PriorityQueue;
use super::{GraphNodeMap, SearchResult, ShortestPaths, path_from_index};
use super::graph::Graph;

use std::{hash::Hash, fmt::Debug};
use num_traits::float::FloatCore;
use indexmap::map::Entry::{Occupied, Vacant};


/// Cost of the cheapest path from `source` to `target` using Dijkstra's Algorithm
/// https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm
/// Stops as soon as the target is settled. Returns infinity if the target is unreachable.
pub fn shortest_path_cost<N, C>(graph: &Graph<N, C>, source: &N, target: &N) -> C
where
    N: Eq + Hash + Clone + Debug,
    C: FloatCore + Debug,
{
    if source == target {
        return C::zero();
    }

    let (node_map, goal_index) = build_dijkstra_graph(
        source.clone(),
        |node: &N| graph_neighbors(graph, node),
        |node| node == target,
    );

    match goal_index.and_then(|index| node_map.get_index(index)) {
        Some((_, &(_, cost))) => cost,
        None => C::infinity(),
    }
}


/// Shortest path tree from `source` to every reachable node
/// Use when many targets will be queried against the same source.
pub fn compute_all_paths<N, C>(graph: &Graph<N, C>, source: &N) -> ShortestPaths<N, C>
where
    N: Eq + Hash + Clone + Debug,
    C: FloatCore + Debug,
{
    let (node_map, _) = build_dijkstra_graph(
        source.clone(),
        |node: &N| graph_neighbors(graph, node),
        |_| false,
    );
    ShortestPaths::new(node_map)
}


/// Cost and path (target back to source) through a full single source run
pub fn route<N, C>(graph: &Graph<N, C>, source: &N, target: &N) -> SearchResult<N, C>
where
    N: Eq + Hash + Clone + Debug,
    C: FloatCore + Debug,
{
    compute_all_paths(graph, source).result_for(target)
}


/// Dijkstra over an implicit graph
/// From start Node, traverse through graph until a node meets the goal criteria
/// Returns the cost and path (goal back to start) of the first goal settled, None if no goal is reachable
pub fn dijkstra<N, C, IT, NN, G>(start: N, neighbors: NN, goal: G) -> Option<SearchResult<N, C>>
where
    N: Eq + Hash + Clone + Debug,
    NN: Fn(&N) -> IT, // returns iterator of neighbors + costs
    IT: IntoIterator<Item = (N, C)>, // Iterator of neighbors + edge cost to neighbor node
    C: FloatCore + Debug,
    G: Fn(&N) -> bool, // node qualifier for goal
    {

    // Build the graph - terminates when the goal is met
    let (node_map, goal_index) = build_dijkstra_graph(start, neighbors, goal);

    let goal_index = goal_index?;
    let (_, &(_, cost)) = node_map.get_index(goal_index)?;
    let path = path_from_index(&node_map, goal_index).ok()?;
    Some(SearchResult { cost, path })
}


/// Returns a full map of an implicit graph, includes all (reachable) nodes and costs
pub fn dijkstra_nodes_full<N, C, IT, NN>(start: N, neighbors: NN) -> ShortestPaths<N, C>
where
    N: Eq + Hash + Clone + Debug,
    NN: Fn(&N) -> IT,
    IT: IntoIterator<Item = (N, C)>,
    C: FloatCore + Debug,
    {

    let (node_map, _) = build_dijkstra_graph(start, neighbors, |_| false);
    ShortestPaths::new(node_map)
}


impl<N, C> Graph<N, C>
where
    N: Eq + Hash + Clone + Debug,
    C: FloatCore + Debug,
{
    /// See [`shortest_path_cost`]
    pub fn shortest_path_cost(&self, source: &N, target: &N) -> C {
        shortest_path_cost(self, source, target)
    }

    /// See [`compute_all_paths`]
    pub fn compute_all_paths(&self, source: &N) -> ShortestPaths<N, C> {
        compute_all_paths(self, source)
    }

    /// See [`route`]
    pub fn route(&self, source: &N, target: &N) -> SearchResult<N, C> {
        route(self, source, target)
    }
}


/// Outgoing (neighbor, cost) pairs of a node in an explicit graph
pub(crate) fn graph_neighbors<'g, N, C>(graph: &'g Graph<N, C>, node: &N) -> impl Iterator<Item = (N, C)> + use<'g, N, C>
where
    N: Eq + Hash + Clone,
    C: Copy,
{
    graph.edges(node).iter().map(|edge| (edge.to.clone(), edge.cost))
}


/// Traverses the graph using Dijkstra's algorithm
/// Returns a map of nodes with their smallest costs along with the index of the goal node
fn build_dijkstra_graph<N, C, IT, NN, G>(start: N, neighbors: NN, goal_fn: G) -> (GraphNodeMap<N, C>, Option<usize>)
where
    N: Eq + Hash + Clone + Debug,
    NN: Fn(&N) -> IT, // returns iterator of neighbors + costs
    IT: IntoIterator<Item = (N, C)>, // Iterator of neighbors + edge cost to neighbor node
    C: FloatCore + Debug,
    G: Fn(&N) -> bool // Returns true if goal is met
    {

    // Nodes to visit, lowest cost from the start first
    // A node may be queued several times, stale entries are skipped on pop
    let mut nodes_to_visit: PriorityQueue<usize, C> = PriorityQueue::new();

    // The tuple contains (parent_index, cost) where parent_index is the index of the parent node in the map
    // for the start node, parent_index is set to usize::MAX to indicate it has no parent
    let mut nodes_map: GraphNodeMap<N, C> = FxIndexMap::default();

    // Add start node to the map and queue
    let start_index = nodes_map.insert_full(start, (usize::MAX, C::zero())).0;
    nodes_to_visit.push(start_index, C::zero());

    let mut settled = 0usize;

    // Loop over each node to visit, removing the smallest node
    while let Some((index, cost)) = nodes_to_visit.pop() {

        // fetch current best cost for node
        let Some((node, &(_, c))) = nodes_map.get_index(index) else {
            continue;
        };

        // If cost of new node from the queue is higher than the best cost, skip it
        // This implies we've already found a better path to this node
        if cost > c {
            continue;
        }

        // Check if we've reached the goal
        if goal_fn(node) {
            log::debug!("dijkstra reached {node:?} at cost {c:?} after settling {settled} nodes");
            return (nodes_map, Some(index));
        }
        settled += 1;

        // loop over neighbors
        for (neighbor, edge_cost) in neighbors(node) {

            // new cost to reach this node = edge cost + node cost
            let new_cost = c + edge_cost;

            // Check if we've found a better path to this neighbor
            let neighbor_index;

            match nodes_map.entry(neighbor) {
                Vacant(e) => {
                    // This is the first time we're seeing this neighbor
                    neighbor_index = e.index();
                    e.insert((index, new_cost));
                }
                Occupied(mut e) => {
                    if new_cost < e.get().1 {
                        // We've found a better path to this neighbor
                        neighbor_index = e.index();
                        e.insert((index, new_cost));
                    } else {
                        // The existing path is better, do nothing
                        continue;
                    }
                }
            }

            // Only add to the queue if we've found a better path
            nodes_to_visit.push(neighbor_index, new_cost);
        }
    }

    log::debug!("dijkstra exhausted after settling {settled} of {} discovered nodes", nodes_map.len());
    (nodes_map, None)
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    // Helper function to create a test graph
    fn create_test_graph() -> Graph<String> {
        let mut graph = Graph::new();

        // Diamond-shaped graph: A -> B -> D and A -> C -> D
        graph.add_edge("A".to_string(), "B".to_string(), 1.0);
        graph.add_edge("A".to_string(), "C".to_string(), 3.0);
        graph.add_edge("B".to_string(), "D".to_string(), 5.0);
        graph.add_edge("C".to_string(), "D".to_string(), 1.0);
        graph.add_node("D".to_string());

        graph
    }

    // Helper function to create a neighbor function from an adjacency map
    // Assumes data stored as: HashMap<String, Vec<(String, f64)>>
    fn create_neighbor_fn(graph: &HashMap<String, Vec<(String, f64)>>) -> impl Fn(&String) -> Vec<(String, f64)> + '_ {
        move |node: &String| {
            graph.get(node).cloned().unwrap_or_default()
        }
    }

    fn s(node: &str) -> String {
        node.to_string()
    }

    #[test]
    fn test_build_dijkstra_graph_simple() {
        let graph = create_test_graph();

        // Run Dijkstra's algorithm from node A
        let (result, goal_index) = build_dijkstra_graph(
            s("A"),
            |node: &String| graph_neighbors(&graph, node),
            |node| node == "D" // Goal is to reach node D
        );
        assert!(goal_index.is_some());

        // Verify costs
        let costs: HashMap<_, _> = result.iter().map(|(node, (_, cost))| (node.clone(), *cost)).collect();

        assert_eq!(costs["A"], 0.0);
        assert_eq!(costs["B"], 1.0);
        assert_eq!(costs["C"], 3.0);
        assert_eq!(costs["D"], 4.0); // Should be 4 via the A->C->D path
    }

    #[test]
    fn test_shortest_path_cost_with_cycle() {
        // Create a graph with a cycle: A -> B -> C -> A
        let mut graph = Graph::new();
        graph.add_edge(s("A"), s("B"), 1.0);
        graph.add_edge(s("B"), s("C"), 1.0);
        graph.add_edge(s("C"), s("A"), 1.0);
        graph.add_edge(s("C"), s("D"), 2.0);

        assert_eq!(graph.shortest_path_cost(&s("A"), &s("D")), 4.0);
        assert_eq!(graph.shortest_path_cost(&s("B"), &s("A")), 2.0);
    }

    #[test]
    fn test_shortest_path_cost_same_node() {
        let graph = create_test_graph();
        assert_eq!(graph.shortest_path_cost(&s("C"), &s("C")), 0.0);

        // Not even present in the graph
        let empty: Graph<String> = Graph::new();
        assert_eq!(empty.shortest_path_cost(&s("Z"), &s("Z")), 0.0);
    }

    #[test]
    fn test_shortest_path_cost_unreachable() {
        let graph = create_test_graph();
        assert_eq!(graph.shortest_path_cost(&s("D"), &s("A")), f64::INFINITY);

        let empty: Graph<String> = Graph::new();
        assert!(empty.shortest_path_cost(&s("A"), &s("B")).is_infinite());
    }

    #[test]
    fn test_self_loop_does_not_help() {
        let mut graph: Graph<u8> = Graph::new();
        graph.add_edge(0, 0, 0.0);
        graph.add_edge(0, 1, 2.0);
        graph.add_edge(1, 1, 1.0);

        let paths = graph.compute_all_paths(&0);
        assert_eq!(paths.cost(&0), 0.0);
        assert_eq!(paths.cost(&1), 2.0);
        assert_eq!(paths.predecessor(&0), None);
        assert_eq!(paths.predecessor(&1), Some(&0));
    }

    #[test]
    fn test_compute_all_paths() {
        let graph = create_test_graph();
        let paths = graph.compute_all_paths(&s("A"));

        assert_eq!(paths.source(), Some(&s("A")));
        assert_eq!(paths.len(), 4);

        let costs = paths.costs();
        assert_eq!(costs[&s("D")], 4.0);

        let predecessors = paths.predecessors();
        assert_eq!(predecessors.len(), 3);
        assert!(!predecessors.contains_key(&s("A")));
        assert_eq!(predecessors[&s("D")], s("C"));

        assert_eq!(paths.path_to(&s("D")).unwrap(), vec!["D", "C", "A"]);
    }

    #[test]
    fn test_compute_all_paths_leaves_out_unreachable() {
        let mut graph = create_test_graph();
        graph.add_edge(s("X"), s("A"), 1.0);

        let paths = graph.compute_all_paths(&s("A"));
        assert!(!paths.is_reachable(&s("X")));
        assert!(paths.cost(&s("X")).is_infinite());
        assert!(!paths.costs().contains_key(&s("X")));
        assert!(!paths.predecessors().contains_key(&s("X")));
        assert!(paths.path_to(&s("X")).is_err());
    }

    #[test]
    fn test_route() {
        let graph = create_test_graph();

        let result = graph.route(&s("A"), &s("D"));
        assert_eq!(result.cost, 4.0);
        assert_eq!(result.path, vec!["D", "C", "A"]);

        let result = graph.route(&s("D"), &s("A"));
        assert!(!result.is_reachable());
        assert_eq!(result.path, vec!["A"]);
    }

    #[test]
    fn test_dijkstra_finds_optimal_path() {
        let graph = HashMap::from([
            (s("A"), vec![(s("B"), 4.0), (s("C"), 2.0)]),
            (s("B"), vec![(s("C"), 1.0), (s("D"), 5.0)]),
            (s("C"), vec![(s("D"), 8.0), (s("E"), 10.0)]),
            (s("D"), vec![(s("E"), 2.0), (s("F"), 6.0)]),
            (s("E"), vec![(s("F"), 3.0)]),
        ]);
        let neighbors = create_neighbor_fn(&graph);

        let result = dijkstra(s("A"), neighbors, |node| node == "F").unwrap();

        // A->B->D->E->F
        assert_eq!(result.cost, 14.0);
        assert_eq!(result.path, vec!["F", "E", "D", "B", "A"]);
    }

    #[test]
    fn test_dijkstra_handles_unreachable_goal() {
        let graph = HashMap::from([
            (s("A"), vec![(s("B"), 1.0)]),
            (s("B"), vec![(s("C"), 1.0)]),
            (s("D"), vec![]),
        ]);
        let neighbors = create_neighbor_fn(&graph);

        assert!(dijkstra(s("A"), neighbors, |node| node == "D").is_none());
    }

    #[test]
    fn test_dijkstra_stops_at_goal() {
        // A -> B -> D (cost 2) is the shortest path to goal
        // A -> C -> E/F -> G/H are high-cost paths that shouldn't be explored
        let graph = HashMap::from([
            (s("A"), vec![(s("B"), 1.0), (s("C"), 10.0)]),
            (s("B"), vec![(s("D"), 1.0)]),
            (s("C"), vec![(s("E"), 5.0), (s("F"), 20.0)]),
            (s("E"), vec![(s("G"), 5.0)]),
            (s("F"), vec![(s("H"), 1.0)]),
        ]);
        let neighbors = create_neighbor_fn(&graph);

        let (node_map, _) = build_dijkstra_graph(s("A"), neighbors, |node| node == "D");

        for node in ["A", "B", "C", "D"] {
            assert!(node_map.contains_key(node), "Node {node} should be explored");
        }
        for node in ["E", "F", "G", "H"] {
            assert!(!node_map.contains_key(node), "Node {node} should not be explored");
        }
    }

    #[test]
    fn test_dijkstra_nodes_full_on_implicit_line() {
        // 0 -> 1 -> ... -> 9, each step costs the node value
        let paths = dijkstra_nodes_full(0u32, |&n: &u32| {
            (n < 9).then(|| (n + 1, f64::from(n))).into_iter()
        });

        assert_eq!(paths.len(), 10);
        assert_eq!(paths.cost(&9), 36.0);
        assert_eq!(paths.path_to(&3).unwrap(), vec![3, 2, 1, 0]);
    }
}
