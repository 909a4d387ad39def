//! Shortest paths over generic weighted graphs.
//!
//! A [`Graph`] maps any hashable node key to its outgoing [`Edge`]s. Searches
//! borrow the graph read-only and allocate their own state per call:
//!
//! - [`shortest_path_cost`] / [`compute_all_paths`]: Dijkstra, single target or full tree
//! - [`a_star`] / [`a_star_multi`]: A* with a caller supplied heuristic
//! - [`reconstruct_path`]: rebuild a path from predecessor links
//!
//! Costs are floats, an unreachable target costs `infinity`. Paths are
//! reported from the target back to the source.
//!
//! [`Grid`] and [`Point`] cover the common case of searching a 2D map.

pub mod collections;
pub mod errors;
pub mod geometry;
pub mod graph_algos;
pub mod grid;
pub mod queue;

pub use errors::SearchError;
pub use geometry::{Point, euclidean, manhattan_distance};
pub use graph_algos::{GraphNodeMap, SearchResult, ShortestPaths, reconstruct_path};
pub use graph_algos::graph::{Edge, Graph};
pub use graph_algos::dijkstra::{compute_all_paths, dijkstra, dijkstra_nodes_full, route, shortest_path_cost};
pub use graph_algos::a_star::{TargetResult, a_star, a_star_multi, a_star_plan};
pub use grid::Grid;
pub use queue::{PriorityQueue, PrioritySet};
